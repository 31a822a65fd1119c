use crate::interpreter::error::{CalculatorError, Result};
use std::f64::consts::PI;
use std::fmt;
use std::fmt::Formatter;

/// Fibonacci arguments must stay strictly below this, the naive recursion is exponential.
pub const FIBONACCI_LIMIT: u32 = 30;

/// A binary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponentiate,
}

/// An unary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Square,
    Factorial,
    Sine,
    Cosine,
    Tangent,
    Fibonacci,
    Negate,
    Identity,
}

/// Which side of its operand an unary operator is written on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Fixity {
    Prefix,
    Postfix,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Exponentiate => "^",
        }
    }

    /// Division by zero is not an error, it yields an infinity or NaN like any float division.
    pub fn evaluate(&self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOperator::Add => a + b,
            BinaryOperator::Subtract => a - b,
            BinaryOperator::Multiply => a * b,
            BinaryOperator::Divide => a / b,
            BinaryOperator::Exponentiate => f64::powf(a, b),
        }
    }
}

impl UnaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Square => "**",
            UnaryOperator::Factorial => "!",
            UnaryOperator::Sine => "sin",
            UnaryOperator::Cosine => "cos",
            UnaryOperator::Tangent => "tan",
            UnaryOperator::Fibonacci => "fib",
            UnaryOperator::Negate => "-",
            UnaryOperator::Identity => "+",
        }
    }

    pub fn fixity(&self) -> Fixity {
        match self {
            UnaryOperator::Square | UnaryOperator::Factorial => Fixity::Postfix,
            UnaryOperator::Sine
            | UnaryOperator::Cosine
            | UnaryOperator::Tangent
            | UnaryOperator::Fibonacci
            | UnaryOperator::Negate
            | UnaryOperator::Identity => Fixity::Prefix,
        }
    }

    /// Trigonometric operators take their operand in degrees.
    pub fn evaluate(&self, x: f64) -> Result<f64> {
        match self {
            UnaryOperator::Square => Ok(x * x),
            UnaryOperator::Factorial => factorial(x),
            UnaryOperator::Sine => Ok(f64::sin(degrees_to_radians(x))),
            UnaryOperator::Cosine => Ok(f64::cos(degrees_to_radians(x))),
            UnaryOperator::Tangent => Ok(f64::tan(degrees_to_radians(x))),
            UnaryOperator::Fibonacci => fibonacci_of(x),
            UnaryOperator::Negate => Ok(-x),
            UnaryOperator::Identity => Ok(x),
        }
    }
}

fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

fn require_integer(operation: &'static str, value: f64) -> Result<()> {
    if value.fract() != 0.0 {
        return Err(CalculatorError::NonIntegerArgument { operation, value });
    }
    Ok(())
}

/// Overflows to infinity instead of failing. The loop stops as soon as the product is
/// infinite, so even huge arguments cost at most a couple of hundred multiplications.
fn factorial(n: f64) -> Result<f64> {
    if n < 0.0 {
        return Err(CalculatorError::NegativeFactorial(n));
    }
    require_integer("factorial", n)?;

    let mut product: f64 = 1.0;
    let mut factor = 2.0;
    while factor <= n && product.is_finite() {
        product *= factor;
        factor += 1.0;
    }
    Ok(product)
}

fn fibonacci_of(n: f64) -> Result<f64> {
    if n < 0.0 {
        return Err(CalculatorError::NegativeFibonacciArgument(n));
    }
    if n >= FIBONACCI_LIMIT as f64 {
        return Err(CalculatorError::FibonacciArgumentTooLarge {
            value: n,
            limit: FIBONACCI_LIMIT,
        });
    }
    require_integer("fibonacci", n)?;
    Ok(fibonacci(n as u32) as f64)
}

fn fibonacci(n: u32) -> u64 {
    match n {
        0 => 0,
        1 | 2 => 1,
        n => fibonacci(n - 1) + fibonacci(n - 2),
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
