use crate::interpreter::error::{CalculatorError, Result};
use crate::interpreter::operation::Operation;
use crate::interpreter::syntax::expression_tree::{parse_number, Expression};
use itertools::Itertools;
use std::fmt;
use std::fmt::Formatter;

/// An element of an expression in postfix order.
#[derive(Debug, Clone, PartialEq)]
pub enum RpnToken {
    Value(String),
    Literal(f64),
    Operation(Operation),
}

impl fmt::Display for RpnToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RpnToken::Value(text) => write!(f, "{}", text),
            RpnToken::Literal(value) => write!(f, "{}", value),
            RpnToken::Operation(operation) => write!(f, "{}", operation),
        }
    }
}

/// An expression in Reverse Polish Notation, evaluated on an operand stack.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RpnExpression {
    tokens: Vec<RpnToken>,
}

impl RpnExpression {
    pub fn new(tokens: Vec<RpnToken>) -> RpnExpression {
        RpnExpression { tokens }
    }

    pub fn tokens(&self) -> &[RpnToken] {
        &self.tokens
    }

    /// Runs the stack machine over the tokens.
    ///
    /// Operators are applied by building their expression node over literal operands, so the
    /// results are exactly those of the equivalent tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use calculator::interpreter::grammar::calculator_grammar;
    /// use calculator::interpreter::syntax::rpn::{RpnExpression, RpnToken};
    /// # fn main() -> calculator::interpreter::error::Result<()> {
    ///
    /// let plus = *calculator_grammar().get_operation("+")?;
    /// let rpn = RpnExpression::new(vec![
    ///     RpnToken::Value("2".to_string()),
    ///     RpnToken::Value("1".to_string()),
    ///     RpnToken::Operation(plus),
    /// ]);
    /// assert_eq!(rpn.evaluate()?, 3.0);
    /// # Ok(()) }
    /// ```
    pub fn evaluate(&self) -> Result<f64> {
        let mut operands: Vec<f64> = Vec::with_capacity(self.tokens.len());

        for token in &self.tokens {
            let value = match token {
                RpnToken::Value(text) => parse_number(text)?,
                RpnToken::Literal(value) => *value,
                RpnToken::Operation(Operation::Infix { build, .. }) => {
                    let right_operand = pop_operand(&mut operands)?;
                    let left_operand = pop_operand(&mut operands)?;
                    build(
                        Expression::new_literal(left_operand),
                        Expression::new_literal(right_operand),
                    )
                    .evaluate()?
                }
                RpnToken::Operation(
                    Operation::Prefix { build, .. } | Operation::Postfix { build, .. },
                ) => {
                    let operand = pop_operand(&mut operands)?;
                    build(Expression::new_literal(operand)).evaluate()?
                }
            };
            operands.push(value);
        }

        let result = pop_operand(&mut operands)?;
        if !operands.is_empty() {
            return Err(CalculatorError::UnconsumedOperands(operands.len()));
        }
        Ok(result)
    }
}

fn pop_operand(operands: &mut Vec<f64>) -> Result<f64> {
    operands.pop().ok_or(CalculatorError::StackUnderflow)
}

impl fmt::Display for RpnExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.iter().join(" "))
    }
}
