use thiserror::Error;

pub type Result<T> = std::result::Result<T, CalculatorError>;

/// Everything that can go wrong while parsing or evaluating a single expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculatorError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
    #[error("Unknown prefix operation: {0}")]
    UnknownPrefixOperation(String),
    #[error("Invalid expression: expected an operation but found '{0}'")]
    InvalidExpression(String),
    #[error("Unexpected end of expression")]
    UnexpectedEndOfExpression,
    #[error("Unmatched parentheses")]
    UnmatchedParentheses,
    #[error("Expression is nested more than {limit} levels deep")]
    NestingTooDeep { limit: usize },
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Factorial is not defined for negative numbers: {0}")]
    NegativeFactorial(f64),
    #[error("Fibonacci argument must not be negative: {0}")]
    NegativeFibonacciArgument(f64),
    #[error("Fibonacci argument must be less than {limit}: {value}")]
    FibonacciArgumentTooLarge { value: f64, limit: u32 },
    #[error("{operation} requires an integer argument, got {value}")]
    NonIntegerArgument { operation: &'static str, value: f64 },
    #[error("Stack underflow")]
    StackUnderflow,
    #[error("{0} operands were left unconsumed on the stack")]
    UnconsumedOperands(usize),
    #[error("Unknown parser mode: {0}")]
    UnknownParserMode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let error = CalculatorError::UnknownOperation("~".into());
        assert_eq!(error.to_string(), "Unknown operation: ~");

        let error = CalculatorError::FibonacciArgumentTooLarge {
            value: 30.0,
            limit: 30,
        };
        assert_eq!(
            error.to_string(),
            "Fibonacci argument must be less than 30: 30"
        );
    }
}
