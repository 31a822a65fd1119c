use crate::interpreter::error::{CalculatorError, Result};
use crate::interpreter::lexer::Lexer;
use crate::interpreter::operation::{Associativity, Operation, CLOSE_GROUP};
use crate::interpreter::parser::Parser;
use crate::interpreter::syntax::expression_tree::Expression;
use log::trace;

/// How many prefix operations and groups may enclose each other before parsing gives up.
pub const NESTING_LIMIT: usize = 256;

/// Builds an expression tree directly from the tokens by precedence climbing.
///
/// Every recursive call carries a priority floor: an operation is folded into the current
/// operand only while its priority is above the floor.
pub struct ExpressionParser<'a> {
    lexer: Lexer<'a>,
    depth: usize,
}

impl<'a> ExpressionParser<'a> {
    pub fn new(lexer: Lexer<'a>) -> ExpressionParser<'a> {
        ExpressionParser { lexer, depth: 0 }
    }

    fn parse_expression(&mut self, floor: i32) -> Result<Expression> {
        if self.depth >= NESTING_LIMIT {
            return Err(CalculatorError::NestingTooDeep {
                limit: NESTING_LIMIT,
            });
        }
        self.depth += 1;
        let result = self.climb(floor);
        self.depth -= 1;
        result
    }

    fn climb(&mut self, floor: i32) -> Result<Expression> {
        let mut result = self.parse_token()?;
        while let Some(operation) = self.next_operation()? {
            if operation.priority() <= floor {
                break;
            }
            self.lexer.extract_token();
            trace!("folding '{}' above priority {}", operation, floor);
            result = self.process_operation(result, operation)?;
        }
        Ok(result)
    }

    /// Parses an operand: a value, or a prefix operation together with what it applies to.
    fn parse_token(&mut self) -> Result<Expression> {
        let token = self
            .lexer
            .extract_token()
            .ok_or(CalculatorError::UnexpectedEndOfExpression)?;
        if token.is_value() {
            return Ok(Expression::new_value(token.text));
        }

        let operation = *self.lexer.grammar().get_prefix_operation(&token.text)?;
        match operation {
            Operation::Prefix { build, .. } if operation.is_open_group() => {
                let inner = self.parse_expression(0)?;
                self.expect_close_group()?;
                Ok(build(inner))
            }
            Operation::Prefix {
                priority, build, ..
            } => {
                let operand = self.parse_expression(priority)?;
                Ok(build(operand))
            }
            _ => Err(CalculatorError::UnknownPrefixOperation(token.text)),
        }
    }

    fn process_operation(&mut self, left: Expression, operation: Operation) -> Result<Expression> {
        match operation {
            Operation::Postfix { build, .. } => Ok(build(left)),
            Operation::Infix {
                priority,
                associativity,
                build,
                ..
            } => {
                // Lowering the floor lets a right-associative operation bind its own kind again.
                let floor = match associativity {
                    Associativity::Left => priority,
                    Associativity::Right => priority - 1,
                };
                let right = self.parse_expression(floor)?;
                Ok(build(left, right))
            }
            Operation::Prefix { name, .. } => {
                Err(CalculatorError::UnknownOperation(name.to_string()))
            }
        }
    }

    /// Peeks at the next token, which has to be an infix or postfix operation.
    fn next_operation(&self) -> Result<Option<Operation>> {
        match self.lexer.read_token() {
            None => Ok(None),
            Some(token) if token.is_value() => Err(CalculatorError::InvalidExpression(token.text)),
            Some(token) => Ok(Some(*self.lexer.grammar().get_operation(&token.text)?)),
        }
    }

    fn expect_close_group(&mut self) -> Result<()> {
        match self.lexer.extract_token() {
            Some(token) if token.text == CLOSE_GROUP => Ok(()),
            _ => Err(CalculatorError::UnmatchedParentheses),
        }
    }
}

impl<'a> Parser for ExpressionParser<'a> {
    fn parse(&mut self) -> Result<Option<Expression>> {
        if self.lexer.read_token().is_none() {
            return Ok(None);
        }
        let expression = self.parse_expression(0)?;
        match self.lexer.extract_token() {
            None => Ok(Some(expression)),
            Some(token) if token.text == CLOSE_GROUP => Err(CalculatorError::UnmatchedParentheses),
            Some(token) => Err(CalculatorError::InvalidExpression(token.text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::grammar::{calculator_grammar, Grammar};
    use parameterized_macro::parameterized;

    fn parse(expression: &str) -> Result<Option<Expression>> {
        ExpressionParser::new(Lexer::new(calculator_grammar(), expression)).parse()
    }

    fn evaluate(expression: &str) -> f64 {
        parse(expression).unwrap().unwrap().evaluate().unwrap()
    }

    fn value(text: &str) -> Expression {
        Expression::new_value(text)
    }

    #[test]
    fn empty_expression_parses_to_nothing() {
        pretty_assertions::assert_eq!(parse("").unwrap(), None);
    }

    #[test]
    fn single_value_parses_to_value() {
        pretty_assertions::assert_eq!(parse("42").unwrap(), Some(value("42")));
    }

    #[test]
    fn product_binds_tighter_than_sum() {
        let expected =
            Expression::new_sum(value("1"), Expression::new_product(value("2"), value("3")));
        pretty_assertions::assert_eq!(parse("1 + 2 * 3").unwrap(), Some(expected));
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expected = Expression::new_difference(
            Expression::new_difference(value("10"), value("5")),
            value("2"),
        );
        pretty_assertions::assert_eq!(parse("10 - 5 - 2").unwrap(), Some(expected));
    }

    #[test]
    fn exponentiation_is_right_associative() {
        let expected =
            Expression::new_power(value("4"), Expression::new_power(value("3"), value("2")));
        pretty_assertions::assert_eq!(parse("4 ^ 3 ^ 2").unwrap(), Some(expected));
    }

    #[test]
    fn postfix_operations_chain() {
        let expected = Expression::new_factorial(Expression::new_factorial(value("3")));
        pretty_assertions::assert_eq!(parse("3 ! !").unwrap(), Some(expected));
    }

    #[test]
    fn negation_applies_after_exponentiation() {
        let expected = Expression::new_negation(Expression::new_power(value("2"), value("2")));
        pretty_assertions::assert_eq!(parse("- 2 ^ 2").unwrap(), Some(expected));
    }

    #[test]
    fn function_binds_tighter_than_exponentiation() {
        let expected = Expression::new_power(Expression::new_sine(value("90")), value("2"));
        pretty_assertions::assert_eq!(parse("sin 90 ^ 2").unwrap(), Some(expected));
    }

    #[test]
    fn parentheses_are_dropped_from_tree() {
        let expected =
            Expression::new_product(Expression::new_sum(value("2"), value("1")), value("3"));
        pretty_assertions::assert_eq!(parse("( ( 2 + 1 ) ) * 3").unwrap(), Some(expected));
    }

    #[parameterized(
    expression = {
    "1 + 2",
    "- 3 + 4",
    "3 + 4 + 5 + 1 + 86 + 18 + 33 + - 77",
    "59 - 82 - 92 - 2 - 5 - - 84",
    "4 + 32 - 6 + 33 - 72",
    "97 * 6 - 6 + 7 * 4",
    "2 ^ 3 * 10",
    "4 ^ 3 ^ 2",
    "2 * - 3 ^ 2",
    "3 **",
    "2 ^ 3 !",
    "- 3 !",
    "1 + 2 ^ ( 20 / 5 / 1 ) * 3 - 2 * 5 + 3",
    "fib ( 2 ^ ( fib 3 ) ) * 4 + 1",
    },
    expected = {
    3.0,
    1.0,
    3.0 + 4.0 + 5.0 + 1.0 + 86.0 + 18.0 + 33.0 - 77.0,
    59.0 - 82.0 - 92.0 - 2.0 - 5.0 + 84.0,
    4.0 + 32.0 - 6.0 + 33.0 - 72.0,
    97.0 * 6.0 - 6.0 + 7.0 * 4.0,
    80.0,
    262144.0,
    -18.0,
    9.0,
    64.0,
    -6.0,
    42.0,
    13.0,
    }
    )]
    fn expression_evaluates_to_expected_value(expression: &str, expected: f64) {
        assert_eq!(evaluate(expression), expected);
    }

    #[parameterized(
    expression = {
    "1 2 3",
    "1 +",
    "- ",
    "( 1 + 2",
    "1 + 2 )",
    "( )",
    "* 3",
    "2 sin 3",
    },
    expected = {
    CalculatorError::InvalidExpression("2".into()),
    CalculatorError::UnexpectedEndOfExpression,
    CalculatorError::UnexpectedEndOfExpression,
    CalculatorError::UnmatchedParentheses,
    CalculatorError::UnmatchedParentheses,
    CalculatorError::UnknownPrefixOperation(")".into()),
    CalculatorError::UnknownPrefixOperation("*".into()),
    CalculatorError::UnknownOperation("sin".into()),
    }
    )]
    fn malformed_expression_fails(expression: &str, expected: CalculatorError) {
        assert_eq!(parse(expression).unwrap_err(), expected);
    }

    #[test]
    fn nesting_up_to_limit_is_parsed() {
        let expression = format!("{}1", "- ".repeat(NESTING_LIMIT - 1));
        assert_eq!(evaluate(&expression), -1.0);
    }

    #[test]
    fn nesting_past_limit_fails() {
        let expression = format!("{}1", "- ".repeat(NESTING_LIMIT));
        assert_eq!(
            parse(&expression).unwrap_err(),
            CalculatorError::NestingTooDeep {
                limit: NESTING_LIMIT
            }
        );
    }

    #[test]
    fn long_left_associative_chain_does_not_nest() {
        let expression = vec!["1"; 1000].join(" + ");
        assert_eq!(evaluate(&expression), 1000.0);
    }

    #[test]
    fn custom_grammar_drives_parsing() {
        let grammar = Grammar::new(vec![
            Operation::new_infix("@", 1, Associativity::Right, Expression::new_difference),
            Operation::new_infix("#", 7, Associativity::Left, Expression::new_product),
        ]);

        let tree = ExpressionParser::new(Lexer::new(&grammar, "8 @ 4 @ 1 # 2"))
            .parse()
            .unwrap()
            .unwrap();

        // 8 - (4 - (1 * 2))
        assert_eq!(tree.evaluate(), Ok(6.0));
    }
}
