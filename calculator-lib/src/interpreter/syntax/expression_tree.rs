use crate::interpreter::error::{CalculatorError, Result};
use crate::interpreter::grammar::Grammar;
use crate::interpreter::operation::Operation;
use crate::interpreter::operator::{BinaryOperator, Fixity, UnaryOperator};
use crate::interpreter::syntax::rpn::{RpnExpression, RpnToken};
use crate::interpreter::syntax::syntax_visitor::{
    walk_binary_operation, walk_unary_operation, SyntaxVisitor,
};
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    // Terminal symbols (leaves)
    Value(String),
    Literal(f64),
    // Non-terminal symbols (non-leaves)
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Expression>,
        right_operand: Box<Expression>,
    },
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    Rpn(RpnExpression),
}

impl Expression {
    pub fn new_value(text: impl Into<String>) -> Expression {
        Expression::Value(text.into())
    }

    pub fn new_literal(value: f64) -> Expression {
        Expression::Literal(value)
    }

    pub fn new_rpn(rpn: RpnExpression) -> Expression {
        Expression::Rpn(rpn)
    }

    pub fn new_binary_operation(
        operator: BinaryOperator,
        left_operand: Expression,
        right_operand: Expression,
    ) -> Expression {
        Expression::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    pub fn new_unary_operation(operator: UnaryOperator, operand: Expression) -> Expression {
        Expression::UnaryOperation {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn new_sum(left_operand: Expression, right_operand: Expression) -> Expression {
        Self::new_binary_operation(BinaryOperator::Add, left_operand, right_operand)
    }

    pub fn new_difference(left_operand: Expression, right_operand: Expression) -> Expression {
        Self::new_binary_operation(BinaryOperator::Subtract, left_operand, right_operand)
    }

    pub fn new_product(left_operand: Expression, right_operand: Expression) -> Expression {
        Self::new_binary_operation(BinaryOperator::Multiply, left_operand, right_operand)
    }

    pub fn new_quotient(left_operand: Expression, right_operand: Expression) -> Expression {
        Self::new_binary_operation(BinaryOperator::Divide, left_operand, right_operand)
    }

    pub fn new_power(left_operand: Expression, right_operand: Expression) -> Expression {
        Self::new_binary_operation(BinaryOperator::Exponentiate, left_operand, right_operand)
    }

    pub fn new_square(operand: Expression) -> Expression {
        Self::new_unary_operation(UnaryOperator::Square, operand)
    }

    pub fn new_factorial(operand: Expression) -> Expression {
        Self::new_unary_operation(UnaryOperator::Factorial, operand)
    }

    pub fn new_sine(operand: Expression) -> Expression {
        Self::new_unary_operation(UnaryOperator::Sine, operand)
    }

    pub fn new_cosine(operand: Expression) -> Expression {
        Self::new_unary_operation(UnaryOperator::Cosine, operand)
    }

    pub fn new_tangent(operand: Expression) -> Expression {
        Self::new_unary_operation(UnaryOperator::Tangent, operand)
    }

    pub fn new_fibonacci(operand: Expression) -> Expression {
        Self::new_unary_operation(UnaryOperator::Fibonacci, operand)
    }

    pub fn new_negation(operand: Expression) -> Expression {
        Self::new_unary_operation(UnaryOperator::Negate, operand)
    }

    pub fn new_identity(operand: Expression) -> Expression {
        Self::new_unary_operation(UnaryOperator::Identity, operand)
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Expression::Value(_) | Expression::Literal(_))
    }

    /// Computes the numeric value of the expression.
    ///
    /// Evaluation has no side effects, so an expression can be evaluated any number of times.
    ///
    /// # Examples
    ///
    /// ```
    /// use calculator::interpreter::syntax::expression_tree::Expression;
    ///
    /// let sum = Expression::new_sum(Expression::new_value("33"), Expression::new_value("54"));
    /// assert_eq!(sum.evaluate(), Ok(87.0));
    /// ```
    pub fn evaluate(&self) -> Result<f64> {
        match self {
            Expression::Value(text) => parse_number(text),
            Expression::Literal(value) => Ok(*value),
            Expression::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => Ok(operator.evaluate(left_operand.evaluate()?, right_operand.evaluate()?)),
            Expression::UnaryOperation { operator, operand } => {
                operator.evaluate(operand.evaluate()?)
            }
            Expression::Rpn(rpn) => rpn.evaluate(),
        }
    }

    /// Serializes the tree into postfix order, resolving every operator through the given grammar.
    pub fn to_postfix(&self, grammar: &Grammar) -> Result<RpnExpression> {
        let mut visitor = PostfixVisitor {
            grammar,
            tokens: vec![],
            error: None,
        };
        self.accept(&mut visitor);
        match visitor.error {
            Some(error) => Err(error),
            None => Ok(RpnExpression::new(visitor.tokens)),
        }
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Expression::Value(text) => visitor.visit_value(text),
            Expression::Literal(value) => visitor.visit_literal(*value),
            Expression::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_binary_operation(operator, left_operand, right_operand),
            Expression::UnaryOperation { operator, operand } => {
                visitor.visit_unary_operation(operator, operand)
            }
            Expression::Rpn(rpn) => visitor.visit_rpn(rpn),
        }
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        match write_tree(&visitor.builder.build(), &mut buffer) {
            Ok(_) => {}
            Err(_) => return Err(fmt::Error),
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

/// Parses a numeric literal. Only finite numbers are accepted.
pub(crate) fn parse_number(text: &str) -> Result<f64> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalculatorError::InvalidNumber(text.to_string())),
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_value(&mut self, text: &str) {
        self.builder.add_empty_child(text.to_string());
    }
    fn visit_literal(&mut self, value: f64) {
        self.builder.add_empty_child(format!("{}", value));
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Expression,
        right_operand: &Expression,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_binary_operation(self, left_operand, right_operand);
        self.builder.end_child();
    }
    fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Expression) {
        self.builder.begin_child(format!("{}", operator));
        walk_unary_operation(self, operand);
        self.builder.end_child();
    }
    fn visit_rpn(&mut self, rpn: &RpnExpression) {
        self.builder.begin_child("rpn".into());
        for token in rpn.tokens() {
            self.builder.add_empty_child(token.to_string());
        }
        self.builder.end_child();
    }
}

struct PostfixVisitor<'a> {
    grammar: &'a Grammar,
    tokens: Vec<RpnToken>,
    error: Option<CalculatorError>,
}

impl<'a> PostfixVisitor<'a> {
    fn push_operation(&mut self, operation: Result<&'a Operation>) {
        match operation {
            Ok(operation) => self.tokens.push(RpnToken::Operation(*operation)),
            Err(error) => {
                if self.error.is_none() {
                    self.error = Some(error);
                }
            }
        }
    }
}

impl<'a> SyntaxVisitor for PostfixVisitor<'a> {
    fn visit_value(&mut self, text: &str) {
        self.tokens.push(RpnToken::Value(text.to_string()));
    }
    fn visit_literal(&mut self, value: f64) {
        self.tokens.push(RpnToken::Literal(value));
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Expression,
        right_operand: &Expression,
    ) {
        walk_binary_operation(self, left_operand, right_operand);
        let operation = self.grammar.get_operation(operator.symbol());
        self.push_operation(operation);
    }
    fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Expression) {
        walk_unary_operation(self, operand);
        let operation = match operator.fixity() {
            Fixity::Prefix => self.grammar.get_prefix_operation(operator.symbol()),
            Fixity::Postfix => self.grammar.get_operation(operator.symbol()),
        };
        self.push_operation(operation);
    }
    fn visit_rpn(&mut self, rpn: &RpnExpression) {
        self.tokens.extend(rpn.tokens().iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::grammar::calculator_grammar;
    use pretty_assertions::assert_eq;

    #[test]
    fn value_evaluates_to_its_number() {
        assert_eq!(Expression::new_value("42").evaluate(), Ok(42.0));
        assert_eq!(Expression::new_value("0.25").evaluate(), Ok(0.25));
    }

    #[test]
    fn non_numeric_value_fails() {
        assert_eq!(
            Expression::new_value("value").evaluate(),
            Err(CalculatorError::InvalidNumber("value".into()))
        );
    }

    #[test]
    fn non_finite_value_fails() {
        assert_eq!(
            Expression::new_value("inf").evaluate(),
            Err(CalculatorError::InvalidNumber("inf".into()))
        );
    }

    #[test]
    fn nested_sums_evaluate() {
        let left = Expression::new_sum(Expression::new_value("33"), Expression::new_value("54"));
        let right = Expression::new_sum(Expression::new_value("58"), Expression::new_value("91"));
        let expression = Expression::new_sum(left, right);

        assert_eq!(expression.evaluate(), Ok(33.0 + 54.0 + 58.0 + 91.0));
    }

    #[test]
    fn binary_operations_evaluate() {
        let value = |text: &str| Expression::new_value(text);
        assert_eq!(Expression::new_difference(value("33"), value("54")).evaluate(), Ok(-21.0));
        assert_eq!(Expression::new_product(value("23"), value("11")).evaluate(), Ok(253.0));
        assert_eq!(Expression::new_quotient(value("10"), value("5")).evaluate(), Ok(2.0));
        assert_eq!(Expression::new_power(value("2"), value("10")).evaluate(), Ok(1024.0));
    }

    #[test]
    fn identity_keeps_sign_of_negation() {
        let expression =
            Expression::new_identity(Expression::new_negation(Expression::new_value("42")));
        assert_eq!(expression.evaluate(), Ok(-42.0));
    }

    #[test]
    fn operand_errors_propagate_through_operations() {
        let expression = Expression::new_square(Expression::new_factorial(Expression::new_value(
            "-10",
        )));
        assert_eq!(
            expression.evaluate(),
            Err(CalculatorError::NegativeFactorial(-10.0))
        );
    }

    #[test]
    fn evaluation_is_repeatable() {
        let expression = Expression::new_fibonacci(Expression::new_value("10"));
        assert_eq!(expression.evaluate(), Ok(55.0));
        assert_eq!(expression.evaluate(), Ok(55.0));
    }

    #[test]
    fn tree_serializes_to_postfix() {
        // 3 + 4 * -(2 - 1)
        let tree = Expression::new_sum(
            Expression::new_value("3"),
            Expression::new_product(
                Expression::new_value("4"),
                Expression::new_negation(Expression::new_difference(
                    Expression::new_value("2"),
                    Expression::new_value("1"),
                )),
            ),
        );
        let grammar = calculator_grammar();
        let operation = |name| RpnToken::Operation(*grammar.get_operation(name).unwrap());
        let prefix = |name| RpnToken::Operation(*grammar.get_prefix_operation(name).unwrap());

        let postfix = tree.to_postfix(grammar).unwrap();

        assert_eq!(
            postfix.tokens(),
            &[
                RpnToken::Value("3".into()),
                RpnToken::Value("4".into()),
                RpnToken::Value("2".into()),
                RpnToken::Value("1".into()),
                operation("-"),
                prefix("-"),
                operation("*"),
                operation("+"),
            ]
        );
        assert_eq!(postfix.evaluate(), tree.evaluate());
    }

    #[test]
    fn postfix_serialization_fails_for_operator_missing_from_grammar() {
        let tree = Expression::new_factorial(Expression::new_value("3"));

        let error = tree.to_postfix(&Grammar::new(vec![])).unwrap_err();

        assert_eq!(error, CalculatorError::UnknownOperation("!".into()));
    }

    #[test]
    fn print_succeeds() {
        let tree = Expression::new_sum(
            Expression::new_value("1"),
            Expression::new_sine(Expression::new_literal(90.0)),
        );

        let printed = tree.to_string();

        assert!(printed.starts_with("expression"));
        assert!(printed.contains("sin"));
    }
}
