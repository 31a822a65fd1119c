pub mod expression_parser;
pub mod infix_converter;

pub use expression_parser::ExpressionParser;
pub use infix_converter::RpnParser;

use crate::interpreter::error::Result;
use crate::interpreter::syntax::expression_tree::Expression;

/// Turns the tokens of a lexer into an evaluable expression.
pub trait Parser {
    /// Returns `None` when there is nothing to parse.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> calculator::interpreter::error::Result<()> {
    /// use calculator::interpreter::grammar::calculator_grammar;
    /// use calculator::interpreter::lexer::Lexer;
    /// use calculator::interpreter::parser::{ExpressionParser, Parser, RpnParser};
    ///
    /// let grammar = calculator_grammar();
    /// let tree = ExpressionParser::new(Lexer::new(grammar, "1 + 2 * 3")).parse()?;
    /// let rpn = RpnParser::new(Lexer::new(grammar, "1 + 2 * 3")).parse()?;
    ///
    /// assert_eq!(tree.map(|expression| expression.evaluate()).transpose()?, Some(7.0));
    /// assert_eq!(rpn.map(|expression| expression.evaluate()).transpose()?, Some(7.0));
    /// # Ok(()) }
    /// ```
    fn parse(&mut self) -> Result<Option<Expression>>;
}
