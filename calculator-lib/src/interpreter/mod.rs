pub mod error;
pub mod grammar;
pub mod lexer;
pub mod operation;
pub mod operator;
pub mod parser;
pub mod syntax;
pub mod token;

use crate::interpreter::error::{CalculatorError, Result};
use crate::interpreter::grammar::{calculator_grammar, Grammar};
use crate::interpreter::lexer::Lexer;
use crate::interpreter::parser::{ExpressionParser, Parser, RpnParser};
use crate::interpreter::syntax::expression_tree::Expression;
use itertools::Itertools;
use log::debug;
use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;

/// Characters that are always operators on their own, whatever surrounds them.
pub static SYMBOLS: [char; 8] = ['-', '+', '*', '/', '(', ')', '^', '!'];

/// Which parser turns the tokens into an expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParserMode {
    /// Precedence climbing straight into an expression tree.
    Normal,
    /// Shunting yard into Reverse Polish Notation, evaluated on a stack.
    Rpn,
}

impl Default for ParserMode {
    fn default() -> Self {
        ParserMode::Normal
    }
}

impl FromStr for ParserMode {
    type Err = CalculatorError;

    fn from_str(input: &str) -> Result<ParserMode> {
        match input.to_ascii_lowercase().as_str() {
            "normal" => Ok(ParserMode::Normal),
            "rpn" => Ok(ParserMode::Rpn),
            _ => Err(CalculatorError::UnknownParserMode(input.to_string())),
        }
    }
}

impl fmt::Display for ParserMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParserMode::Normal => write!(f, "normal"),
            ParserMode::Rpn => write!(f, "rpn"),
        }
    }
}

/// Evaluates the given expression with the calculator grammar.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
/// * `mode`: Which parser to use.
///
/// returns: The value of the expression, or `None` if the expression is empty.
///
/// # Examples
///
/// ```
/// use calculator::interpreter::{evaluate, ParserMode};
///
/// assert_eq!(evaluate("(2+1)*3", ParserMode::Normal), Ok(Some(9.0)));
/// assert_eq!(evaluate("4^3^2", ParserMode::Rpn), Ok(Some(262144.0)));
/// assert_eq!(evaluate("", ParserMode::Normal), Ok(None));
/// assert!(evaluate("1 2 3", ParserMode::Normal).is_err());
/// ```
pub fn evaluate(expression: &str, mode: ParserMode) -> Result<Option<f64>> {
    evaluate_with_grammar(calculator_grammar(), expression, mode)
}

pub fn evaluate_with_grammar(
    grammar: &Grammar,
    expression: &str,
    mode: ParserMode,
) -> Result<Option<f64>> {
    let parsed = parse_with_grammar(grammar, expression, mode)?;
    let result = parsed.map(|expression| expression.evaluate()).transpose()?;
    debug!("evaluated to {:?}", result);
    Ok(result)
}

/// Converts the given input string into an equivalent expression,
/// without evaluating it.
///
/// # Examples
///
/// ```
/// use calculator::interpreter::{parse, ParserMode};
/// # fn main() -> calculator::interpreter::error::Result<()> {
///
/// let tree = parse("1 + 2 * 3", ParserMode::Normal)?;
/// if let Some(tree) = tree {
///     print!("{}", tree);
/// }
/// # Ok(()) }
/// ```
pub fn parse(expression: &str, mode: ParserMode) -> Result<Option<Expression>> {
    parse_with_grammar(calculator_grammar(), expression, mode)
}

pub fn parse_with_grammar(
    grammar: &Grammar,
    expression: &str,
    mode: ParserMode,
) -> Result<Option<Expression>> {
    let normalized = normalize(expression);
    debug!("parsing '{}' with the {} parser", normalized, mode);

    let lexer = Lexer::new(grammar, &normalized);
    let mut parser: Box<dyn Parser + '_> = match mode {
        ParserMode::Normal => Box::new(ExpressionParser::new(lexer)),
        ParserMode::Rpn => Box::new(RpnParser::new(lexer)),
    };
    parser.parse()
}

/// Rewrites an expression so that every operator is a whitespace-delimited word.
///
/// A doubled `*` means squaring and becomes `^2`.
///
/// # Examples
///
/// ```
/// use calculator::interpreter::normalize;
///
/// assert_eq!(normalize("  2**+sin(90)  "), "2 ^ 2 + sin ( 90 )");
/// ```
pub fn normalize(expression: &str) -> String {
    let squared = expression.replace("**", "^2");
    let mut spaced = String::with_capacity(squared.len() * 2);
    for character in squared.chars() {
        if SYMBOLS.contains(&character) {
            spaced.push(' ');
            spaced.push(character);
            spaced.push(' ');
        } else {
            spaced.push(character);
        }
    }
    spaced.split_whitespace().join(" ")
}
