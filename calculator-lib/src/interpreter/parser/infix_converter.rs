use crate::interpreter::error::{CalculatorError, Result};
use crate::interpreter::lexer::Lexer;
use crate::interpreter::operation::Operation;
use crate::interpreter::parser::Parser;
use crate::interpreter::syntax::expression_tree::Expression;
use crate::interpreter::syntax::rpn::{RpnExpression, RpnToken};
use log::trace;

/// Converts the tokens into Reverse Polish Notation with the shunting-yard algorithm.
pub struct RpnParser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> RpnParser<'a> {
    pub fn new(lexer: Lexer<'a>) -> RpnParser<'a> {
        RpnParser { lexer }
    }
}

impl<'a> Parser for RpnParser<'a> {
    fn parse(&mut self) -> Result<Option<Expression>> {
        let tokens = infix_to_postfix(&mut self.lexer)?;
        if tokens.is_empty() {
            return Ok(None);
        }
        Ok(Some(Expression::new_rpn(RpnExpression::new(tokens))))
    }
}

fn infix_to_postfix(lexer: &mut Lexer) -> Result<Vec<RpnToken>> {
    let grammar = lexer.grammar();
    let mut operators: Vec<Operation> = vec![];
    let mut output: Vec<RpnToken> = vec![];
    // Whether the next token starts an operand, which is where prefix operations are written.
    let mut expecting_operand = true;

    while let Some(token) = lexer.extract_token() {
        if token.is_value() {
            if !expecting_operand {
                return Err(CalculatorError::InvalidExpression(token.text));
            }
            output.push(RpnToken::Value(token.text));
            expecting_operand = false;
            continue;
        }

        if expecting_operand {
            operators.push(*grammar.get_prefix_operation(&token.text)?);
            continue;
        }

        let operation = *grammar.get_operation(&token.text)?;
        match operation {
            Operation::Postfix { .. } if operation.is_close_group() => {
                parse_closing_parenthesis_token(&mut operators, &mut output)?
            }
            Operation::Postfix { .. } => {
                transfer_yielding_operators(&mut operators, &mut output, &operation);
                output.push(RpnToken::Operation(operation));
            }
            Operation::Infix { .. } => {
                transfer_yielding_operators(&mut operators, &mut output, &operation);
                operators.push(operation);
                expecting_operand = true;
            }
            Operation::Prefix { name, .. } => {
                return Err(CalculatorError::UnknownOperation(name.to_string()))
            }
        }
    }

    if expecting_operand && !(output.is_empty() && operators.is_empty()) {
        return Err(CalculatorError::UnexpectedEndOfExpression);
    }
    transfer_leftover_operators(&mut operators, &mut output)?;

    Ok(output)
}

fn transfer_leftover_operators(
    operators: &mut Vec<Operation>,
    output: &mut Vec<RpnToken>,
) -> Result<()> {
    while let Some(operator) = operators.pop() {
        if operator.is_open_group() {
            return Err(CalculatorError::UnmatchedParentheses);
        }
        output.push(RpnToken::Operation(operator));
    }
    Ok(())
}

fn parse_closing_parenthesis_token(
    operators: &mut Vec<Operation>,
    output: &mut Vec<RpnToken>,
) -> Result<()> {
    loop {
        match operators.pop() {
            None => return Err(CalculatorError::UnmatchedParentheses),
            // Discard the open parenthesis.
            Some(operator) if operator.is_open_group() => return Ok(()),
            Some(operator) => output.push(RpnToken::Operation(operator)),
        }
    }
}

fn transfer_yielding_operators(
    operators: &mut Vec<Operation>,
    output: &mut Vec<RpnToken>,
    incoming: &Operation,
) {
    while let Some(top_of_operator_stack) = operators.last() {
        if !top_of_operator_stack.yields_to(incoming) {
            break;
        }
        trace!("'{}' yields to '{}'", top_of_operator_stack, incoming);
        if let Some(operator) = operators.pop() {
            output.push(RpnToken::Operation(operator));
        }
    }
}
