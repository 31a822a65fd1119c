use crate::interpreter::error::{CalculatorError, Result};
use crate::interpreter::operation::{Associativity, Operation, CLOSE_GROUP, OPEN_GROUP};
use crate::interpreter::syntax::expression_tree::Expression;
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref CALCULATOR_GRAMMAR: Grammar = Grammar::calculator();
}

/// The grammar of the calculator, built on first use and shared from then on.
pub fn calculator_grammar() -> &'static Grammar {
    &CALCULATOR_GRAMMAR
}

/// A registry of operations, looked up by name.
///
/// Prefix operations live in their own table, so the same name can mean one thing
/// in front of an operand and another after it (`-` negates or subtracts).
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    operations: HashMap<&'static str, Operation>,
    prefix_operations: HashMap<&'static str, Operation>,
}

impl Grammar {
    /// When two operations claim the same slot the last one wins.
    pub fn new(operations: Vec<Operation>) -> Grammar {
        let mut grammar = Grammar::default();
        for operation in operations {
            let table = if operation.is_prefix() {
                &mut grammar.prefix_operations
            } else {
                &mut grammar.operations
            };
            table.insert(operation.name(), operation);
        }
        grammar
    }

    pub fn calculator() -> Grammar {
        Grammar::new(vec![
            Operation::new_infix("+", 2, Associativity::Left, Expression::new_sum),
            Operation::new_infix("-", 2, Associativity::Left, Expression::new_difference),
            Operation::new_infix("*", 3, Associativity::Left, Expression::new_product),
            Operation::new_infix("/", 3, Associativity::Left, Expression::new_quotient),
            Operation::new_infix("^", 4, Associativity::Right, Expression::new_power),
            Operation::new_postfix("**", 4, Expression::new_square),
            Operation::new_postfix("!", 4, Expression::new_factorial),
            Operation::new_prefix("+", 2, Expression::new_identity),
            Operation::new_prefix("-", 2, Expression::new_negation),
            Operation::new_prefix("sin", 5, Expression::new_sine),
            Operation::new_prefix("cos", 5, Expression::new_cosine),
            Operation::new_prefix("tan", 5, Expression::new_tangent),
            Operation::new_prefix("fib", 5, Expression::new_fibonacci),
            Operation::new_prefix(OPEN_GROUP, 100, |inner| inner),
            Operation::new_postfix(CLOSE_GROUP, -1, |inner| inner),
        ])
    }

    pub fn has_operation(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Looks up an infix or postfix operation.
    pub fn get_operation(&self, name: &str) -> Result<&Operation> {
        self.operations
            .get(name)
            .ok_or_else(|| CalculatorError::UnknownOperation(name.to_string()))
    }

    pub fn has_prefix_operation(&self, name: &str) -> bool {
        self.prefix_operations.contains_key(name)
    }

    pub fn get_prefix_operation(&self, name: &str) -> Result<&Operation> {
        self.prefix_operations
            .get(name)
            .ok_or_else(|| CalculatorError::UnknownPrefixOperation(name.to_string()))
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    pub fn prefix_operations(&self) -> impl Iterator<Item = &Operation> {
        self.prefix_operations.values()
    }
}
