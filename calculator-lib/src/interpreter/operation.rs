use crate::interpreter::syntax::expression_tree::Expression;
use std::fmt;
use std::fmt::Formatter;

/// Name of the prefix operation that opens a group.
pub const OPEN_GROUP: &str = "(";
/// Name of the postfix operation that closes a group.
pub const CLOSE_GROUP: &str = ")";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Describes how a named operator is parsed and which expression node it builds.
///
/// Higher priorities bind tighter.
#[derive(Copy, Clone)]
pub enum Operation {
    Prefix {
        name: &'static str,
        priority: i32,
        build: fn(Expression) -> Expression,
    },
    Postfix {
        name: &'static str,
        priority: i32,
        build: fn(Expression) -> Expression,
    },
    Infix {
        name: &'static str,
        priority: i32,
        associativity: Associativity,
        build: fn(Expression, Expression) -> Expression,
    },
}

impl Operation {
    pub fn new_prefix(
        name: &'static str,
        priority: i32,
        build: fn(Expression) -> Expression,
    ) -> Operation {
        Operation::Prefix {
            name,
            priority,
            build,
        }
    }

    pub fn new_postfix(
        name: &'static str,
        priority: i32,
        build: fn(Expression) -> Expression,
    ) -> Operation {
        Operation::Postfix {
            name,
            priority,
            build,
        }
    }

    pub fn new_infix(
        name: &'static str,
        priority: i32,
        associativity: Associativity,
        build: fn(Expression, Expression) -> Expression,
    ) -> Operation {
        Operation::Infix {
            name,
            priority,
            associativity,
            build,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Prefix { name, .. }
            | Operation::Postfix { name, .. }
            | Operation::Infix { name, .. } => name,
        }
    }

    pub fn priority(&self) -> i32 {
        match self {
            Operation::Prefix { priority, .. }
            | Operation::Postfix { priority, .. }
            | Operation::Infix { priority, .. } => *priority,
        }
    }

    pub fn is_prefix(&self) -> bool {
        matches!(self, Operation::Prefix { .. })
    }

    pub fn is_open_group(&self) -> bool {
        self.is_prefix() && self.name() == OPEN_GROUP
    }

    pub fn is_close_group(&self) -> bool {
        matches!(self, Operation::Postfix { name, .. } if *name == CLOSE_GROUP)
    }

    /// Whether this operation is popped off the operator stack when `incoming` arrives.
    pub(crate) fn yields_to(&self, incoming: &Operation) -> bool {
        if self.is_open_group() {
            return false;
        }
        match incoming {
            Operation::Infix {
                associativity: Associativity::Left,
                ..
            } => self.priority() >= incoming.priority(),
            _ => self.priority() > incoming.priority(),
        }
    }
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        let same_kind = match (self, other) {
            (Operation::Prefix { .. }, Operation::Prefix { .. })
            | (Operation::Postfix { .. }, Operation::Postfix { .. }) => true,
            (
                Operation::Infix {
                    associativity: left,
                    ..
                },
                Operation::Infix {
                    associativity: right,
                    ..
                },
            ) => left == right,
            _ => false,
        };
        same_kind && self.name() == other.name() && self.priority() == other.priority()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Operation::Prefix { .. } => "prefix",
            Operation::Postfix { .. } => "postfix",
            Operation::Infix { .. } => "infix",
        };
        write!(f, "{} {:?} ({})", kind, self.name(), self.priority())
    }
}
