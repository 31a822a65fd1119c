pub mod expression_tree;
pub mod rpn;
pub(crate) mod syntax_visitor;
