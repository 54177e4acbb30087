// SQL fragment module - AST produced by the fragment parser and its traversal

pub mod ast;
pub mod visit;

pub use ast::*;
pub use visit::Visitor;
