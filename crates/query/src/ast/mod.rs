//! AST module for predicate expressions.

mod eval;
mod expr;

pub use expr::{field, not, value, Expr, DEFAULT_TOLERANCE};
