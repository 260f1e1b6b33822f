//! Tabula Query - Predicate expressions for Tabula tables.
//!
//! This crate provides the expression language used to filter tables:
//!
//! - `ast`: The closed `Expr` tree, its builders and its evaluator
//!
//! Expressions are built once and evaluated against any `Row`:
//!
//! ```rust
//! use tabula_query::{field, not, value};
//!
//! let expr = field("salary")
//!     .is_above(value(50.0))
//!     .or(not(field("name").is(value("derek"))));
//! assert_eq!(expr.referenced_fields(), vec!["salary", "name"]);
//! ```

pub mod ast;

pub use ast::{field, not, value, Expr, DEFAULT_TOLERANCE};
