//! Schema module for Tabula tables.
//!
//! This module contains the field and schema definitions that describe the
//! shape of a table.

mod definition;
mod field;

pub use definition::{Schema, SchemaBuilder};
pub use field::Field;
