//! Tabula Core - Core types and schema definitions for Tabula tables.
//!
//! This crate provides the foundational types shared by every Tabula crate:
//!
//! - `DataType`: The closed set of field types (Text, Int32, Int64, Float32, Float64, Boolean, Char)
//! - `Value`: Runtime values stored in table cells
//! - `schema`: Field and schema definitions, including schema inference
//! - `Row`: Positional, named and typed access to one record
//! - `Error`: Error types for table operations
//!
//! # Example
//!
//! ```rust
//! use tabula_core::{DataType, Value};
//! use tabula_core::schema::SchemaBuilder;
//!
//! let schema = SchemaBuilder::new()
//!     .add_field("name", DataType::Text)
//!     .unwrap()
//!     .add_field("age", DataType::Int32)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.position_of("age").unwrap(), 2);
//! assert_eq!(DataType::of(&Value::from(25)).unwrap(), DataType::Int32);
//! ```

#![no_std]

extern crate alloc;

mod error;
mod row;
pub mod schema;
mod types;
mod value;

pub use error::{Error, ErrorKind, Operand, Result};
pub use row::Row;
pub use types::DataType;
pub use value::Value;
