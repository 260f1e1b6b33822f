//! Data type definitions for Tabula tables.
//!
//! This module defines the closed set of types a field can declare.

use crate::error::{Error, Result};
use crate::value::Value;
use core::fmt;

/// Supported field types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    /// UTF-8 text (the default field type)
    #[default]
    Text,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit floating point number
    Float32,
    /// 64-bit floating point number
    Float64,
    /// Boolean type (true/false)
    Boolean,
    /// A single Unicode scalar value
    Char,
}

impl DataType {
    /// All supported types, in declaration order.
    pub const ALL: [DataType; 7] = [
        DataType::Text,
        DataType::Int32,
        DataType::Int64,
        DataType::Float32,
        DataType::Float64,
        DataType::Boolean,
        DataType::Char,
    ];

    /// Infers the type of a sample value.
    ///
    /// Fails on `Null`, which maps to no declarable type.
    ///
    /// ```
    /// use tabula_core::{DataType, Value};
    /// assert_eq!(DataType::of(&Value::Int32(55)).unwrap(), DataType::Int32);
    /// assert!(DataType::of(&Value::Null).is_err());
    /// ```
    pub fn of(value: &Value) -> Result<DataType> {
        value
            .data_type()
            .ok_or_else(|| Error::unsupported_value(value.type_name()))
    }

    /// Returns the name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Int32 => "integer",
            DataType::Int64 => "long",
            DataType::Float32 => "float",
            DataType::Float64 => "double",
            DataType::Boolean => "boolean",
            DataType::Char => "character",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
