//! Field definition for Tabula schemas.

use crate::error::{Error, Result};
use crate::types::DataType;
use alloc::string::String;

/// A named, typed column descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    /// Field name.
    name: String,
    /// Declared type of every value in this column.
    data_type: DataType,
}

impl Field {
    /// Creates a new field definition.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_field("Illegal field name (found '')"));
        }
        Ok(Self { name, data_type })
    }

    /// Creates a field of the default type (text).
    pub fn text(name: impl Into<String>) -> Result<Self> {
        Self::new(name, DataType::default())
    }

    /// Returns the field name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_new() {
        let field = Field::new("age", DataType::Int32).unwrap();
        assert_eq!(field.name(), "age");
        assert_eq!(field.data_type(), DataType::Int32);
    }

    #[test]
    fn test_field_defaults_to_text() {
        let field = Field::text("name").unwrap();
        assert_eq!(field.data_type(), DataType::Text);
    }

    #[test]
    fn test_field_rejects_empty_name() {
        assert!(matches!(
            Field::new("", DataType::Int32),
            Err(Error::InvalidField { .. })
        ));
    }

    #[test]
    fn test_field_equality() {
        let a = Field::new("age", DataType::Int32).unwrap();
        assert_eq!(a, Field::new("age", DataType::Int32).unwrap());
        assert_ne!(a, Field::new("age", DataType::Int64).unwrap());
        assert_ne!(a, Field::new("years", DataType::Int32).unwrap());
    }
}
