//! Row capability for Tabula tables.
//!
//! A `Row` gives positional or named access to one record's values. Rows are
//! not stored: tables hand out cursors that implement this trait.

use crate::error::{Error, Result};
use crate::schema::Schema;
use crate::types::DataType;
use crate::value::Value;
use alloc::string::String;

/// Access to the values of a single record.
pub trait Row {
    /// Returns the schema of the table this row belongs to.
    fn schema(&self) -> &Schema;

    /// Returns the 1-based index of this row in its table.
    fn row_index(&self) -> usize;

    /// Returns the value of the field at the given 1-based position.
    fn field_at(&self, position: usize) -> Result<Value>;

    /// Returns the value of the named field.
    fn get_field(&self, name: &str) -> Result<Value> {
        let position = self.schema().position_of(name)?;
        self.field_at(position)
    }

    /// Reads the named field as a 32-bit integer.
    fn as_integer(&self, name: &str) -> Result<i32> {
        typed(self, name, DataType::Int32, Value::as_i32)
    }

    /// Reads the named field as a 64-bit integer.
    fn as_long(&self, name: &str) -> Result<i64> {
        typed(self, name, DataType::Int64, Value::as_i64)
    }

    /// Reads the named field as a 32-bit float.
    fn as_float(&self, name: &str) -> Result<f32> {
        typed(self, name, DataType::Float32, Value::as_f32)
    }

    /// Reads the named field as a 64-bit float.
    fn as_double(&self, name: &str) -> Result<f64> {
        typed(self, name, DataType::Float64, Value::as_f64)
    }

    /// Reads the named field as a boolean.
    fn as_boolean(&self, name: &str) -> Result<bool> {
        typed(self, name, DataType::Boolean, Value::as_bool)
    }

    /// Reads the named field as a character.
    fn as_char(&self, name: &str) -> Result<char> {
        typed(self, name, DataType::Char, Value::as_char)
    }

    /// Reads the named field as text.
    fn as_text(&self, name: &str) -> Result<String> {
        match self.get_field(name)? {
            Value::Text(text) => Ok(text),
            _ => Err(mismatch(self, name, DataType::Text)),
        }
    }
}

fn typed<R, T>(row: &R, name: &str, requested: DataType, read: fn(&Value) -> Option<T>) -> Result<T>
where
    R: Row + ?Sized,
{
    let value = row.get_field(name)?;
    read(&value).ok_or_else(|| mismatch(row, name, requested))
}

fn mismatch<R: Row + ?Sized>(row: &R, name: &str, requested: DataType) -> Error {
    match row.schema().field_named(name) {
        Ok(field) => Error::field_type_mismatch(name, field.data_type(), requested),
        Err(err) => err,
    }
}
