//! Schema definition for Tabula tables.

use super::field::Field;
use crate::error::{Error, Result};
use crate::types::DataType;
use crate::value::Value;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashMap;

/// An ordered, immutable collection of fields.
///
/// Positions are 1-based. Two schemas are equal when their field lists are.
#[derive(Clone, Debug)]
pub struct Schema {
    /// Field definitions, in column order.
    fields: Vec<Field>,
    /// Field name to 1-based position.
    positions: HashMap<String, usize>,
}

impl Schema {
    /// Creates a schema from the given fields.
    ///
    /// Fails when the list is empty or when two fields share a name.
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        if fields.is_empty() {
            return Err(Error::invalid_schema("A schema needs at least one field"));
        }
        let mut positions = HashMap::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            if positions.insert(field.name().to_string(), i + 1).is_some() {
                return Err(Error::invalid_schema(format!(
                    "Duplicated field name '{}'",
                    field.name()
                )));
            }
        }
        Ok(Self { fields, positions })
    }

    /// Infers a schema from a sample row, naming fields `field_1..field_n`.
    ///
    /// ```
    /// use tabula_core::{DataType, Value};
    /// use tabula_core::schema::Schema;
    ///
    /// let schema = Schema::infer(&[Value::from("bob"), Value::from(34)]).unwrap();
    /// assert_eq!(schema.field(2).unwrap().data_type(), DataType::Int32);
    /// assert_eq!(schema.field(2).unwrap().name(), "field_2");
    /// ```
    pub fn infer(values: &[Value]) -> Result<Self> {
        let names = Self::default_field_names(values.len());
        Self::infer_named(&names, values)
    }

    /// Infers a schema from parallel name and value slices.
    pub fn infer_named<S: AsRef<str>>(names: &[S], values: &[Value]) -> Result<Self> {
        if names.len() != values.len() {
            return Err(Error::invalid_schema(format!(
                "Inconsistent inputs ({} names but {} values)",
                names.len(),
                values.len()
            )));
        }
        let fields = names
            .iter()
            .zip(values)
            .map(|(name, value)| Field::new(name.as_ref(), DataType::of(value)?))
            .collect::<Result<Vec<_>>>()?;
        Self::new(fields)
    }

    /// Returns the names used when none are supplied.
    pub fn default_field_names(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("field_{}", i)).collect()
    }

    /// Returns the fields, in column order.
    #[inline]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the field names, in column order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name()).collect()
    }

    /// Returns whether a field has the given name.
    pub fn has_field(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Returns the 1-based position of the named field.
    pub fn position_of(&self, name: &str) -> Result<usize> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| self.unknown(name))
    }

    /// Returns the field at the given 1-based position.
    pub fn field(&self, position: usize) -> Result<&Field> {
        position
            .checked_sub(1)
            .and_then(|i| self.fields.get(i))
            .ok_or(Error::OutOfBounds {
                target: "field",
                index: position,
                upper: self.fields.len(),
            })
    }

    /// Returns the named field.
    pub fn field_named(&self, name: &str) -> Result<&Field> {
        let position = self.position_of(name)?;
        self.field(position)
    }

    fn unknown(&self, name: &str) -> Error {
        let available = self.fields.iter().map(|f| f.name().to_string()).collect();
        Error::unknown_field(name, available)
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for Schema {}

/// Builder for creating schemas.
#[derive(Default)]
pub struct SchemaBuilder {
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Creates an empty schema builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field to the schema.
    pub fn add_field(mut self, name: impl Into<String>, data_type: DataType) -> Result<Self> {
        let field = Field::new(name, data_type)?;
        if self.fields.iter().any(|f| f.name() == field.name()) {
            return Err(Error::invalid_schema(format!(
                "Duplicated field name '{}'",
                field.name()
            )));
        }
        self.fields.push(field);
        Ok(self)
    }

    /// Adds a field of the default type (text).
    pub fn add_text_field(self, name: impl Into<String>) -> Result<Self> {
        self.add_field(name, DataType::default())
    }

    /// Builds the schema.
    pub fn build(self) -> Result<Schema> {
        Schema::new(self.fields)
    }
}
