//! Column-major row storage.
//!
//! This module provides the `DataTable` struct which stores the values of a
//! table as one vector per field and validates every row on append.

use crate::cursor::Cursor;
use crate::table::Table;
use tabula_core::schema::Schema;
use tabula_core::{Error, Result, Value};
use tracing::debug;

/// A mutable, schema-validated table.
///
/// Every column holds the same number of values, and every value of column
/// `i` has the declared type of field `i`.
#[derive(Clone, Debug)]
pub struct DataTable {
    schema: Schema,
    columns: Vec<Vec<Value>>,
}

impl DataTable {
    /// Creates an empty table for the given schema.
    pub fn new(schema: Schema) -> Self {
        let columns = vec![Vec::new(); schema.field_count()];
        Self { schema, columns }
    }

    /// Returns the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Appends one row.
    ///
    /// The row must hold at least one value per field, each of the field's
    /// declared type. Extra trailing values are ignored. On failure the
    /// table is left untouched.
    pub fn append_row(&mut self, values: Vec<Value>) -> Result<()> {
        self.check_row(&values)?;
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.push(value);
        }
        Ok(())
    }

    /// Appends a batch of rows, all or nothing.
    ///
    /// If any row is rejected, every row this call appended is removed and
    /// the error names the failing row (1-based, within the batch).
    pub fn append_rows<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        let before = self.len();
        for (i, values) in rows.into_iter().enumerate() {
            if let Err(cause) = self.append_row(values) {
                let appended = self.len() - before;
                self.truncate(before);
                debug!(row = i + 1, appended, %cause, "batch append rolled back");
                return Err(Error::invalid_row(i + 1, cause));
            }
        }
        Ok(())
    }

    /// Removes the row at `index` and returns its values.
    pub fn remove_row(&mut self, index: usize) -> Result<Vec<Value>> {
        self.check_row_index(index)?;
        Ok(self
            .columns
            .iter_mut()
            .map(|column| column.remove(index - 1))
            .collect())
    }

    /// Removes rows `first..=last`. Does nothing when `first > last`.
    pub fn remove_rows(&mut self, first: usize, last: usize) -> Result<()> {
        if first > last {
            return Ok(());
        }
        self.check_row_index(first)?;
        self.check_row_index(last)?;
        for column in &mut self.columns {
            column.drain(first - 1..last);
        }
        Ok(())
    }

    fn check_row(&self, values: &[Value]) -> Result<()> {
        let expected = self.schema.field_count();
        if values.len() < expected {
            return Err(Error::ArityMismatch {
                expected,
                found: values.len(),
            });
        }
        for (i, (field, value)) in self.schema.fields().iter().zip(values).enumerate() {
            if value.data_type() != Some(field.data_type()) {
                return Err(Error::type_mismatch(
                    i + 1,
                    field.data_type(),
                    value.type_name(),
                ));
            }
        }
        Ok(())
    }

    fn check_row_index(&self, index: usize) -> Result<()> {
        if index == 0 || index > self.len() {
            return Err(Error::row_out_of_bounds(index, self.len()));
        }
        Ok(())
    }

    fn truncate(&mut self, len: usize) {
        for column in &mut self.columns {
            column.truncate(len);
        }
    }
}

impl Table for DataTable {
    #[inline]
    fn schema(&self) -> &Schema {
        &self.schema
    }

    #[inline]
    fn row_count(&self) -> Result<usize> {
        Ok(self.len())
    }

    #[inline]
    fn contains_row(&self, index: usize) -> Result<bool> {
        Ok(index >= 1 && index <= self.len())
    }

    fn get_data_at(&self, row: usize, column: usize) -> Result<Value> {
        if column == 0 || column > self.columns.len() {
            return Err(Error::column_out_of_bounds(column, self.columns.len()));
        }
        self.check_row_index(row)?;
        Ok(self.columns[column - 1][row - 1].clone())
    }

    fn get_row(&self, index: usize) -> Result<Cursor<'_>> {
        self.check_row_index(index)?;
        Cursor::new(self, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;
    use crate::table::TableExt;
    use tabula_core::schema::SchemaBuilder;
    use tabula_core::{DataType, ErrorKind, Row};

    fn schema() -> Schema {
        SchemaBuilder::new()
            .add_field("name", DataType::Text)
            .unwrap()
            .add_field("age", DataType::Int32)
            .unwrap()
            .add_field("married", DataType::Boolean)
            .unwrap()
            .add_field("salary", DataType::Float64)
            .unwrap()
            .build()
            .unwrap()
    }

    fn table() -> DataTable {
        let mut table = DataTable::new(schema());
        table
            .append_rows(vec![
                row!["bob", 25, true, 23.54],
                row!["john", 34, false, 45.6],
            ])
            .unwrap();
        table
    }

    #[test]
    fn test_new_table_is_empty() {
        let table = DataTable::new(schema());
        assert!(table.is_empty().unwrap());
        assert_eq!(table.row_count().unwrap(), 0);
        assert_eq!(table.column_count(), 4);
        assert_eq!(table.data_count().unwrap(), 0);
    }

    #[test]
    fn test_append_row_and_read_back() {
        let table = table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.data_count().unwrap(), 8);
        assert_eq!(table.get_data(1, "name").unwrap(), Value::from("bob"));
        assert_eq!(table.get_data_at(2, 4).unwrap(), Value::Float64(45.6));
        let row = table.get_row(2).unwrap();
        assert_eq!(row.row_index(), 2);
        assert_eq!(row.as_integer("age").unwrap(), 34);
    }

    #[test]
    fn test_append_row_ignores_extra_values() {
        let mut table = table();
        table.append_row(row!["derek", 41, true, 60.0, "extra"]).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get_data(3, "salary").unwrap(), Value::Float64(60.0));
    }

    #[test]
    fn test_append_row_rejects_missing_values() {
        let mut table = table();
        let err = table.append_row(row!["derek", 41]).unwrap_err();
        assert_eq!(err, Error::ArityMismatch { expected: 4, found: 2 });
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_append_row_rejects_wrong_type() {
        let mut table = table();
        let before = table.data_count().unwrap();
        let err = table.append_row(row!["derek", 41, "yes", 60.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "Unexpected type 'text' in column 3 (expecting type 'boolean')"
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.data_count().unwrap(), before);
    }

    #[test]
    fn test_append_row_rejects_null() {
        let mut table = table();
        let err = table
            .append_row(vec![Value::Null, 41.into(), true.into(), 60.0.into()])
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { column: 1, found: "null", .. }));
    }

    #[test]
    fn test_append_rows_is_atomic() {
        let mut table = table();
        let err = table
            .append_rows(vec![
                row!["derek", 41, true, 60.0],
                row!["jane", 29, false, 51.2],
                row!["mary", "thirty", false, 51.2],
            ])
            .unwrap_err();
        match &err {
            Error::InvalidRow { row, cause } => {
                assert_eq!(*row, 3);
                assert!(matches!(**cause, Error::TypeMismatch { column: 2, .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(table.len(), 2);
        assert_eq!(table.get_data(2, "name").unwrap(), Value::from("john"));
    }

    #[test]
    fn test_bounds_errors_state_range() {
        let table = table();
        let err = table.get_row(0).unwrap_err();
        assert_eq!(err.to_string(), "Invalid row index '0' (should be within [1, 2])");
        let err = table.get_row(3).unwrap_err();
        assert_eq!(err.to_string(), "Invalid row index '3' (should be within [1, 2])");
        let err = table.get_data_at(1, 5).unwrap_err();
        assert_eq!(err.to_string(), "Invalid column index '5' (should be within [1, 4])");

        let empty = DataTable::new(schema());
        let err = empty.get_data_at(1, 1).unwrap_err();
        assert_eq!(err.to_string(), "Invalid row index '1' (empty table)");
    }

    #[test]
    fn test_unknown_field_name() {
        let table = table();
        let err = table.get_data(1, "height").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown field name 'height' (fields are [name, age, married, salary])"
        );
    }

    #[test]
    fn test_remove_row() {
        let mut table = table();
        let removed = table.remove_row(1).unwrap();
        assert_eq!(removed[0], Value::from("bob"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get_data(1, "name").unwrap(), Value::from("john"));
        assert!(table.remove_row(2).is_err());
    }

    #[test]
    fn test_remove_rows_inclusive() {
        let mut table = table();
        table.append_row(row!["derek", 41, true, 60.0]).unwrap();
        table.remove_rows(1, 2).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get_data(1, "name").unwrap(), Value::from("derek"));
        table.remove_rows(2, 1).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.remove_rows(1, 2).is_err());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(table().field_names(), vec!["name", "age", "married", "salary"]);
    }
}
