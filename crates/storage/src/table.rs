//! The table contract shared by stored tables and filtered views.

use crate::cursor::{Cursor, Rows};
use crate::result_set::ResultSet;
use tabula_core::schema::Schema;
use tabula_core::{Result, Value};
use tabula_query::Expr;

/// Read access to rows of typed values.
///
/// Rows and columns are numbered from 1. Counting and probing are fallible
/// because a filtered view evaluates its predicate while answering them.
pub trait Table {
    /// Returns the schema every row conforms to.
    fn schema(&self) -> &Schema;

    /// Returns the number of rows.
    fn row_count(&self) -> Result<usize>;

    /// Returns whether row `index` exists, doing no more work than needed.
    fn contains_row(&self, index: usize) -> Result<bool>;

    /// Returns the value at the given row and column.
    fn get_data_at(&self, row: usize, column: usize) -> Result<Value>;

    /// Returns a cursor positioned at row `index`.
    fn get_row(&self, index: usize) -> Result<Cursor<'_>>;

    /// Returns the number of columns.
    #[inline]
    fn column_count(&self) -> usize {
        self.schema().field_count()
    }

    /// Returns true if there is no row at all.
    fn is_empty(&self) -> Result<bool> {
        Ok(!self.contains_row(1)?)
    }

    /// Returns the number of cells (rows times columns).
    fn data_count(&self) -> Result<usize> {
        Ok(self.row_count()? * self.column_count())
    }

    /// Returns the value of the named field in the given row.
    fn get_data(&self, row: usize, name: &str) -> Result<Value> {
        let column = self.schema().position_of(name)?;
        self.get_data_at(row, column)
    }
}

/// Convenience operations available on every sized table.
pub trait TableExt: Table + Sized {
    /// Returns a forward-only iterator over the rows.
    fn rows(&self) -> Rows<'_> {
        Rows::new(self)
    }

    /// Returns a cursor already positioned at the first row.
    fn new_cursor(&self) -> Result<Cursor<'_>> {
        Cursor::new(self, 1)
    }

    /// Returns a lazy view of the rows that satisfy `expr`.
    #[doc(alias = "where")]
    fn filter(&self, expr: Expr) -> ResultSet<'_> {
        ResultSet::new(self, expr)
    }

    /// Returns the field names, in column order.
    fn field_names(&self) -> Vec<&str> {
        self.schema().field_names()
    }
}

impl<T: Table> TableExt for T {}
