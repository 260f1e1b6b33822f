//! Cursors and row iteration.
//!
//! A `Cursor` is a `(table, index)` pair implementing `Row`. Index `0` is
//! the "before first" position: holding it is fine, reading from it is not.

use crate::table::Table;
use std::fmt;
use tabula_core::schema::Schema;
use tabula_core::{Error, Result, Row, Value};

/// A movable position over the rows of a table.
///
/// Copying a cursor duplicates its position only.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    table: &'a dyn Table,
    index: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at `index`, which must be within `[0, row_count]`.
    pub fn new(table: &'a dyn Table, index: usize) -> Result<Self> {
        if index != 0 && !table.contains_row(index)? {
            return Err(Error::row_out_of_bounds(index, table.row_count()?));
        }
        Ok(Self { table, index })
    }

    /// Creates a cursor before the first row.
    pub(crate) fn before_first(table: &'a dyn Table) -> Self {
        Self { table, index: 0 }
    }

    /// Returns true if a row follows the current one.
    pub fn has_next(&self) -> Result<bool> {
        self.table.contains_row(self.index + 1)
    }

    /// Moves to the next row.
    pub fn move_to_next(&mut self) -> Result<()> {
        if !self.has_next()? {
            return Err(Error::invalid_state(format!(
                "No row after row {} (row count is {})",
                self.index,
                self.table.row_count()?
            )));
        }
        self.index += 1;
        Ok(())
    }

    /// Returns true if a row precedes the current one.
    #[inline]
    pub fn has_previous(&self) -> bool {
        self.index > 1
    }

    /// Moves to the previous row.
    pub fn move_to_previous(&mut self) -> Result<()> {
        if !self.has_previous() {
            return Err(Error::invalid_state(format!(
                "No row before row {}",
                self.index
            )));
        }
        self.index -= 1;
        Ok(())
    }
}

impl Row for Cursor<'_> {
    fn schema(&self) -> &Schema {
        self.table.schema()
    }

    #[inline]
    fn row_index(&self) -> usize {
        self.index
    }

    fn field_at(&self, position: usize) -> Result<Value> {
        if self.index == 0 {
            return Err(Error::invalid_state(
                "Cursor is before the first row (move to a row first)",
            ));
        }
        self.table.get_data_at(self.index, position)
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("index", &self.index).finish()
    }
}

/// Forward-only, lazy iterator over the rows of a table.
///
/// The first call to `next` moves from before the first row to row 1. After
/// an error the iterator is fused.
pub struct Rows<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> Rows<'a> {
    /// Creates an iterator positioned before the first row.
    pub fn new(table: &'a dyn Table) -> Self {
        Self {
            cursor: Cursor::before_first(table),
            done: false,
        }
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = Result<Cursor<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.has_next() {
            Ok(true) => {
                self.cursor.index += 1;
                Some(Ok(self.cursor))
            }
            Ok(false) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for Rows<'_> {}
