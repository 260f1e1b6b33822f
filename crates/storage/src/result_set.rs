//! Lazily filtered views over a table.
//!
//! A `ResultSet` pulls source rows only when a request needs them, tests
//! each pulled row once, and remembers the source index of every match.

use crate::cursor::Cursor;
use crate::table::Table;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tabula_core::schema::Schema;
use tabula_core::{Error, Result, Value};
use tabula_query::Expr;
use tracing::trace;

/// Matched source row indices, in source order.
///
/// The cache can be shared between result sets over the same source and
/// predicate; a result set built on a non-empty cache resumes its scan after
/// the last cached index.
pub type ResultCache = Rc<RefCell<Vec<usize>>>;

/// A lazy, memoizing view of the source rows that satisfy a predicate.
///
/// Position `i` of the view maps to the `i`-th matching source row. The view
/// borrows its source, which therefore cannot change while the view lives.
pub struct ResultSet<'t> {
    source: &'t dyn Table,
    expr: Expr,
    cache: ResultCache,
    /// Last source row pulled and tested.
    scanned: Cell<usize>,
    exhausted: Cell<bool>,
}

impl<'t> ResultSet<'t> {
    /// Creates a view of the rows of `source` that satisfy `expr`.
    pub fn new(source: &'t dyn Table, expr: Expr) -> Self {
        Self::with_cache(source, expr, ResultCache::default())
    }

    /// Creates a view backed by an existing cache.
    pub fn with_cache(source: &'t dyn Table, expr: Expr, cache: ResultCache) -> Self {
        let scanned = cache.borrow().last().copied().unwrap_or(0);
        Self {
            source,
            expr,
            cache,
            scanned: Cell::new(scanned),
            exhausted: Cell::new(false),
        }
    }

    /// Returns the table this view filters.
    #[inline]
    pub fn source(&self) -> &'t dyn Table {
        self.source
    }

    /// Returns a handle on the cache of matched source indices.
    pub fn cache(&self) -> ResultCache {
        Rc::clone(&self.cache)
    }

    /// Returns how many source rows have been pulled so far.
    #[inline]
    pub fn scanned(&self) -> usize {
        self.scanned.get()
    }

    /// Returns true once every source row has been pulled.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted.get()
    }

    /// Returns the source index of the row at `position`.
    pub fn source_index(&self, position: usize) -> Result<usize> {
        self.fill(Some(position))?;
        let found = position
            .checked_sub(1)
            .and_then(|i| self.cache.borrow().get(i).copied());
        match found {
            Some(index) => Ok(index),
            None => Err(Error::row_out_of_bounds(position, self.row_count()?)),
        }
    }

    /// Pulls source rows until `position` is cached, or until the source
    /// has no more rows when `position` is `None`.
    fn fill(&self, position: Option<usize>) -> Result<()> {
        loop {
            if let Some(position) = position {
                if self.cache.borrow().len() >= position {
                    return Ok(());
                }
            }
            if self.exhausted.get() {
                return Ok(());
            }
            let last_match = self.cache.borrow().last().copied().unwrap_or(0);
            let next = self.scanned.get().max(last_match) + 1;
            if !self.source.contains_row(next)? {
                self.exhausted.set(true);
                trace!(
                    scanned = self.scanned.get(),
                    matched = self.cache.borrow().len(),
                    "result set exhausted"
                );
                return Ok(());
            }
            let row = self.source.get_row(next)?;
            // A failed test leaves the row unpulled, so it is retried.
            let matched = self.expr.test(&row)?;
            self.scanned.set(next);
            if matched {
                self.cache.borrow_mut().push(next);
            }
            #[cfg(feature = "trace-scan")]
            trace!(row = next, matched, expr = %self.expr, "row tested");
        }
    }
}

impl Table for ResultSet<'_> {
    #[inline]
    fn schema(&self) -> &Schema {
        self.source.schema()
    }

    fn row_count(&self) -> Result<usize> {
        self.fill(None)?;
        Ok(self.cache.borrow().len())
    }

    fn contains_row(&self, index: usize) -> Result<bool> {
        if index == 0 {
            return Ok(false);
        }
        self.fill(Some(index))?;
        Ok(self.cache.borrow().len() >= index)
    }

    fn get_data_at(&self, row: usize, column: usize) -> Result<Value> {
        let index = self.source_index(row)?;
        self.source.get_data_at(index, column)
    }

    fn get_row(&self, index: usize) -> Result<Cursor<'_>> {
        let index = self.source_index(index)?;
        self.source.get_row(index)
    }
}

impl fmt::Debug for ResultSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultSet")
            .field("expr", &self.expr)
            .field("cache", &self.cache.borrow())
            .field("scanned", &self.scanned.get())
            .field("exhausted", &self.exhausted.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_table::DataTable;
    use crate::row;
    use crate::table::TableExt;
    use tabula_core::schema::SchemaBuilder;
    use tabula_core::{DataType, ErrorKind, Row};
    use tabula_query::{field, not, value};

    fn employees() -> DataTable {
        let schema = SchemaBuilder::new()
            .add_field("name", DataType::Text)
            .unwrap()
            .add_field("age", DataType::Int32)
            .unwrap()
            .add_field("married", DataType::Boolean)
            .unwrap()
            .add_field("salary", DataType::Float64)
            .unwrap()
            .build()
            .unwrap();
        let mut table = DataTable::new(schema);
        table
            .append_rows(vec![
                row!["bob", 25, true, 23.54],
                row!["john", 34, false, 45.6],
                row!["derek", 41, true, 60.0],
            ])
            .unwrap();
        table
    }

    fn names(table: &dyn Table) -> Vec<String> {
        crate::cursor::Rows::new(table)
            .map(|row| row.and_then(|r| r.as_text("name")).unwrap())
            .collect()
    }

    #[test]
    fn test_filter_selects_matching_rows() {
        let table = employees();
        let rich = table.filter(field("salary").is_above(value(50.0)));
        assert_eq!(rich.row_count().unwrap(), 1);
        assert_eq!(names(&rich), vec!["derek"]);
        assert_eq!(rich.get_data(1, "age").unwrap(), Value::Int32(41));
    }

    #[test]
    fn test_get_row_returns_source_row() {
        let table = employees();
        let view = table.filter(not(field("name").is(value("derek"))));
        let row = view.get_row(2).unwrap();
        assert_eq!(row.row_index(), 2);
        assert_eq!(row.as_text("name").unwrap(), "john");

        let view = table.filter(field("married").is(value(true)));
        assert_eq!(view.get_row(2).unwrap().row_index(), 3);
    }

    #[test]
    fn test_schema_delegates_to_source() {
        let table = employees();
        let view = table.filter(value(true));
        assert_eq!(view.schema(), table.schema());
        assert_eq!(view.column_count(), 4);
        assert_eq!(view.data_count().unwrap(), 12);
    }

    #[test]
    fn test_requests_pull_only_what_they_need() {
        let table = employees();
        let view = table.filter(field("married").is(value(true)));
        assert_eq!(view.scanned(), 0);
        assert!(view.contains_row(1).unwrap());
        assert_eq!(view.scanned(), 1);
        assert!(!view.is_exhausted());
        assert!(!view.contains_row(3).unwrap());
        assert!(view.is_exhausted());
        assert_eq!(view.scanned(), 3);
        assert_eq!(*view.cache().borrow(), vec![1, 3]);
    }

    #[test]
    fn test_missing_position_is_out_of_bounds() {
        let table = employees();
        let view = table.filter(field("salary").is_above(value(40.0)));
        let err = view.get_row(3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Bounds);
        assert_eq!(err.to_string(), "Invalid row index '3' (should be within [1, 2])");
        let err = view.get_row(0).unwrap_err();
        assert_eq!(err.to_string(), "Invalid row index '0' (should be within [1, 2])");

        let none = table.filter(value(false));
        assert!(none.is_empty().unwrap());
        assert_eq!(
            none.get_row(1).unwrap_err().to_string(),
            "Invalid row index '1' (empty table)"
        );
    }

    #[test]
    fn test_filter_on_result_set_layers_views() {
        let table = employees();
        let married = table.filter(field("married").is(value(true)));
        let rich = married.filter(field("salary").is_above(value(50.0)));
        assert_eq!(names(&rich), vec!["derek"]);
        assert_eq!(*rich.cache().borrow(), vec![2]);
        assert_eq!(*married.cache().borrow(), vec![1, 3]);
        assert_eq!(rich.get_row(1).unwrap().as_text("name").unwrap(), "derek");
    }

    #[test]
    fn test_shared_cache_resumes_scan() {
        let table = employees();
        let expr = field("salary").is_above(value(40.0));
        let first = table.filter(expr.clone());
        assert!(first.contains_row(1).unwrap());
        assert_eq!(first.scanned(), 2);

        let second = ResultSet::with_cache(&table, expr, first.cache());
        assert_eq!(second.scanned(), 2);
        assert_eq!(second.row_count().unwrap(), 2);
        assert_eq!(second.scanned(), 3);
        assert_eq!(*first.cache().borrow(), vec![2, 3]);
    }

    #[test]
    fn test_evaluation_error_is_retried() {
        let table = employees();
        let view = table.filter(field("age").is_above(value("thirty")));
        let err = view.row_count().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Evaluation);
        assert_eq!(view.scanned(), 0);
        assert!(view.row_count().is_err());
        assert!(!view.is_exhausted());
    }

    #[test]
    fn test_rows_stop_after_error() {
        let table = employees();
        let view = table.filter(field("salary").is_above(value("high")));
        let mut rows = view.rows();
        assert!(matches!(rows.next(), Some(Err(_))));
        assert!(rows.next().is_none());
    }
}
