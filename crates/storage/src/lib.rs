//! Tabula Storage - Tables, cursors and lazy result sets.
//!
//! This crate provides the table layer including:
//!
//! - `Table`: The read contract shared by stored tables and filtered views
//! - `DataTable`: Column-major, schema-validated row storage
//! - `Cursor` / `Rows`: Movable row positions and forward iteration
//! - `ResultSet`: Lazy, memoizing views filtered by an expression
//!
//! # Example
//!
//! ```rust
//! use tabula_core::schema::SchemaBuilder;
//! use tabula_core::{DataType, Row};
//! use tabula_query::{field, value};
//! use tabula_storage::{row, DataTable, Table, TableExt};
//!
//! let schema = SchemaBuilder::new()
//!     .add_field("name", DataType::Text)
//!     .unwrap()
//!     .add_field("salary", DataType::Float64)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! let mut table = DataTable::new(schema);
//! table
//!     .append_rows(vec![row!["bob", 23.54], row!["derek", 60.0]])
//!     .unwrap();
//!
//! let rich = table.filter(field("salary").is_above(value(50.0)));
//! assert_eq!(rich.row_count().unwrap(), 1);
//! assert_eq!(rich.get_row(1).unwrap().as_text("name").unwrap(), "derek");
//! ```

pub mod cursor;
pub mod data_table;
pub mod result_set;
pub mod table;

pub use cursor::{Cursor, Rows};
pub use data_table::DataTable;
pub use result_set::{ResultCache, ResultSet};
pub use table::{Table, TableExt};

/// Builds a row of values, converting each element with `Value::from`.
///
/// ```rust
/// use tabula_core::Value;
/// use tabula_storage::row;
///
/// assert_eq!(row!["bob", 25, true], vec![Value::from("bob"), Value::Int32(25), Value::Boolean(true)]);
/// ```
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        ::std::vec![$($crate::__private::Value::from($value)),*]
    };
}

#[doc(hidden)]
pub mod __private {
    pub use tabula_core::Value;
}
