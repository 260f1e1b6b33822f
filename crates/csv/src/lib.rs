//! Tabula CSV - Delimited-text reader and writer for Tabula tables.
//!
//! This crate talks to the table layer only through its public contracts:
//!
//! - `CsvReader`: Infers a schema from the first data line and drives `DataTable::append_row`
//! - `CsvWriter`: Serializes any `Table` through forward row iteration
//! - `LineReader`: Line source with a per-line read timeout
//! - `CsvOptions`: Separator, header line and timeout settings
//! - `IngestError`: The single failure type of this crate
//!
//! # Example
//!
//! ```rust
//! use tabula_csv::{CsvOptions, CsvReader};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let input = "name,age\nbob,25\njohn,34\n";
//! let reader = CsvReader::new(CsvOptions::new().with_headers());
//! let table = reader.read_from(input.as_bytes()).await.unwrap();
//! assert_eq!(table.len(), 2);
//! # });
//! ```

mod error;
mod line_reader;
mod options;
mod reader;
mod writer;

pub use error::{IngestError, IngestResult};
pub use line_reader::LineReader;
pub use options::{CsvOptions, DEFAULT_SEPARATOR, DEFAULT_TIMEOUT};
pub use reader::{parse_cell, CsvReader};
pub use writer::CsvWriter;
