//! Delimited-text writer.

use crate::error::{IngestError, IngestResult};
use crate::options::CsvOptions;
use std::io::Write;
use tabula_core::Row;
use tabula_storage::{Rows, Table};

/// Serializes any table, one line per row.
#[derive(Clone, Debug, Default)]
pub struct CsvWriter {
    options: CsvOptions,
}

impl CsvWriter {
    /// Creates a writer with the given options.
    pub fn new(options: CsvOptions) -> Self {
        Self { options }
    }

    /// Writes `table` to `out`, preceded by a header line when enabled.
    ///
    /// Rows are visited with a forward iteration, so a filtered view is
    /// evaluated as it is written.
    pub fn write<W: Write>(&self, table: &dyn Table, out: &mut W) -> IngestResult<()> {
        let schema = table.schema();
        let names = schema.field_names();
        let separator = self.options.separator();
        let mut line = 0;

        if self.options.has_headers() {
            line += 1;
            writeln!(out, "{}", names.join(separator)).map_err(|source| io(line, source))?;
        }

        for row in Rows::new(table) {
            let row = row?;
            line += 1;
            let mut cells = Vec::with_capacity(names.len());
            for name in &names {
                cells.push(row.get_field(name)?.to_string());
            }
            writeln!(out, "{}", cells.join(separator)).map_err(|source| io(line, source))?;
        }
        out.flush().map_err(|source| io(line, source))
    }
}

fn io(line: usize, source: std::io::Error) -> IngestError {
    IngestError::Io { line, source }
}
