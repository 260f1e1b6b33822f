//! Delimited-text reader.
//!
//! The reader infers the schema from the first data line, then appends every
//! following line through the table's own validation.

use crate::error::{IngestError, IngestResult};
use crate::line_reader::LineReader;
use crate::options::CsvOptions;
use tabula_core::schema::Schema;
use tabula_core::Value;
use tabula_storage::{DataTable, Table};
use tokio::io::AsyncBufRead;
use tracing::debug;

/// Builds a `DataTable` from delimited text.
#[derive(Clone, Debug, Default)]
pub struct CsvReader {
    options: CsvOptions,
}

impl CsvReader {
    /// Creates a reader with the given options.
    pub fn new(options: CsvOptions) -> Self {
        Self { options }
    }

    /// Reads a whole table from `input`.
    ///
    /// Blank lines are skipped. Field types come from the first data line:
    /// every later line must match them.
    pub async fn read_from<R>(&self, input: R) -> IngestResult<DataTable>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = LineReader::new(input, self.options.timeout());

        let (schema, sample) = if self.options.has_headers() {
            let header = lines.next_line_or("Cannot find the headers line").await?;
            let names: Vec<&str> = header.split(self.options.separator()).map(str::trim).collect();
            let sample = next_data_line(&mut lines)
                .await?
                .ok_or_else(|| malformed(&lines, "Could not find any CSV data, only headers"))?;
            let values = self.parse_line(&sample);
            (Schema::infer_named(&names, &values)?, values)
        } else {
            let sample = next_data_line(&mut lines)
                .await?
                .ok_or_else(|| malformed(&lines, "Could not find any CSV data"))?;
            let values = self.parse_line(&sample);
            (Schema::infer(&values)?, values)
        };

        let mut table = DataTable::new(schema);
        append(&mut table, sample, &lines)?;
        while let Some(line) = next_data_line(&mut lines).await? {
            append(&mut table, self.parse_line(&line), &lines)?;
        }

        debug!(
            rows = table.len(),
            fields = table.column_count(),
            lines = lines.line_count(),
            "read csv table"
        );
        Ok(table)
    }

    fn parse_line(&self, line: &str) -> Vec<Value> {
        line.split(self.options.separator()).map(parse_cell).collect()
    }
}

/// Converts one cell to the narrowest value that represents it.
///
/// Tries, in order: `i32`, `i64`, finite `f32`, `f64`, boolean (ignoring
/// case), and falls back to text.
pub fn parse_cell(cell: &str) -> Value {
    let cell = cell.trim();
    if let Ok(v) = cell.parse::<i32>() {
        return Value::Int32(v);
    }
    if let Ok(v) = cell.parse::<i64>() {
        return Value::Int64(v);
    }
    if let Ok(v) = cell.parse::<f32>() {
        if v.is_finite() {
            return Value::Float32(v);
        }
    }
    if let Ok(v) = cell.parse::<f64>() {
        return Value::Float64(v);
    }
    if cell.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if cell.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    Value::Text(cell.to_string())
}

async fn next_data_line<R>(lines: &mut LineReader<R>) -> IngestResult<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    while let Some(line) = lines.next_line().await? {
        if !line.trim().is_empty() {
            return Ok(Some(line));
        }
    }
    Ok(None)
}

fn malformed<R>(lines: &LineReader<R>, message: &str) -> IngestError
where
    R: AsyncBufRead + Unpin,
{
    IngestError::Malformed {
        line: lines.line_count(),
        message: message.to_string(),
    }
}

fn append<R>(table: &mut DataTable, values: Vec<Value>, lines: &LineReader<R>) -> IngestResult<()>
where
    R: AsyncBufRead + Unpin,
{
    table
        .append_row(values)
        .map_err(|source| IngestError::InvalidRow {
            line: lines.line_count(),
            source,
        })
}
