//! Reading, filtering and writing tables through CSV.

use std::time::Duration;
use tabula_core::{Row, Value};
use tabula_csv::{CsvOptions, CsvReader, CsvWriter, IngestError};
use tabula_query::{field, value};
use tabula_storage::{Table, TableExt};
use tokio::io::{AsyncWriteExt, BufReader};

const EMPLOYEES: &str = "name,age,married,salary\n\
                         bob,25,true,23.54\n\
                         john,34,false,45.6\n\
                         derek,41,true,60.0\n";

fn with_headers() -> CsvOptions {
    CsvOptions::new().with_headers()
}

#[tokio::test]
async fn test_read_filter_write() {
    let table = CsvReader::new(with_headers())
        .read_from(EMPLOYEES.as_bytes())
        .await
        .unwrap();
    assert_eq!(table.row_count().unwrap(), 3);
    assert_eq!(table.get_data(1, "salary").unwrap(), Value::Float32(23.54));

    let rich = table.filter(field("salary").is_above(value(50.0)));
    assert_eq!(rich.get_row(1).unwrap().as_text("name").unwrap(), "derek");

    let mut out = Vec::new();
    CsvWriter::new(with_headers()).write(&rich, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "name,age,married,salary\nderek,41,true,60.0\n"
    );
}

#[tokio::test]
async fn test_written_table_reads_back() {
    let table = CsvReader::new(with_headers())
        .read_from(EMPLOYEES.as_bytes())
        .await
        .unwrap();
    let mut out = Vec::new();
    CsvWriter::new(with_headers()).write(&table, &mut out).unwrap();

    let copy = CsvReader::new(with_headers())
        .read_from(out.as_slice())
        .await
        .unwrap();
    assert_eq!(copy.schema(), table.schema());
    for (a, b) in table.rows().zip(copy.rows()) {
        let (a, b) = (a.unwrap(), b.unwrap());
        for name in table.field_names() {
            assert_eq!(a.get_field(name).unwrap(), b.get_field(name).unwrap());
        }
    }
}

#[tokio::test]
async fn test_stalled_stream_times_out() {
    let (mut writer, stream) = tokio::io::duplex(256);
    writer.write_all(b"name,age\nbob,25\n").await.unwrap();

    let options = with_headers().with_timeout(Duration::from_millis(30));
    let err = CsvReader::new(options)
        .read_from(BufReader::new(stream))
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::Timeout(_)), "{:?}", err);
    drop(writer);
}

#[tokio::test]
async fn test_closed_stream_ends_table() {
    let (mut writer, stream) = tokio::io::duplex(256);
    writer.write_all(b"bob,25\njohn,34").await.unwrap();
    drop(writer);

    let table = CsvReader::default()
        .read_from(BufReader::new(stream))
        .await
        .unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get_data(2, "field_1").unwrap(), Value::from("john"));
}
