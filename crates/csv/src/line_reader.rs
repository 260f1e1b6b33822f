//! Deadline-bounded line reads.
//!
//! Each read races the underlying stream against the configured timeout. On
//! timeout the pending read future is dropped, which cancels it: no task or
//! thread is left blocked on the stream.

use crate::error::{IngestError, IngestResult};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

/// Reads lines one at a time, counting the lines handed out.
///
/// A reader that returned `Timeout` or `Io` may have consumed part of a line
/// and should be discarded.
pub struct LineReader<R> {
    input: R,
    timeout: Duration,
    buffer: Option<String>,
    line_count: usize,
    eof: bool,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    /// Creates a reader that waits at most `timeout` for each line.
    pub fn new(input: R, timeout: Duration) -> Self {
        Self {
            input,
            timeout,
            buffer: None,
            line_count: 0,
            eof: false,
        }
    }

    /// Returns how many lines have been handed out.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Returns true if another line is available, reading ahead if needed.
    pub async fn has_more_lines(&mut self) -> IngestResult<bool> {
        if self.buffer.is_none() && !self.eof {
            self.buffer = self.read_line().await?;
            self.eof = self.buffer.is_none();
        }
        Ok(self.buffer.is_some())
    }

    /// Returns the next line without its terminator, or `None` at the end.
    pub async fn next_line(&mut self) -> IngestResult<Option<String>> {
        if !self.has_more_lines().await? {
            return Ok(None);
        }
        self.line_count += 1;
        Ok(self.buffer.take())
    }

    /// Returns the next line, failing with `message` at the end of input.
    pub async fn next_line_or(&mut self, message: &str) -> IngestResult<String> {
        match self.next_line().await? {
            Some(line) => Ok(line),
            None => Err(IngestError::Malformed {
                line: self.line_count,
                message: message.to_string(),
            }),
        }
    }

    async fn read_line(&mut self) -> IngestResult<Option<String>> {
        let mut line = String::new();
        let timeout = self.timeout;
        let read = match tokio::time::timeout(timeout, self.input.read_line(&mut line)).await {
            Ok(read) => read.map_err(|source| IngestError::Io {
                line: self.line_count + 1,
                source,
            })?,
            Err(_) => {
                warn!(
                    line = self.line_count + 1,
                    timeout_ms = timeout.as_millis() as u64,
                    "line read timed out"
                );
                return Err(IngestError::Timeout(timeout));
            }
        };
        if read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn test_reads_lines_in_order() {
        let mut reader = LineReader::new("a,b\r\nc,d\ne".as_bytes(), SECOND);
        assert!(reader.has_more_lines().await.unwrap());
        assert_eq!(reader.line_count(), 0);
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("a,b"));
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("c,d"));
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("e"));
        assert_eq!(reader.line_count(), 3);
        assert!(!reader.has_more_lines().await.unwrap());
        assert_eq!(reader.next_line().await.unwrap(), None);
        assert_eq!(reader.line_count(), 3);
    }

    #[tokio::test]
    async fn test_has_more_lines_does_not_consume() {
        let mut reader = LineReader::new("only".as_bytes(), SECOND);
        assert!(reader.has_more_lines().await.unwrap());
        assert!(reader.has_more_lines().await.unwrap());
        assert_eq!(reader.next_line_or("missing").await.unwrap(), "only");
    }

    #[tokio::test]
    async fn test_next_line_or_fails_at_end() {
        let mut reader = LineReader::new("".as_bytes(), SECOND);
        let err = reader.next_line_or("Could not find any CSV data").await.unwrap_err();
        assert!(matches!(err, IngestError::Malformed { line: 0, .. }));
        assert!(err.to_string().starts_with("Could not find any CSV data"));
    }

    #[tokio::test]
    async fn test_times_out_on_silent_stream() {
        let (_writer, stream) = tokio::io::duplex(64);
        let mut reader = LineReader::new(tokio::io::BufReader::new(stream), Duration::from_millis(20));
        let err = reader.next_line().await.unwrap_err();
        assert!(matches!(err, IngestError::Timeout(t) if t == Duration::from_millis(20)));
    }
}
