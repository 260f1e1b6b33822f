//! Reader and writer configuration.

use crate::error::{IngestError, IngestResult};
use std::time::Duration;

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Longest wait for a single line before reading fails.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Options shared by `CsvReader` and `CsvWriter`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvOptions {
    separator: String,
    headers: bool,
    timeout: Duration,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            headers: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CsvOptions {
    /// Creates the default options: comma separated, no header line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field separator, which must not be empty.
    pub fn with_separator(mut self, separator: impl Into<String>) -> IngestResult<Self> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(IngestError::InvalidSeparator(separator));
        }
        self.separator = separator;
        Ok(self)
    }

    /// The first line holds the field names.
    pub fn with_headers(mut self) -> Self {
        self.headers = true;
        self
    }

    /// Every line holds data.
    pub fn without_headers(mut self) -> Self {
        self.headers = false;
        self
    }

    /// Sets the per-line read timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[inline]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    #[inline]
    pub fn has_headers(&self) -> bool {
        self.headers
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CsvOptions::default();
        assert_eq!(options.separator(), ",");
        assert!(!options.has_headers());
        assert_eq!(options.timeout(), Duration::from_millis(1000));
    }

    #[test]
    fn test_builder() {
        let options = CsvOptions::new()
            .with_separator(";")
            .unwrap()
            .with_headers()
            .with_timeout(Duration::from_millis(20));
        assert_eq!(options.separator(), ";");
        assert!(options.has_headers());
        assert_eq!(options.timeout(), Duration::from_millis(20));
        assert!(!options.without_headers().has_headers());
    }

    #[test]
    fn test_rejects_empty_separator() {
        let err = CsvOptions::new().with_separator("").unwrap_err();
        assert_eq!(err.to_string(), "Invalid field separator '' (cannot be empty)");
    }
}
