//! Append-only write log.

use crate::encoding::{LineEncoder, encode_line};
use graphula_core::{Fixture, GraphResult, GraphulaError};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// In-memory record of generated fixtures, in generation order.
///
/// Lines are only ever appended. Nothing touches the disk until the owner
/// decides to flush, which a logged run does only when an assertion fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteLog {
    lines: Vec<String>,
}

impl WriteLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Encode `value` and append it
    ///
    /// # Errors
    ///
    /// Returns [`GraphulaError::Encode`] if the value cannot be serialized
    pub fn append<T: Fixture>(&mut self, value: &T) -> GraphResult<()> {
        let line = encode_line(value)?;
        tracing::trace!(fixture = T::fixture_name(), index = self.lines.len(), "logged fixture");
        self.lines.push(line);
        Ok(())
    }

    /// Recorded lines
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of recorded values
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Write every line, in order, to `writer`
    ///
    /// # Errors
    ///
    /// Returns error if the writer fails
    pub fn write_to<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut encoder = LineEncoder::new(writer);
        for line in &self.lines {
            encoder.write_line(line)?;
        }
        encoder.flush()
    }

    /// Write the log to an already opened file
    ///
    /// # Errors
    ///
    /// Returns [`GraphulaError::Io`] tagged with `path` if writing fails
    pub fn flush_to_file(&self, file: &File, path: &Path) -> GraphResult<()> {
        self.write_to(BufWriter::new(file))
            .map_err(|source| GraphulaError::io(path, source))?;
        tracing::debug!(path = %path.display(), entries = self.lines.len(), "flushed write log");
        Ok(())
    }

    /// Consume the log, returning its lines
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{Veterinarian, dog};

    #[test]
    fn test_write_log_new() {
        let log = WriteLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = WriteLog::new();
        log.append(&Veterinarian {
            name: "herriot".to_string(),
        })
        .unwrap();
        log.append(&dog("rex", 2)).unwrap();
        log.append(&dog("rex", 2)).unwrap();

        assert_eq!(
            log.lines(),
            &[
                r#"{"name":"herriot"}"#.to_string(),
                r#"{"name":"rex","age":2}"#.to_string(),
                r#"{"name":"rex","age":2}"#.to_string(),
            ]
        );
    }

    #[test]
    fn test_write_to_one_value_per_line() {
        let mut log = WriteLog::new();
        log.append(&dog("a", 1)).unwrap();
        log.append(&dog("b", 2)).unwrap();

        let mut out = Vec::new();
        log.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "{\"name\":\"a\",\"age\":1}\n{\"name\":\"b\",\"age\":2}\n");
    }

    #[test]
    fn test_write_to_empty_log_writes_nothing() {
        let mut out = Vec::new();
        WriteLog::new().write_to(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_flush_to_file() {
        let mut log = WriteLog::new();
        log.append(&dog("rex", 4)).unwrap();

        let tmp = tempfile::NamedTempFile::new().unwrap();
        log.flush_to_file(tmp.as_file(), tmp.path()).unwrap();

        let text = std::fs::read_to_string(tmp.path()).unwrap();
        assert_eq!(text, "{\"name\":\"rex\",\"age\":4}\n");
    }
}
