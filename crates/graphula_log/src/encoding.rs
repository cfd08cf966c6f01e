//! Line encoding for generation logs.
//!
//! A log is UTF-8 text with one compact JSON value per `\n`-terminated line
//! and nothing else: no header, no envelope, no trailer. Compact JSON never
//! contains a raw newline, so a line is always exactly one value.

use graphula_core::{Fixture, GraphResult, GraphulaError};
use std::io::{self, Write};

/// Encode a fixture as a single log line (without the terminator).
///
/// # Errors
///
/// Returns [`GraphulaError::Encode`] if the value cannot be serialized
pub fn encode_line<T: Fixture>(value: &T) -> GraphResult<String> {
    serde_json::to_string(value).map_err(|err| GraphulaError::Encode {
        fixture: T::fixture_name(),
        reason: err.to_string(),
    })
}

/// Decode one log line as `T`; `position` is only used for error reporting.
///
/// # Errors
///
/// Returns [`GraphulaError::ReplayDecode`] if the line is not a valid `T`
pub fn decode_line<T: Fixture>(line: &str, position: usize) -> GraphResult<T> {
    serde_json::from_str(line).map_err(|err| GraphulaError::ReplayDecode {
        position,
        fixture: T::fixture_name(),
        reason: err.to_string(),
    })
}

/// Writes already-encoded lines to an underlying writer
pub struct LineEncoder<W> {
    writer: W,
    written: usize,
}

impl<W: Write> LineEncoder<W> {
    /// Create a new encoder
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Write one line followed by `\n`
    ///
    /// # Errors
    ///
    /// Returns error if the underlying writer fails
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Number of lines written so far
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush the writer
    ///
    /// # Errors
    ///
    /// Returns error if the underlying writer fails
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Consume and return the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}
