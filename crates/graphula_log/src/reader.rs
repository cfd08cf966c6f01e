//! Replay log reader.

use crate::encoding::decode_line;
use graphula_core::{Fixture, GraphResult, GraphulaError};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Previously recorded fixtures, consumed front to back exactly once.
///
/// Blank lines are ignored; every other line is one entry. Positions in
/// errors count entries, not raw file lines.
#[derive(Debug, Clone, Default)]
pub struct ReplayLog {
    /// Entries not yet consumed
    entries: VecDeque<String>,
    /// Entries handed out so far
    consumed: usize,
    /// Entries the log started with
    total: usize,
    /// File the log was read from
    source: Option<PathBuf>,
}

impl ReplayLog {
    /// Create a replay log from raw lines
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: VecDeque<String> = lines
            .into_iter()
            .map(Into::into)
            .filter(|line: &String| !line.trim().is_empty())
            .collect();
        let total = entries.len();
        Self {
            entries,
            consumed: 0,
            total,
            source: None,
        }
    }

    /// Parse the contents of a log file
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Read a log file
    ///
    /// # Errors
    ///
    /// Returns [`GraphulaError::Io`] if the file cannot be read
    pub fn open(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GraphulaError::io(path, source))?;
        let mut log = Self::parse(&text);
        log.source = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), entries = log.total, "loaded replay log");
        Ok(log)
    }

    /// Consume the next entry as a `T`
    ///
    /// # Errors
    ///
    /// Returns [`GraphulaError::ReplayExhausted`] when no entries remain and
    /// [`GraphulaError::ReplayDecode`] when the entry is not a valid `T`
    pub fn next_entry<T: Fixture>(&mut self) -> GraphResult<T> {
        let Some(line) = self.entries.pop_front() else {
            return Err(GraphulaError::ReplayExhausted {
                consumed: self.consumed,
                fixture: T::fixture_name(),
            });
        };
        let position = self.consumed;
        self.consumed += 1;
        decode_line(&line, position)
    }

    /// Whether entries remain
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Entries not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.entries.len()
    }

    /// Entries consumed so far
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Entries the log started with
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// File the log was read from, if any
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
