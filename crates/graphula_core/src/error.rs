//! Error kinds raised while building a fixture graph.

use std::path::PathBuf;

/// Result type used throughout graphula
pub type GraphResult<T> = Result<T, GraphulaError>;

/// Errors that abort a graph run.
///
/// Every variant is fatal to the program being interpreted: the run unwinds
/// through `?` and nothing is retried across fixture boundaries.
#[derive(Debug, thiserror::Error)]
pub enum GraphulaError {
    /// Persistence kept rejecting freshly generated candidates
    #[error("failed to persist a unique {fixture} after {attempts} attempts")]
    MaxAttemptsExceeded {
        /// Fixture type that could not be persisted
        fixture: &'static str,
        /// Attempt bound that was exhausted
        attempts: u32,
    },

    /// The replay log ran out before the program did
    #[error("not enough replay data: log exhausted after {consumed} entries while generating {fixture}")]
    ReplayExhausted {
        /// Entries consumed before the failing request
        consumed: usize,
        /// Fixture type that was requested
        fixture: &'static str,
    },

    /// A replay payload did not decode as the requested type
    #[error("replay entry {position} does not decode as {fixture}: {reason}")]
    ReplayDecode {
        /// Zero-based line index in the replay log
        position: usize,
        /// Fixture type that was requested
        fixture: &'static str,
        /// Decoder message
        reason: String,
    },

    /// A generated value could not be serialized for the write log
    #[error("failed to encode {fixture} for the write log: {reason}")]
    Encode {
        /// Fixture type being logged
        fixture: &'static str,
        /// Encoder message
        reason: String,
    },

    /// The persistence backend failed outright (as opposed to rejecting)
    #[error("persistence of {fixture} failed: {reason}")]
    Persist {
        /// Fixture type being inserted
        fixture: &'static str,
        /// Backend message
        reason: String,
    },

    /// Raised explicitly by a program
    #[error("{message}")]
    Thrown {
        /// Message supplied by the program
        message: String,
    },

    /// Reading the replay source or opening a log destination failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl GraphulaError {
    /// Build a [`GraphulaError::Thrown`] from any message
    #[must_use]
    pub fn thrown(message: impl Into<String>) -> Self {
        Self::Thrown {
            message: message.into(),
        }
    }

    /// Build a [`GraphulaError::Persist`] for fixture type `fixture`
    #[must_use]
    pub fn persist(fixture: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Persist {
            fixture,
            reason: reason.to_string(),
        }
    }

    /// Build a [`GraphulaError::Io`] for `path`
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Fixture type the error is tagged with, if any
    #[must_use]
    pub fn fixture(&self) -> Option<&'static str> {
        match self {
            Self::MaxAttemptsExceeded { fixture, .. }
            | Self::ReplayExhausted { fixture, .. }
            | Self::ReplayDecode { fixture, .. }
            | Self::Encode { fixture, .. }
            | Self::Persist { fixture, .. } => Some(*fixture),
            Self::Thrown { .. } | Self::Io { .. } => None,
        }
    }
}
