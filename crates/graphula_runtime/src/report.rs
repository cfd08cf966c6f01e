//! Failure reporting.
//!
//! Test assertions fail by panicking. When a panic escapes a logged run, the
//! run's record is written to its destination. A string panic is then raised
//! again with the failure location and the destination path appended; a
//! replayed run appends the replay source instead. Any other panic payload
//! is resumed untouched, and `Err` results are never touched.

use graphula_core::{GraphResult, GraphulaError};
use graphula_log::WriteLog;
use std::any::Any;
use std::cell::RefCell;
use std::fs::File;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::NamedTempFile;

thread_local! {
    static PANIC_LOCATION: RefCell<Option<String>> = const { RefCell::new(None) };
}

static LOCATION_HOOK: Once = Once::new();

/// Chain a hook that remembers, per thread, where the last panic was raised.
/// The previously installed hook still runs.
fn record_panic_locations() {
    LOCATION_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let location = info.location().map(ToString::to_string);
            PANIC_LOCATION.with(|slot| *slot.borrow_mut() = location);
            previous(info);
        }));
    });
}

/// Where a logged run writes its record if an assertion fails
pub enum Destination {
    /// Fresh file in the OS temp dir, removed on drop unless a failure keeps it
    Temp(NamedTempFile),
    /// Caller-chosen file, created or truncated on acquisition
    File {
        /// Path of the file
        path: PathBuf,
        /// Open handle
        file: File,
    },
}

impl Destination {
    /// Acquire a fresh temp file named `graphula-*.graphula`
    ///
    /// # Errors
    ///
    /// Returns error if the temp file cannot be created
    pub fn temp() -> GraphResult<Self> {
        let file = tempfile::Builder::new()
            .prefix("graphula-")
            .suffix(".graphula")
            .tempfile()
            .map_err(|source| GraphulaError::io(std::env::temp_dir(), source))?;
        Ok(Self::Temp(file))
    }

    /// Acquire `path`, creating or truncating it
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created
    pub fn create(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| GraphulaError::io(&path, source))?;
        Ok(Self::File { path, file })
    }

    /// Path records are written to
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Temp(file) => file.path(),
            Self::File { path, .. } => path,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Temp(_) => "temp file",
            Self::File { .. } => "file",
        }
    }

    /// Write `log` and keep the file, releasing the handle.
    ///
    /// # Errors
    ///
    /// Returns error if writing or keeping the file fails
    pub fn dump(self, log: &WriteLog) -> GraphResult<PathBuf> {
        match self {
            Self::Temp(tmp) => {
                let path = tmp.path().to_path_buf();
                log.flush_to_file(tmp.as_file(), &path)?;
                tmp.keep().map_err(|err| GraphulaError::io(&path, err.error))?;
                Ok(path)
            }
            Self::File { path, file } => {
                log.flush_to_file(&file, &path)?;
                Ok(path)
            }
        }
    }
}

/// A panic caught escaping a program
pub struct Failure {
    payload: Box<dyn Any + Send>,
    location: Option<String>,
}

impl Failure {
    /// Wrap a caught payload and the location it was raised at
    #[must_use]
    pub fn new(payload: Box<dyn Any + Send>, location: Option<String>) -> Self {
        Self { payload, location }
    }

    /// Assertion text, if the payload is a string
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        failure_message(self.payload.as_ref())
    }

    /// `file:line:column` the panic was raised at, when known
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// The original payload
    #[must_use]
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }

    /// Re-raise with `note` appended. Non-string payloads are resumed as-is.
    pub fn raise(self, note: &str) -> ! {
        let Some(message) = self.message().map(str::to_string) else {
            panic::resume_unwind(self.payload);
        };
        let message = match self.location() {
            Some(location) => format!("{message}\n  at {location}"),
            None => message,
        };
        panic!("{}", annotate(&message, note));
    }
}

/// Run `program`, catching an escaping panic together with its location
///
/// # Errors
///
/// Returns the caught [`Failure`] if `program` panics
pub fn catch_failure<R>(program: impl FnOnce() -> R) -> Result<R, Failure> {
    record_panic_locations();
    PANIC_LOCATION.with(|slot| slot.borrow_mut().take());
    panic::catch_unwind(AssertUnwindSafe(program)).map_err(|payload| {
        let location = PANIC_LOCATION.with(|slot| slot.borrow_mut().take());
        Failure::new(payload, location)
    })
}

/// Text of a `&str` or `String` panic payload
#[must_use]
pub fn failure_message(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

/// Append a reproduction note to a failure message
#[must_use]
pub fn annotate(message: &str, note: &str) -> String {
    format!("{message}\n\n{note}")
}

/// Dump `log` to `destination` and re-raise the failure naming it
pub fn report_logged_failure(failure: Failure, destination: Destination, log: &WriteLog) -> ! {
    let label = destination.label();
    let note = match destination.dump(log) {
        Ok(path) => format!("Graph dumped in {label}: {}", path.display()),
        Err(err) => format!("Failed to dump graph: {err}"),
    };
    tracing::warn!(entries = log.len(), location = failure.location(), %note, "panic in logged run");
    failure.raise(&note)
}

/// Re-raise a replayed failure naming the replay source
pub fn report_replay_failure(failure: Failure, source: &Path) -> ! {
    let note = format!("Using graph file: {}", source.display());
    tracing::warn!(location = failure.location(), %note, "panic in replayed run");
    failure.raise(&note)
}
