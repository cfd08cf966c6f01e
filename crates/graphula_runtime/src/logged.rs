//! Live random generation with an append-only record.

use crate::effect::{Generate, RuntimeKind};
use crate::live::Live;
use graphula_core::{Fixture, GraphResult};
use graphula_log::WriteLog;
use rand::RngCore;
use rand_chacha::ChaCha8Rng;

/// Generates at random like [`Live`] and appends every logged value to a
/// [`WriteLog`] owned by this runtime.
pub struct Logged<R = ChaCha8Rng> {
    live: Live<R>,
    log: WriteLog,
}

impl<R: RngCore> Logged<R> {
    /// Wrap a live generator
    #[must_use]
    pub fn new(live: Live<R>) -> Self {
        Self {
            live,
            log: WriteLog::new(),
        }
    }

    /// Values recorded so far
    #[must_use]
    pub fn log(&self) -> &WriteLog {
        &self.log
    }

    /// The underlying live generator
    #[must_use]
    pub fn live(&self) -> &Live<R> {
        &self.live
    }

    /// Consume the runtime, returning its record
    #[must_use]
    pub fn into_log(self) -> WriteLog {
        self.log
    }
}

impl<R: RngCore> Generate for Logged<R> {
    fn kind(&self) -> RuntimeKind {
        RuntimeKind::Logged
    }

    fn generate_node<T: Fixture>(&mut self) -> GraphResult<T> {
        self.live.generate_node()
    }

    fn log_node<T: Fixture>(&mut self, value: &T) -> GraphResult<()> {
        self.log.append(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Dog, Veterinarian};

    #[test]
    fn test_logged_records_in_order() {
        let mut logged = Logged::new(Live::from_seed(3));
        let vet: Veterinarian = logged.generate_node().unwrap();
        logged.log_node(&vet).unwrap();
        let dog: Dog = logged.generate_node().unwrap();
        logged.log_node(&dog).unwrap();

        let lines = logged.log().lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], serde_json::to_string(&vet).unwrap());
        assert_eq!(lines[1], serde_json::to_string(&dog).unwrap());
    }

    #[test]
    fn test_logged_generates_like_live() {
        let mut live = Live::from_seed(5);
        let mut logged = Logged::new(Live::from_seed(5));
        assert_eq!(
            live.generate_node::<Dog>().unwrap(),
            logged.generate_node::<Dog>().unwrap()
        );
        assert_eq!(logged.kind(), RuntimeKind::Logged);
        assert_eq!(logged.live().seed().map(|s| s.value), Some(5));
    }

    #[test]
    fn test_generate_without_log_records_nothing() {
        let mut logged = Logged::new(Live::from_seed(3));
        let _: Dog = logged.generate_node().unwrap();
        assert!(logged.into_log().is_empty());
    }
}
