//! Deterministic replay from a recorded log.

use crate::effect::{Generate, RuntimeKind};
use graphula_core::{Fixture, GraphResult};
use graphula_log::ReplayLog;
use std::path::Path;

/// Feeds recorded values back in order instead of generating.
///
/// There is no fallback to random generation: running out of entries or
/// meeting an entry of the wrong type ends the run.
pub struct Replay {
    log: ReplayLog,
}

impl Replay {
    /// Replay an in-memory log
    #[must_use]
    pub fn new(log: ReplayLog) -> Self {
        Self { log }
    }

    /// Replay a log file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read
    pub fn open(path: impl AsRef<Path>) -> GraphResult<Self> {
        Ok(Self::new(ReplayLog::open(path)?))
    }

    /// The log being replayed
    #[must_use]
    pub fn log(&self) -> &ReplayLog {
        &self.log
    }
}

impl Generate for Replay {
    fn kind(&self) -> RuntimeKind {
        RuntimeKind::Replay
    }

    fn generate_node<T: Fixture>(&mut self) -> GraphResult<T> {
        self.log.next_entry()
    }

    fn log_node<T: Fixture>(&mut self, _value: &T) -> GraphResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Dog, Veterinarian};
    use graphula_core::GraphulaError;

    #[test]
    fn test_replay_pops_in_order() {
        let mut replay = Replay::new(ReplayLog::parse(
            "{\"name\":\"herriot\"}\n{\"name\":\"rex\",\"age\":2}\n",
        ));
        let vet: Veterinarian = replay.generate_node().unwrap();
        let dog: Dog = replay.generate_node().unwrap();
        assert_eq!(vet.name, "herriot");
        assert_eq!(dog.name, "rex");
        assert_eq!(replay.log().remaining(), 0);
    }

    #[test]
    fn test_replay_log_node_is_noop() {
        let mut replay = Replay::new(ReplayLog::parse("{\"name\":\"herriot\"}"));
        let vet: Veterinarian = replay.generate_node().unwrap();
        replay.log_node(&vet).unwrap();
        assert_eq!(replay.log().consumed(), 1);
        assert_eq!(replay.kind(), RuntimeKind::Replay);
    }

    #[test]
    fn test_replay_wrong_type_is_decode_error() {
        let mut replay = Replay::new(ReplayLog::parse("{\"name\":\"herriot\"}"));
        assert!(matches!(
            replay.generate_node::<Dog>(),
            Err(GraphulaError::ReplayDecode { fixture: "Dog", .. })
        ));
    }

    #[test]
    fn test_replay_exhausted() {
        let mut replay = Replay::new(ReplayLog::parse(""));
        assert!(matches!(
            replay.generate_node::<Dog>(),
            Err(GraphulaError::ReplayExhausted { consumed: 0, fixture: "Dog" })
        ));
    }
}
