//! Live random generation.

use crate::effect::{Generate, RuntimeKind};
use crate::seed::Seed;
use graphula_core::{Fixture, GraphResult};
use rand::RngCore;
use rand_chacha::ChaCha8Rng;

/// Generates every node at random; logging is a no-op.
pub struct Live<R = ChaCha8Rng> {
    rng: R,
    seed: Option<Seed>,
}

impl Live {
    /// Create from a seed
    #[must_use]
    pub fn from_seed(seed: impl Into<Seed>) -> Self {
        let seed = seed.into();
        tracing::debug!(%seed, source = ?seed.source, "live generator seeded");
        Self {
            rng: seed.rng(),
            seed: Some(seed),
        }
    }

    /// Create from a fresh entropy seed
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::from_seed(Seed::from_entropy())
    }
}

impl<R: RngCore> Live<R> {
    /// Create over a caller-provided generator
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self { rng, seed: None }
    }

    /// Seed this generator started from, if it was seeded here
    #[must_use]
    pub fn seed(&self) -> Option<&Seed> {
        self.seed.as_ref()
    }
}

impl<R: RngCore> Generate for Live<R> {
    fn kind(&self) -> RuntimeKind {
        RuntimeKind::Live
    }

    fn generate_node<T: Fixture>(&mut self) -> GraphResult<T> {
        Ok(T::arbitrary(&mut self.rng))
    }

    fn log_node<T: Fixture>(&mut self, _value: &T) -> GraphResult<()> {
        Ok(())
    }
}
