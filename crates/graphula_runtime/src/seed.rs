//! Seeds for live generation.
//!
//! A live run that is not logged can still be reproduced if its seed is
//! known; every live runtime reports the seed it starts from.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::Hasher;

/// Where a seed came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedSource {
    /// From a literal value
    Literal(u64),
    /// From a string (hashed)
    FromString(String),
    /// Drawn from OS entropy (non-deterministic)
    Entropy,
}

/// Seed for a live runtime's random generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    /// Seed value
    pub value: u64,
    /// Source of the seed
    pub source: SeedSource,
}

impl Seed {
    /// Create a seed from a literal value
    #[must_use]
    pub fn from_literal(value: u64) -> Self {
        Self {
            value,
            source: SeedSource::Literal(value),
        }
    }

    /// Create a seed by hashing a string, e.g. a test name
    #[must_use]
    pub fn from_string(s: impl Into<String>) -> Self {
        let s = s.into();
        let mut hasher = fnv::FnvHasher::default();
        hasher.write(s.as_bytes());
        Self {
            value: hasher.finish(),
            source: SeedSource::FromString(s),
        }
    }

    /// Draw a fresh seed from OS entropy
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            value: rand::random(),
            source: SeedSource::Entropy,
        }
    }

    /// Create RNG from seed
    #[must_use]
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.value)
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self::from_literal(value)
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
