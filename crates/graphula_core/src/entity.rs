//! Persisted fixtures.

use serde::{Deserialize, Serialize};

/// Identity a persistence backend assigned to a stored fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey(u64);

impl EntityKey {
    /// Create from a raw backend key
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw key
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityKey {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "key_{}", self.0)
    }
}

/// A fixture together with the key it was stored under
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity<T> {
    key: EntityKey,
    value: T,
}

impl<T> Entity<T> {
    /// Pair a stored value with its key
    #[must_use]
    pub const fn new(key: EntityKey, value: T) -> Self {
        Self { key, value }
    }

    /// Key the value was stored under
    #[must_use]
    pub const fn key(&self) -> EntityKey {
        self.key
    }

    /// The stored value
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Take the stored value
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Split into key and value
    #[must_use]
    pub fn into_parts(self) -> (EntityKey, T) {
        (self.key, self.value)
    }
}

impl<T> std::ops::Deref for Entity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}
