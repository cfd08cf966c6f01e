//! The graph: one run's dispatcher for the effect algebra.

use crate::effect::{Effect, Generate, Persist, RuntimeKind};
use graphula_core::{Entity, Fixture, GraphResult, GraphulaError};
use serde::{Deserialize, Serialize};

/// Attempts allowed per node before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Graph configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Generation attempts per node before `MaxAttemptsExceeded`
    pub max_attempts: u32,
}

impl GraphConfig {
    /// Set the attempt bound
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Effects dispatched during a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// `GenerateNode` effects
    pub generated: u64,
    /// `LogNode` effects
    pub logged: u64,
    /// `Insert` effects
    pub inserts: u64,
    /// Inserts the backend rejected
    pub rejected: u64,
    /// `Throw` effects
    pub thrown: u64,
}

impl GraphStats {
    fn record(&mut self, effect: Effect) {
        match effect {
            Effect::GenerateNode => self.generated += 1,
            Effect::LogNode => self.logged += 1,
            Effect::Insert => self.inserts += 1,
            Effect::Throw => self.thrown += 1,
        }
    }
}

/// A graph under construction.
///
/// Owns the generation strategy for the duration of one run and borrows the
/// caller's persistence handler. Programs take `&mut Graph<'_, G, P>` generic
/// over both, so one program runs under every strategy and backend.
pub struct Graph<'p, G, P> {
    generator: G,
    persist: &'p mut P,
    config: GraphConfig,
    stats: GraphStats,
}

impl<'p, G: Generate, P: Persist> Graph<'p, G, P> {
    /// Create a graph over a strategy and a persistence handler
    #[must_use]
    pub fn new(generator: G, persist: &'p mut P) -> Self {
        Self {
            generator,
            persist,
            config: GraphConfig::default(),
            stats: GraphStats::default(),
        }
    }

    /// Create with custom config
    #[must_use]
    pub fn with_config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration
    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Mutable configuration, for programs that tune their own run
    pub fn config_mut(&mut self) -> &mut GraphConfig {
        &mut self.config
    }

    /// Replace the configuration
    pub fn set_config(&mut self, config: GraphConfig) {
        self.config = config;
    }

    /// Effects dispatched so far
    #[must_use]
    pub fn stats(&self) -> &GraphStats {
        &self.stats
    }

    /// Strategy interpreting generation effects
    #[must_use]
    pub fn runtime(&self) -> RuntimeKind {
        self.generator.kind()
    }

    /// The generation strategy
    #[must_use]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// The persistence handler
    pub fn persist(&mut self) -> &mut P {
        &mut *self.persist
    }

    /// Perform [`Effect::GenerateNode`]
    ///
    /// # Errors
    ///
    /// Returns error if the strategy cannot produce a `T`
    pub fn generate<T: Fixture>(&mut self) -> GraphResult<T> {
        self.dispatch(Effect::GenerateNode, T::fixture_name());
        self.generator.generate_node()
    }

    /// Perform [`Effect::LogNode`]
    ///
    /// # Errors
    ///
    /// Returns error if the strategy cannot record the value
    pub fn log<T: Fixture>(&mut self, value: &T) -> GraphResult<()> {
        self.dispatch(Effect::LogNode, T::fixture_name());
        self.generator.log_node(value)
    }

    /// Perform [`Effect::Insert`]
    ///
    /// # Errors
    ///
    /// Returns error if the backend fails
    pub fn insert<T: Fixture>(&mut self, value: T) -> GraphResult<Option<Entity<T>>> {
        self.dispatch(Effect::Insert, T::fixture_name());
        let inserted = self.persist.insert(value)?;
        if inserted.is_none() {
            self.stats.rejected += 1;
        }
        Ok(inserted)
    }

    /// Perform [`Effect::Throw`], aborting the program with `error`
    ///
    /// # Errors
    ///
    /// Always returns `error`
    pub fn throw<T>(&mut self, error: GraphulaError) -> GraphResult<T> {
        self.dispatch(Effect::Throw, error.fixture().unwrap_or("-"));
        tracing::debug!(runtime = %self.generator.kind(), %error, "program threw");
        Err(error)
    }

    fn dispatch(&mut self, effect: Effect, fixture: &'static str) {
        self.stats.record(effect);
        tracing::trace!(runtime = %self.generator.kind(), %effect, fixture, "dispatch");
    }
}
