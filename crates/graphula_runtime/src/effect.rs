//! The effect algebra.
//!
//! A graph program performs four primitive effects. Three belong to the
//! generation side and are interpreted by a [`Generate`] strategy; one
//! belongs to the persistence side and is interpreted by the caller's
//! [`Persist`] handler. Neither side knows about the other, which is what
//! lets the same program run live, logged, or replayed against any backend.

use graphula_core::{Entity, Fixture, GraphResult};
use serde::{Deserialize, Serialize};

/// The primitive effects a program can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Produce one raw value of the requested type
    GenerateNode,
    /// Record a value for later reproduction
    LogNode,
    /// Attempt to persist a value
    Insert,
    /// Abort the program with an error
    Throw,
}

/// Which interpreter handles an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectSide {
    /// Handled by the runtime strategy
    Generation,
    /// Handled by the caller's persistence handler
    Persistence,
}

impl Effect {
    /// Side of the algebra this effect belongs to
    #[must_use]
    pub const fn side(self) -> EffectSide {
        match self {
            Self::GenerateNode | Self::LogNode | Self::Throw => EffectSide::Generation,
            Self::Insert => EffectSide::Persistence,
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GenerateNode => write!(f, "generate"),
            Self::LogNode => write!(f, "log"),
            Self::Insert => write!(f, "insert"),
            Self::Throw => write!(f, "throw"),
        }
    }
}

/// Runtime strategy identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuntimeKind {
    /// Random generation, nothing recorded
    Live,
    /// Random generation, every value recorded
    Logged,
    /// Values read back from a recorded log
    Replay,
}

impl std::fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Logged => write!(f, "logged"),
            Self::Replay => write!(f, "replay"),
        }
    }
}

/// Generation-side interpreter.
///
/// `Throw` needs no hook here: it is an `Err` returned through the program,
/// and every strategy propagates it unchanged.
pub trait Generate {
    /// Which strategy this is
    fn kind(&self) -> RuntimeKind;

    /// Interpret [`Effect::GenerateNode`]
    ///
    /// # Errors
    ///
    /// Returns error if the strategy cannot produce a `T`
    fn generate_node<T: Fixture>(&mut self) -> GraphResult<T>;

    /// Interpret [`Effect::LogNode`]
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be recorded
    fn log_node<T: Fixture>(&mut self, value: &T) -> GraphResult<()>;
}

/// Persistence-side interpreter, supplied by the caller.
pub trait Persist {
    /// Interpret [`Effect::Insert`].
    ///
    /// `Ok(None)` rejects the value (typically a uniqueness violation) and
    /// asks for a fresh candidate. `Err` is a backend failure and ends the run.
    ///
    /// # Errors
    ///
    /// Returns error if the backend fails
    fn insert<T: Fixture>(&mut self, value: T) -> GraphResult<Option<Entity<T>>>;
}

impl<P: Persist + ?Sized> Persist for &mut P {
    fn insert<T: Fixture>(&mut self, value: T) -> GraphResult<Option<Entity<T>>> {
        (**self).insert(value)
    }
}
