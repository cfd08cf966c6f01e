//! GRAPHULA Runtime
//!
//! Builds graphs of interdependent fixtures. A program is any function over
//! a [`Graph`]; it asks for nodes, the graph generates candidates through a
//! generation strategy, grafts dependencies, and persists through the
//! caller's [`Persist`] handler, retrying rejected candidates up to a bound.
//!
//! Three strategies interpret generation: [`Live`] random generation,
//! [`Logged`] random generation that records every value, and [`Replay`]
//! which feeds a recorded log back in order. When a logged run fails an
//! assertion, the record is written to a file and the failure names it;
//! replaying that file reproduces the run.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod effect;
pub mod graph;
pub mod live;
pub mod logged;
pub mod node;
pub mod replay;
pub mod report;
pub mod run;
pub mod seed;
pub mod store;

pub use effect::{Effect, EffectSide, Generate, Persist, RuntimeKind};
pub use graph::{DEFAULT_MAX_ATTEMPTS, Graph, GraphConfig, GraphStats};
pub use live::Live;
pub use logged::Logged;
pub use replay::Replay;
pub use run::{
    run_graphula, run_graphula_logged, run_graphula_logged_with_file, run_graphula_replay,
    run_graphula_seeded,
};
pub use seed::{Seed, SeedSource};
pub use store::{MemoryStore, StoreStats};

pub use graphula_core::{
    Entity, EntityKey, Fixture, GraphResult, GraphulaError, HasDependencies, Only,
    graft_dependencies, no_dependencies,
};

#[cfg(test)]
pub(crate) mod testing;
