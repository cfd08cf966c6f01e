//! GRAPHULA Core Types
//!
//! This crate contains the pure contracts shared by every runtime:
//! what a fixture is, how it declares and receives its dependencies,
//! what a persisted entity looks like, and the error kinds a run can raise.
//! Nothing here performs I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dependency;
pub mod entity;
pub mod error;
pub mod fixture;

// Re-exports
pub use dependency::{HasDependencies, Only};
pub use entity::{Entity, EntityKey};
pub use error::{GraphResult, GraphulaError};
pub use fixture::{Fixture, short_type_name};
