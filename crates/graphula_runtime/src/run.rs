//! Entry points.
//!
//! Each entry point picks one generation strategy, builds a [`Graph`] over
//! it and the caller's persistence handler, and interprets the program.
//! Programs are written generically so the same function can be handed to
//! any of them:
//!
//! ```
//! use graphula_runtime::{Generate, Graph, GraphResult, MemoryStore, Persist, run_graphula};
//! # use graphula_runtime::{Fixture, no_dependencies};
//! # use rand::Rng;
//! # #[derive(serde::Serialize, serde::Deserialize)]
//! # struct Dog { name: String }
//! # impl Fixture for Dog {
//! #     fn arbitrary<R: Rng + ?Sized>(rng: &mut R) -> Self {
//! #         Self { name: format!("dog-{}", rng.gen_range(0..100u32)) }
//! #     }
//! # }
//! # no_dependencies!(Dog);
//!
//! fn kennel<G: Generate, P: Persist>(graph: &mut Graph<'_, G, P>) -> GraphResult<usize> {
//!     graph.node::<Dog>()?;
//!     graph.node::<Dog>()?;
//!     Ok(2)
//! }
//!
//! let mut store = MemoryStore::new();
//! assert_eq!(run_graphula(&mut store, kennel).unwrap(), 2);
//! ```

use crate::effect::Persist;
use crate::graph::Graph;
use crate::live::Live;
use crate::logged::Logged;
use crate::replay::Replay;
use crate::report::{self, Destination};
use crate::seed::Seed;
use graphula_core::GraphResult;
use std::path::Path;

/// Run `program` with live random generation from a fresh seed.
///
/// # Errors
///
/// Returns whatever error the program raises
pub fn run_graphula<P, R, F>(persist: &mut P, program: F) -> GraphResult<R>
where
    P: Persist,
    F: FnOnce(&mut Graph<'_, Live, P>) -> GraphResult<R>,
{
    run_graphula_seeded(Seed::from_entropy(), persist, program)
}

/// Run `program` with live random generation from `seed`.
///
/// # Errors
///
/// Returns whatever error the program raises
pub fn run_graphula_seeded<P, R, F>(
    seed: impl Into<Seed>,
    persist: &mut P,
    program: F,
) -> GraphResult<R>
where
    P: Persist,
    F: FnOnce(&mut Graph<'_, Live, P>) -> GraphResult<R>,
{
    let mut graph = Graph::new(Live::from_seed(seed), persist);
    program(&mut graph)
}

/// Run `program` with live random generation, recording every generated
/// value. If an assertion fails, the record is written to a fresh temp file
/// and the failure names it.
///
/// # Errors
///
/// Returns error if the temp file cannot be created, or whatever error the
/// program raises
pub fn run_graphula_logged<P, R, F>(persist: &mut P, program: F) -> GraphResult<R>
where
    P: Persist,
    F: FnOnce(&mut Graph<'_, Logged, P>) -> GraphResult<R>,
{
    run_logged(Destination::temp()?, persist, program)
}

/// Like [`run_graphula_logged`], recording to `path` instead of a temp file.
///
/// `path` is created (or truncated) up front and only written on failure.
///
/// # Errors
///
/// Returns error if `path` cannot be created, or whatever error the program
/// raises
pub fn run_graphula_logged_with_file<P, R, F>(
    path: impl AsRef<Path>,
    persist: &mut P,
    program: F,
) -> GraphResult<R>
where
    P: Persist,
    F: FnOnce(&mut Graph<'_, Logged, P>) -> GraphResult<R>,
{
    run_logged(Destination::create(path)?, persist, program)
}

fn run_logged<P, R, F>(destination: Destination, persist: &mut P, program: F) -> GraphResult<R>
where
    P: Persist,
    F: FnOnce(&mut Graph<'_, Logged, P>) -> GraphResult<R>,
{
    let mut graph = Graph::new(Logged::new(Live::from_entropy()), persist);
    match report::catch_failure(|| program(&mut graph)) {
        Ok(result) => result,
        Err(failure) => {
            report::report_logged_failure(failure, destination, graph.generator().log())
        }
    }
}

/// Run `program` feeding it the values recorded in `path`, in order. If an
/// assertion fails, the failure names `path`.
///
/// # Errors
///
/// Returns error if `path` cannot be read, if the program asks for more
/// values than were recorded or for a value of the wrong type, or whatever
/// error the program raises
pub fn run_graphula_replay<P, R, F>(
    path: impl AsRef<Path>,
    persist: &mut P,
    program: F,
) -> GraphResult<R>
where
    P: Persist,
    F: FnOnce(&mut Graph<'_, Replay, P>) -> GraphResult<R>,
{
    let path = path.as_ref();
    let mut graph = Graph::new(Replay::open(path)?, persist);
    match report::catch_failure(|| program(&mut graph)) {
        Ok(result) => result,
        Err(failure) => report::report_replay_failure(failure, path),
    }
}
