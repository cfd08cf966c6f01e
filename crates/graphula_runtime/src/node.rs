//! Node construction and the bounded retry controller.
//!
//! Every node is built the same way: generate a raw value, log it, apply the
//! caller's edit, graft the dependencies, and try to insert. A rejected insert
//! throws the candidate away and starts over from a fresh generation, up to
//! the attempt bound. Dependencies are already-persisted values and are never
//! retried here.

use crate::effect::{Generate, Persist};
use crate::graph::Graph;
use graphula_core::{Entity, Fixture, GraphResult, GraphulaError, HasDependencies};

impl<G: Generate, P: Persist> Graph<'_, G, P> {
    /// Run `make` and insert its candidate until the backend accepts one.
    ///
    /// Exactly `max_attempts` candidates are made before giving up.
    ///
    /// # Errors
    ///
    /// Returns [`GraphulaError::MaxAttemptsExceeded`] once the bound is spent,
    /// or any error raised by `make` or the backend
    pub fn try_insert<T, F>(&mut self, max_attempts: u32, mut make: F) -> GraphResult<Entity<T>>
    where
        T: Fixture,
        F: FnMut(&mut Self) -> GraphResult<T>,
    {
        let fixture = T::fixture_name();
        for attempt in 1..=max_attempts {
            let candidate = make(self)?;
            match self.insert(candidate)? {
                Some(entity) => {
                    tracing::debug!(fixture, attempt, key = %entity.key(), "node persisted");
                    return Ok(entity);
                }
                None => {
                    tracing::debug!(fixture, attempt, max_attempts, "insert rejected, regenerating");
                }
            }
        }

        tracing::warn!(fixture, max_attempts, "giving up on node");
        Err(GraphulaError::MaxAttemptsExceeded {
            fixture,
            attempts: max_attempts,
        })
    }

    /// Generate and persist a node with no dependencies
    ///
    /// # Errors
    ///
    /// Returns error if the node cannot be generated or persisted
    pub fn node<T>(&mut self) -> GraphResult<Entity<T>>
    where
        T: Fixture + HasDependencies<Dependencies = ()>,
    {
        self.node_edit_with((), |value| value)
    }

    /// Generate, edit, and persist a node with no dependencies
    ///
    /// # Errors
    ///
    /// Returns error if the node cannot be generated or persisted
    pub fn node_edit<T, E>(&mut self, edit: E) -> GraphResult<Entity<T>>
    where
        T: Fixture + HasDependencies<Dependencies = ()>,
        E: FnMut(T) -> T,
    {
        self.node_edit_with((), edit)
    }

    /// Generate a node, graft `dependencies` into it, and persist it
    ///
    /// # Errors
    ///
    /// Returns error if the node cannot be generated or persisted
    pub fn node_with<T>(&mut self, dependencies: T::Dependencies) -> GraphResult<Entity<T>>
    where
        T: Fixture + HasDependencies,
    {
        self.node_edit_with(dependencies, |value| value)
    }

    /// Generate a node, edit it, graft `dependencies`, and persist it.
    ///
    /// The edit runs before grafting, so dependencies always win over edits
    /// to the same fields. The edit runs once per attempt.
    ///
    /// # Errors
    ///
    /// Returns error if the node cannot be generated or persisted
    pub fn node_edit_with<T, E>(
        &mut self,
        dependencies: T::Dependencies,
        edit: E,
    ) -> GraphResult<Entity<T>>
    where
        T: Fixture + HasDependencies,
        E: FnMut(T) -> T,
    {
        let max_attempts = self.config().max_attempts;
        self.node_edit_with_attempts(max_attempts, dependencies, edit)
    }

    /// [`Graph::node_edit_with`] with an explicit attempt bound for this node
    /// only, ignoring the configured one.
    ///
    /// # Errors
    ///
    /// Returns error if the node cannot be generated or persisted
    pub fn node_edit_with_attempts<T, E>(
        &mut self,
        max_attempts: u32,
        dependencies: T::Dependencies,
        mut edit: E,
    ) -> GraphResult<Entity<T>>
    where
        T: Fixture + HasDependencies,
        E: FnMut(T) -> T,
    {
        self.try_insert(max_attempts, |graph| {
            let raw: T = graph.generate()?;
            graph.log(&raw)?;
            Ok(edit(raw).depends_on(&dependencies))
        })
    }
}
