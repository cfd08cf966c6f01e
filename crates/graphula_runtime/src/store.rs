//! In-memory persistence backend.

use crate::effect::Persist;
use fnv::{FnvHashMap, FnvHashSet};
use graphula_core::{Entity, EntityKey, Fixture, GraphResult, GraphulaError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Store statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Accepted inserts
    pub inserted: u64,
    /// Inserts refused by a uniqueness constraint
    pub rejected: u64,
}

fn table_name<T: Fixture>() -> &'static str {
    std::any::type_name::<T>()
}

#[derive(Debug)]
struct UniqueIndex {
    field: String,
    seen: FnvHashSet<String>,
}

impl UniqueIndex {
    fn value_of(&self, row: &Value) -> Option<String> {
        row.get(&self.field).map(Value::to_string)
    }
}

/// Keeps fixtures as JSON rows, one table per fixture type.
///
/// Tables are keyed by the full type path, so two fixtures that share a
/// short name live apart. Keys are assigned sequentially from 1 across all
/// tables. A table may declare fields that must be unique; an insert that
/// repeats one is refused with `None`, which the graph treats as a rejection
/// and regenerates. Rows missing a constrained field are not checked
/// against it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: FnvHashMap<&'static str, BTreeMap<EntityKey, Value>>,
    unique: FnvHashMap<&'static str, Vec<UniqueIndex>>,
    next_key: u64,
    stats: StoreStats,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to be unique among stored `T` rows
    #[must_use]
    pub fn unique_on<T: Fixture>(mut self, field: impl Into<String>) -> Self {
        let table = table_name::<T>();
        let field = field.into();
        let seen = self
            .tables
            .get(table)
            .into_iter()
            .flat_map(|rows| rows.values())
            .filter_map(|row| row.get(&field).map(Value::to_string))
            .collect();
        self.unique
            .entry(table)
            .or_default()
            .push(UniqueIndex { field, seen });
        self
    }

    /// Total rows across all tables
    #[must_use]
    pub fn count(&self) -> usize {
        self.tables.values().map(BTreeMap::len).sum()
    }

    /// Rows stored for `T`
    #[must_use]
    pub fn count_of<T: Fixture>(&self) -> usize {
        self.tables.get(table_name::<T>()).map_or(0, BTreeMap::len)
    }

    /// Load the `T` stored under `key`
    ///
    /// # Errors
    ///
    /// Returns error if the stored row does not decode as `T`
    pub fn get<T: Fixture>(&self, key: EntityKey) -> GraphResult<Option<T>> {
        let Some(row) = self.tables.get(table_name::<T>()).and_then(|rows| rows.get(&key)) else {
            return Ok(None);
        };
        serde_json::from_value(row.clone())
            .map(Some)
            .map_err(|e| GraphulaError::persist(T::fixture_name(), e))
    }

    /// Store statistics
    #[must_use]
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    fn collides(&self, table: &'static str, row: &Value) -> Option<&str> {
        self.unique.get(table)?.iter().find_map(|index| {
            let value = index.value_of(row)?;
            index.seen.contains(&value).then_some(index.field.as_str())
        })
    }
}

impl Persist for MemoryStore {
    fn insert<T: Fixture>(&mut self, value: T) -> GraphResult<Option<Entity<T>>> {
        let fixture = T::fixture_name();
        let table = table_name::<T>();
        let row = serde_json::to_value(&value).map_err(|e| GraphulaError::persist(fixture, e))?;

        if let Some(field) = self.collides(table, &row) {
            tracing::debug!(fixture, field, "unique constraint violated");
            self.stats.rejected += 1;
            return Ok(None);
        }

        if let Some(indexes) = self.unique.get_mut(table) {
            for index in indexes {
                if let Some(seen) = index.value_of(&row) {
                    index.seen.insert(seen);
                }
            }
        }

        self.next_key += 1;
        let key = EntityKey::new(self.next_key);
        self.tables.entry(table).or_default().insert(key, row);
        self.stats.inserted += 1;
        Ok(Some(Entity::new(key, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::live::Live;
    use crate::testing::{Dog, Owner, Veterinarian};
    use graphula_core::Only;

    fn dog(name: &str, age: u8) -> Dog {
        Dog {
            name: name.to_string(),
            age,
        }
    }

    #[test]
    fn test_sequential_keys_across_tables() {
        let mut store = MemoryStore::new();
        let a = store.insert(dog("rex", 1)).unwrap().unwrap();
        let b = store
            .insert(Veterinarian {
                name: "herriot".to_string(),
            })
            .unwrap()
            .unwrap();
        assert_eq!(a.key(), EntityKey::new(1));
        assert_eq!(b.key(), EntityKey::new(2));
        assert_eq!(store.count(), 2);
        assert_eq!(store.count_of::<Dog>(), 1);
        assert_eq!(store.count_of::<Owner>(), 0);
    }

    #[test]
    fn test_get_round_trips_and_checks_table() {
        let mut store = MemoryStore::new();
        let rex = store.insert(dog("rex", 4)).unwrap().unwrap();
        assert_eq!(store.get::<Dog>(rex.key()).unwrap(), Some(dog("rex", 4)));
        assert_eq!(store.get::<Veterinarian>(rex.key()).unwrap(), None);
        assert_eq!(store.get::<Dog>(EntityKey::new(99)).unwrap(), None);
    }

    #[test]
    fn test_unique_on_rejects_duplicates() {
        let mut store = MemoryStore::new().unique_on::<Dog>("name");
        assert!(store.insert(dog("rex", 1)).unwrap().is_some());
        assert!(store.insert(dog("rex", 2)).unwrap().is_none());
        assert!(store.insert(dog("fido", 2)).unwrap().is_some());
        assert_eq!(
            store.stats(),
            &StoreStats {
                inserted: 2,
                rejected: 1
            }
        );
        // other tables are unconstrained
        let vet = || Veterinarian {
            name: "rex".to_string(),
        };
        assert!(store.insert(vet()).unwrap().is_some());
        assert!(store.insert(vet()).unwrap().is_some());
    }

    mod kennel {
        use graphula_core::{Fixture, no_dependencies};
        use rand::Rng;
        use serde::{Deserialize, Serialize};

        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct Dog {
            pub breed: String,
        }

        impl Fixture for Dog {
            fn arbitrary<R: Rng + ?Sized>(rng: &mut R) -> Self {
                Self {
                    breed: format!("breed-{}", rng.gen_range(0..100u32)),
                }
            }
        }

        no_dependencies!(Dog);
    }

    #[test]
    fn test_same_short_name_gets_own_table() {
        let mut store = MemoryStore::new().unique_on::<Dog>("name");
        assert_eq!(kennel::Dog::fixture_name(), Dog::fixture_name());

        let rex = store.insert(dog("rex", 1)).unwrap().unwrap();
        let collie = store
            .insert(kennel::Dog {
                breed: "collie".to_string(),
            })
            .unwrap()
            .unwrap();

        assert_eq!(store.count_of::<Dog>(), 1);
        assert_eq!(store.count_of::<kennel::Dog>(), 1);
        assert_eq!(store.get::<kennel::Dog>(rex.key()).unwrap(), None);
        assert_eq!(store.get::<Dog>(collie.key()).unwrap(), None);
        assert_eq!(
            store.get::<kennel::Dog>(collie.key()).unwrap().map(|d| d.breed),
            Some("collie".to_string())
        );
    }

    #[test]
    fn test_unique_on_indexes_existing_rows() {
        let mut store = MemoryStore::new();
        store.insert(dog("rex", 1)).unwrap();
        let mut store = store.unique_on::<Dog>("name");
        assert!(store.insert(dog("rex", 3)).unwrap().is_none());
    }

    #[test]
    fn test_node_regenerates_after_collision() {
        let mut store = MemoryStore::new().unique_on::<Dog>("name");
        let mut graph = Graph::new(Live::from_seed(5), &mut store);
        graph
            .node_edit::<Dog, _>(|mut d| {
                d.name = "rex".to_string();
                d
            })
            .unwrap();

        let mut attempt = 0;
        let second = graph
            .node_edit::<Dog, _>(|mut d| {
                attempt += 1;
                if attempt < 4 {
                    d.name = "rex".to_string();
                }
                d
            })
            .unwrap();
        assert_ne!(second.name, "rex");
        assert_eq!(graph.stats().rejected, 3);
        drop(graph);
        assert_eq!(store.stats().rejected, 3);
        assert_eq!(store.count_of::<Dog>(), 2);
    }

    #[test]
    fn test_node_gives_up_on_permanent_collision() {
        let mut store = MemoryStore::new().unique_on::<Dog>("name");
        let mut graph = Graph::new(Live::from_seed(5), &mut store);
        let rex = |mut d: Dog| {
            d.name = "rex".to_string();
            d
        };
        graph.node_edit::<Dog, _>(rex).unwrap();
        assert!(matches!(
            graph.node_edit::<Dog, _>(rex),
            Err(GraphulaError::MaxAttemptsExceeded { attempts: 10, .. })
        ));
        drop(graph);
        assert_eq!(store.stats().rejected, 10);
    }

    #[test]
    fn test_owner_references_stored_vet() {
        let mut store = MemoryStore::new();
        let mut graph = Graph::new(Live::from_seed(6), &mut store);
        let vet = graph.node::<Veterinarian>().unwrap();
        let owner = graph.node_with::<Owner>(Only(vet.key())).unwrap();
        drop(graph);

        let stored: Owner = store.get(owner.key()).unwrap().unwrap();
        assert_eq!(stored.vet, vet.key());
        assert_eq!(
            store.get::<Veterinarian>(stored.vet).unwrap().as_ref(),
            Some(vet.value())
        );
    }
}
