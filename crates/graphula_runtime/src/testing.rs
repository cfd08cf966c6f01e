//! Fixtures and backends shared by the unit tests.

use crate::effect::Persist;
use crate::report::catch_failure;
use graphula_core::{
    Entity, EntityKey, Fixture, GraphResult, GraphulaError, graft_dependencies, no_dependencies,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Message of the string panic `program` raises
pub fn failure_text<R>(program: impl FnOnce() -> R) -> String {
    match catch_failure(program) {
        Ok(_) => panic!("expected a panic"),
        Err(failure) => failure.message().expect("string panic payload").to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Veterinarian {
    pub name: String,
}

impl Fixture for Veterinarian {
    fn arbitrary<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            name: format!("vet-{}", rng.gen_range(0..1_000_000u32)),
        }
    }
}

no_dependencies!(Veterinarian);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub vet: EntityKey,
}

impl Fixture for Owner {
    fn arbitrary<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            name: format!("owner-{}", rng.gen_range(0..1_000_000u32)),
            vet: EntityKey::new(rng.r#gen()),
        }
    }
}

graft_dependencies!(Owner { vet } : Only<EntityKey>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub name: String,
    pub age: u8,
}

impl Fixture for Dog {
    fn arbitrary<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            name: format!("dog-{}", rng.gen_range(0..1_000_000u32)),
            age: rng.gen_range(0..20),
        }
    }
}

no_dependencies!(Dog);

/// Accepts everything except a scripted number of inserts per fixture type.
#[derive(Debug, Default)]
pub struct RejectingStore {
    reject_first: HashMap<&'static str, u32>,
    attempts: HashMap<&'static str, u32>,
    inserted: Vec<(&'static str, String)>,
    next_key: u64,
}

impl RejectingStore {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn rejecting_first(fixture: &'static str, count: u32) -> Self {
        let mut store = Self::default();
        store.reject_first.insert(fixture, count);
        store
    }

    pub fn always_rejecting(fixture: &'static str) -> Self {
        Self::rejecting_first(fixture, u32::MAX)
    }

    pub fn attempts(&self, fixture: &str) -> u32 {
        self.attempts.get(fixture).copied().unwrap_or(0)
    }

    /// Fixture name and JSON of every accepted insert, in order
    pub fn inserted(&self) -> &[(&'static str, String)] {
        &self.inserted
    }
}

impl Persist for RejectingStore {
    fn insert<T: Fixture>(&mut self, value: T) -> GraphResult<Option<Entity<T>>> {
        let fixture = T::fixture_name();
        let attempt = self.attempts.entry(fixture).or_insert(0);
        *attempt += 1;
        let rejections = self.reject_first.get(fixture).copied().unwrap_or(0);
        if *attempt <= rejections {
            return Ok(None);
        }

        let json =
            serde_json::to_string(&value).map_err(|e| GraphulaError::persist(fixture, e))?;
        self.inserted.push((fixture, json));
        self.next_key += 1;
        Ok(Some(Entity::new(EntityKey::new(self.next_key), value)))
    }
}
