//! The fixture contract.
//!
//! A fixture is any type the graph can produce at random, write to a log
//! line, and read back from one. Random generation is keyed by the requested
//! type through [`Fixture::arbitrary`]; the concrete source of randomness is
//! chosen by the runtime, never by the fixture.

use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A value the graph can generate, log, and replay.
pub trait Fixture: Serialize + DeserializeOwned + Sized {
    /// Produce a fresh random value.
    fn arbitrary<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Name used to tag errors and log output.
    ///
    /// Defaults to the unqualified type name, so fixtures in different modules
    /// that share a name also share a tag. Override it to tell them apart.
    /// Backends that need a unique key should use the full type path.
    fn fixture_name() -> &'static str {
        short_type_name::<Self>()
    }
}

/// Unqualified name of `T`, e.g. `Dog` for `my_app::fixtures::Dog`.
///
/// Generic types are returned fully qualified since stripping the path
/// would also strip it from the type arguments.
#[must_use]
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}
