//! Dependency grafting.
//!
//! A fixture declares the shape of the already-persisted values it needs
//! through [`HasDependencies::Dependencies`] and receives them through
//! [`HasDependencies::depends_on`]. Fixtures with nothing to receive use the
//! empty tuple, most conveniently via [`no_dependencies!`](crate::no_dependencies).
//!
//! Grafting must be idempotent: applying the same dependencies twice gives
//! the same value as applying them once.

use serde::{Deserialize, Serialize};

/// Declares what a fixture depends on and how those values are grafted in.
pub trait HasDependencies: Sized {
    /// Shape of the dependencies: `()`, [`Only<T>`], or a tuple.
    ///
    /// Field order must match the order values are grafted into `Self`.
    type Dependencies;

    /// Inject `dependencies` into `self`.
    #[must_use]
    fn depends_on(self, dependencies: &Self::Dependencies) -> Self;
}

/// Single dependency wrapper, standing in for a one-element tuple.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Only<T>(pub T);

impl<T> Only<T> {
    /// Wrap a single dependency
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the wrapped dependency
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.0
    }

    /// Unwrap the dependency
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Only<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

/// Declare fixtures that depend on nothing.
///
/// ```
/// # use graphula_core::{no_dependencies, HasDependencies};
/// struct Veterinarian;
/// no_dependencies!(Veterinarian);
/// ```
#[macro_export]
macro_rules! no_dependencies {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::HasDependencies for $ty {
                type Dependencies = ();

                fn depends_on(self, _dependencies: &()) -> Self {
                    self
                }
            }
        )+
    };
}

/// Derive field-by-field grafting from a declared field list.
///
/// Descriptor positions are assigned to the listed fields in order; a count
/// mismatch is a compile error. Dependency types must be `Clone`.
///
/// ```
/// # use graphula_core::{graft_dependencies, HasDependencies, Only};
/// struct Owner { name: String, vet: u64 }
/// graft_dependencies!(Owner { vet } : Only<u64>);
///
/// struct Pet { owner: u64, vet: u64 }
/// graft_dependencies!(Pet { owner, vet } : (u64, u64));
///
/// let owner = Owner { name: "ada".into(), vet: 0 }.depends_on(&Only(7));
/// assert_eq!(owner.vet, 7);
/// ```
#[macro_export]
macro_rules! graft_dependencies {
    ($ty:ty { $field:ident $(,)? } : Only<$dep:ty>) => {
        impl $crate::HasDependencies for $ty {
            type Dependencies = $crate::Only<$dep>;

            fn depends_on(mut self, dependencies: &Self::Dependencies) -> Self {
                let $crate::Only($field) = ::core::clone::Clone::clone(dependencies);
                self.$field = $field;
                self
            }
        }
    };
    ($ty:ty { $($field:ident),+ $(,)? } : ($($dep:ty),+ $(,)?)) => {
        impl $crate::HasDependencies for $ty {
            type Dependencies = ($($dep,)+);

            fn depends_on(mut self, dependencies: &Self::Dependencies) -> Self {
                let ($($field,)+) = ::core::clone::Clone::clone(dependencies);
                $( self.$field = $field; )+
                self
            }
        }
    };
}
