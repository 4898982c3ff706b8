#![doc = include_str!("../README.md")]

use std::{fmt::Debug, hash::Hash};

mod container;
mod errors;
mod snapshot;
mod store;
mod vocabulary;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use container::Container;
pub use errors::{GetError, UndeclaredParameter, UninitializedParameter};
pub use snapshot::Snapshot;
pub use store::{Listener, Store};
pub use vocabulary::{StaticContainer, Vocabulary};

/// Types that can name a parameter.
///
/// This is implemented for every type that is hashable, cloneable and
/// printable, so `String`, `&'static str` and plain enums all work.
pub trait Key: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> Key for T {}
