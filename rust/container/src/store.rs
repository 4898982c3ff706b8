use std::rc;

use crate::{Key, Snapshot};

/// Receives a callback whenever a parameter's value changes.
pub trait Listener<K, V> {
    /// Called once per changed key.
    ///
    /// `value` is the newly assigned value, or `None` if the key lost its
    /// value through `clear` or `undeclare`.
    fn parameter_changed(&self, key: &K, value: Option<&V>);
}

/// The read/write protocol shared by [`crate::Container`] and
/// [`crate::StaticContainer`].
///
/// Host objects that want to expose a parameter vocabulary can hold any
/// `Store` and forward their own accessors to it.
pub trait Store<K: Key, V> {
    /// Error returned by [`Store::set`].
    type SetError;

    /// Error returned by [`Store::get`] and [`Store::get_many`].
    type GetError;

    /// Returns `true` if `key` currently has a value.
    fn exists(&self, key: &K) -> bool;

    /// Assign a batch of values.
    ///
    /// # Errors
    ///
    /// If any key in the batch is rejected, none of the batch is applied.
    fn set<I: IntoIterator<Item = (K, V)>>(&mut self, assignments: I)
    -> Result<(), Self::SetError>;

    /// Remove the values of the given keys. The vocabulary is unchanged.
    fn clear<'a, I: IntoIterator<Item = &'a K>>(&mut self, keys: I)
    where
        K: 'a;

    /// Read a single value.
    ///
    /// # Errors
    ///
    /// Fails if `key` cannot be read.
    fn get(&self, key: &K) -> Result<&V, Self::GetError>;

    /// Read several values, in request order.
    ///
    /// # Errors
    ///
    /// Fails on the first key that cannot be read, returning no values.
    fn get_many<'a, I: IntoIterator<Item = &'a K>>(
        &self,
        keys: I,
    ) -> Result<Vec<&V>, Self::GetError>
    where
        K: 'a;

    /// The keys that may be assigned, in no particular order.
    fn declared_keys<'a>(&'a self) -> impl Iterator<Item = &'a K>
    where
        K: 'a;

    /// The keys that currently have a value, in no particular order.
    fn initialized_keys<'a>(&'a self) -> impl Iterator<Item = &'a K>
    where
        K: 'a;

    /// Copy out every assigned key/value pair.
    fn snapshot(&self) -> Snapshot<K, V>
    where
        V: Clone;

    /// Note that there can only be one listener at a time!
    fn set_listener(&mut self, listener: rc::Weak<dyn Listener<K, V>>);
}
