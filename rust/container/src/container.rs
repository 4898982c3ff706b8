//! The dynamic-vocabulary parameter container.

use std::{borrow::Borrow, fmt, hash::Hash, rc};

use fxhash::{FxHashMap, FxHashSet};

use crate::{
    GetError, Key, Listener, Snapshot, Store, UndeclaredParameter, UninitializedParameter,
};


/// A set of named parameters with a vocabulary declared at runtime.
///
/// Keys must be declared before they can be assigned, and a declared key
/// must be assigned before it can be read. Every other operation is total.
///
/// Invariant: every key that has a value is also declared.
///
/// # Examples
///
/// ```
/// # use paramkit_container::{Container, GetError};
/// let mut taxonomy: Container<String, &str> =
///     Container::with_keys(["phylum", "family", "genera", "species"]);
/// taxonomy.set([("species", "Homo Sapiens Sapiens")]).unwrap();
/// assert_eq!(taxonomy.get("species"), Ok(&"Homo Sapiens Sapiens"));
/// assert!(matches!(taxonomy.get("phylum"), Err(GetError::Uninitialized(_))));
/// assert!(matches!(taxonomy.get("kingdom"), Err(GetError::Undeclared(_))));
/// ```
pub struct Container<K, V> {
    declared: FxHashSet<K>,
    values: FxHashMap<K, V>,
    listener: Option<rc::Weak<dyn Listener<K, V>>>,
}

impl<K, V> Default for Container<K, V> {
    fn default() -> Self {
        Self {
            declared: FxHashSet::default(),
            values: FxHashMap::default(),
            listener: None,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Container<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("declared", &self.declared)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

impl<K: Key, V> Container<K, V> {
    /// Create a container with an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container with the given keys declared and no values assigned.
    pub fn with_keys<I, Q>(keys: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<K>,
    {
        let mut container = Self::new();
        container.declare(keys);
        container
    }

    /// Add keys to the vocabulary.
    ///
    /// Declaring a key that is already declared does nothing.
    pub fn declare<I, Q>(&mut self, keys: I)
    where
        I: IntoIterator<Item = Q>,
        Q: Into<K>,
    {
        let before = self.declared.len();
        self.declared.extend(keys.into_iter().map(Into::into));
        tracing::trace!(
            added = self.declared.len() - before,
            total = self.declared.len(),
            "declared parameters"
        );
    }

    /// Remove keys from the vocabulary, dropping any values they had.
    ///
    /// Keys that are not declared are ignored.
    pub fn undeclare<'a, I, Q>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a Q>,
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        let listener = self.listener();
        let before = self.declared.len();
        for key in keys {
            self.declared.remove(key);
            if let Some((key, _)) = self.values.remove_entry(key)
                && let Some(listener) = &listener
            {
                listener.parameter_changed(&key, None);
            }
        }
        tracing::trace!(
            removed = before - self.declared.len(),
            total = self.declared.len(),
            "undeclared parameters"
        );
    }

    /// Returns `true` if `key` is part of the vocabulary.
    #[must_use]
    pub fn is_declared<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.declared.contains(key)
    }

    /// Returns `true` if `key` currently has a value.
    ///
    /// Declared keys without a value, and undeclared keys, return `false`.
    #[must_use]
    pub fn exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.values.contains_key(key)
    }

    /// Assign a batch of values, overwriting any previous values.
    ///
    /// Within a batch, later assignments to the same key win.
    ///
    /// # Errors
    ///
    /// Returns [`UndeclaredParameter`] naming the first key in the batch
    /// that is not declared. In that case, nothing in the batch is applied.
    pub fn set<I, Q>(&mut self, assignments: I) -> Result<(), UndeclaredParameter<K>>
    where
        I: IntoIterator<Item = (Q, V)>,
        Q: Into<K>,
    {
        let assignments: Vec<(K, V)> = assignments
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        if let Some((key, _)) = assignments
            .iter()
            .find(|(key, _)| !self.declared.contains(key))
        {
            tracing::debug!(?key, "rejected assignment to undeclared parameter");
            return Err(UndeclaredParameter { key: key.clone() });
        }

        let listener = self.listener();
        for (key, value) in assignments {
            if let Some(listener) = &listener {
                listener.parameter_changed(&key, Some(&value));
            }
            self.values.insert(key, value);
        }
        Ok(())
    }

    /// Remove the values of the given keys.
    ///
    /// The vocabulary is unchanged. Keys without a value, including
    /// undeclared ones, are ignored.
    pub fn clear<'a, I, Q>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a Q>,
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        let listener = self.listener();
        let mut cleared = 0usize;
        for key in keys {
            if let Some((key, _)) = self.values.remove_entry(key) {
                cleared += 1;
                if let Some(listener) = &listener {
                    listener.parameter_changed(&key, None);
                }
            }
        }
        tracing::trace!(cleared, "cleared parameters");
    }

    /// Read a single value.
    ///
    /// # Errors
    ///
    ///  - Returns [`GetError::Undeclared`] if `key` is not declared.
    ///  - Returns [`GetError::Uninitialized`] if `key` is declared but has no value.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, GetError<K>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        if !self.declared.contains(key) {
            let key = key.to_owned();
            tracing::debug!(?key, "rejected read of undeclared parameter");
            return Err(UndeclaredParameter { key }.into());
        }
        self.values.get(key).ok_or_else(|| {
            let key = key.to_owned();
            tracing::debug!(?key, "rejected read of uninitialized parameter");
            UninitializedParameter { key }.into()
        })
    }

    /// Read several values, returned in the same order as `keys`.
    ///
    /// Repeated keys yield repeated values.
    ///
    /// # Errors
    ///
    /// Fails with the error for the first key in `keys` that [`Container::get`]
    /// would reject. No values are returned in that case.
    pub fn get_many<'a, I, Q>(&self, keys: I) -> Result<Vec<&V>, GetError<K>>
    where
        I: IntoIterator<Item = &'a Q>,
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized + 'a,
    {
        keys.into_iter().map(|key| self.get(key)).collect()
    }

    /// The declared keys, in no particular order.
    pub fn declared_keys(&self) -> impl Iterator<Item = &K> {
        self.declared.iter()
    }

    /// The keys that currently have a value, in no particular order.
    pub fn initialized_keys(&self) -> impl Iterator<Item = &K> {
        self.values.keys()
    }

    /// Copy out every assigned key/value pair.
    ///
    /// Each value is copied with [`Clone`], so values that are shared
    /// handles (e.g. `Rc<RefCell<_>>`) remain shared with this container.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<K, V>
    where
        V: Clone,
    {
        Snapshot {
            values: self
                .values
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }

    /// Note that there can only be one listener at a time!
    pub fn set_listener(&mut self, listener: rc::Weak<dyn Listener<K, V>>) {
        self.listener = Some(listener);
    }

    fn listener(&self) -> Option<rc::Rc<dyn Listener<K, V>>> {
        self.listener.as_ref().and_then(rc::Weak::upgrade)
    }
}

impl<K: Key, V> FromIterator<K> for Container<K, V> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::with_keys(iter)
    }
}

impl<K: Key, V> From<Snapshot<K, V>> for Container<K, V> {
    /// Declares exactly the snapshot's keys and assigns its values.
    fn from(snapshot: Snapshot<K, V>) -> Self {
        Self {
            declared: snapshot.values.keys().cloned().collect(),
            values: snapshot.values.into_iter().collect(),
            listener: None,
        }
    }
}

impl<K: Key, V> Store<K, V> for Container<K, V> {
    type SetError = UndeclaredParameter<K>;
    type GetError = GetError<K>;

    fn exists(&self, key: &K) -> bool {
        Container::exists(self, key)
    }

    fn set<I: IntoIterator<Item = (K, V)>>(
        &mut self,
        assignments: I,
    ) -> Result<(), Self::SetError> {
        Container::set(self, assignments)
    }

    fn clear<'a, I: IntoIterator<Item = &'a K>>(&mut self, keys: I)
    where
        K: 'a,
    {
        Container::clear(self, keys);
    }

    fn get(&self, key: &K) -> Result<&V, Self::GetError> {
        Container::get(self, key)
    }

    fn get_many<'a, I: IntoIterator<Item = &'a K>>(
        &self,
        keys: I,
    ) -> Result<Vec<&V>, Self::GetError>
    where
        K: 'a,
    {
        Container::get_many(self, keys)
    }

    fn declared_keys<'a>(&'a self) -> impl Iterator<Item = &'a K>
    where
        K: 'a,
    {
        Container::declared_keys(self)
    }

    fn initialized_keys<'a>(&'a self) -> impl Iterator<Item = &'a K>
    where
        K: 'a,
    {
        Container::initialized_keys(self)
    }

    fn snapshot(&self) -> Snapshot<K, V>
    where
        V: Clone,
    {
        Container::snapshot(self)
    }

    fn set_listener(&mut self, listener: rc::Weak<dyn Listener<K, V>>) {
        Container::set_listener(self, listener);
    }
}
