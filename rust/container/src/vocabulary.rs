//! Containers whose vocabulary is fixed at compile time.
//!
//! When the set of parameter names is known up front, it can be written as
//! an enum implementing [`Vocabulary`]. A [`StaticContainer`] over that enum
//! can never see an undeclared key, so writes never fail and reads can only
//! fail because a value was never assigned.

use std::{convert::Infallible, fmt, rc};

use fxhash::FxHashMap;

use crate::{Key, Listener, Snapshot, Store, UninitializedParameter};


/// A closed set of parameter keys.
///
/// `ALL` must list every value of the type exactly once. The
/// [`vocabulary!`](crate::vocabulary) macro takes care of this for
/// field-less enums.
pub trait Vocabulary: Key + 'static {
    /// Every key in the vocabulary.
    const ALL: &'static [Self];
}

/// Declare a field-less enum and implement [`Vocabulary`] for it.
///
/// # Examples
///
/// ```
/// use paramkit_container::{vocabulary, Vocabulary};
///
/// vocabulary! {
///     pub enum Taxon {
///         Phylum,
///         Family,
///         Genera,
///         Species,
///     }
/// }
///
/// assert_eq!(Taxon::ALL.len(), 4);
/// ```
#[macro_export]
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $crate::Vocabulary for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];
        }
    };
}

/// A parameter container over a compile-time [`Vocabulary`].
///
/// Every key of `K` is always declared, so there is no `declare` or
/// `undeclare`, `set` cannot fail, and `get` only reports
/// [`UninitializedParameter`].
pub struct StaticContainer<K, V> {
    values: FxHashMap<K, V>,
    listener: Option<rc::Weak<dyn Listener<K, V>>>,
}

impl<K, V> Default for StaticContainer<K, V> {
    fn default() -> Self {
        Self {
            values: FxHashMap::default(),
            listener: None,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for StaticContainer<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticContainer")
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

impl<K: Vocabulary, V> StaticContainer<K, V> {
    /// Create a container with every key declared and none assigned.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `key` currently has a value.
    #[must_use]
    pub fn exists(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    /// Assign a batch of values. Later assignments to the same key win.
    pub fn set<I: IntoIterator<Item = (K, V)>>(&mut self, assignments: I) {
        let listener = self.listener();
        for (key, value) in assignments {
            debug_assert!(K::ALL.contains(&key), "{key:?} missing from `ALL`");
            if let Some(listener) = &listener {
                listener.parameter_changed(&key, Some(&value));
            }
            self.values.insert(key, value);
        }
    }

    /// Remove the values of the given keys.
    pub fn clear<'a, I: IntoIterator<Item = &'a K>>(&mut self, keys: I) {
        let listener = self.listener();
        for key in keys {
            if let Some((key, _)) = self.values.remove_entry(key)
                && let Some(listener) = &listener
            {
                listener.parameter_changed(&key, None);
            }
        }
    }

    /// Read a single value.
    ///
    /// # Errors
    ///
    /// Returns [`UninitializedParameter`] if `key` has no value.
    pub fn get(&self, key: &K) -> Result<&V, UninitializedParameter<K>> {
        self.values.get(key).ok_or_else(|| {
            tracing::debug!(?key, "rejected read of uninitialized parameter");
            UninitializedParameter { key: key.clone() }
        })
    }

    /// Read several values, in request order.
    ///
    /// # Errors
    ///
    /// Returns [`UninitializedParameter`] for the first key in `keys` without
    /// a value.
    pub fn get_many<'a, I: IntoIterator<Item = &'a K>>(
        &self,
        keys: I,
    ) -> Result<Vec<&V>, UninitializedParameter<K>> {
        keys.into_iter().map(|key| self.get(key)).collect()
    }

    /// Always every key in `K::ALL`.
    pub fn declared_keys(&self) -> impl Iterator<Item = &K> {
        K::ALL.iter()
    }

    /// The keys that currently have a value, in no particular order.
    pub fn initialized_keys(&self) -> impl Iterator<Item = &K> {
        self.values.keys()
    }

    /// Copy out every assigned key/value pair.
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

impl<K: Vocabulary, V> Store<K, V> for StaticContainer<K, V> {
    type SetError = Infallible;
    type GetError = UninitializedParameter<K>;

    fn exists(&self, key: &K) -> bool {
        StaticContainer::exists(self, key)
    }

    fn set<I: IntoIterator<Item = (K, V)>>(
        &mut self,
        assignments: I,
    ) -> Result<(), Self::SetError> {
        StaticContainer::set(self, assignments);
        Ok(())
    }

    fn clear<'a, I: IntoIterator<Item = &'a K>>(&mut self, keys: I)
    where
        K: 'a,
    {
        StaticContainer::clear(self, keys);
    }

    fn get(&self, key: &K) -> Result<&V, Self::GetError> {
        StaticContainer::get(self, key)
    }

    fn get_many<'a, I: IntoIterator<Item = &'a K>>(
        &self,
        keys: I,
    ) -> Result<Vec<&V>, Self::GetError>
    where
        K: 'a,
    {
        StaticContainer::get_many(self, keys)
    }

    fn declared_keys<'a>(&'a self) -> impl Iterator<Item = &'a K>
    where
        K: 'a,
    {
        StaticContainer::declared_keys(self)
    }

    fn initialized_keys<'a>(&'a self) -> impl Iterator<Item = &'a K>
    where
        K: 'a,
    {
        StaticContainer::initialized_keys(self)
    }

    fn snapshot(&self) -> Snapshot<K, V>
    where
        V: Clone,
    {
        StaticContainer::snapshot(self)
    }

    fn set_listener(&mut self, listener: rc::Weak<dyn Listener<K, V>>) {
        StaticContainer::set_listener(self, listener);
    }
}
