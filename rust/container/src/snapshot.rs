use std::{borrow::Borrow, collections::HashMap, hash::Hash};


/// The assigned values of a container at a point in time.
///
/// A snapshot is disconnected from the container it was taken from: adding,
/// replacing, or removing entries here never affects the source. Values are
/// copied with [`Clone`] though, so shared handles stay shared.
///
/// Snapshots can be fed directly into `set` on any container that declares
/// the same keys.
///
/// # Examples
///
/// ```
/// # use paramkit_container::Container;
/// let mut source: Container<String, i32> = Container::with_keys(["a", "b"]);
/// source.set([("a", 1)]).unwrap();
///
/// let mut dest: Container<String, i32> = Container::with_keys(["a", "b"]);
/// dest.set(source.snapshot()).unwrap();
/// assert_eq!(dest.get("a"), Ok(&1));
/// ```
#[derive(Debug, Clone)]
pub struct Snapshot<K, V> {
    /// Every assigned key, with a copy of its value.
    pub values: HashMap<K, V>,
}

impl<K, V> Default for Snapshot<K, V> {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for Snapshot<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<K: Eq + Hash, V: Eq> Eq for Snapshot<K, V> {}

impl<K: Eq + Hash, V> Snapshot<K, V> {
    /// Number of assigned keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was assigned when the snapshot was taken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The assigned keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.values.keys()
    }

    /// The copied value of `key`, if it was assigned.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.values.get(key)
    }

    /// Key/value pairs, in no particular order.
    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, K, V> {
        self.values.iter()
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for Snapshot<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<K, V> IntoIterator for Snapshot<K, V> {
    type Item = (K, V);
    type IntoIter = std::collections::hash_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Snapshot<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::collections::hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
