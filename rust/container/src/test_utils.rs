//! Helpers for testing code that owns a parameter container.

use std::cell::RefCell;

use crate::Listener;

/// A [`Listener`] that records every change it is told about.
#[derive(Debug)]
pub struct RecordingListener<K, V> {
    changes: RefCell<Vec<(K, Option<V>)>>,
}

impl<K, V> Default for RecordingListener<K, V> {
    fn default() -> Self {
        Self {
            changes: RefCell::new(Vec::new()),
        }
    }
}

impl<K: Clone, V: Clone> RecordingListener<K, V> {
    /// Remove and return everything recorded so far, oldest first.
    pub fn take(&self) -> Vec<(K, Option<V>)> {
        self.changes.take()
    }
}

impl<K: Clone, V: Clone> Listener<K, V> for RecordingListener<K, V> {
    fn parameter_changed(&self, key: &K, value: Option<&V>) {
        self.changes
            .borrow_mut()
            .push((key.clone(), value.cloned()));
    }
}
