use thiserror::Error;

/// A key was used that is not part of the container's vocabulary.
///
/// Returned by `set` and `get`. The call that produced this error had no
/// effect on the container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parameter `{key:?}` is not declared")]
pub struct UndeclaredParameter<K> {
    /// The offending key.
    pub key: K,
}

/// A declared key was read before any value was assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parameter `{key:?}` has no value")]
pub struct UninitializedParameter<K> {
    /// The offending key.
    pub key: K,
}

/// Errors that can occur when reading from a [`crate::Container`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetError<K> {
    /// The key is not declared.
    #[error("{0}")]
    Undeclared(UndeclaredParameter<K>),

    /// The key is declared but was never set, or has since been cleared.
    #[error("{0}")]
    Uninitialized(UninitializedParameter<K>),
}

impl<K> GetError<K> {
    /// The key that caused the read to fail.
    #[must_use]
    pub fn key(&self) -> &K {
        match self {
            GetError::Undeclared(UndeclaredParameter { key })
            | GetError::Uninitialized(UninitializedParameter { key }) => key,
        }
    }

    /// Consume the error, returning the key that caused the read to fail.
    #[must_use]
    pub fn into_key(self) -> K {
        match self {
            GetError::Undeclared(UndeclaredParameter { key })
            | GetError::Uninitialized(UninitializedParameter { key }) => key,
        }
    }
}

impl<K> From<UndeclaredParameter<K>> for GetError<K> {
    fn from(e: UndeclaredParameter<K>) -> Self {
        GetError::Undeclared(e)
    }
}

impl<K> From<UninitializedParameter<K>> for GetError<K> {
    fn from(e: UninitializedParameter<K>) -> Self {
        GetError::Uninitialized(e)
    }
}
