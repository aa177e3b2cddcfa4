use errors::{DeleteError, LoadError, StoreError};

/// Where the persisted session lives.
///
/// It is a thin wrapper
/// [around your chosen storage backend implementation][`SessionStorageBackend`],
/// removing the need to specify the concrete type of the storage backend
/// everywhere in your code.
#[derive(Debug)]
pub struct SessionStorage(Box<dyn SessionStorageBackend>);

impl SessionStorage {
    /// Creates a new session storage using the provided backend.
    pub fn new<Backend>(backend: Backend) -> Self
    where
        Backend: SessionStorageBackend + 'static,
    {
        Self(Box::new(backend))
    }

    /// Loads the value stored under `key`, if there is one.
    pub fn load(&self, key: &str) -> Result<Option<String>, LoadError> {
        self.0.load(key)
    }

    /// Stores `value` under `key`, overwriting any previous value.
    pub fn store(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.store(key, value)
    }

    /// Deletes the value stored under `key`.
    ///
    /// Deleting a key that doesn't exist is not an error.
    pub fn delete(&self, key: &str) -> Result<(), DeleteError> {
        self.0.delete(key)
    }
}

/// The interface of a session storage backend.
///
/// It models a durable, synchronous key-value store scoped to a single
/// user profile: when a method returns, the operation has been persisted.
pub trait SessionStorageBackend: std::fmt::Debug + Send + Sync {
    /// Loads the value stored under `key`.
    ///
    /// If there is no value for `key`, `None` is returned.
    fn load(&self, key: &str) -> Result<Option<String>, LoadError>;

    /// Stores `value` under `key`, overwriting any previous value.
    fn store(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes the value stored under `key`.
    ///
    /// It must succeed if there is no value for `key`.
    fn delete(&self, key: &str) -> Result<(), DeleteError>;
}

/// Errors that can occur when interacting with a session storage backend.
pub mod errors {
    #[non_exhaustive]
    #[derive(Debug, thiserror::Error)]
    /// The error returned by [`SessionStorageBackend::load`][super::SessionStorageBackend::load].
    pub enum LoadError {
        /// The stored value could not be read.
        #[error("Failed to read the value stored under `{key}`.")]
        Unreadable {
            key: String,
            #[source]
            source: anyhow::Error,
        },
        /// Something else went wrong when loading the value.
        #[error("Something went wrong when loading a value from session storage.")]
        Other(#[source] anyhow::Error),
    }

    #[non_exhaustive]
    #[derive(Debug, thiserror::Error)]
    /// The error returned by [`SessionStorageBackend::store`][super::SessionStorageBackend::store].
    pub enum StoreError {
        /// Failed to serialize the value before storing it.
        #[error("Failed to serialize the session record.")]
        SerializationError(#[from] serde_json::Error),
        /// Something else went wrong when storing the value.
        #[error("Something went wrong when writing to session storage.")]
        Other(#[source] anyhow::Error),
    }

    #[non_exhaustive]
    #[derive(Debug, thiserror::Error)]
    /// The error returned by [`SessionStorageBackend::delete`][super::SessionStorageBackend::delete].
    pub enum DeleteError {
        /// Something else went wrong when deleting the value.
        #[error("Something went wrong when deleting a value from session storage.")]
        Other(#[source] anyhow::Error),
    }
}
