//! An in-memory storage backend for `healthdata_session`, geared towards testing and local development.
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};

use healthdata_session::storage::{
    SessionStorageBackend,
    errors::{DeleteError, LoadError, StoreError},
};

#[derive(Clone, Default)]
/// An in-memory session storage backend.
///
/// Clones share the same underlying map: two [`SessionStore`]s built on top of
/// clones of the same backend behave like two processes sharing one user profile.
///
/// # Limitations
///
/// This backend won't persist data between process restarts.
/// It is primarily intended for testing and local development.
///
/// [`SessionStore`]: healthdata_session::SessionStore
pub struct InMemorySessionStore(Arc<Mutex<HashMap<String, String>>>);

impl std::fmt::Debug for InMemorySessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySessionStore")
            .finish_non_exhaustive()
    }
}

impl InMemorySessionStore {
    /// Creates a new (empty) in-memory session storage backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of keys currently stored.
    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

impl SessionStorageBackend for InMemorySessionStore {
    #[tracing::instrument(name = "Load session value", level = tracing::Level::TRACE, skip_all)]
    fn load(&self, key: &str) -> Result<Option<String>, LoadError> {
        Ok(self.0.lock().get(key).cloned())
    }

    #[tracing::instrument(name = "Store session value", level = tracing::Level::TRACE, skip_all)]
    fn store(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    #[tracing::instrument(name = "Delete session value", level = tracing::Level::TRACE, skip_all)]
    fn delete(&self, key: &str) -> Result<(), DeleteError> {
        self.0.lock().remove(key);
        Ok(())
    }
}
