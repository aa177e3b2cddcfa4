//! A filesystem-backed storage backend for `healthdata_session`.
//!
//! Every user profile is a directory. Each key is stored in its own file, named
//! after the key, inside that directory.
use anyhow::Context;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use healthdata_session::storage::{
    SessionStorageBackend,
    errors::{DeleteError, LoadError, StoreError},
};

#[derive(Debug, Clone)]
/// A session storage backend that persists values to files in a profile directory.
///
/// Writes are atomic: the new value is written to a temporary file in the
/// profile directory, which is then renamed over the previous one.
/// The profile directory is created on the first write.
pub struct FsSessionStore {
    profile_dir: PathBuf,
}

impl FsSessionStore {
    /// Creates a backend that stores its values in `profile_dir`.
    pub fn new(profile_dir: impl Into<PathBuf>) -> Self {
        Self {
            profile_dir: profile_dir.into(),
        }
    }

    /// The directory where values are stored.
    pub fn profile_dir(&self) -> &Path {
        &self.profile_dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, anyhow::Error> {
        let is_plain_file_name = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\']);
        if !is_plain_file_name {
            anyhow::bail!("`{key}` can't be used as a storage key: it is not a plain file name");
        }
        Ok(self.profile_dir.join(key))
    }
}

impl SessionStorageBackend for FsSessionStore {
    #[tracing::instrument(
        name = "Load session value from disk",
        level = tracing::Level::TRACE,
        skip_all,
        fields(key = %key)
    )]
    fn load(&self, key: &str) -> Result<Option<String>, LoadError> {
        let path = self.path_for(key).map_err(LoadError::Other)?;
        match fs_err::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LoadError::Unreadable {
                key: key.to_owned(),
                source: e.into(),
            }),
        }
    }

    #[tracing::instrument(
        name = "Store session value on disk",
        level = tracing::Level::TRACE,
        skip_all,
        fields(key = %key)
    )]
    fn store(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key).map_err(StoreError::Other)?;
        persist_if_changed(&self.profile_dir, &path, value.as_bytes()).map_err(StoreError::Other)
    }

    #[tracing::instrument(
        name = "Delete session value from disk",
        level = tracing::Level::TRACE,
        skip_all,
        fields(key = %key)
    )]
    fn delete(&self, key: &str) -> Result<(), DeleteError> {
        let path = self.path_for(key).map_err(DeleteError::Other)?;
        match fs_err::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DeleteError::Other(e.into())),
        }
    }
}

/// Only touch the filesystem if `content` differs from what's already stored at `path`.
fn persist_if_changed(dir: &Path, path: &Path, content: &[u8]) -> Result<(), anyhow::Error> {
    match fs_err::read(path) {
        Ok(existing) if existing == content => return Ok(()),
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    fs_err::create_dir_all(dir)?;
    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;
    file.write_all(content)?;
    file.as_file().sync_all()?;
    file.persist(path)
        .with_context(|| format!("Failed to move the new value into {}", path.display()))?;
    Ok(())
}
