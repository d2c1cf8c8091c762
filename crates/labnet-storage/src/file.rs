//! File-backed store: one JSON file per key inside a data directory.
//!
//! Layout:
//! ```text
//! <data-dir>/
//!   collections/
//!     currentUser.json
//!     posts.json
//!     ...
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use labnet_core::error::StorageError;
use tracing::debug;

use crate::backend::KeyValueStore;

const COLLECTIONS_DIR: &str = "collections";

/// Key-value store over a directory of `<key>.json` files.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create the directory layout under `root` (idempotent) and open it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directories cannot be created.
    pub fn init(root: &Path) -> Result<Self, StorageError> {
        let dir = root.join(COLLECTIONS_DIR);
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        debug!(root = %root.display(), "initialized data directory");
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Open an existing data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotInitialized`] if `root` was never set up
    /// with [`FileStore::init`].
    pub fn open(root: &Path) -> Result<Self, StorageError> {
        if !Self::is_initialized(root) {
            return Err(StorageError::NotInitialized(root.to_path_buf()));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Whether `root` holds an initialized data directory.
    #[must_use]
    pub fn is_initialized(root: &Path) -> bool {
        root.join(COLLECTIONS_DIR).is_dir()
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(COLLECTIONS_DIR).join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        // Write-then-rename so a reader never sees a half-written file.
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_refuses_uninitialized_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileStore::open(dir.path()).unwrap_err();
        assert!(matches!(err, StorageError::NotInitialized(_)));
    }

    #[test]
    fn init_then_open_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::init(dir.path()).unwrap();
        // Second init is a no-op.
        FileStore::init(dir.path()).unwrap();

        assert!(FileStore::is_initialized(dir.path()));
        assert!(FileStore::open(dir.path()).is_ok());
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::init(dir.path()).unwrap();
        store.write("posts", r#"[{"id":"post-1"}]"#).unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.read("posts").unwrap().as_deref(),
            Some(r#"[{"id":"post-1"}]"#)
        );
        assert!(dir.path().join("collections").join("posts.json").exists());
        assert!(!dir.path().join("collections").join("posts.json.tmp").exists());
    }

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::init(dir.path()).unwrap();
        assert_eq!(store.read("messages").unwrap(), None);
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::init(dir.path()).unwrap();
        assert!(matches!(
            store.write("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
