//! File-based key-value store.
//!
//! [`FileStore`] keeps each key in its own file inside a data directory:
//!
//! ```text
//! {dir}/
//! +-- lumina_blog_posts      # value bytes for key "lumina_blog_posts"
//! +-- lumina_blog_comments
//! ```
//!
//! Writes go to a temporary sibling file which is then renamed over the
//! target, so a failed write leaves the previous value readable.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{KvError, KvStore};

/// File-based [`KvStore`] rooted at a directory on disk.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the entries.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, KvError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(KvError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(key))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(KvError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        let path = self.path_for(key)?;
        let io_err = |source| KvError::Io {
            key: key.to_owned(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let tmp = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp, value).map_err(io_err)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(io_err(e));
        }

        tracing::debug!(key, bytes = value.len(), "stored entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(KvError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_set_and_get() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("data"));

        store.set("lumina_blog_posts", b"[]").unwrap();
        assert_eq!(
            store.get("lumina_blog_posts").unwrap(),
            Some(b"[]".to_vec())
        );
    }

    #[test]
    fn test_file_store_missing_key() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_file_store_overwrite() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        store.set("key", b"first").unwrap();
        store.set("key", b"second").unwrap();
        assert_eq!(store.get("key").unwrap(), Some(b"second".to_vec()));
        assert!(!tmp.path().join(".key.tmp").exists());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let tmp = TempDir::new().unwrap();
        FileStore::new(tmp.path()).set("key", b"kept").unwrap();

        let reopened = FileStore::new(tmp.path());
        assert_eq!(reopened.get("key").unwrap(), Some(b"kept".to_vec()));
    }

    #[test]
    fn test_file_store_remove() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        store.set("key", b"v").unwrap();
        store.remove("key").unwrap();
        assert_eq!(store.get("key").unwrap(), None);

        // Second removal is a no-op
        store.remove("key").unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(store.set(key, b"x"), Err(KvError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_file_store_unwritable_dir_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let store = FileStore::new(blocker.join("data"));
        assert!(matches!(store.set("key", b"x"), Err(KvError::Io { .. })));
    }
}
