//! Key-value store abstraction for Lumina.
//!
//! The storage gateway persists whole collections under a handful of string
//! keys. This crate decouples it from where those bytes live:
//!
//! - [`KvStore`]: `get`/`set`/`remove` of raw bytes by key
//! - [`KvStoreExt`]: typed JSON access on top of any store
//!
//! # Implementations
//!
//! - [`MemoryStore`]: in-process map, used as the fake in tests
//! - [`FileStore`]: one file per key inside a data directory
//!
//! # Example
//!
//! ```
//! use lumina_kv::{KvStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("greeting", b"hello").unwrap();
//! assert_eq!(store.get("greeting").unwrap(), Some(b"hello".to_vec()));
//! ```

mod ext;
mod file;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

pub use ext::KvStoreExt;
pub use file::FileStore;

/// Error from a key-value store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum KvError {
    /// The backing storage could not be read or written.
    #[error("storage unavailable for key {key}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Key cannot be mapped onto the backing storage.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
    /// Stored bytes are not valid JSON for the requested type.
    #[error("corrupted entry for key {key}")]
    Corrupted {
        /// Key being read.
        key: String,
        /// Decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// Value could not be serialized.
    #[error("failed to encode value for key {key}")]
    Encode {
        /// Key being written.
        key: String,
        /// Encoding error.
        #[source]
        source: serde_json::Error,
    },
}

/// A flat namespace of byte values addressed by string keys.
///
/// Every key is independent: writing one never touches another.
pub trait KvStore: Send + Sync {
    /// Retrieve the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError>;

    /// Remove the value under `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str) -> Result<(), KvError>;
}

impl<S: KvStore + ?Sized> KvStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        (**self).remove(key)
    }
}

/// In-memory [`KvStore`].
///
/// Contents live as long as the value. Used as the test fake for anything
/// built on a store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}
