//! Extension trait for [`KvStore`] with typed JSON methods.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{KvError, KvStore};

/// Typed convenience methods for [`KvStore`].
///
/// Implemented as default methods on an extension trait so that [`KvStore`]
/// stays object-safe and implementors only handle raw bytes.
///
/// # Example
///
/// ```
/// use lumina_kv::{KvStoreExt, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.set_json("tags", &vec!["rust", "blog"]).unwrap();
/// let tags: Option<Vec<String>> = store.get_json("tags").unwrap();
/// assert_eq!(tags.unwrap().len(), 2);
/// ```
pub trait KvStoreExt: KvStore {
    /// Retrieve and deserialize a JSON value.
    ///
    /// Returns `Ok(None)` when the key is absent and [`KvError::Corrupted`]
    /// when the stored bytes do not decode.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, KvError> {
        let Some(bytes) = self.get(key)? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| KvError::Corrupted {
                key: key.to_owned(),
                source,
            })
    }

    /// Serialize a value as JSON and store it.
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), KvError> {
        let bytes = serde_json::to_vec(value).map_err(|source| KvError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.set(key, &bytes)
    }
}

impl<S: KvStore + ?Sized> KvStoreExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_json_round_trip() {
        let store = MemoryStore::new();
        store.set_json("n", &42_u32).unwrap();
        assert_eq!(store.get_json::<u32>("n").unwrap(), Some(42));
    }

    #[test]
    fn test_get_json_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get_json::<u32>("n").unwrap(), None);
    }

    #[test]
    fn test_get_json_corrupted() {
        let store = MemoryStore::new();
        store.set("n", b"{not json").unwrap();
        let err = store.get_json::<u32>("n").unwrap_err();
        assert!(matches!(err, KvError::Corrupted { ref key, .. } if key == "n"));
    }
}
