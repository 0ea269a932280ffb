//! Storage gateway error type.

use lumina_kv::KvError;

/// Error from a storage gateway operation.
///
/// Lookups of absent ids are not errors; they return `None`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key-value store failed or holds undecodable data.
    #[error(transparent)]
    Kv(#[from] KvError),

    /// A post cannot be saved as given.
    #[error("invalid post: {0}")]
    InvalidPost(String),
}
