//! Error types for the editor.

use lumina_store::StoreError;

/// Error from editor operations.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Persisting the draft failed. The in-memory draft is unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Publish attempted without the required fields.
    #[error("please fill in the {missing} before publishing")]
    Incomplete {
        /// Human-readable list of missing fields.
        missing: &'static str,
    },
}
