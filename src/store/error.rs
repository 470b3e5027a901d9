//! Document store error types.

use thiserror::Error;

/// Errors that can occur when reading or writing the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A document with the given key does not exist.
    #[error("{collection}/{id} not found")]
    NotFound { collection: String, id: String },

    /// The data file could not be read or written.
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The data file is not valid JSON.
    #[error("Failed to parse store: {0}")]
    Parse(#[from] serde_json::Error),

    /// A document does not have the expected shape.
    #[error("Invalid document {collection}/{id}: {reason}")]
    InvalidDocument {
        collection: String,
        id: String,
        reason: String,
    },
}

impl StoreError {
    /// Create a not found error.
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
