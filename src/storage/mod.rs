use bytes::Bytes;
use thiserror::Error;

pub mod s3;

/// Failures reported by an object store backend. The variant set is closed
/// on purpose: the HTTP error translator matches it exhaustively.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("object not found: {message}")]
    NotFound { message: String },

    #[error("{code} = {message}")]
    Provider {
        code: String,
        message: String,
        cause: Option<String>,
    },
}

impl StoreError {
    pub fn provider(code: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Provider {
            code: code.into(),
            message: message.into(),
            cause: None,
        }
    }
}

#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the full body of the object stored under `key`.
    async fn get(&self, key: &str) -> Result<Bytes, StoreError>;
    /// Create or overwrite the object stored under `key`.
    async fn put(&self, key: &str, data: Bytes) -> Result<(), StoreError>;
    /// Delete the object stored under `key`. Deleting an absent key is
    /// backend-defined and not special-cased here.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
