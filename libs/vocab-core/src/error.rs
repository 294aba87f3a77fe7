//! Error types for vocab-core.
//!
//! The learning algorithms themselves never fail; only the persistence
//! collaborator can.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using StoreError.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors reported by a [`WordStore`](crate::store::WordStore).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("word not found: {0}")]
    NotFound(Uuid),

    #[error("write failed: {0}")]
    Write(String),
}
