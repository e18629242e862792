//! Domain errors for document operations
//!
//! Every failure is terminal for the request it happens in. The HTTP layer
//! maps each variant to exactly one response.

use thiserror::Error;

/// Errors that can occur while ingesting or retrieving documents
///
/// These errors represent business-level failures and are independent of
/// infrastructure implementation details (no AWS SDK error types here).
#[derive(Error, Debug)]
pub enum DocumentError {
    /// No document is stored under the requested key
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The accumulated payload is longer than the configured maximum
    #[error("Document size ({size} bytes) exceeds maximum allowed ({max} bytes)")]
    PayloadTooLarge { size: usize, max: usize },

    /// The backing store failed a read or a write
    #[error("Storage operation failed: {0}")]
    StorageFailure(String),

    /// The client's request stream failed before the body was complete
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The key allocator could not find a free key
    #[error("No free key found after {attempts} attempts")]
    KeySpaceExhausted { attempts: usize },
}

impl DocumentError {
    /// Create a not found error for a key
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }

    /// Create a payload too large error
    pub fn payload_too_large(size: usize, max: usize) -> Self {
        Self::PayloadTooLarge { size, max }
    }

    /// Create a storage failure error with a message
    pub fn storage_failure(msg: impl Into<String>) -> Self {
        Self::StorageFailure(msg.into())
    }

    /// Create a connection error with a message
    pub fn connection_error(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;
