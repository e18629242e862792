//! Text-safe encoding of binary payloads
//!
//! File payloads are stored as standard, padded base64 so that stores which
//! only guarantee text safety can hold arbitrary bytes.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::document::error::DocumentError;

/// Encode raw bytes into their stored textual form
pub fn encode_for_storage(data: &[u8]) -> Vec<u8> {
    STANDARD.encode(data).into_bytes()
}

/// Decode a stored payload entry back into raw bytes
///
/// # Errors
///
/// Returns `DocumentError::StorageFailure` if the entry is not valid base64,
/// which means the store holds something the ingestion pipeline never wrote.
pub fn decode_for_delivery(stored: &[u8]) -> Result<Vec<u8>, DocumentError> {
    STANDARD
        .decode(stored)
        .map_err(|e| DocumentError::storage_failure(format!("corrupt file payload: {}", e)))
}
