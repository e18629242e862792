//! Ports (trait definitions) for external dependencies
//!
//! This module defines the contracts (ports) that storage adapters must
//! implement. Following hexagonal architecture, the domain defines what it
//! needs, and the infrastructure provides implementations.
//!
//! ## Static Dispatch
//!
//! We use native Rust async traits with `impl Future` return types instead of
//! `async_trait` to ensure zero-cost abstractions and static dispatch.

use std::future::Future;

use crate::document::DocumentError;

/// Port for the key-value store holding documents
///
/// The store owns the expiry policy. The domain only decides, per read,
/// whether that read may refresh an entry's time-to-live.
///
/// Values are opaque byte sequences. An empty value is still a present value.
pub trait DocumentStore: Send + Sync {
    /// Look up the value stored under `key`
    ///
    /// # Arguments
    ///
    /// * `key` - The exact store key (already prefixed for file entries)
    /// * `skip_expire` - When `true`, the read must not extend the entry's
    ///   time-to-live
    ///
    /// # Returns
    ///
    /// `Some(value)` if present, `None` if absent or expired
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::StorageFailure` if the backend cannot be read
    fn get(
        &self,
        key: &str,
        skip_expire: bool,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, DocumentError>> + Send;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::StorageFailure` if the write was not persisted
    fn set(
        &self,
        key: &str,
        value: Vec<u8>,
    ) -> impl Future<Output = Result<(), DocumentError>> + Send;
}
