//! # PasteLink Store Adapters
//!
//! Implementations of the domain's `DocumentStore` port:
//!
//! - [`MemoryDocumentStore`]: process-local map with an optional TTL
//! - [`S3DocumentStore`]: one S3 object per store key

pub mod infrastructure;

pub use infrastructure::{MemoryDocumentStore, S3DocumentStore};
