//! # PasteLink Domain Layer
//!
//! This crate contains the pure business logic and domain models for the
//! PasteLink document service. It follows hexagonal architecture principles:
//!
//! - **Entities**: Core domain models (Upload, TextDocument, FileDocument)
//! - **Ports**: Trait definitions for external dependencies (DocumentStore, KeyGenerator)
//! - **Services**: Ingestion and retrieval orchestration (DocumentService)
//!
//! ## Architecture
//!
//! This layer has NO dependencies on infrastructure concerns (AWS, S3, HTTP, etc.).
//! All external dependencies are expressed as traits (ports) that will be implemented
//! by adapter layers.
//!
//! ## Example
//!
//! ```rust
//! use pastelink_domain::document::{DocumentKind, DocumentService, Upload};
//! use pastelink_domain::keys::KeyGenerator;
//! use pastelink_domain::storage::DocumentStore;
//!
//! // The service is generic over any store and key generator
//! async fn example<S: DocumentStore, G: KeyGenerator>(service: DocumentService<S, G>) {
//!     let upload = Upload::new(b"hello".to_vec());
//!     let key = service.ingest(upload, DocumentKind::Text).await.unwrap();
//!     println!("Stored document: {}", key);
//! }
//! ```

pub mod document;
pub mod keys;
pub mod storage;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use document::{DocumentError, DocumentKey, DocumentKind, DocumentService, Upload};
pub use keys::KeyGenerator;
pub use storage::DocumentStore;
