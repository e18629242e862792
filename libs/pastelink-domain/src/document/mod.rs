//! Document domain module
//!
//! This module contains the core business logic and entities of the paste
//! service: what a document is, how it is laid out in the store, and the
//! ingestion and retrieval pipelines.

pub mod codec;
mod entity;
mod error;
mod key;
mod service;

pub use entity::{DocumentKind, FileDocument, TextDocument, Upload};
pub use error::{DocumentError, Result};
pub use key::{DocumentKey, FILE_PREFIX, TYPE_SUFFIX};
pub use service::{DocumentConfig, DocumentService, DEFAULT_KEY_LENGTH};
