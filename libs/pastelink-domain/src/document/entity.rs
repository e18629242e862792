//! Domain entities for stored documents
//!
//! A document is created exactly once by the ingestion pipeline and read any
//! number of times afterwards. Two kinds exist: text documents, stored verbatim
//! under their key, and file documents, stored as a base64 payload entry plus a
//! content-type entry.

use crate::document::key::DocumentKey;

/// How a document is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Payload stored verbatim under the logical key
    Text,
    /// Payload stored base64-encoded under `file-<key>`, with the content type
    /// under `file-<key>-type`
    File,
}

/// A fully accumulated request body, ready for ingestion
///
/// `content_type` is only ever set when a multipart upload carried a file part.
/// Flat bodies never have one, even when they are ingested as files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Upload {
    payload: Vec<u8>,
    content_type: Option<String>,
}

impl Upload {
    /// Create an upload without a declared content type
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            content_type: None,
        }
    }

    /// Create an upload carrying the content type of a file part
    pub fn with_content_type(payload: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            payload,
            content_type: Some(content_type.into()),
        }
    }

    /// The accumulated bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The declared content type, if any
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Size of the payload in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Split the upload into its payload and content type
    pub fn into_parts(self) -> (Vec<u8>, Option<String>) {
        (self.payload, self.content_type)
    }
}

/// A text document as returned by the retrieval pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    key: DocumentKey,
    data: Vec<u8>,
}

impl TextDocument {
    pub fn new(key: DocumentKey, data: Vec<u8>) -> Self {
        Self { key, data }
    }

    pub fn key(&self) -> &DocumentKey {
        &self.key
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The payload as text, with invalid UTF-8 sequences replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

/// A file document with its payload already decoded back to raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDocument {
    content_type: String,
    data: Vec<u8>,
}

impl FileDocument {
    pub fn new(content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            content_type: content_type.into(),
            data,
        }
    }

    /// The content type recorded at upload time (may be empty)
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.content_type, self.data)
    }
}
