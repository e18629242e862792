//! Document service - ingestion and retrieval pipelines
//!
//! This module contains the core business logic of the paste service.
//! The service coordinates the key allocator, the storage codec and the
//! storage port.

use tracing::{debug, info, warn};

use super::codec::{decode_for_delivery, encode_for_storage};
use super::{DocumentError, DocumentKey, DocumentKind, FileDocument, TextDocument, Upload};
use crate::keys::{KeyAllocator, KeyGenerator, DEFAULT_MAX_KEY_ATTEMPTS};
use crate::storage::DocumentStore;

/// Default length of generated keys
pub const DEFAULT_KEY_LENGTH: usize = 10;

/// Configuration for the document service
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Length of generated keys (default: 10)
    pub key_length: usize,
    /// Maximum payload length in bytes (default: unlimited)
    ///
    /// `Some(0)` admits only empty payloads; configuration maps a zero limit
    /// to `None`.
    pub max_length: Option<usize>,
    /// Candidates drawn by the key allocator before giving up (default: 64)
    pub max_key_attempts: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            key_length: DEFAULT_KEY_LENGTH,
            max_length: None,
            max_key_attempts: DEFAULT_MAX_KEY_ATTEMPTS,
        }
    }
}

/// Service for storing and serving documents
///
/// Built once at start-up and shared by reference between requests. It holds
/// no per-request state, so any number of requests can run through it at the
/// same time.
///
/// ## Static Dispatch
///
/// The service is generic over the `DocumentStore` and `KeyGenerator`
/// implementations. The compiler will generate specialized versions for each
/// concrete pair.
pub struct DocumentService<S, G> {
    store: S,
    generator: G,
    config: DocumentConfig,
}

impl<S, G> DocumentService<S, G>
where
    S: DocumentStore,
    G: KeyGenerator,
{
    /// Create a new DocumentService with the given collaborators and configuration
    pub fn new(store: S, generator: G, config: DocumentConfig) -> Self {
        Self {
            store,
            generator,
            config,
        }
    }

    /// Create a new DocumentService with default configuration
    pub fn with_defaults(store: S, generator: G) -> Self {
        Self::new(store, generator, DocumentConfig::default())
    }

    /// Allocate a key no document currently uses
    pub async fn allocate_key(&self) -> Result<DocumentKey, DocumentError> {
        KeyAllocator::new(
            &self.store,
            &self.generator,
            self.config.key_length,
            self.config.max_key_attempts,
        )
        .allocate()
        .await
    }

    /// Persist an accumulated upload and return its logical key
    ///
    /// This is the ingestion pipeline. It:
    /// 1. Rejects payloads longer than `max_length` before touching the store
    /// 2. Allocates a free key
    /// 3. For files, writes the content-type entry, then the base64 payload
    ///    entry; for text, writes the payload verbatim
    /// 4. Returns the key without the `file-` prefix
    ///
    /// A file upload without a declared content type stores an empty one.
    ///
    /// # Errors
    ///
    /// - `DocumentError::PayloadTooLarge` if the payload exceeds `max_length`
    /// - `DocumentError::StorageFailure` if any store call fails
    /// - `DocumentError::KeySpaceExhausted` if no free key could be found
    pub async fn ingest(
        &self,
        upload: Upload,
        kind: DocumentKind,
    ) -> Result<DocumentKey, DocumentError> {
        if let Some(max) = self.config.max_length {
            if upload.len() > max {
                warn!(size = upload.len(), max_length = max, "Document exceeds max length");
                return Err(DocumentError::payload_too_large(upload.len(), max));
            }
        }

        let key = self.allocate_key().await?;
        let (payload, content_type) = upload.into_parts();

        match kind {
            DocumentKind::File => {
                let content_type = content_type.unwrap_or_default();

                if let Err(err) = self
                    .store
                    .set(&key.file_type_key(), content_type.into_bytes())
                    .await
                {
                    warn!(key = %key, error = %err, "Error adding file meta");
                    return Err(err);
                }

                self.write_payload(&key.file_key(), encode_for_storage(&payload))
                    .await?;
            }
            DocumentKind::Text => {
                self.write_payload(key.as_str(), payload).await?;
            }
        }

        info!(key = %key, kind = ?kind, "Added document");
        Ok(key)
    }

    async fn write_payload(&self, store_key: &str, value: Vec<u8>) -> Result<(), DocumentError> {
        self.store.set(store_key, value).await.map_err(|err| {
            warn!(key = %store_key, error = %err, "Error adding document");
            err
        })
    }

    /// Fetch a text document for the JSON envelope
    ///
    /// # Errors
    ///
    /// - `DocumentError::NotFound` if nothing is stored under `key`
    /// - `DocumentError::StorageFailure` if the read fails
    pub async fn get_text(
        &self,
        key: &str,
        skip_expire: bool,
    ) -> Result<TextDocument, DocumentError> {
        match self.store.get(key, skip_expire).await? {
            Some(data) => {
                debug!(key = %key, "Retrieved document");
                Ok(TextDocument::new(DocumentKey::new(key), data))
            }
            None => {
                warn!(key = %key, "Document not found");
                Err(DocumentError::not_found(key))
            }
        }
    }

    /// Fetch a document's payload verbatim
    ///
    /// # Errors
    ///
    /// - `DocumentError::NotFound` if nothing is stored under `key`
    /// - `DocumentError::StorageFailure` if the read fails
    pub async fn get_raw(&self, key: &str, skip_expire: bool) -> Result<Vec<u8>, DocumentError> {
        match self.store.get(key, skip_expire).await? {
            Some(data) => {
                debug!(key = %key, "Retrieved raw document");
                Ok(data)
            }
            None => {
                warn!(key = %key, "Raw document not found");
                Err(DocumentError::not_found(key))
            }
        }
    }

    /// Fetch a file document and decode its payload
    ///
    /// The content-type entry guards existence: when it is missing the payload
    /// entry is never read.
    ///
    /// # Errors
    ///
    /// - `DocumentError::NotFound` if either entry is missing
    /// - `DocumentError::StorageFailure` if a read fails or the payload entry
    ///   is not valid base64
    pub async fn get_file(
        &self,
        key: &str,
        skip_expire: bool,
    ) -> Result<FileDocument, DocumentError> {
        let key = DocumentKey::new(key);

        let Some(content_type) = self.store.get(&key.file_type_key(), skip_expire).await? else {
            warn!(key = %key, "File meta not found");
            return Err(DocumentError::not_found(key.into_inner()));
        };

        let Some(encoded) = self.store.get(&key.file_key(), skip_expire).await? else {
            warn!(key = %key, "File not found");
            return Err(DocumentError::not_found(key.into_inner()));
        };

        let data = decode_for_delivery(&encoded)?;
        let content_type = String::from_utf8_lossy(&content_type).into_owned();

        debug!(key = %key, content_type = %content_type, size = data.len(), "Retrieved file");
        Ok(FileDocument::new(content_type, data))
    }

    /// Get the service configuration
    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{MockKeyGenerator, RandomKeyGenerator};
    use crate::testing::RecordingStore;

    fn service(store: RecordingStore) -> DocumentService<RecordingStore, RandomKeyGenerator> {
        DocumentService::with_defaults(store, RandomKeyGenerator::new())
    }

    fn fixed_key_service(
        store: RecordingStore,
        key: &'static str,
    ) -> DocumentService<RecordingStore, MockKeyGenerator> {
        let mut generator = MockKeyGenerator::new();
        generator
            .expect_create_key()
            .returning(move |_| key.to_string());
        DocumentService::with_defaults(store, generator)
    }

    #[tokio::test]
    async fn test_text_round_trip() {
        let store = RecordingStore::new();
        let service = service(store.clone());

        let key = service
            .ingest(Upload::new(b"abc".to_vec()), DocumentKind::Text)
            .await
            .unwrap();

        assert_eq!(key.as_str().len(), DEFAULT_KEY_LENGTH);
        assert_eq!(store.value(key.as_str()), Some(b"abc".to_vec()));

        let doc = service.get_text(key.as_str(), false).await.unwrap();
        assert_eq!(doc.data(), b"abc");
        assert_eq!(doc.key(), &key);
    }

    #[tokio::test]
    async fn test_empty_text_round_trip() {
        let service = service(RecordingStore::new());

        let key = service
            .ingest(Upload::new(Vec::new()), DocumentKind::Text)
            .await
            .unwrap();

        let raw = service.get_raw(key.as_str(), false).await.unwrap();
        assert!(raw.is_empty());
    }

    #[tokio::test]
    async fn test_oversize_payload_touches_nothing() {
        let store = RecordingStore::new();
        let mut generator = MockKeyGenerator::new();
        generator.expect_create_key().never();
        let config = DocumentConfig {
            max_length: Some(10),
            ..DocumentConfig::default()
        };
        let service = DocumentService::new(store.clone(), generator, config);

        let err = service
            .ingest(Upload::new(b"hello world".to_vec()), DocumentKind::Text)
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentError::PayloadTooLarge { size: 11, max: 10 }));
        assert!(store.gets().is_empty());
        assert!(store.sets().is_empty());
    }

    #[tokio::test]
    async fn test_payload_at_max_length_is_accepted() {
        let config = DocumentConfig {
            max_length: Some(3),
            ..DocumentConfig::default()
        };
        let service = DocumentService::new(RecordingStore::new(), RandomKeyGenerator::new(), config);

        assert!(service
            .ingest(Upload::new(b"abc".to_vec()), DocumentKind::Text)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_file_layout_and_write_order() {
        let store = RecordingStore::new();
        let service = fixed_key_service(store.clone(), "K");
        let png = vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00];

        let key = service
            .ingest(
                Upload::with_content_type(png.clone(), "image/png"),
                DocumentKind::File,
            )
            .await
            .unwrap();

        assert_eq!(key.as_str(), "K");
        assert_eq!(store.sets(), vec!["file-K-type".to_string(), "file-K".to_string()]);
        assert_eq!(store.value("file-K-type"), Some(b"image/png".to_vec()));
        assert_eq!(store.value("file-K"), Some(encode_for_storage(&png)));

        let file = service.get_file("K", false).await.unwrap();
        assert_eq!(file.content_type(), "image/png");
        assert_eq!(file.data(), png.as_slice());
    }

    #[tokio::test]
    async fn test_file_without_content_type_stores_empty_type() {
        let store = RecordingStore::new();
        let service = fixed_key_service(store.clone(), "flat");

        service
            .ingest(Upload::new(b"plain body".to_vec()), DocumentKind::File)
            .await
            .unwrap();

        assert_eq!(store.value("file-flat-type"), Some(Vec::new()));
        let file = service.get_file("flat", false).await.unwrap();
        assert_eq!(file.content_type(), "");
        assert_eq!(file.data(), b"plain body");
    }

    #[tokio::test]
    async fn test_failed_type_write_skips_payload() {
        let store = RecordingStore::new();
        store.fail_sets_ending_with("-type");
        let service = fixed_key_service(store.clone(), "K");

        let err = service
            .ingest(
                Upload::with_content_type(vec![1, 2, 3], "application/pdf"),
                DocumentKind::File,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentError::StorageFailure(_)));
        assert_eq!(store.sets(), vec!["file-K-type".to_string()]);
        assert!(store.value("file-K").is_none());
    }

    #[tokio::test]
    async fn test_failed_text_write_is_storage_failure() {
        let store = RecordingStore::new();
        store.fail_sets_ending_with("K");
        let service = fixed_key_service(store.clone(), "K");

        let err = service
            .ingest(Upload::new(b"abc".to_vec()), DocumentKind::Text)
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentError::StorageFailure(_)));
    }

    #[tokio::test]
    async fn test_text_ingest_ignores_content_type() {
        let store = RecordingStore::new();
        let service = fixed_key_service(store.clone(), "K");

        service
            .ingest(
                Upload::with_content_type(vec![0xde, 0xad], "image/gif"),
                DocumentKind::Text,
            )
            .await
            .unwrap();

        assert_eq!(store.sets(), vec!["K".to_string()]);
        assert_eq!(store.value("K"), Some(vec![0xde, 0xad]));
    }

    #[tokio::test]
    async fn test_get_file_without_type_entry_never_reads_payload() {
        let store = RecordingStore::new();
        store.insert("file-K", encode_for_storage(b"orphan"));
        let service = service(store.clone());

        let err = service.get_file("K", true).await.unwrap_err();

        assert!(matches!(err, DocumentError::NotFound(_)));
        assert_eq!(store.gets(), vec![("file-K-type".to_string(), true)]);
    }

    #[tokio::test]
    async fn test_get_file_with_missing_payload_is_not_found() {
        let store = RecordingStore::new();
        store.insert("file-K-type", b"text/csv".to_vec());
        let service = service(store.clone());

        let err = service.get_file("K", false).await.unwrap_err();

        assert!(matches!(err, DocumentError::NotFound(_)));
        assert_eq!(
            store.gets(),
            vec![
                ("file-K-type".to_string(), false),
                ("file-K".to_string(), false)
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_text_and_raw_are_not_found() {
        let service = service(RecordingStore::new());

        assert!(matches!(
            service.get_text("nope", false).await.unwrap_err(),
            DocumentError::NotFound(_)
        ));
        assert!(matches!(
            service.get_raw("nope", false).await.unwrap_err(),
            DocumentError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_skip_expire_is_threaded_to_reads() {
        let store = RecordingStore::new();
        store.insert("K", b"abc".to_vec());
        let service = service(store.clone());

        service.get_text("K", true).await.unwrap();
        service.get_raw("K", false).await.unwrap();

        assert_eq!(
            store.gets(),
            vec![("K".to_string(), true), ("K".to_string(), false)]
        );
    }

    #[tokio::test]
    async fn test_read_failure_propagates() {
        let store = RecordingStore::new();
        store.fail_reads();
        let service = service(store);

        assert!(matches!(
            service.get_text("K", false).await.unwrap_err(),
            DocumentError::StorageFailure(_)
        ));
    }

    #[tokio::test]
    async fn test_collisions_are_skipped_during_ingest() {
        let store = RecordingStore::new();
        store.insert("key0", b"existing".to_vec());
        let mut generator = MockKeyGenerator::new();
        let mut drawn = 0;
        generator.expect_create_key().times(2).returning(move |_| {
            let key = format!("key{}", drawn);
            drawn += 1;
            key
        });
        let service = DocumentService::with_defaults(store.clone(), generator);

        let key = service
            .ingest(Upload::new(b"new".to_vec()), DocumentKind::Text)
            .await
            .unwrap();

        assert_eq!(key.as_str(), "key1");
        assert_eq!(store.value("key0"), Some(b"existing".to_vec()));
    }
}
