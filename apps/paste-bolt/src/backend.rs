//! Runtime selection of the store adapter and the key generator
//!
//! The document service is statically dispatched; these enums let the binary
//! pick concrete implementations from configuration while keeping a single
//! service type.

use std::future::Future;

use anyhow::{Context, Result};
use pastelink_domain::document::DocumentError;
use pastelink_domain::keys::{KeyGenerator, PhoneticKeyGenerator, RandomKeyGenerator};
use pastelink_domain::storage::DocumentStore;
use pastelink_store::{MemoryDocumentStore, S3DocumentStore};

use crate::config::{AppConfig, KeyGeneratorKind, StoreKind};

/// Store adapter chosen at start-up
#[derive(Clone)]
pub enum StoreBackend {
    Memory(MemoryDocumentStore),
    S3(S3DocumentStore),
}

impl StoreBackend {
    /// Build the store described by `config`
    pub async fn from_config(config: &AppConfig) -> Self {
        match config.store {
            StoreKind::Memory => {
                let store = match config.expiry() {
                    Some(ttl) => MemoryDocumentStore::with_expiry(ttl),
                    None => MemoryDocumentStore::new(),
                };
                Self::Memory(store)
            }
            StoreKind::S3 => {
                let aws_config =
                    aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

                // Configure S3 client with path-style addressing for MinIO compatibility
                let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
                    .force_path_style(true)
                    .build();
                let client = aws_sdk_s3::Client::from_conf(s3_config);

                let store = S3DocumentStore::new(client, config.bucket.clone());
                Self::S3(match config.expiry() {
                    Some(ttl) => store.with_expiry(ttl),
                    None => store,
                })
            }
        }
    }
}

impl DocumentStore for StoreBackend {
    fn get(
        &self,
        key: &str,
        skip_expire: bool,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, DocumentError>> + Send {
        async move {
            match self {
                Self::Memory(store) => store.get(key, skip_expire).await,
                Self::S3(store) => store.get(key, skip_expire).await,
            }
        }
    }

    fn set(
        &self,
        key: &str,
        value: Vec<u8>,
    ) -> impl Future<Output = Result<(), DocumentError>> + Send {
        async move {
            match self {
                Self::Memory(store) => store.set(key, value).await,
                Self::S3(store) => store.set(key, value).await,
            }
        }
    }
}

/// Key generator chosen at start-up
#[derive(Debug, Clone)]
pub enum KeyGeneratorBackend {
    Random(RandomKeyGenerator),
    Phonetic(PhoneticKeyGenerator),
}

impl KeyGeneratorBackend {
    /// Build the generator described by `config`
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match (config.key_generator, config.key_alphabet.as_deref()) {
            (KeyGeneratorKind::Random, None) => Ok(Self::Random(RandomKeyGenerator::new())),
            (KeyGeneratorKind::Random, Some(alphabet)) => RandomKeyGenerator::with_alphabet(alphabet)
                .map(Self::Random)
                .context("PASTE_KEY_ALPHABET must not be empty"),
            (KeyGeneratorKind::Phonetic, _) => Ok(Self::Phonetic(PhoneticKeyGenerator::new())),
        }
    }
}

impl KeyGenerator for KeyGeneratorBackend {
    fn create_key(&self, length: usize) -> String {
        match self {
            Self::Random(generator) => generator.create_key(length),
            Self::Phonetic(generator) => generator.create_key(length),
        }
    }
}
