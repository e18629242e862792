//! S3 Document Store Implementation
//!
//! This module implements the `DocumentStore` trait using AWS S3 as the backend.
//! It handles all S3 operations and converts AWS errors to domain errors.

use aws_sdk_s3::{primitives::ByteStream, types::MetadataDirective, Client};
use bytes::Bytes;
use chrono::{Duration, Utc};
use pastelink_domain::{document::DocumentError, storage::DocumentStore};
use tracing::{debug, error, info, instrument, warn};

/// User metadata entry holding the expiry instant (unix seconds)
const EXPIRES_AT: &str = "expires-at";

/// S3-based implementation of the DocumentStore port
///
/// Every store key maps to one object at the root of the bucket.
///
/// ## Expiry
///
/// When a TTL is configured each object carries an `expires-at` metadata
/// entry. Objects past that instant read as absent; removing them is left to
/// the bucket's lifecycle rules. A refreshing read rewrites the entry through
/// a self-copy, a peeking read does not.
///
/// ## Error Handling
///
/// `NoSuchKey` is reported as an absent value. All other AWS SDK errors are
/// converted to `DocumentError::StorageFailure`.
#[derive(Clone)]
pub struct S3DocumentStore {
    client: Client,
    bucket: String,
    expire: Option<Duration>,
}

impl S3DocumentStore {
    /// Create a new S3 document store whose objects never expire
    ///
    /// # Arguments
    ///
    /// * `client` - Configured AWS S3 client
    /// * `bucket` - Name of the S3 bucket to use
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use aws_sdk_s3::Client;
    /// use pastelink_store::infrastructure::S3DocumentStore;
    ///
    /// # async fn example(s3_client: Client) {
    /// let store = S3DocumentStore::new(s3_client, "my-bucket".to_string());
    /// # }
    /// ```
    pub fn new(client: Client, bucket: String) -> Self {
        info!(bucket = %bucket, "Initializing S3DocumentStore");
        Self {
            client,
            bucket,
            expire: None,
        }
    }

    /// Expire objects `ttl` after their last refresh
    pub fn with_expiry(mut self, ttl: Duration) -> Self {
        self.expire = Some(ttl);
        self
    }

    fn expires_at(ttl: Duration) -> String {
        (Utc::now() + ttl).timestamp().to_string()
    }

    fn is_expired(expires_at: Option<&String>) -> bool {
        expires_at
            .and_then(|at| at.parse::<i64>().ok())
            .is_some_and(|at| at <= Utc::now().timestamp())
    }
}

impl DocumentStore for S3DocumentStore {
    #[instrument(skip(self))]
    fn get(
        &self,
        key: &str,
        skip_expire: bool,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>, DocumentError>> + Send {
        let client = self.client.clone();
        let bucket = self.bucket.clone();
        let expire = self.expire;
        let key = key.to_string();

        async move {
            debug!(key = %key, bucket = %bucket, "Retrieving entry from S3");

            let output = match client.get_object().bucket(&bucket).key(&key).send().await {
                Ok(output) => output,
                Err(err) => {
                    let service_err = err.into_service_error();
                    if service_err.is_no_such_key() {
                        debug!(key = %key, "Entry does not exist in S3");
                        return Ok(None);
                    }
                    warn!(key = %key, error = ?service_err, "Failed to retrieve entry from S3");
                    return Err(DocumentError::storage_failure(format!(
                        "S3 get_object failed for key '{}': {}",
                        key, service_err
                    )));
                }
            };

            if Self::is_expired(output.metadata().and_then(|m| m.get(EXPIRES_AT))) {
                debug!(key = %key, "Entry in S3 has expired");
                return Ok(None);
            }

            let data = match output.body.collect().await {
                Ok(data) => data.into_bytes().to_vec(),
                Err(err) => {
                    error!(key = %key, error = ?err, "Failed to read S3 object body");
                    return Err(DocumentError::storage_failure(format!(
                        "Failed to read S3 object body for key '{}': {}",
                        key, err
                    )));
                }
            };

            if let (false, Some(ttl)) = (skip_expire, expire) {
                let refreshed = client
                    .copy_object()
                    .bucket(&bucket)
                    .key(&key)
                    .copy_source(format!("{}/{}", bucket, key))
                    .metadata_directive(MetadataDirective::Replace)
                    .metadata(EXPIRES_AT, Self::expires_at(ttl))
                    .send()
                    .await;

                // A failed refresh only shortens the entry's life, the read still succeeds.
                if let Err(err) = refreshed {
                    warn!(key = %key, error = ?err, "Failed to refresh S3 entry expiry");
                }
            }

            info!(key = %key, size = data.len(), "Successfully retrieved entry from S3");
            Ok(Some(data))
        }
    }

    #[instrument(skip(self, value))]
    fn set(
        &self,
        key: &str,
        value: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<(), DocumentError>> + Send {
        let client = self.client.clone();
        let bucket = self.bucket.clone();
        let expires_at = self.expire.map(Self::expires_at);
        let key = key.to_string();
        let data_size = value.len();
        let data = Bytes::from(value);

        async move {
            debug!(key = %key, bucket = %bucket, data_size, "Saving entry to S3");

            let mut request = client
                .put_object()
                .bucket(&bucket)
                .key(&key)
                .body(ByteStream::from(data));
            if let Some(expires_at) = expires_at {
                request = request.metadata(EXPIRES_AT, expires_at);
            }

            match request.send().await {
                Ok(_) => {
                    info!(key = %key, "Successfully saved entry to S3");
                    Ok(())
                }
                Err(err) => {
                    error!(key = %key, error = ?err, "Failed to save entry to S3");
                    Err(DocumentError::storage_failure(format!(
                        "S3 put_object failed for key '{}': {}",
                        key, err
                    )))
                }
            }
        }
    }
}
