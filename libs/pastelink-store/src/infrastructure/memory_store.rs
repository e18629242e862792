//! In-memory Document Store
//!
//! A process-local implementation of the `DocumentStore` port. Entries may
//! carry an expiry instant; reading an entry normally pushes that instant
//! forward, a peeking read (`skip_expire`) leaves it alone.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use pastelink_domain::{document::DocumentError, storage::DocumentStore};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

struct Entry {
    value: Vec<u8>,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory implementation of the DocumentStore port
///
/// Cloning the store yields another handle onto the same entries.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    expire: Option<Duration>,
}

impl MemoryDocumentStore {
    /// Create a store whose entries never expire
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose entries expire `ttl` after their last refresh
    pub fn with_expiry(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            expire: Some(ttl),
        }
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Utc::now();
        self.entries
            .lock()
            .await
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl DocumentStore for MemoryDocumentStore {
    #[instrument(skip(self))]
    fn get(
        &self,
        key: &str,
        skip_expire: bool,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, DocumentError>> + Send {
        let entries = self.entries.clone();
        let expire = self.expire;
        let key = key.to_string();

        async move {
            let now = Utc::now();
            let mut entries = entries.lock().await;

            let expired = entries.get(&key).is_some_and(|entry| entry.is_expired(now));
            if expired {
                debug!(key = %key, "Evicting expired entry");
                entries.remove(&key);
                return Ok(None);
            }

            let Some(entry) = entries.get_mut(&key) else {
                return Ok(None);
            };

            if !skip_expire {
                if let Some(ttl) = expire {
                    entry.expires_at = Some(now + ttl);
                }
            }

            Ok(Some(entry.value.clone()))
        }
    }

    #[instrument(skip(self, value))]
    fn set(
        &self,
        key: &str,
        value: Vec<u8>,
    ) -> impl Future<Output = Result<(), DocumentError>> + Send {
        let entries = self.entries.clone();
        let expire = self.expire;
        let key = key.to_string();

        async move {
            let now = Utc::now();
            let mut entries = entries.lock().await;

            // Entries nobody reads again are only reclaimed here.
            if expire.is_some() {
                let held = entries.len();
                entries.retain(|_, entry| !entry.is_expired(now));
                let evicted = held - entries.len();
                if evicted > 0 {
                    debug!(evicted, "Evicted expired entries");
                }
            }

            debug!(key = %key, size = value.len(), "Storing entry");
            entries.insert(
                key,
                Entry {
                    value,
                    expires_at: expire.map(|ttl| now + ttl),
                },
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryDocumentStore::new();

        store.set("abc", b"hello".to_vec()).await.unwrap();

        assert_eq!(store.get("abc", false).await.unwrap(), Some(b"hello".to_vec()));
        assert_eq!(store.get("missing", false).await.unwrap(), None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_empty_value_is_present() {
        let store = MemoryDocumentStore::new();

        store.set("empty", Vec::new()).await.unwrap();

        assert_eq!(store.get("empty", true).await.unwrap(), Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let store = MemoryDocumentStore::with_expiry(Duration::milliseconds(50));
        store.set("k", b"v".to_vec()).await.unwrap();

        tokio::time::sleep(StdDuration::from_millis(80)).await;

        assert_eq!(store.get("k", true).await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_refreshing_read_extends_lifetime() {
        let store = MemoryDocumentStore::with_expiry(Duration::milliseconds(300));
        store.set("k", b"v".to_vec()).await.unwrap();

        tokio::time::sleep(StdDuration::from_millis(200)).await;
        assert!(store.get("k", false).await.unwrap().is_some());

        tokio::time::sleep(StdDuration::from_millis(200)).await;
        assert!(store.get("k", true).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_peeking_read_does_not_extend_lifetime() {
        let store = MemoryDocumentStore::with_expiry(Duration::milliseconds(300));
        store.set("k", b"v".to_vec()).await.unwrap();

        tokio::time::sleep(StdDuration::from_millis(200)).await;
        assert!(store.get("k", true).await.unwrap().is_some());

        tokio::time::sleep(StdDuration::from_millis(200)).await;
        assert_eq!(store.get("k", true).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_writes_reclaim_expired_entries_nobody_reads() {
        let store = MemoryDocumentStore::with_expiry(Duration::milliseconds(10));
        for i in 0..1000 {
            store.set(&format!("old{}", i), b"v".to_vec()).await.unwrap();
        }

        tokio::time::sleep(StdDuration::from_millis(50)).await;
        store.set("fresh", b"v".to_vec()).await.unwrap();
        assert!(store.get("fresh", false).await.unwrap().is_some());

        assert_eq!(store.len().await, 1);
        assert_eq!(store.entries.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryDocumentStore::new();
        let handle = store.clone();

        handle.set("shared", b"x".to_vec()).await.unwrap();

        assert!(store.get("shared", false).await.unwrap().is_some());
    }
}
