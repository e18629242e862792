//! Collision-free key allocation
//!
//! The check is best effort: two concurrent allocations can both see the same
//! candidate as free, in which case the last writer wins.

use tracing::{debug, warn};

use crate::document::{DocumentError, DocumentKey};
use crate::keys::KeyGenerator;
use crate::storage::DocumentStore;

/// Default number of candidates drawn before giving up
pub const DEFAULT_MAX_KEY_ATTEMPTS: usize = 64;

/// Draws candidate keys until one is not held by the store
///
/// The allocator is kind-agnostic: file documents get the same logical key as
/// text documents, the `file-` prefix is applied afterwards by the caller.
pub struct KeyAllocator<'a, S, G> {
    store: &'a S,
    generator: &'a G,
    key_length: usize,
    max_attempts: usize,
}

impl<'a, S, G> KeyAllocator<'a, S, G>
where
    S: DocumentStore,
    G: KeyGenerator,
{
    pub fn new(store: &'a S, generator: &'a G, key_length: usize, max_attempts: usize) -> Self {
        Self {
            store,
            generator,
            key_length,
            max_attempts,
        }
    }

    /// Return the first candidate the store reports as absent
    ///
    /// Every lookup is a peek (`skip_expire = true`) so that looking at a taken
    /// key never keeps it alive.
    ///
    /// # Errors
    ///
    /// - `DocumentError::KeySpaceExhausted` if every candidate was taken
    /// - `DocumentError::StorageFailure` if a lookup fails
    pub async fn allocate(&self) -> Result<DocumentKey, DocumentError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.create_key(self.key_length);

            match self.store.get(&candidate, true).await? {
                Some(_) => {
                    debug!(attempt, key = %candidate, "Key already taken, drawing another");
                }
                None => return Ok(DocumentKey::new(candidate)),
            }
        }

        warn!(attempts = self.max_attempts, "Key space exhausted");
        Err(DocumentError::KeySpaceExhausted {
            attempts: self.max_attempts,
        })
    }
}
