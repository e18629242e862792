//! In-memory store double that records every call

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::document::DocumentError;
use crate::storage::DocumentStore;

#[derive(Default)]
struct State {
    entries: HashMap<String, Vec<u8>>,
    gets: Vec<(String, bool)>,
    sets: Vec<String>,
    failing_set_suffix: Option<String>,
    fail_reads: bool,
}

#[derive(Clone, Default)]
pub struct RecordingStore {
    state: Arc<Mutex<State>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry without recording a `set`
    pub fn insert(&self, key: &str, value: Vec<u8>) {
        self.state
            .lock()
            .unwrap()
            .entries
            .insert(key.to_string(), value);
    }

    pub fn value(&self, key: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().entries.get(key).cloned()
    }

    /// Every `get` call as `(key, skip_expire)`, in order
    pub fn gets(&self) -> Vec<(String, bool)> {
        self.state.lock().unwrap().gets.clone()
    }

    /// Every key passed to `set`, in order, including failed writes
    pub fn sets(&self) -> Vec<String> {
        self.state.lock().unwrap().sets.clone()
    }

    /// Make writes to keys ending with `suffix` fail
    pub fn fail_sets_ending_with(&self, suffix: &str) {
        self.state.lock().unwrap().failing_set_suffix = Some(suffix.to_string());
    }

    pub fn fail_reads(&self) {
        self.state.lock().unwrap().fail_reads = true;
    }
}

impl DocumentStore for RecordingStore {
    fn get(
        &self,
        key: &str,
        skip_expire: bool,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, DocumentError>> + Send {
        let state = self.state.clone();
        let key = key.to_string();

        async move {
            let mut state = state.lock().unwrap();
            state.gets.push((key.clone(), skip_expire));
            if state.fail_reads {
                return Err(DocumentError::storage_failure("read refused"));
            }
            Ok(state.entries.get(&key).cloned())
        }
    }

    fn set(
        &self,
        key: &str,
        value: Vec<u8>,
    ) -> impl Future<Output = Result<(), DocumentError>> + Send {
        let state = self.state.clone();
        let key = key.to_string();

        async move {
            let mut state = state.lock().unwrap();
            state.sets.push(key.clone());
            let refused = state
                .failing_set_suffix
                .as_deref()
                .is_some_and(|suffix| key.ends_with(suffix));
            if refused {
                return Err(DocumentError::storage_failure("write refused"));
            }
            state.entries.insert(key, value);
            Ok(())
        }
    }
}
