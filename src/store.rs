// store.rs
use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate entry for key(s): {}", .0.join(", "))]
    DuplicateKeys(Vec<String>),
    #[error("key not found: {0}")]
    KeyNotFound(String),
}

/// In-memory key-value map plus the request counter, both behind one lock so
/// the reporter reads item count and request count consistently.
pub struct Store {
    inner: Mutex<StoreInner>,
}

struct StoreInner {
    data: HashMap<String, String>,
    requests: u64,
}

impl Store {
    pub fn new() -> Self {
        Store {
            inner: Mutex::new(StoreInner {
                data: HashMap::new(),
                requests: 0,
            }),
        }
    }

    /// Inserts a batch of entries. The whole batch is validated against
    /// existing keys first; any collision rejects the batch atomically and
    /// reports every offending key.
    pub async fn insert(&self, entries: HashMap<String, String>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let mut duplicates: Vec<String> = entries
            .keys()
            .filter(|k| inner.data.contains_key(*k))
            .cloned()
            .collect();
        if !duplicates.is_empty() {
            duplicates.sort();
            return Err(StoreError::DuplicateKeys(duplicates));
        }
        inner.data.extend(entries);
        Ok(())
    }

    /// Returns an independent copy of the map, taken under the lock.
    pub async fn snapshot(&self) -> HashMap<String, String> {
        let inner = self.inner.lock().await;
        inner.data.clone()
    }

    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.data.remove(key).is_some() {
            Ok(())
        } else {
            Err(StoreError::KeyNotFound(key.to_string()))
        }
    }

    /// Increments the request counter, returning the number of requests
    /// handled before this one (fetch-and-add).
    pub async fn bump_requests(&self) -> u64 {
        let mut inner = self.inner.lock().await;
        let prior = inner.requests;
        inner.requests += 1;
        prior
    }

    /// Item count and request count in a single lock acquisition.
    pub async fn status(&self) -> (usize, u64) {
        let inner = self.inner.lock().await;
        (inner.data.len(), inner.requests)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
