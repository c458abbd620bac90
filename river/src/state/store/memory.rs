use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::error::RiverResult;
use crate::state::store::StateStore;

#[derive(Debug)]
struct Inner {
    entries: HashMap<String, DateTime<Utc>>,
}

/// In-memory [`StateStore`] for tests and ephemeral feeds.
///
/// State kept here does not survive a restart; production feeds use a durable
/// store such as [`FileStateStore`](crate::state::store::file::FileStateStore).
#[derive(Debug, Clone)]
pub struct MemoryStateStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        let inner = Inner {
            entries: HashMap::new(),
        };

        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }
}

impl Default for MemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for MemoryStateStore {
    async fn get(&self, key: &str) -> RiverResult<Option<DateTime<Utc>>> {
        let inner = self.inner.lock().await;

        Ok(inner.entries.get(key).copied())
    }

    async fn put(&self, key: &str, value: DateTime<Utc>) -> RiverResult<()> {
        let mut inner = self.inner.lock().await;
        inner.entries.insert(key.to_owned(), value);

        Ok(())
    }
}
