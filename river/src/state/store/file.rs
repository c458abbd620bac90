use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::RiverResult;
use crate::state::store::StateStore;

#[derive(Debug)]
struct Inner {
    entries: HashMap<String, DateTime<Utc>>,
}

/// [`StateStore`] backed by a JSON document on disk.
///
/// The full map is loaded when the store is opened and cached; every `put`
/// rewrites the file through a temp-file-then-rename so a crash mid-write
/// leaves the previous state intact.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
    inner: Arc<Mutex<Inner>>,
}

impl FileStateStore {
    /// Opens the store at `path`, loading existing state if the file exists.
    pub async fn open(path: impl Into<PathBuf>) -> RiverResult<Self> {
        let path = path.into();

        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        debug!("loaded {} state entries from {}", entries.len(), path.display());

        Ok(Self {
            path,
            inner: Arc::new(Mutex::new(Inner { entries })),
        })
    }

    async fn persist(&self, entries: &HashMap<String, DateTime<Utc>>) -> RiverResult<()> {
        let bytes = serde_json::to_vec_pretty(entries)?;

        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, &bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        Ok(())
    }
}

impl StateStore for FileStateStore {
    async fn get(&self, key: &str) -> RiverResult<Option<DateTime<Utc>>> {
        let inner = self.inner.lock().await;

        Ok(inner.entries.get(key).copied())
    }

    async fn put(&self, key: &str, value: DateTime<Utc>) -> RiverResult<()> {
        let mut inner = self.inner.lock().await;
        inner.entries.insert(key.to_owned(), value);
        self.persist(&inner.entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::{CURRENT_RUN_STARTED_TIME, LAST_RUN_TIME};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn temp_state_path() -> PathBuf {
        std::env::temp_dir().join(format!("river-state-{}.json", Uuid::new_v4().simple()))
    }

    #[tokio::test]
    async fn state_survives_reopen() {
        let path = temp_state_path();
        let ts = Utc.with_ymd_and_hms(2026, 8, 6, 9, 0, 0).unwrap();

        let store = FileStateStore::open(&path).await.unwrap();
        store.put(LAST_RUN_TIME, ts).await.unwrap();
        drop(store);

        let reopened = FileStateStore::open(&path).await.unwrap();
        assert_eq!(reopened.get(LAST_RUN_TIME).await.unwrap(), Some(ts));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let path = temp_state_path();

        let store = FileStateStore::open(&path).await.unwrap();
        assert_eq!(store.get(CURRENT_RUN_STARTED_TIME).await.unwrap(), None);
    }
}
