use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{ErrorKind, RiverError, RiverResult};
use crate::river_error;
use crate::sink::Mouth;
use crate::types::Document;

#[derive(Debug)]
struct FaultState {
    operations: u64,
    fail_after: Option<u64>,
}

/// [`Mouth`] wrapper that injects delivery failures.
///
/// Counts index/delete operations and starts failing once the configured
/// threshold is crossed, until [`FaultyMouth::heal`] is called. Used to
/// verify that a failed run leaves the run boundary uncommitted.
#[derive(Debug, Clone)]
pub struct FaultyMouth<M> {
    inner: M,
    state: Arc<Mutex<FaultState>>,
}

impl<M> FaultyMouth<M> {
    pub fn wrap(inner: M) -> Self {
        Self {
            inner,
            state: Arc::new(Mutex::new(FaultState {
                operations: 0,
                fail_after: None,
            })),
        }
    }

    /// Makes every operation past the next `threshold` ones fail.
    pub async fn fail_after(&self, threshold: u64) {
        let mut state = self.state.lock().await;
        state.operations = 0;
        state.fail_after = Some(threshold);
    }

    /// Stops injecting failures.
    pub async fn heal(&self) {
        let mut state = self.state.lock().await;
        state.fail_after = None;
    }

    /// Number of operations attempted since the last [`FaultyMouth::fail_after`].
    pub async fn operations(&self) -> u64 {
        let state = self.state.lock().await;
        state.operations
    }

    async fn check(&self) -> RiverResult<()> {
        let mut state = self.state.lock().await;
        state.operations += 1;
        if let Some(threshold) = state.fail_after {
            if state.operations > threshold {
                return Err(river_error!(
                    ErrorKind::SinkDeliveryFailed,
                    "Injected delivery failure",
                    format!("operation {}", state.operations)
                ));
            }
        }

        Ok(())
    }
}

impl<M> Mouth for FaultyMouth<M>
where
    M: Mouth + Send + Sync,
{
    async fn index(&self, document: Document, create_only: bool) -> RiverResult<()> {
        self.check().await?;
        self.inner.index(document, create_only).await
    }

    async fn delete(&self, document: Document) -> RiverResult<()> {
        self.check().await?;
        self.inner.delete(document).await
    }

    async fn flush(&self) -> RiverResult<()> {
        self.inner.flush().await
    }
}
