use std::future::Future;

use chrono::{DateTime, Utc};

use crate::error::RiverResult;

/// State key holding the boundary of the last fully successful run.
///
/// Only the pipeline commit step writes this key.
pub const LAST_RUN_TIME: &str = "last_run_time";

/// State key holding the "now" captured when the current run started,
/// written before the source query executes.
pub const CURRENT_RUN_STARTED_TIME: &str = "current_run_started_time";

/// A persisted mapping from string keys to timestamps, durable across runs.
///
/// The feed core only ever stores the two well-known run boundary keys, but
/// the store itself is a plain keyed map and does not interpret them.
pub trait StateStore {
    /// Returns the timestamp stored under `key`, or [`None`] if absent.
    fn get(&self, key: &str) -> impl Future<Output = RiverResult<Option<DateTime<Utc>>>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(
        &self,
        key: &str,
        value: DateTime<Utc>,
    ) -> impl Future<Output = RiverResult<()>> + Send;
}
