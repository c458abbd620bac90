use chrono::{DateTime, Utc};

use crate::bail;
use crate::error::{ErrorKind, RiverError, RiverResult};

/// The pair of run boundaries one fetch cycle operates on.
///
/// Read once at cycle start and committed once at cycle end (success path
/// only); a failed cycle leaves the persisted state untouched so the next
/// cycle re-covers the same window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunState {
    /// Boundary of the last fully successful run.
    pub last_run_time: DateTime<Utc>,
    /// "Now" captured before the current run queries the source.
    pub current_run_started_time: DateTime<Utc>,
}

impl RunState {
    /// Creates a [`RunState`], enforcing `last_run_time <= current_run_started_time`.
    ///
    /// The ordering can only break when the wall clock moved backwards past
    /// the previous run boundary; running in that condition would produce an
    /// inverted query window, so it is refused.
    pub fn new(
        last_run_time: DateTime<Utc>,
        current_run_started_time: DateTime<Utc>,
    ) -> RiverResult<Self> {
        if last_run_time > current_run_started_time {
            bail!(
                ErrorKind::InvalidState,
                "The clock moved backwards past the previous run boundary",
                format!("last_run_time={last_run_time}, current_run_started_time={current_run_started_time}")
            );
        }

        Ok(Self {
            last_run_time,
            current_run_started_time,
        })
    }
}
