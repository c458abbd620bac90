//! Change-detection query windows.
//!
//! A window selects the rows one run replicates: everything stamped since the
//! previous run boundary, widened backwards by the configured overlap to
//! re-capture changes committed late with an in-window timestamp.

use chrono::{DateTime, Duration, Utc};

use crate::bail;
use crate::error::{ErrorKind, RiverError, RiverResult};
use crate::state::run::RunState;

/// The half-open time range `[lower, upper)` used to select changed rows for
/// one run.
///
/// `lower` is the previous run boundary minus the overlap; `upper` is the
/// "now" captured before the query executed. A row stamped exactly at `upper`
/// belongs to the next run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    lower: DateTime<Utc>,
    upper: DateTime<Utc>,
}

impl FetchWindow {
    /// Computes the window for a run: `[last_run_time - overlap, current_run_started_time)`.
    ///
    /// The overlap must be non-negative; together with the [`RunState`]
    /// ordering invariant this guarantees `lower <= upper`.
    pub fn of(state: &RunState, overlap: Duration) -> RiverResult<Self> {
        if overlap < Duration::zero() {
            bail!(
                ErrorKind::ConfigError,
                "The overlap duration cannot be negative",
                format!("overlap={overlap}")
            );
        }

        let Some(lower) = state.last_run_time.checked_sub_signed(overlap) else {
            bail!(
                ErrorKind::ConfigError,
                "The overlap duration underflows the representable time range",
                format!("last_run_time={}, overlap={overlap}", state.last_run_time)
            );
        };

        Ok(Self {
            lower,
            upper: state.current_run_started_time,
        })
    }

    /// Window lower bound, bound first in the source query parameter order.
    pub fn lower(&self) -> DateTime<Utc> {
        self.lower
    }

    /// Window upper bound, bound second in the source query parameter order.
    pub fn upper(&self) -> DateTime<Utc> {
        self.upper
    }

    /// Returns whether `ts` falls inside the window.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.lower <= ts && ts < self.upper
    }
}
