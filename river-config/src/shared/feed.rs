use serde::{Deserialize, Serialize};

use crate::shared::{ColumnRoles, DestinationConfig, ValidationError};

/// Returns the default overlap applied to the window lower bound, in milliseconds.
fn default_overlap_ms() -> u64 {
    0
}

/// Configuration for one feed: a source table replicated into a destination.
///
/// A feed owns the column role mapping used for change detection, the overlap
/// compensating for clock skew and late-committing transactions, and the
/// destination documents are dispatched to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FeedConfig {
    /// Source columns carrying the created/updated/deleted timestamps.
    pub columns: ColumnRoles,
    /// Duration subtracted from the previous run boundary when computing the
    /// window lower bound, in milliseconds. Rows stamped inside the overlap
    /// region are fetched again on the next run.
    #[serde(default = "default_overlap_ms")]
    pub overlap_ms: u64,
    /// Destination name resolution for dispatched documents.
    pub destination: DestinationConfig,
}

impl FeedConfig {
    /// Validates the [`FeedConfig`] and all nested sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.columns.validate()?;
        self.destination.validate()?;

        Ok(())
    }
}
