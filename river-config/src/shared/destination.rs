use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Configuration for resolving the destination name documents are written to.
///
/// The destination is either a fixed name or a time-windowed pattern that
/// produces one partition per time bucket (for example one index per day).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationConfig {
    /// Fixed destination name, used verbatim for every document.
    Static {
        /// Destination name.
        name: String,
    },
    /// Destination name computed from a timestamp through a date pattern.
    ///
    /// The pattern uses date tokens (`yyyy`/`YYYY`, `MM`, `dd`, `HH`, `mm`)
    /// with single-quoted literal sections, e.g. `'logs-'yyyy.MM.dd` resolves
    /// to `logs-2026.08.06` for a timestamp on that day.
    TimeWindowed {
        /// Pattern with date tokens and quoted literal sections.
        pattern: String,
    },
}

impl DestinationConfig {
    /// Validates the [`DestinationConfig`].
    ///
    /// Returns [`ValidationError::EmptyDestinationName`] or
    /// [`ValidationError::EmptyDestinationPattern`] when the respective value
    /// is empty. Pattern token validity is checked where the pattern is parsed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Static { name } if name.is_empty() => {
                Err(ValidationError::EmptyDestinationName)
            }
            Self::TimeWindowed { pattern } if pattern.is_empty() => {
                Err(ValidationError::EmptyDestinationPattern)
            }
            _ => Ok(()),
        }
    }
}
