use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A static destination name must not be empty.
    #[error("`destination.name` cannot be empty")]
    EmptyDestinationName,
    /// A time-windowed destination pattern must not be empty.
    #[error("`destination.pattern` cannot be empty")]
    EmptyDestinationPattern,
    /// The same source column was assigned to more than one timestamp role.
    #[error("column `{0}` is mapped to more than one timestamp role")]
    DuplicateColumnRole(String),
}
