use std::error;
use std::fmt;

/// Convenient result type for feed operations using [`RiverError`] as the error type.
pub type RiverResult<T> = Result<T, RiverError>;

/// Main error type for feed operations.
///
/// [`RiverError`] can represent a single error, an error with additional
/// detail, or multiple aggregated errors, while keeping a unified interface
/// for callers that only care about the [`ErrorKind`].
#[derive(Debug, Clone)]
pub struct RiverError {
    repr: ErrorRepr,
}

/// Internal representation of error data.
#[derive(Debug, Clone)]
enum ErrorRepr {
    /// Error with kind and static description
    WithDescription(ErrorKind, &'static str),
    /// Error with kind, static description, and dynamic detail
    WithDescriptionAndDetail(ErrorKind, &'static str, String),
    /// Multiple aggregated errors
    Many(Vec<RiverError>),
}

/// Specific categories of errors that can occur while running a feed.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    // Fetch cycle errors
    SourceQueryFailed,
    SinkDeliveryFailed,

    // Data & transformation errors
    ConversionError,
    InvalidData,

    // Configuration errors
    ConfigError,
    DestinationNameInvalid,

    // State & workflow errors
    InvalidState,

    // IO & serialization errors
    IoError,
    SerializationError,

    // Unknown / uncategorized
    Unknown,
}

impl RiverError {
    /// Creates a [`RiverError`] containing multiple aggregated errors.
    pub fn many(errors: Vec<RiverError>) -> RiverError {
        RiverError {
            repr: ErrorRepr::Many(errors),
        }
    }

    /// Returns the [`ErrorKind`] of this error.
    ///
    /// For multiple errors, returns the kind of the first error or
    /// [`ErrorKind::Unknown`] if the error list is empty.
    pub fn kind(&self) -> ErrorKind {
        match self.repr {
            ErrorRepr::WithDescription(kind, _)
            | ErrorRepr::WithDescriptionAndDetail(kind, _, _) => kind,
            ErrorRepr::Many(ref errors) => errors
                .first()
                .map(|err| err.kind())
                .unwrap_or(ErrorKind::Unknown),
        }
    }

    /// Returns the detailed error information if available.
    pub fn detail(&self) -> Option<&str> {
        match self.repr {
            ErrorRepr::WithDescriptionAndDetail(_, _, ref detail) => Some(detail.as_str()),
            ErrorRepr::Many(ref errors) => errors.iter().find_map(|e| e.detail()),
            _ => None,
        }
    }
}

impl PartialEq for RiverError {
    fn eq(&self, other: &RiverError) -> bool {
        match (&self.repr, &other.repr) {
            (ErrorRepr::WithDescription(kind_a, _), ErrorRepr::WithDescription(kind_b, _)) => {
                kind_a == kind_b
            }
            (
                ErrorRepr::WithDescriptionAndDetail(kind_a, _, _),
                ErrorRepr::WithDescriptionAndDetail(kind_b, _, _),
            ) => kind_a == kind_b,
            (ErrorRepr::Many(errors_a), ErrorRepr::Many(errors_b)) => {
                errors_a.len() == errors_b.len()
                    && errors_a.iter().zip(errors_b.iter()).all(|(a, b)| a == b)
            }
            _ => false,
        }
    }
}

impl fmt::Display for RiverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.repr {
            ErrorRepr::WithDescription(kind, desc) => {
                fmt::Debug::fmt(&kind, f)?;
                f.write_str(": ")?;
                desc.fmt(f)
            }
            ErrorRepr::WithDescriptionAndDetail(kind, desc, ref detail) => {
                fmt::Debug::fmt(&kind, f)?;
                f.write_str(": ")?;
                desc.fmt(f)?;
                f.write_str(" -> ")?;
                detail.fmt(f)
            }
            ErrorRepr::Many(ref errors) => {
                if errors.is_empty() {
                    write!(f, "Multiple errors occurred (empty)")
                } else if errors.len() == 1 {
                    errors[0].fmt(f)
                } else {
                    write!(f, "Multiple errors occurred ({} total):", errors.len())?;
                    for (i, error) in errors.iter().enumerate() {
                        write!(f, "\n  {}: {}", i + 1, error)?;
                    }
                    Ok(())
                }
            }
        }
    }
}

impl error::Error for RiverError {}

/// Creates a [`RiverError`] from an error kind and static description.
impl From<(ErrorKind, &'static str)> for RiverError {
    fn from((kind, desc): (ErrorKind, &'static str)) -> RiverError {
        RiverError {
            repr: ErrorRepr::WithDescription(kind, desc),
        }
    }
}

/// Creates a [`RiverError`] from an error kind, static description, and detail.
impl From<(ErrorKind, &'static str, String)> for RiverError {
    fn from((kind, desc, detail): (ErrorKind, &'static str, String)) -> RiverError {
        RiverError {
            repr: ErrorRepr::WithDescriptionAndDetail(kind, desc, detail),
        }
    }
}

impl From<std::io::Error> for RiverError {
    fn from(err: std::io::Error) -> RiverError {
        RiverError {
            repr: ErrorRepr::WithDescriptionAndDetail(
                ErrorKind::IoError,
                "An IO error occurred",
                err.to_string(),
            ),
        }
    }
}

impl From<serde_json::Error> for RiverError {
    fn from(err: serde_json::Error) -> RiverError {
        RiverError {
            repr: ErrorRepr::WithDescriptionAndDetail(
                ErrorKind::SerializationError,
                "A JSON serialization error occurred",
                err.to_string(),
            ),
        }
    }
}

impl From<river_config::shared::ValidationError> for RiverError {
    fn from(err: river_config::shared::ValidationError) -> RiverError {
        RiverError {
            repr: ErrorRepr::WithDescriptionAndDetail(
                ErrorKind::ConfigError,
                "The feed configuration is invalid",
                err.to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::river_error;

    #[test]
    fn kind_is_preserved() {
        let err = river_error!(ErrorKind::InvalidData, "bad row");
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn detail_is_rendered() {
        let err = river_error!(ErrorKind::ConfigError, "unknown operation kind", "upsert");
        assert_eq!(err.kind(), ErrorKind::ConfigError);
        assert_eq!(err.detail(), Some("upsert"));
        assert!(err.to_string().contains("unknown operation kind -> upsert"));
    }

    #[test]
    fn many_reports_first_kind() {
        let err = RiverError::many(vec![
            river_error!(ErrorKind::SinkDeliveryFailed, "delivery failed"),
            river_error!(ErrorKind::SourceQueryFailed, "query failed"),
        ]);
        assert_eq!(err.kind(), ErrorKind::SinkDeliveryFailed);
    }
}
