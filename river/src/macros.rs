//! Macros for feed error handling.
//!
//! Convenience macros for creating and returning [`crate::error::RiverError`]
//! instances with reduced boilerplate.

/// Creates a [`crate::error::RiverError`] from an error kind and description,
/// with optional dynamic detail.
#[macro_export]
macro_rules! river_error {
    ($kind:expr, $desc:expr) => {
        RiverError::from(($kind, $desc))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        RiverError::from(($kind, $desc, $detail.to_string()))
    };
}

/// Creates and returns a [`crate::error::RiverError`] from the current function.
#[macro_export]
macro_rules! bail {
    ($kind:expr, $desc:expr) => {
        return Err($crate::river_error!($kind, $desc))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        return Err($crate::river_error!($kind, $desc, $detail))
    };
}
