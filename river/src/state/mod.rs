//! Run-boundary state tracking.
//!
//! Defines the per-cycle [`RunState`](run::RunState) value and the persisted
//! key/value stores it is read from and committed to.

pub mod run;
pub mod store;
