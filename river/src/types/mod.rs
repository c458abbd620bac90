//! Common types used throughout the feed system.
//!
//! Re-exports the scalar cell type, the flat source row, and the assembled
//! document together with its operation kind.

mod document;
mod row;
mod value;

pub use document::*;
pub use row::*;
pub use value::*;
