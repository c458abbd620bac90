//! Document sink ("mouth") abstractions and implementations.
//!
//! The mouth is the downstream end of a feed: completed documents are routed
//! to its index/create/delete operations, with the destination name resolved
//! per document (fixed, or time-windowed from the document's own timestamp).

mod base;
mod dispatch;
pub mod memory;
mod name;

pub use base::Mouth;
pub use dispatch::dispatch;
pub use name::{DestinationName, TimeWindowPattern};
