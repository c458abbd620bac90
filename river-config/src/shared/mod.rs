mod base;
mod columns;
mod destination;
mod feed;

pub use base::*;
pub use columns::*;
pub use destination::*;
pub use feed::*;
