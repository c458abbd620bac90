use std::future::Future;

use crate::error::RiverResult;
use crate::types::Document;

/// The downstream document store a feed delivers into.
///
/// Implementations may buffer operations and ship them in bulk, but must
/// preserve per-document operation semantics and surface every persistent
/// failure from [`Mouth::flush`]; silently dropping a document would break
/// the at-least-once delivery contract.
pub trait Mouth {
    /// Writes `document` under its identifier.
    ///
    /// With `create_only` an existing document with the same identifier is
    /// left untouched and the duplicate attempt succeeds as a no-op;
    /// otherwise the write is an upsert.
    fn index(
        &self,
        document: Document,
        create_only: bool,
    ) -> impl Future<Output = RiverResult<()>> + Send;

    /// Removes the document with `document`'s identifier.
    ///
    /// Deleting an identifier that does not exist is a no-op.
    fn delete(&self, document: Document) -> impl Future<Output = RiverResult<()>> + Send;

    /// Forces out any buffered operations.
    ///
    /// A run's state commit only happens after a successful flush.
    fn flush(&self) -> impl Future<Output = RiverResult<()>> + Send;
}
