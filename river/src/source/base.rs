use std::future::Future;

use futures::stream::BoxStream;

use crate::error::RiverResult;
use crate::types::Row;
use crate::window::FetchWindow;

/// A relational source of changed rows.
///
/// The implementation binds the window bounds to the two placeholders of its
/// query template in a fixed order: lower bound first, upper bound second.
/// Window filtering belongs in the query predicate; every streamed row is
/// expected to carry at least one role timestamp inside the window.
pub trait RowSource {
    /// Executes the change query for `window` and streams the selected rows
    /// as ordered column name/value pairs.
    ///
    /// The stream ends when the result set is exhausted; a stream item error
    /// aborts the run without committing state.
    fn fetch(
        &self,
        window: &FetchWindow,
    ) -> impl Future<Output = RiverResult<BoxStream<'static, RiverResult<Row>>>> + Send;
}
