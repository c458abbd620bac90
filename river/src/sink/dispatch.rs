use crate::error::RiverResult;
use crate::sink::Mouth;
use crate::types::{Document, OpKind};

/// Routes a completed document to the mouth operation its kind calls for.
///
/// Updates arrive as [`OpKind::Index`] and upsert; creates are insert-only;
/// deletes remove. The operation kind was already validated when the document
/// was assembled, so this routing is total.
pub async fn dispatch<M: Mouth>(mouth: &M, document: Document) -> RiverResult<()> {
    match document.op {
        OpKind::Index => mouth.index(document, false).await,
        OpKind::Create => mouth.index(document, true).await,
        OpKind::Delete => mouth.delete(document).await,
    }
}
