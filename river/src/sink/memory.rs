use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::RiverResult;
use crate::sink::name::DestinationName;
use crate::sink::Mouth;
use crate::types::Document;

#[derive(Debug)]
struct Inner {
    /// Documents by resolved destination name, then identifier.
    documents: HashMap<String, HashMap<String, Document>>,
    /// Destination resolved by the most recent operation.
    last_destination: Option<String>,
}

/// In-memory [`Mouth`] for tests and ephemeral feeds.
///
/// Stores documents per resolved destination and identifier with the same
/// semantics a real document store exposes: insert-only writes never
/// overwrite, upserts always do, deletes of unknown identifiers succeed.
#[derive(Debug, Clone)]
pub struct MemoryMouth {
    name: DestinationName,
    inner: Arc<Mutex<Inner>>,
}

impl MemoryMouth {
    pub fn new(name: DestinationName) -> Self {
        let inner = Inner {
            documents: HashMap::new(),
            last_destination: None,
        };

        Self {
            name,
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Resolves the destination for a document: its own override if present,
    /// otherwise the configured resolver applied to the document timestamp
    /// (or to "now" for documents without one).
    fn resolve(&self, document: &Document) -> String {
        match &document.destination {
            Some(destination) => destination.clone(),
            None => {
                let at = document.timestamp.unwrap_or_else(Utc::now);
                self.name.resolve(at)
            }
        }
    }

    /// Total number of stored documents across all destinations.
    pub async fn len(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.documents.values().map(HashMap::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Returns the document stored under `destination` and `id`.
    pub async fn get(&self, destination: &str, id: &str) -> Option<Document> {
        let inner = self.inner.lock().await;
        inner
            .documents
            .get(destination)
            .and_then(|documents| documents.get(id))
            .cloned()
    }

    /// Returns all stored documents.
    pub async fn documents(&self) -> Vec<Document> {
        let inner = self.inner.lock().await;
        inner
            .documents
            .values()
            .flat_map(|documents| documents.values().cloned())
            .collect()
    }

    /// Destination resolved by the most recent operation.
    pub async fn last_destination(&self) -> Option<String> {
        let inner = self.inner.lock().await;
        inner.last_destination.clone()
    }
}

impl Mouth for MemoryMouth {
    async fn index(&self, document: Document, create_only: bool) -> RiverResult<()> {
        let destination = self.resolve(&document);
        let id = document
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

        let mut inner = self.inner.lock().await;
        let documents = inner.documents.entry(destination.clone()).or_default();
        if create_only && documents.contains_key(&id) {
            // Insert-only semantics: a duplicate create attempt succeeds
            // without touching the stored document.
            debug!("skipping create of existing document {id} in {destination}");
        } else {
            debug!("indexing document {id} in {destination}");
            documents.insert(id, document);
        }
        inner.last_destination = Some(destination);

        Ok(())
    }

    async fn delete(&self, document: Document) -> RiverResult<()> {
        let destination = self.resolve(&document);

        let mut inner = self.inner.lock().await;
        if let Some(id) = &document.id {
            let removed = inner
                .documents
                .get_mut(&destination)
                .and_then(|documents| documents.remove(id));
            if removed.is_some() {
                debug!("deleted document {id} from {destination}");
            } else {
                debug!("delete of missing document {id} from {destination} is a no-op");
            }
        }
        inner.last_destination = Some(destination);

        Ok(())
    }

    async fn flush(&self) -> RiverResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OpKind;
    use serde_json::json;

    fn doc(id: &str, op: OpKind, name: &str) -> Document {
        let mut document = Document::new(op);
        document.id = Some(id.to_owned());
        document.fields.insert("name".into(), json!(name));
        document
    }

    fn mouth() -> MemoryMouth {
        MemoryMouth::new(DestinationName::Static("products".into()))
    }

    #[tokio::test]
    async fn upsert_overwrites() {
        let mouth = mouth();
        mouth.index(doc("1", OpKind::Index, "old"), false).await.unwrap();
        mouth.index(doc("1", OpKind::Index, "new"), false).await.unwrap();

        assert_eq!(mouth.len().await, 1);
        let stored = mouth.get("products", "1").await.unwrap();
        assert_eq!(stored.fields.get("name"), Some(&json!("new")));
    }

    #[tokio::test]
    async fn create_only_never_overwrites() {
        let mouth = mouth();
        mouth.index(doc("1", OpKind::Create, "first"), true).await.unwrap();
        // The duplicate attempt is a no-op, not an error.
        mouth.index(doc("1", OpKind::Create, "second"), true).await.unwrap();

        let stored = mouth.get("products", "1").await.unwrap();
        assert_eq!(stored.fields.get("name"), Some(&json!("first")));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let mouth = mouth();
        mouth.index(doc("1", OpKind::Index, "x"), false).await.unwrap();
        mouth.delete(doc("1", OpKind::Delete, "x")).await.unwrap();
        mouth.delete(doc("1", OpKind::Delete, "x")).await.unwrap();

        assert!(mouth.is_empty().await);
    }

    #[tokio::test]
    async fn missing_id_is_auto_generated() {
        let mouth = mouth();
        let mut document = Document::new(OpKind::Index);
        document.fields.insert("name".into(), json!("anonymous"));
        mouth.index(document.clone(), false).await.unwrap();
        mouth.index(document, false).await.unwrap();

        // Two writes without identifiers become two distinct documents.
        assert_eq!(mouth.len().await, 2);
    }

    #[tokio::test]
    async fn destination_override_wins() {
        let mouth = mouth();
        let mut document = doc("1", OpKind::Index, "x");
        document.destination = Some("overridden".into());
        mouth.index(document, false).await.unwrap();

        assert!(mouth.get("overridden", "1").await.is_some());
        assert_eq!(mouth.last_destination().await.as_deref(), Some("overridden"));
    }
}
