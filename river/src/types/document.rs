use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value as JsonValue};

use crate::error::{ErrorKind, RiverError};
use crate::river_error;

/// Operation kind a document is dispatched with.
///
/// `Index` is an upsert, `Create` is insert-only (an existing document with
/// the same identifier is never overwritten), and `Delete` removes the
/// document if it exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpKind {
    #[default]
    Index,
    Create,
    Delete,
}

impl OpKind {
    /// Returns the wire name of this operation kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Index => "index",
            OpKind::Create => "create",
            OpKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpKind {
    type Err = RiverError;

    /// Parses an operation kind from its wire name.
    ///
    /// An unknown name is a configuration error: the upstream mapping must be
    /// fixed, the row is never silently skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index" => Ok(OpKind::Index),
            "create" => Ok(OpKind::Create),
            "delete" => Ok(OpKind::Delete),
            other => Err(river_error!(
                ErrorKind::ConfigError,
                "Unknown operation kind",
                other
            )),
        }
    }
}

/// A nested, sink-ready document assembled from one source row.
///
/// Documents are built exclusively by the assembler and then moved into the
/// dispatcher; nothing mutates a document after `end()` hands it over.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Destination identifier; the sink generates one when absent.
    pub id: Option<String>,
    /// Operation this document is dispatched with.
    pub op: OpKind,
    /// Control timestamp, used for time-windowed destination resolution.
    pub timestamp: Option<DateTime<Utc>>,
    /// Per-document destination override, bypassing the configured resolver.
    pub destination: Option<String>,
    /// Nested field tree.
    pub fields: Map<String, JsonValue>,
}

impl Document {
    /// Creates an empty document dispatched with the given operation.
    pub fn new(op: OpKind) -> Self {
        Self {
            id: None,
            op,
            timestamp: None,
            destination: None,
            fields: Map::new(),
        }
    }

    /// Returns whether the document carries no data.
    ///
    /// A document is empty when every leaf value in its field tree is null.
    /// Empty documents are discarded instead of dispatched.
    pub fn is_empty(&self) -> bool {
        self.fields.values().all(all_leaves_null)
    }
}

fn all_leaves_null(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Object(map) => map.values().all(all_leaves_null),
        JsonValue::Array(items) => items.iter().all(all_leaves_null),
        _ => false,
    }
}
