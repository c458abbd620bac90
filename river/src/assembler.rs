//! Key/value stream assembly.
//!
//! Folds the flat, ordered column name/value pairs of one source row into a
//! nested [`Document`]. Dots in a column name separate object field paths
//! (`address.city`), a bare numeric segment or bracket suffix addresses an
//! array position (`tags.0`, `tags[0]`), and a handful of control keys set
//! document metadata instead of fields.

use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::error::{ErrorKind, RiverError, RiverResult};
use crate::types::{Document, OpKind, Value};
use crate::{bail, river_error};

/// Control key carrying the document identifier.
pub const ID_KEY: &str = "_id";
/// Control key overriding the destination for this document.
pub const INDEX_KEY: &str = "_index";
/// Control key overriding the operation kind for this document.
pub const OPTYPE_KEY: &str = "_optype";

/// One parsed step of a column name path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Field(&'a str),
    Index(usize),
}

/// Builds one [`Document`] per row from a flat key/value pair stream.
///
/// Usage per row: `begin` opens an empty document root, `push` folds each
/// column pair into the field tree, and `end` completes the row, yielding the
/// document unless every leaf turned out null.
#[derive(Debug, Default)]
pub struct DocumentAssembler {
    doc: Option<Document>,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an empty document root for the next row, dispatched with `op`.
    ///
    /// Any unfinished document from a previous row is discarded.
    pub fn begin(&mut self, op: OpKind) {
        self.doc = Some(Document::new(op));
    }

    /// Folds one (column name, value) pair into the current document.
    ///
    /// Null values are recorded explicitly; whether the document is worth
    /// delivering is decided once the row is complete.
    pub fn push(&mut self, key: &str, value: Value) -> RiverResult<()> {
        let Some(doc) = self.doc.as_mut() else {
            bail!(
                ErrorKind::InvalidState,
                "A pair was pushed without an open document"
            );
        };

        match key {
            ID_KEY => {
                doc.id = value.as_id();
                return Ok(());
            }
            INDEX_KEY => {
                doc.destination = value.as_id();
                return Ok(());
            }
            OPTYPE_KEY => {
                if let Some(optype) = value.as_id() {
                    doc.op = optype.parse()?;
                }
                return Ok(());
            }
            _ => {}
        }

        if let Some(ts) = value.as_timestamp() {
            // The first timestamp column of the row doubles as the control
            // timestamp when the classifier did not supply one.
            doc.timestamp.get_or_insert(ts);
        }

        let segments = parse_key(key)?;
        set_path(&mut doc.fields, key, &segments, value.into_json())
    }

    /// Completes the current row.
    ///
    /// Returns the assembled document, or [`None`] when all of its leaf
    /// values are null, in which case nothing is delivered.
    pub fn end(&mut self) -> RiverResult<Option<Document>> {
        let Some(doc) = self.doc.take() else {
            bail!(
                ErrorKind::InvalidState,
                "A row was ended without an open document"
            );
        };

        if doc.is_empty() {
            debug!("discarding document without non-null values");
            return Ok(None);
        }

        Ok(Some(doc))
    }
}

/// Splits a column name into path segments.
fn parse_key(key: &str) -> RiverResult<Vec<Segment<'_>>> {
    let mut segments = Vec::new();

    for part in key.split('.') {
        if part.is_empty() {
            bail!(
                ErrorKind::InvalidData,
                "A column name contains an empty path segment",
                key
            );
        }

        // Bare numeric segments address array positions.
        if part.bytes().all(|b| b.is_ascii_digit()) {
            segments.push(Segment::Index(parse_index(part, key)?));
            continue;
        }

        let (name, mut rest) = match part.find('[') {
            Some(pos) => part.split_at(pos),
            None => (part, ""),
        };
        if name.is_empty() {
            bail!(
                ErrorKind::InvalidData,
                "An array index must follow a field name",
                key
            );
        }
        segments.push(Segment::Field(name));

        while !rest.is_empty() {
            let Some(close) = rest.find(']') else {
                bail!(
                    ErrorKind::InvalidData,
                    "An array index bracket is not closed",
                    key
                );
            };
            segments.push(Segment::Index(parse_index(&rest[1..close], key)?));
            rest = &rest[close + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                bail!(
                    ErrorKind::InvalidData,
                    "Unexpected characters after an array index",
                    key
                );
            }
        }
    }

    Ok(segments)
}

fn parse_index(digits: &str, key: &str) -> RiverResult<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        bail!(
            ErrorKind::InvalidData,
            "An array index is not a number",
            key
        );
    }

    digits.parse().map_err(|_| {
        river_error!(
            ErrorKind::InvalidData,
            "An array index is out of range",
            key
        )
    })
}

/// Walks/creates the containers along `segments` and sets the leaf value.
fn set_path(
    fields: &mut Map<String, JsonValue>,
    key: &str,
    segments: &[Segment<'_>],
    value: JsonValue,
) -> RiverResult<()> {
    let Some((first, rest)) = segments.split_first() else {
        bail!(ErrorKind::InvalidData, "A column name has no path", key);
    };
    let Segment::Field(name) = first else {
        bail!(
            ErrorKind::InvalidData,
            "A column name cannot start with an array index",
            key
        );
    };

    let mut current = fields.entry((*name).to_owned()).or_insert(JsonValue::Null);
    for segment in rest {
        current = descend(current, segment, key)?;
    }

    set_leaf(current, key, value)
}

/// Descends one segment, materializing the container it requires.
///
/// A null at an intermediate position is a placeholder and becomes the needed
/// container; any other scalar already holding the position is a conflict.
fn descend<'a>(
    current: &'a mut JsonValue,
    segment: &Segment<'_>,
    key: &str,
) -> RiverResult<&'a mut JsonValue> {
    match segment {
        Segment::Field(name) => {
            if current.is_null() {
                *current = JsonValue::Object(Map::new());
            }
            match current {
                JsonValue::Object(map) => {
                    Ok(map.entry((*name).to_owned()).or_insert(JsonValue::Null))
                }
                _ => Err(river_error!(
                    ErrorKind::InvalidData,
                    "A nested path crosses a value that is not an object",
                    key
                )),
            }
        }
        Segment::Index(index) => {
            if current.is_null() {
                *current = JsonValue::Array(Vec::new());
            }
            match current {
                JsonValue::Array(items) => {
                    while items.len() <= *index {
                        items.push(JsonValue::Null);
                    }
                    Ok(&mut items[*index])
                }
                _ => Err(river_error!(
                    ErrorKind::InvalidData,
                    "An array index addresses a value that is not an array",
                    key
                )),
            }
        }
    }
}

/// Sets the leaf value at the end of a path.
///
/// A repeated column name collects its values into an array, the way repeated
/// labels from a joined result set represent a to-many relation. Writing a
/// scalar where a nested object already exists is a conflict.
fn set_leaf(current: &mut JsonValue, key: &str, value: JsonValue) -> RiverResult<()> {
    match current {
        JsonValue::Null => *current = value,
        JsonValue::Object(_) => {
            bail!(
                ErrorKind::InvalidData,
                "A scalar value collides with a nested object at the same path",
                key
            );
        }
        JsonValue::Array(items) => items.push(value),
        _ => {
            let prev = std::mem::take(current);
            *current = JsonValue::Array(vec![prev, value]);
        }
    }

    Ok(())
}
