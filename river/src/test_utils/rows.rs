use chrono::{DateTime, Utc};

use crate::types::{Row, Value};

/// Builder for product rows shaped like the fixture table used across the
/// integration tests: an identifier, a nullable name, an amount, a price, and
/// the three timestamp role columns.
#[derive(Debug, Clone)]
pub struct ProductRow {
    id: i32,
    name: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
}

impl ProductRow {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            name: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn created_at(mut self, ts: DateTime<Utc>) -> Self {
        self.created_at = Some(ts);
        self
    }

    pub fn updated_at(mut self, ts: DateTime<Utc>) -> Self {
        self.updated_at = Some(ts);
        self
    }

    pub fn deleted_at(mut self, ts: DateTime<Utc>) -> Self {
        self.deleted_at = Some(ts);
        self
    }

    /// Renders the fixture as the flat column/value row the source would
    /// produce for it.
    pub fn build(self) -> Row {
        let name = match self.name {
            Some(name) => Value::String(name),
            None => Value::Null,
        };

        Row::new(vec![
            ("_id".into(), Value::I32(self.id)),
            ("id".into(), Value::I32(self.id)),
            ("name".into(), name),
            ("amount".into(), Value::I32(1)),
            ("price".into(), Value::F64(1.1)),
            ("created_at".into(), Value::from(self.created_at)),
            ("updated_at".into(), Value::from(self.updated_at)),
            ("deleted_at".into(), Value::from(self.deleted_at)),
        ])
    }
}
