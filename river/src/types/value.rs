use chrono::{DateTime, SecondsFormat, Utc};

/// A single scalar column value produced by the row source.
///
/// Timestamps are always carried in UTC; the row source is responsible for
/// normalizing whatever zone the database reports.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F64(f64),
    String(String),
    TimeStampTz(DateTime<Utc>),
}

impl Value {
    /// Returns whether this value is the SQL null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the timestamp carried by this value, if it is one.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::TimeStampTz(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Renders this value as a document identifier.
    ///
    /// Identifiers in the destination are strings, so numeric keys are
    /// rendered in decimal. Null yields no identifier.
    pub fn as_id(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(b.to_string()),
            Value::I32(i) => Some(i.to_string()),
            Value::I64(i) => Some(i.to_string()),
            Value::F64(f) => Some(f.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::TimeStampTz(ts) => Some(ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    /// Converts this value into its JSON representation.
    ///
    /// Timestamps become RFC 3339 strings, which is the wire format the
    /// destination expects for date fields.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::I32(i) => serde_json::Value::from(i),
            Value::I64(i) => serde_json::Value::from(i),
            Value::F64(f) => serde_json::Value::from(f),
            Value::String(s) => serde_json::Value::String(s),
            Value::TimeStampTz(ts) => {
                serde_json::Value::String(ts.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::I32(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::I64(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::F64(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Value::TimeStampTz(ts)
    }
}

impl From<Option<DateTime<Utc>>> for Value {
    fn from(ts: Option<DateTime<Utc>>) -> Self {
        match ts {
            Some(ts) => Value::TimeStampTz(ts),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_render_as_rfc3339() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 6, 12, 30, 0).unwrap();
        assert_eq!(
            Value::TimeStampTz(ts).into_json(),
            serde_json::Value::String("2026-08-06T12:30:00.000Z".into())
        );
    }

    #[test]
    fn numeric_ids_render_in_decimal() {
        assert_eq!(Value::I32(42).as_id().as_deref(), Some("42"));
        assert_eq!(Value::Null.as_id(), None);
    }
}
