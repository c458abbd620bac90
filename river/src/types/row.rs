use chrono::{DateTime, Utc};

use crate::types::Value;

/// A complete row of data from the source, as an ordered sequence of
/// (column name, value) pairs.
///
/// Order matters: the assembler consumes the pairs in the order the query
/// produced them, so nested paths sharing a prefix arrive contiguously.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Column name/value pairs in result-set order.
    pub columns: Vec<(String, Value)>,
}

impl Row {
    /// Creates a new row from the given column pairs.
    pub fn new(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    /// Returns the value of the first column with the given name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// Returns the non-null timestamp held by the named column, if any.
    pub fn timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        self.get(name).and_then(Value::as_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn get_returns_first_match() {
        let row = Row::new(vec![
            ("name".into(), Value::String("a".into())),
            ("name".into(), Value::String("b".into())),
        ]);
        assert_eq!(row.get("name"), Some(&Value::String("a".into())));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn timestamp_ignores_non_timestamp_values() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let row = Row::new(vec![
            ("created_at".into(), Value::TimeStampTz(ts)),
            ("name".into(), Value::String("a".into())),
        ]);
        assert_eq!(row.timestamp("created_at"), Some(ts));
        assert_eq!(row.timestamp("name"), None);
    }
}
