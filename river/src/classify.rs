//! Row operation classification.
//!
//! Window filtering happens in the source query predicate; the classifier
//! only discriminates among rows the query already selected, attaching the
//! operation kind and the control timestamp each row is dispatched with.

use chrono::{DateTime, Utc};

use river_config::shared::ColumnRoles;

use crate::types::{OpKind, Row};
use crate::window::FetchWindow;

/// The outcome of classifying one fetched row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Operation the row's document is dispatched with.
    pub op: OpKind,
    /// Control timestamp of the row, when one of the role columns holds one.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Classifies fetched rows as create, update, or delete using the configured
/// timestamp role columns.
#[derive(Debug, Clone)]
pub struct RowClassifier {
    roles: ColumnRoles,
}

impl RowClassifier {
    pub fn new(roles: ColumnRoles) -> Self {
        Self { roles }
    }

    /// Determines the operation kind and control timestamp for `row`.
    ///
    /// A non-null deleted-at timestamp inside the window wins over everything
    /// else. A created-at timestamp inside the window makes the row a create,
    /// dispatched insert-only. Any other selected row is an update and is
    /// dispatched as an upsert, since the destination document may already
    /// exist from a prior create: a row re-selected through the overlap region
    /// simply overwrites the same document again.
    pub fn classify(&self, row: &Row, window: &FetchWindow) -> Classification {
        if let Some(deleted_at) = self.role_timestamp(row, self.roles.deleted_at.as_deref()) {
            if window.contains(deleted_at) {
                return Classification {
                    op: OpKind::Delete,
                    timestamp: Some(deleted_at),
                };
            }
        }

        let created_at = self.role_timestamp(row, self.roles.created_at.as_deref());
        if let Some(created_at) = created_at {
            if window.contains(created_at) {
                return Classification {
                    op: OpKind::Create,
                    timestamp: Some(created_at),
                };
            }
        }

        let updated_at = self.role_timestamp(row, self.roles.updated_at.as_deref());
        Classification {
            op: OpKind::Index,
            timestamp: updated_at.or(created_at),
        }
    }

    fn role_timestamp(&self, row: &Row, column: Option<&str>) -> Option<DateTime<Utc>> {
        column.and_then(|column| row.timestamp(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::run::RunState;
    use crate::types::Value;
    use chrono::{Duration, TimeZone};

    fn roles() -> ColumnRoles {
        ColumnRoles {
            created_at: Some("created_at".into()),
            updated_at: Some("updated_at".into()),
            deleted_at: Some("deleted_at".into()),
        }
    }

    fn window() -> FetchWindow {
        let state = RunState::new(
            Utc.with_ymd_and_hms(2026, 8, 6, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 8, 6, 11, 0, 0).unwrap(),
        )
        .unwrap();
        FetchWindow::of(&state, Duration::zero()).unwrap()
    }

    fn in_window() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 10, 30, 0).unwrap()
    }

    fn out_of_window() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 9, 0, 0).unwrap()
    }

    fn row(
        created: Option<DateTime<Utc>>,
        updated: Option<DateTime<Utc>>,
        deleted: Option<DateTime<Utc>>,
    ) -> Row {
        Row::new(vec![
            ("_id".into(), Value::I32(1)),
            ("created_at".into(), Value::from(created)),
            ("updated_at".into(), Value::from(updated)),
            ("deleted_at".into(), Value::from(deleted)),
        ])
    }

    #[test]
    fn deleted_at_wins_over_other_roles() {
        let classifier = RowClassifier::new(roles());
        let classification = classifier.classify(
            &row(Some(in_window()), Some(in_window()), Some(in_window())),
            &window(),
        );
        assert_eq!(classification.op, OpKind::Delete);
        assert_eq!(classification.timestamp, Some(in_window()));
    }

    #[test]
    fn created_in_window_is_a_create() {
        let classifier = RowClassifier::new(roles());
        let classification =
            classifier.classify(&row(Some(in_window()), None, None), &window());
        assert_eq!(classification.op, OpKind::Create);
    }

    #[test]
    fn updated_row_is_an_upsert() {
        let classifier = RowClassifier::new(roles());
        let classification = classifier.classify(
            &row(Some(out_of_window()), Some(in_window()), None),
            &window(),
        );
        assert_eq!(classification.op, OpKind::Index);
        assert_eq!(classification.timestamp, Some(in_window()));
    }

    #[test]
    fn out_of_window_deleted_at_does_not_delete() {
        let classifier = RowClassifier::new(roles());
        let classification = classifier.classify(
            &row(Some(out_of_window()), Some(in_window()), Some(out_of_window())),
            &window(),
        );
        assert_eq!(classification.op, OpKind::Index);
    }

    #[test]
    fn unmapped_roles_fall_back_to_update() {
        let classifier = RowClassifier::new(ColumnRoles::default());
        let classification =
            classifier.classify(&row(Some(in_window()), None, Some(in_window())), &window());
        assert_eq!(classification.op, OpKind::Index);
        assert_eq!(classification.timestamp, None);
    }
}
