use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Assignment of source columns to the timestamp roles driving change detection.
///
/// Each role holds at most one column name. Leaving a role unset disables the
/// corresponding classification branch: without `deleted_at` no row is ever
/// classified as a delete, and without `created_at` every in-window row is
/// treated as an update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ColumnRoles {
    /// Column holding the row creation timestamp.
    pub created_at: Option<String>,
    /// Column holding the last-update timestamp.
    pub updated_at: Option<String>,
    /// Column holding the soft-delete timestamp.
    pub deleted_at: Option<String>,
}

impl ColumnRoles {
    /// Validates the [`ColumnRoles`].
    ///
    /// Returns [`ValidationError::DuplicateColumnRole`] if the same column name
    /// is assigned to more than one role.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen: Vec<&str> = Vec::with_capacity(3);
        for column in [&self.created_at, &self.updated_at, &self.deleted_at]
            .into_iter()
            .flatten()
        {
            if seen.contains(&column.as_str()) {
                return Err(ValidationError::DuplicateColumnRole(column.clone()));
            }
            seen.push(column);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_with_distinct_columns_validate() {
        let roles = ColumnRoles {
            created_at: Some("created_at".into()),
            updated_at: Some("updated_at".into()),
            deleted_at: Some("deleted_at".into()),
        };
        assert!(roles.validate().is_ok());
    }

    #[test]
    fn duplicate_column_is_rejected() {
        let roles = ColumnRoles {
            created_at: Some("stamp".into()),
            updated_at: Some("stamp".into()),
            deleted_at: None,
        };
        assert!(matches!(
            roles.validate(),
            Err(ValidationError::DuplicateColumnRole(c)) if c == "stamp"
        ));
    }

    #[test]
    fn empty_roles_validate() {
        assert!(ColumnRoles::default().validate().is_ok());
    }
}
