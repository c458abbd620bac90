use std::sync::Arc;

use futures::stream::{self, BoxStream};
use futures::StreamExt;
use tokio::sync::Mutex;
use tracing::debug;

use river_config::shared::ColumnRoles;

use crate::error::RiverResult;
use crate::source::RowSource;
use crate::types::Row;
use crate::window::FetchWindow;

/// In-memory [`RowSource`] for tests and examples.
///
/// Applies the same window predicate the production SQL template would: a row
/// is selected when any mapped role column holds a non-null timestamp inside
/// the window. With no roles mapped there is no predicate and every row is
/// selected.
#[derive(Debug, Clone)]
pub struct MemoryRowSource {
    roles: ColumnRoles,
    rows: Arc<Mutex<Vec<Row>>>,
}

impl MemoryRowSource {
    pub fn new(roles: ColumnRoles) -> Self {
        Self {
            roles,
            rows: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a row to the backing table.
    pub async fn add_row(&self, row: Row) {
        let mut rows = self.rows.lock().await;
        rows.push(row);
    }

    /// Adds several rows to the backing table.
    pub async fn add_rows(&self, new_rows: impl IntoIterator<Item = Row>) {
        let mut rows = self.rows.lock().await;
        rows.extend(new_rows);
    }

    fn selects(&self, row: &Row, window: &FetchWindow) -> bool {
        let mapped: Vec<&str> = [
            self.roles.created_at.as_deref(),
            self.roles.updated_at.as_deref(),
            self.roles.deleted_at.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if mapped.is_empty() {
            return true;
        }

        mapped.into_iter().any(|column| {
            row.timestamp(column)
                .is_some_and(|ts| window.contains(ts))
        })
    }
}

impl RowSource for MemoryRowSource {
    async fn fetch(&self, window: &FetchWindow) -> RiverResult<BoxStream<'static, RiverResult<Row>>> {
        let rows = self.rows.lock().await;
        let selected: Vec<RiverResult<Row>> = rows
            .iter()
            .filter(|row| self.selects(row, window))
            .cloned()
            .map(Ok)
            .collect();
        debug!(
            "selected {} of {} rows for window [{}, {})",
            selected.len(),
            rows.len(),
            window.lower(),
            window.upper()
        );

        Ok(stream::iter(selected).boxed())
    }
}
