use chrono::{DateTime, Duration, Utc};

use river::config::{ColumnRoles, DestinationConfig, FeedConfig};
use river::state::store::memory::MemoryStateStore;
use river::state::store::{StateStore, LAST_RUN_TIME};

/// Role mapping matching the product fixture rows from
/// [`river::test_utils::rows::ProductRow`].
pub fn product_roles() -> ColumnRoles {
    ColumnRoles {
        created_at: Some("created_at".into()),
        updated_at: Some("updated_at".into()),
        deleted_at: Some("deleted_at".into()),
    }
}

/// Feed configuration over the product fixture with a static destination.
pub fn product_feed_config(overlap_ms: u64) -> FeedConfig {
    FeedConfig {
        columns: product_roles(),
        overlap_ms,
        destination: DestinationConfig::Static {
            name: "products".into(),
        },
    }
}

/// The previous run boundary used by the window scenarios: one hour ago.
pub fn last_run_time() -> DateTime<Utc> {
    Utc::now() - Duration::hours(1)
}

/// A timestamp inside the current window.
pub fn ok_timestamp(last_run: DateTime<Utc>) -> DateTime<Utc> {
    last_run + Duration::minutes(2)
}

/// A timestamp before the current window (and outside small overlaps).
pub fn old_timestamp(last_run: DateTime<Utc>) -> DateTime<Utc> {
    last_run - Duration::minutes(2)
}

/// A timestamp just before the previous run boundary, inside the overlap
/// region of the next run.
pub fn overlap_timestamp(last_run: DateTime<Utc>) -> DateTime<Utc> {
    last_run - Duration::seconds(1)
}

/// A state store seeded with the given previous run boundary.
pub async fn seeded_state(last_run: DateTime<Utc>) -> MemoryStateStore {
    let state = MemoryStateStore::new();
    state.put(LAST_RUN_TIME, last_run).await.unwrap();
    state
}

/// Random fixture identifier, mirroring how production rows carry arbitrary
/// keys rather than small sequential ones.
pub fn random_id() -> i32 {
    rand::random::<u16>() as i32
}
