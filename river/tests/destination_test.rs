mod common;

use chrono::{Datelike, Utc};

use river::config::{DestinationConfig, FeedConfig};
use river::pipeline::Pipeline;
use river::sink::memory::MemoryMouth;
use river::sink::{DestinationName, Mouth};
use river::source::memory::MemoryRowSource;
use river::test_utils::rows::ProductRow;
use river::types::{Document, OpKind};
use river_telemetry::init_test_tracing;

use common::{last_run_time, ok_timestamp, product_roles, random_id, seeded_state};

#[tokio::test(flavor = "multi_thread")]
async fn documents_land_in_their_daily_partition() {
    init_test_tracing();
    let last_run = last_run_time();
    let created_at = ok_timestamp(last_run);

    let config = FeedConfig {
        columns: product_roles(),
        overlap_ms: 0,
        destination: DestinationConfig::TimeWindowed {
            pattern: "'test-'YYYY.MM.dd".into(),
        },
    };

    let source = MemoryRowSource::new(product_roles());
    let id = random_id();
    source
        .add_row(
            ProductRow::new(id)
                .name("windowed")
                .created_at(created_at)
                .build(),
        )
        .await;

    let state = seeded_state(last_run).await;
    let mouth = MemoryMouth::new(DestinationName::from_config(&config.destination).unwrap());
    let mut pipeline = Pipeline::new(config, source, state, mouth.clone()).unwrap();

    let report = pipeline.run().await.unwrap();
    assert_eq!(report.documents_dispatched, 1);

    // The partition comes from the document's own control timestamp.
    let expected = format!(
        "test-{:04}.{:02}.{:02}",
        created_at.year(),
        created_at.month(),
        created_at.day()
    );
    assert_eq!(mouth.last_destination().await.as_deref(), Some(expected.as_str()));
    assert!(mouth.get(&expected, &id.to_string()).await.is_some());

    // Resolution is stable: re-running lands in the same partition.
    let resolver = DestinationName::from_config(&DestinationConfig::TimeWindowed {
        pattern: "'test-'YYYY.MM.dd".into(),
    })
    .unwrap();
    assert_eq!(resolver.resolve(created_at), expected);
    assert_eq!(resolver.resolve(created_at), resolver.resolve(created_at));
}

#[tokio::test(flavor = "multi_thread")]
async fn documents_without_timestamps_use_wall_clock() {
    init_test_tracing();

    let mouth = MemoryMouth::new(
        DestinationName::from_config(&DestinationConfig::TimeWindowed {
            pattern: "'test-'YYYY.MM.dd".into(),
        })
        .unwrap(),
    );

    let mut doc = Document::new(OpKind::Index);
    doc.id = Some("1".into());
    doc.fields.insert("name".into(), serde_json::json!("x"));
    let before = Utc::now();
    mouth.index(doc, false).await.unwrap();
    let after = Utc::now();

    // Unless the test straddles midnight, both bounds format identically.
    let destination = mouth.last_destination().await.unwrap();
    let lower = format!("test-{:04}.{:02}.{:02}", before.year(), before.month(), before.day());
    let upper = format!("test-{:04}.{:02}.{:02}", after.year(), after.month(), after.day());
    assert!(destination == lower || destination == upper);
}
