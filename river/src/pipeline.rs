//! Feed pipeline orchestration.
//!
//! Contains the [`Pipeline`] struct that executes one full replication cycle:
//! compute the change window, stream the selected rows, classify and assemble
//! each one, dispatch the documents to the mouth, and commit the run boundary
//! once everything has been acknowledged.

use chrono::{DateTime, Duration, Utc};
use futures::StreamExt;
use tracing::{debug, info};

use river_config::shared::FeedConfig;

use crate::assembler::DocumentAssembler;
use crate::bail;
use crate::classify::RowClassifier;
use crate::error::{ErrorKind, RiverError, RiverResult};
use crate::sink::{dispatch, Mouth};
use crate::source::RowSource;
use crate::state::run::RunState;
use crate::state::store::{StateStore, CURRENT_RUN_STARTED_TIME, LAST_RUN_TIME};
use crate::window::FetchWindow;

/// Summary of one completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// The window the run covered.
    pub window: FetchWindow,
    /// Number of documents handed to the mouth.
    pub documents_dispatched: u64,
}

/// A feed pipeline connecting one row source to one mouth.
///
/// A pipeline owns its run state handling: the boundary of the previous
/// successful run is read from the state store at cycle start and advanced
/// only after the cycle fully succeeds, so a failed run is re-covered by the
/// next one. Runs for the same pipeline cannot overlap because [`Pipeline::run`]
/// takes the pipeline exclusively; the external scheduler decides when runs
/// happen. Independent pipelines share nothing and may run concurrently.
#[derive(Debug)]
pub struct Pipeline<Src, St, M> {
    config: FeedConfig,
    classifier: RowClassifier,
    source: Src,
    state: St,
    mouth: M,
}

impl<Src, St, M> Pipeline<Src, St, M>
where
    Src: RowSource + Send + Sync,
    St: StateStore + Send + Sync,
    M: Mouth + Send + Sync,
{
    /// Creates a pipeline from a validated configuration and its collaborators.
    pub fn new(config: FeedConfig, source: Src, state: St, mouth: M) -> RiverResult<Self> {
        config.validate()?;

        let classifier = RowClassifier::new(config.columns.clone());

        Ok(Self {
            config,
            classifier,
            source,
            state,
            mouth,
        })
    }

    /// Executes one full fetch cycle.
    ///
    /// "Now" is captured once, before the source query executes, and stored
    /// as the current run start; rows committed while the query runs are
    /// covered by the next window. The run boundary is committed only after
    /// the row stream is exhausted, every document has been acknowledged, and
    /// the mouth has flushed. Any failure leaves `last_run_time` untouched.
    pub async fn run(&mut self) -> RiverResult<RunReport> {
        let last_run_time = self
            .state
            .get(LAST_RUN_TIME)
            .await?
            // First run: cover all existing history.
            .unwrap_or(DateTime::UNIX_EPOCH);

        let current_run_started_time = Utc::now();
        self.state
            .put(CURRENT_RUN_STARTED_TIME, current_run_started_time)
            .await?;

        let run_state = RunState::new(last_run_time, current_run_started_time)?;
        let window = FetchWindow::of(&run_state, self.overlap()?)?;
        info!(
            "starting run with window [{}, {})",
            window.lower(),
            window.upper()
        );

        let mut rows = self.source.fetch(&window).await?;
        let mut assembler = DocumentAssembler::new();
        let mut documents_dispatched = 0u64;

        while let Some(row) = rows.next().await {
            let row = row?;

            let classification = self.classifier.classify(&row, &window);
            assembler.begin(classification.op);
            for (column, value) in row.columns {
                assembler.push(&column, value)?;
            }
            let Some(mut document) = assembler.end()? else {
                continue;
            };
            if let Some(ts) = classification.timestamp {
                document.timestamp = Some(ts);
            }

            debug!(
                "dispatching {} for document {:?}",
                document.op, document.id
            );
            dispatch(&self.mouth, document).await?;
            documents_dispatched += 1;
        }

        self.mouth.flush().await?;

        // Everything is acknowledged; the next run starts where this one did.
        self.state
            .put(LAST_RUN_TIME, current_run_started_time)
            .await?;
        info!("run complete, {documents_dispatched} documents dispatched");

        Ok(RunReport {
            window,
            documents_dispatched,
        })
    }

    fn overlap(&self) -> RiverResult<Duration> {
        let Ok(overlap_ms) = i64::try_from(self.config.overlap_ms) else {
            bail!(
                ErrorKind::ConfigError,
                "The overlap duration is too large",
                format!("overlap_ms={}", self.config.overlap_ms)
            );
        };

        Ok(Duration::milliseconds(overlap_ms))
    }
}
