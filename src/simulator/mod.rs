//! Replay of a static dataset as a paced sequence of batch uploads.
//!
//! One batch is fully serialized and committed before the next begins; the
//! inter-batch pause runs after every batch, including the last, so a run's
//! duration is `attempted × delay` plus upload latency.

pub mod naming;
pub mod pacing;

use std::sync::Arc;
use std::time::Duration;

use arrow::array::RecordBatch;
use arrow::json::WriterBuilder;
use arrow::json::writer::JsonArray;
use bytes::Bytes;
use chrono::Local;

use crate::dataset::{Dataset, plan_batches};
use crate::error::{FeedError, Result};
use crate::stores::LakeStore;

pub use naming::ArtifactNamer;
pub use pacing::{FixedDelay, Pacer};

/// Immutable settings for one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub batch_size: usize,
    pub row_limit: usize,
    pub delay: Duration,
    pub prefix: String,
}

/// Outcome counts for a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub attempted: usize,
    pub uploaded: usize,
}

pub struct Simulator<'a> {
    store: &'a dyn LakeStore,
    config: SimulationConfig,
    pacer: Arc<dyn Pacer>,
}

impl<'a> Simulator<'a> {
    pub fn new(store: &'a dyn LakeStore, config: SimulationConfig) -> Self {
        let pacer = Arc::new(FixedDelay(config.delay));
        Self {
            store,
            config,
            pacer,
        }
    }

    /// Replace the wall-clock pacer. The test suites use this to run at full
    /// speed while still observing the pause cadence.
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Upload every batch in `[0, row_limit)` in order.
    ///
    /// A failed upload is reported and skipped; the feed keeps going. Only
    /// serialization failures abort the run.
    pub async fn run(&self, dataset: &Dataset) -> Result<RunReport> {
        let ranges = plan_batches(
            dataset.num_rows(),
            self.config.row_limit,
            self.config.batch_size,
        );
        let mut namer = ArtifactNamer::new(self.config.prefix.as_str());
        let mut uploaded = 0;

        for range in &ranges {
            let batch = dataset.slice(range);
            let payload = serialize_batch(&batch)?;
            let name = namer.next(Local::now());

            match self.upload(&name, payload).await {
                Ok(()) => {
                    println!("uploaded {name} ({} rows)", range.len());
                    uploaded += 1;
                }
                Err(e) => eprintln!("{e}; batch skipped"),
            }

            self.pacer.pause().await;
        }

        Ok(RunReport {
            attempted: ranges.len(),
            uploaded,
        })
    }

    async fn upload(&self, name: &str, payload: Bytes) -> Result<()> {
        let mut file = self
            .store
            .create(name)
            .await
            .map_err(|source| upload_error(name, source))?;
        file.write(payload)
            .await
            .map_err(|source| upload_error(name, source))?;
        file.commit()
            .await
            .map_err(|source| upload_error(name, source))?;
        Ok(())
    }
}

fn upload_error(name: &str, source: object_store::Error) -> FeedError {
    FeedError::Upload {
        name: name.to_string(),
        source,
    }
}

/// Serialize a batch to a JSON array of row-objects, one object per row with
/// keys in column order and explicit nulls for empty cells.
fn serialize_batch(batch: &RecordBatch) -> Result<Bytes> {
    let mut writer = WriterBuilder::new()
        .with_explicit_nulls(true)
        .build::<_, JsonArray>(Vec::new());
    writer
        .write(batch)
        .map_err(|source| FeedError::Serialize { source })?;
    writer
        .finish()
        .map_err(|source| FeedError::Serialize { source })?;
    Ok(writer.into_inner().into())
}
