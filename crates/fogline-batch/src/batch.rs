//! The batch loop: iterate discovered replays, contain failures, honor
//! the STOP sentinel.

use std::path::PathBuf;

use tracing::{error, info, warn};

use fogline_core::{ConfigError, ExtractionConfig, ReplayDriver};

use crate::discover::discover_replays;
use crate::error::BatchError;
use crate::pipeline::{extract_replay, purge_output_dir};

/// Configuration for one batch run.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Directory scanned for `.SC2Replay` files.
    pub replays_dir: PathBuf,
    /// Root directory receiving one artifact directory per replay.
    pub output_dir: PathBuf,
    /// Window and cadence passed to every perspective run.
    pub extraction: ExtractionConfig,
    /// Run the two perspectives on separate threads.
    pub parallel: bool,
    /// Sentinel file polled between replays; its presence halts the
    /// batch (and the file is consumed).
    pub stop_sentinel: PathBuf,
}

impl BatchConfig {
    /// A configuration with default window, parallel runners, and the
    /// sentinel at `STOP` in the working directory.
    pub fn new(replays_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            replays_dir: replays_dir.into(),
            output_dir: output_dir.into(),
            extraction: ExtractionConfig::default(),
            parallel: true,
            stop_sentinel: PathBuf::from("STOP"),
        }
    }

    /// Validate the embedded extraction configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extraction.validate()
    }
}

/// What a batch run did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Replays discovered as unprocessed.
    pub discovered: usize,
    /// Replays extracted successfully.
    pub processed: usize,
    /// Replays that failed and were purged.
    pub failed: usize,
    /// Whether the STOP sentinel halted the batch early.
    pub halted: bool,
}

/// Run the batch: discover, extract, contain, continue.
///
/// Per-replay failures are logged and counted; only configuration and
/// discovery errors abort the batch itself.
pub fn run_batch<D: ReplayDriver + Sync>(
    driver: &D,
    config: &BatchConfig,
) -> Result<BatchSummary, BatchError> {
    config.validate()?;
    std::fs::create_dir_all(&config.output_dir)?;

    let jobs = discover_replays(&config.replays_dir, &config.output_dir)?;
    let mut summary = BatchSummary {
        discovered: jobs.len(),
        ..Default::default()
    };
    info!(count = jobs.len(), "replays to process");

    for (index, job) in jobs.iter().enumerate() {
        if config.stop_sentinel.exists() {
            info!("STOP sentinel detected, halting batch");
            if let Err(e) = std::fs::remove_file(&config.stop_sentinel) {
                warn!(error = %e, "failed to consume STOP sentinel");
            }
            summary.halted = true;
            break;
        }

        info!(
            replay_id = %job.replay_id,
            nth = index + 1,
            of = jobs.len(),
            "processing replay"
        );
        match extract_replay(driver, job, config) {
            Ok(outcome) => {
                info!(
                    replay_id = %outcome.replay_id,
                    unit_rows = outcome.unit_rows,
                    resource_rows = outcome.resource_rows,
                    "replay extracted"
                );
                summary.processed += 1;
            }
            Err(e) => {
                error!(replay_id = %job.replay_id, error = %e, "replay failed");
                purge_output_dir(&config.output_dir.join(&job.replay_id));
                summary.failed += 1;
            }
        }
    }

    info!(
        processed = summary.processed,
        failed = summary.failed,
        halted = summary.halted,
        "batch complete"
    );
    Ok(summary)
}
