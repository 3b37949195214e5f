//! One replay through the full pipeline: run both perspectives,
//! consolidate, normalize, persist.

use std::path::Path;

use tracing::warn;

use fogline_core::ReplayDriver;
use fogline_merge::consolidate;
use fogline_schema::persist_replay;

use crate::batch::BatchConfig;
use crate::discover::ReplayJob;
use crate::error::ReplayFailure;
use crate::schedule::run_perspectives;

/// Row counts for one successfully extracted replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// The replay's identifier.
    pub replay_id: String,
    /// Consolidated unit rows written.
    pub unit_rows: usize,
    /// Consolidated death rows written (0 when the artifact is omitted).
    pub death_rows: usize,
    /// Joined resource rows written.
    pub resource_rows: usize,
    /// Upgrade rows written (0 when the artifact is omitted).
    pub upgrade_rows: usize,
}

/// Extract one replay end to end.
///
/// On any failure the caller purges the replay's output directory; no
/// partial output is ever left on disk.
pub fn extract_replay<D: ReplayDriver + Sync>(
    driver: &D,
    job: &ReplayJob,
    config: &BatchConfig,
) -> Result<ReplayOutcome, ReplayFailure> {
    let metadata = driver
        .metadata(&job.path)
        .map_err(ReplayFailure::Metadata)?;

    let (p1, p2) = run_perspectives(driver, &job.path, &config.extraction, config.parallel)?;
    let consolidated = consolidate(&p1, &p2)?;

    let dir = config.output_dir.join(&job.replay_id);
    persist_replay(&dir, &consolidated, &metadata)?;

    Ok(ReplayOutcome {
        replay_id: job.replay_id.clone(),
        unit_rows: consolidated.units.len(),
        death_rows: consolidated.deaths.as_ref().map_or(0, Vec::len),
        resource_rows: consolidated.resources.len(),
        upgrade_rows: consolidated.upgrades.as_ref().map_or(0, Vec::len),
    })
}

/// Best-effort removal of a failed replay's output directory.
///
/// A cleanup failure is logged, never re-raised — the batch must keep
/// moving.
pub(crate) fn purge_output_dir(dir: &Path) {
    if !dir.exists() {
        return;
    }
    if let Err(e) = std::fs::remove_dir_all(dir) {
        warn!(dir = %dir.display(), error = %e, "failed to purge output directory");
    }
}
