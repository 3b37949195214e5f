//! Replay discovery: which files to extract, which to skip.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// One replay queued for extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayJob {
    /// Path to the replay file.
    pub path: PathBuf,
    /// Replay identifier: the numeric filename prefix.
    pub replay_id: String,
}

/// Parse the replay identifier from a ladder-dump filename.
///
/// Filenames follow `<id>_<p1>_<p2>_<map>.SC2Replay` with a numeric id;
/// anything else is not a recognized dump and is skipped.
pub fn replay_id_of(file_name: &str) -> Option<String> {
    let digits: String = file_name.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() || !file_name[digits.len()..].starts_with('_') {
        return None;
    }
    Some(digits)
}

/// Scan `replays_dir` for unprocessed `.SC2Replay` files.
///
/// A replay whose id already has a directory under `output_dir` was
/// extracted by an earlier batch and is skipped. Jobs are sorted by id
/// so batch order is stable across runs.
pub fn discover_replays(replays_dir: &Path, output_dir: &Path) -> io::Result<Vec<ReplayJob>> {
    let mut jobs = Vec::new();
    for entry in std::fs::read_dir(replays_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("SC2Replay") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(replay_id) = replay_id_of(name) else {
            warn!(file = name, "no numeric replay id prefix, skipping");
            continue;
        };
        if output_dir.join(&replay_id).is_dir() {
            debug!(replay_id, "already extracted, skipping");
            continue;
        }
        jobs.push(ReplayJob { path, replay_id });
    }
    jobs.sort_by(|a, b| a.replay_id.cmp(&b.replay_id));
    Ok(jobs)
}
