//! Dual-runner scheduling: two perspectives as isolated units of work.

use std::path::Path;
use std::thread;

use crossbeam_channel::bounded;
use tracing::debug;

use fogline_core::{
    DriverError, ExtractError, ExtractionConfig, Perspective, PerspectiveLog, ReplayDriver,
};
use fogline_extract::PerspectiveRunner;

/// Run both perspectives of one replay.
///
/// The runs share no mutable state, so `parallel` is purely a
/// throughput choice: one scoped thread per perspective (each driving
/// its own engine session) versus back-to-back execution. Output is
/// identical either way for a deterministic replay.
///
/// Returns both logs, or the first perspective's failure (player 1
/// checked first when both fail). On failure the partial logs of both
/// runs are dropped.
pub fn run_perspectives<D: ReplayDriver + Sync>(
    driver: &D,
    replay: &Path,
    config: &ExtractionConfig,
    parallel: bool,
) -> Result<(PerspectiveLog, PerspectiveLog), ExtractError> {
    if parallel {
        run_parallel(driver, replay, config)
    } else {
        let p1 = open_and_run(driver, replay, Perspective::P1, config)?;
        let p2 = open_and_run(driver, replay, Perspective::P2, config)?;
        Ok((p1, p2))
    }
}

fn open_and_run<D: ReplayDriver>(
    driver: &D,
    replay: &Path,
    perspective: Perspective,
    config: &ExtractionConfig,
) -> Result<PerspectiveLog, ExtractError> {
    debug!(%perspective, replay = %replay.display(), "starting perspective run");
    let session = driver
        .open(replay, perspective, config.window())
        .map_err(|source| ExtractError::Open {
            perspective,
            source,
        })?;
    PerspectiveRunner::new(*config).run(perspective, session)
}

fn run_parallel<D: ReplayDriver + Sync>(
    driver: &D,
    replay: &Path,
    config: &ExtractionConfig,
) -> Result<(PerspectiveLog, PerspectiveLog), ExtractError> {
    type Outcome = Result<PerspectiveLog, ExtractError>;

    let (tx, rx) = bounded::<(Perspective, Outcome)>(2);
    thread::scope(|scope| {
        for perspective in Perspective::BOTH {
            let tx = tx.clone();
            scope.spawn(move || {
                let outcome = open_and_run(driver, replay, perspective, config);
                let _ = tx.send((perspective, outcome));
            });
        }
    });
    drop(tx);

    let mut p1 = None;
    let mut p2 = None;
    for (perspective, outcome) in rx.try_iter() {
        match perspective {
            Perspective::P1 => p1 = Some(outcome),
            Perspective::P2 => p2 = Some(outcome),
        }
    }

    let p1 = p1.unwrap_or_else(|| Err(lost_runner(Perspective::P1)))?;
    let p2 = p2.unwrap_or_else(|| Err(lost_runner(Perspective::P2)))?;
    Ok((p1, p2))
}

/// A runner thread ended without reporting. Scoped threads re-raise
/// panics after the scope, so this only surfaces mid-unwind.
fn lost_runner(perspective: Perspective) -> ExtractError {
    ExtractError::Open {
        perspective,
        source: DriverError::Protocol {
            reason: "runner terminated without reporting a result".into(),
        },
    }
}
