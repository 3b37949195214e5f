//! Error types for the extraction and consolidation pipeline.
//!
//! Organized by subsystem: driver (the external playback engine boundary),
//! extraction (one perspective's run), consolidation (the two-stream merge),
//! and configuration validation. Schema-normalization errors live in
//! `fogline-schema`, which owns the Arrow/Parquet dependency.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::id::Perspective;

// ── DriverError ─────────────────────────────────────────────────

/// Errors surfaced by the external replay-playback driver.
#[derive(Debug)]
pub enum DriverError {
    /// The engine reported the replay reached its natural end.
    ///
    /// This is an expected terminal condition, not a failure: the runner
    /// swallows it and finalizes whatever was observed so far.
    GameOver,
    /// The playback protocol failed (handshake, desync, engine crash).
    Protocol {
        /// Human-readable description from the driver.
        reason: String,
    },
    /// The replay file could not be found or opened.
    ReplayNotFound {
        /// Path that was requested.
        path: PathBuf,
    },
    /// An I/O error occurred while talking to the engine.
    Io(io::Error),
}

impl DriverError {
    /// Whether this error is the expected end-of-replay signal.
    pub fn is_game_over(&self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameOver => write!(f, "engine reported game over"),
            Self::Protocol { reason } => write!(f, "protocol error: {reason}"),
            Self::ReplayNotFound { path } => {
                write!(f, "replay not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl Error for DriverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DriverError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

// ── ExtractError ────────────────────────────────────────────────

/// A perspective run failed before completing its window.
///
/// Game-over is never wrapped here — the runner treats it as a normal
/// end. On this error the run's partial logs are discarded; the replay
/// is fatal-to-replay if either perspective fails.
#[derive(Debug)]
pub enum ExtractError {
    /// The playback session could not be opened.
    Open {
        /// Which perspective's session failed.
        perspective: Perspective,
        /// The underlying driver failure.
        source: DriverError,
    },
    /// The session failed mid-playback.
    Step {
        /// Which perspective's session failed.
        perspective: Perspective,
        /// Steps successfully consumed before the failure.
        steps_seen: u64,
        /// The underlying driver failure.
        source: DriverError,
    },
}

impl ExtractError {
    /// The perspective whose run failed.
    pub fn perspective(&self) -> Perspective {
        match self {
            Self::Open { perspective, .. } | Self::Step { perspective, .. } => *perspective,
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open {
                perspective,
                source,
            } => {
                write!(f, "failed to open {perspective} session: {source}")
            }
            Self::Step {
                perspective,
                steps_seen,
                source,
            } => {
                write!(
                    f,
                    "{perspective} run failed after {steps_seen} steps: {source}"
                )
            }
        }
    }
}

impl Error for ExtractError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Step { source, .. } => Some(source),
        }
    }
}

// ── ConsolidateError ────────────────────────────────────────────

/// Hard invariant violations detected while merging two perspectives.
///
/// All variants are fatal-to-replay: the replay's output directory must
/// be purged and the batch moves on.
#[derive(Debug, PartialEq)]
pub enum ConsolidateError {
    /// A completed run produced no unit observations.
    EmptyUnitLog {
        /// The perspective with the empty log.
        perspective: Perspective,
    },
    /// A completed run produced no resource snapshots.
    ///
    /// Resource sampling is full-density, so an empty log means the
    /// extraction itself was anomalous.
    EmptyResourceLog {
        /// The perspective with the empty log.
        perspective: Perspective,
    },
    /// The resource outer-join produced a leading gap.
    ///
    /// Forward-fill can never fill the first row; a perspective whose
    /// sampling starts after the other's first tick violates the
    /// same-window sampling invariant.
    LeadingResourceGap {
        /// The perspective with no sample at the first joined timestamp.
        perspective: Perspective,
        /// The first joined timestamp, in game seconds.
        timestamp: f64,
    },
}

impl fmt::Display for ConsolidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUnitLog { perspective } => {
                write!(f, "unit log for {perspective} is empty")
            }
            Self::EmptyResourceLog { perspective } => {
                write!(f, "resource log for {perspective} is empty")
            }
            Self::LeadingResourceGap {
                perspective,
                timestamp,
            } => {
                write!(
                    f,
                    "no {perspective} resource sample at or before first joined \
                     timestamp {timestamp}"
                )
            }
        }
    }
}

impl Error for ConsolidateError {}

// ── ConfigError ─────────────────────────────────────────────────

/// Errors detected during [`ExtractionConfig::validate()`](crate::config::ExtractionConfig::validate).
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Window bound is NaN or infinite.
    NonFiniteWindow {
        /// The offending value.
        value: f64,
    },
    /// Window start is negative or not before the end.
    InvalidWindow {
        /// Configured start, in seconds.
        start: f64,
        /// Configured end, in seconds.
        end: f64,
    },
    /// Cache flush interval is zero steps.
    ZeroInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteWindow { value } => {
                write!(f, "window bound is not finite: {value}")
            }
            Self::InvalidWindow { start, end } => {
                write!(f, "invalid window: start={start}, end={end}")
            }
            Self::ZeroInterval => write!(f, "flush interval must be at least 1 step"),
        }
    }
}

impl Error for ConfigError {}
