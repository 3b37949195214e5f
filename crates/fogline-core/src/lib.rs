//! Core types and traits for the Fogline replay extraction pipeline.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Fogline workspace:
//! type IDs, observation records, the replay-driver seam, error types,
//! and the extraction configuration.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod error;
pub mod id;
pub mod metadata;
pub mod record;

pub use config::{ExtractionConfig, TimeWindow};
pub use driver::{
    GameEvent, PlayerResources, ReplayDriver, ReplaySession, Step, StepEvents, UnitState,
    UpgradeEvent,
};
pub use error::{ConfigError, ConsolidateError, DriverError, ExtractError};
pub use id::{Perspective, UnitTag};
pub use metadata::{GameResult, PlayerMetadata, Race, ReplayMetadata};
pub use record::{
    DeathEvent, PerspectiveLog, ResourceSnapshot, UnitObservation, UpgradeCompletion,
};

/// Engine simulation steps per in-game second.
///
/// Used to convert research durations (reported in engine ticks) into
/// seconds when imputing upgrade start times.
pub const GAME_STEPS_PER_SECOND: f64 = 22.4;
