//! Fogline: dual-perspective replay extraction into ground-truth
//! columnar datasets.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Fogline sub-crates. For most users, adding `fogline` as a
//! single dependency is sufficient.
//!
//! # Pipeline
//!
//! Two fog-of-war-limited observation streams — one per player, each
//! gathered by driving a separate playback session — are merged into a
//! single consistent per-unit, per-tick timeline:
//!
//! 1. A [`batch::run_batch`] loop discovers unprocessed replays.
//! 2. Each replay runs twice through an
//!    [`extract::PerspectiveRunner`], once per [`types::Perspective`],
//!    producing four observation logs per run.
//! 3. [`merge::consolidate()`] OR-merges visibility, forces own-player
//!    visibility, joins resource curves, and derives ownership flags.
//! 4. `schema::persist_replay` narrows every column into a compact
//!    typed layout and writes the parquet artifacts plus the metadata
//!    sidecar.
//!
//! The playback engine itself sits behind the [`types::ReplayDriver`]
//! seam; tests drive the whole pipeline with the scripted driver from
//! `fogline-test-utils`.
//!
//! # Quick start
//!
//! ```no_run
//! use fogline::prelude::*;
//!
//! fn extract_all<D: ReplayDriver + Sync>(driver: &D) {
//!     let mut config = BatchConfig::new("Replays", "Output");
//!     config.extraction = ExtractionConfig {
//!         start_time: 0.0,
//!         end_time: 7200.0,
//!         interval: 20,
//!     };
//!     let summary = run_batch(driver, &config).expect("batch runs");
//!     println!("processed {} replays", summary.processed);
//! }
//! # let _ = extract_all::<fogline_test_utils::ScriptedDriver>;
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `fogline-core` | IDs, records, driver seam, errors, config |
//! | [`extract`] | `fogline-extract` | Observation cache, death log, samplers, runner |
//! | [`merge`] | `fogline-merge` | Dual-perspective consolidation |
//! | [`schema`] | `fogline-schema` | Checked narrowing casts and parquet artifacts |
//! | [`batch`] | `fogline-batch` | Batch loop, scheduling, STOP sentinel |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, records, the driver seam, and errors (`fogline-core`).
pub use fogline_core as types;

/// Per-perspective extraction: cache, death log, samplers, runner
/// (`fogline-extract`).
pub use fogline_extract as extract;

/// Dual-perspective consolidation into ground-truth rows
/// (`fogline-merge`).
pub use fogline_merge as merge;

/// Schema normalization and columnar persistence (`fogline-schema`).
pub use fogline_schema as schema;

/// Batch extraction loop and runner scheduling (`fogline-batch`).
pub use fogline_batch as batch;

/// Common imports for typical Fogline usage.
///
/// ```rust
/// use fogline::prelude::*;
/// ```
pub mod prelude {
    // Core types and the driver seam
    pub use fogline_core::{
        ExtractionConfig, GameEvent, Perspective, PerspectiveLog, PlayerResources, ReplayDriver,
        ReplayMetadata, ReplaySession, Step, TimeWindow, UnitState, UnitTag,
    };

    // Errors
    pub use fogline_core::{ConfigError, ConsolidateError, DriverError, ExtractError};

    // Extraction
    pub use fogline_extract::{ObservationCache, PerspectiveRunner};

    // Consolidation
    pub use fogline_merge::{consolidate, ConsolidatedReplay, GroundTruthUnitRow};

    // Persistence
    pub use fogline_schema::{persist_replay, SchemaError};

    // Batch
    pub use fogline_batch::{run_batch, BatchConfig, BatchSummary, ReplayFailure};
}
