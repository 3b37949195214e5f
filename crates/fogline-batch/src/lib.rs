//! Batch extraction for Fogline.
//!
//! Walks a directory of replay files, runs both perspectives of each
//! replay through the extraction pipeline, consolidates, and persists
//! one artifact directory per replay. Per-replay failures are contained
//! at the loop boundary: the failed replay's partial output is purged
//! and the batch continues. A `STOP` sentinel file is polled between
//! replays as a cooperative-cancellation checkpoint — in-flight work is
//! never cancelled mid-replay.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod discover;
pub mod error;
pub mod pipeline;
pub mod schedule;

pub use batch::{run_batch, BatchConfig, BatchSummary};
pub use discover::{discover_replays, replay_id_of, ReplayJob};
pub use error::{BatchError, ReplayFailure};
pub use pipeline::{extract_replay, ReplayOutcome};
pub use schedule::run_perspectives;
