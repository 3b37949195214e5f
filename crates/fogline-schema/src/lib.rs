//! Schema normalization and columnar persistence for Fogline.
//!
//! Maps the wide in-memory merge output onto a compact fixed-width typed
//! schema and writes one directory of parquet artifacts per replay:
//! `units.parquet`, `resources.parquet`, optional `deaths.parquet` and
//! `upgrades.parquet`, plus a `<replay_id>_info.json` metadata sidecar.
//!
//! Every narrowing cast is checked: a value outside the target type's
//! range aborts the replay's processing with a [`CastError`] naming the
//! column — a correctness backstop against upstream engine anomalies,
//! never a silent truncation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cast;
pub mod error;
pub mod frames;
pub mod sidecar;

pub use error::{CastError, SchemaError};
pub use frames::{
    deaths_batch, persist_replay, resources_batch, units_batch, upgrades_batch, write_batch,
};
pub use sidecar::write_metadata_sidecar;
