//! Dual-perspective consolidation for Fogline.
//!
//! [`consolidate()`] is the algorithmic heart of the pipeline: a pure,
//! single-threaded function of two completed [`PerspectiveLog`]s that
//! merges them into one consistent per-unit, per-tick timeline with
//! visibility annotations, plus joined resource curves and concatenated
//! upgrade logs.
//!
//! # Merge model
//!
//! - Unit and death rows are grouped by the composite key
//!   `(timestamp, unit_tag)`; visibility flags OR across the group while
//!   every other column takes the first-encountered representative
//!   (player 1's side, by stable concatenation order).
//! - Each player's own units are forced visible to that player — raw
//!   fog-of-war bookkeeping misreports self-owned units as
//!   sometimes-invisible. Neutral units are never forced.
//! - Resource curves outer-join on timestamp with supply doubled to
//!   integerize half-supply, forward-filling join gaps. Backward-fill is
//!   never applied; a gap at the first row is a fatal invariant
//!   violation.
//!
//! [`PerspectiveLog`]: fogline_core::PerspectiveLog

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod consolidate;
pub mod deaths;
pub mod resources;
pub mod rows;
pub mod units;

pub use consolidate::{consolidate, ConsolidatedReplay};
pub use deaths::merge_deaths;
pub use resources::merge_resources;
pub use rows::{GroundTruthUnitRow, MergedDeathRow, PlayerEconomy, ResourceRow};
pub use units::merge_units;
