//! Per-perspective observation extraction for Fogline.
//!
//! One [`PerspectiveRunner`] drives one playback session across the
//! configured time window and accumulates four observation logs:
//!
//! - units — interval-sampled via the [`ObservationCache`] write-behind
//!   buffer
//! - deaths — terminal observations captured by the [`DeathLog`]
//! - resources — full-density economy snapshots ([`ResourceSampler`])
//! - upgrades — event-driven completions ([`UpgradeSampler`])
//!
//! Runs are independent: two runners for the same replay share no state
//! and may execute serially or on separate threads/processes with
//! identical output.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod deaths;
pub mod runner;
pub mod samplers;

pub use cache::ObservationCache;
pub use deaths::DeathLog;
pub use runner::PerspectiveRunner;
pub use samplers::{ResourceSampler, UpgradeSampler};
