//! Reusable test fixtures for the Fogline workspace.
//!
//! Three layers of scaffolding for pipeline validation:
//!
//! - [`units`] — unit-state constructors for common game entities.
//! - [`ScriptedDriver`]/[`ScriptedSession`] — canned per-step streams
//!   with configurable termination (clean end, game over, or a
//!   deterministic protocol failure).
//! - [`synthetic_skirmish`] — a seeded two-perspective replay generator
//!   for integration tests and benchmarks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod scripted;
pub mod synth;
pub mod units;

pub use scripted::{ScriptedDriver, ScriptedReplay, ScriptedSession, SessionEnd};
pub use synth::synthetic_skirmish;

use fogline_core::{PlayerResources, Step, StepEvents, UnitState};

/// A step at `time` with the given engine iteration, units, and economy.
pub fn step_at(time: f64, iteration: u64, units: Vec<UnitState>, resources: PlayerResources) -> Step {
    Step {
        time,
        iteration,
        units,
        resources,
        events: StepEvents::new(),
    }
}

/// A resource state with the given banks and raw supply values.
pub fn economy(minerals: u32, vespene: u32, cap: f32, used: f32, army: f32) -> PlayerResources {
    PlayerResources {
        minerals,
        vespene,
        supply_cap: cap,
        supply_used: used,
        supply_army: army,
    }
}
