//! Observation records accumulated during a perspective run.
//!
//! All records are created during one playback run, accumulate in memory,
//! and are serialized exactly once at run end. Nothing is mutated after
//! serialization.

use crate::driver::{PlayerResources, UnitState, UpgradeEvent};
use crate::id::{Perspective, UnitTag};
use crate::GAME_STEPS_PER_SECOND;

/// One unit observation: (timestamp, unit, observing perspective).
#[derive(Clone, Debug, PartialEq)]
pub struct UnitObservation {
    /// In-game time of the step that produced this observation, seconds.
    pub timestamp: f64,
    /// Engine-assigned unit tag.
    pub unit_tag: UnitTag,
    /// Categorical unit type label.
    pub unit_type: String,
    /// Owning player: 1, 2, or 0 for neutral.
    pub player_id: u32,
    /// Map X coordinate.
    pub position_x: f32,
    /// Map Y coordinate.
    pub position_y: f32,
    /// Remembered-but-not-currently-visible observation.
    pub is_snapshot: bool,
    /// Hit points. Only meaningful for non-snapshot, non-resource units.
    pub health: f32,
    /// Shield points.
    pub shield: f32,
    /// Energy.
    pub energy: f32,
    /// Construction progress in `[0, 1]`.
    pub build_progress: f32,
    /// Remaining yield for resource map objects, `-1` otherwise.
    pub resource_remaining: i32,
}

impl UnitObservation {
    /// Capture a unit's engine state at `time`.
    pub fn capture(time: f64, unit: &UnitState) -> Self {
        Self {
            timestamp: time,
            unit_tag: unit.tag,
            unit_type: unit.unit_type.clone(),
            player_id: unit.player_id,
            position_x: unit.position_x,
            position_y: unit.position_y,
            is_snapshot: unit.is_snapshot,
            health: unit.health,
            shield: unit.shield,
            energy: unit.energy,
            build_progress: unit.build_progress,
            resource_remaining: unit.resource_remaining(),
        }
    }
}

/// Terminal observation of a unit at the instant it left the world.
///
/// Carries the last cached state, not the (unobservable) state at the
/// exact removal instant.
#[derive(Clone, Debug, PartialEq)]
pub struct DeathEvent {
    /// In-game time of the removal event, seconds.
    pub timestamp: f64,
    /// Tag of the removed unit.
    pub unit_tag: UnitTag,
    /// Last known type label.
    pub unit_type: String,
    /// Last known owner.
    pub player_id: u32,
    /// Last known map X coordinate.
    pub position_x: f32,
    /// Last known map Y coordinate.
    pub position_y: f32,
}

/// Per-step scalar snapshot of the observing player's economy.
///
/// Supply fields are raw engine units (half-supply units are fractional);
/// they are doubled to integers during consolidation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResourceSnapshot {
    /// In-game time of the step, seconds.
    pub timestamp: f64,
    /// Mineral bank.
    pub minerals: u32,
    /// Vespene bank.
    pub vespene: u32,
    /// Supply capacity.
    pub supply_cap: f32,
    /// Supply in use.
    pub supply_used: f32,
    /// Supply in army units.
    pub supply_army: f32,
}

impl ResourceSnapshot {
    /// Sample the observing player's resource state at `time`.
    pub fn sample(time: f64, resources: &PlayerResources) -> Self {
        Self {
            timestamp: time,
            minerals: resources.minerals,
            vespene: resources.vespene,
            supply_cap: resources.supply_cap,
            supply_used: resources.supply_used,
            supply_army: resources.supply_army,
        }
    }
}

/// One completed research, with its imputed start time.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeCompletion {
    /// In-game completion time, seconds.
    pub time_completed: f64,
    /// Upgrade name.
    pub upgrade: String,
    /// Player that completed the research.
    pub player_id: u32,
    /// Mineral cost.
    pub mineral_cost: u32,
    /// Vespene cost.
    pub vespene_cost: u32,
    /// Imputed research start: completion time minus the research
    /// duration converted from engine ticks to seconds.
    pub imputed_start: f64,
}

impl UpgradeCompletion {
    /// Build a completion record from an upgrade event at `time`.
    pub fn from_event(time: f64, event: &UpgradeEvent) -> Self {
        Self {
            time_completed: time,
            upgrade: event.upgrade.clone(),
            player_id: event.player_id,
            mineral_cost: event.mineral_cost,
            vespene_cost: event.vespene_cost,
            imputed_start: time - event.research_ticks / GAME_STEPS_PER_SECOND,
        }
    }
}

/// The four observation logs produced by one completed perspective run.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveLog {
    /// The perspective that produced these logs.
    pub perspective: Perspective,
    /// Interval-sampled unit observations, time-ordered.
    pub units: Vec<UnitObservation>,
    /// Death events, time-ordered. Lossy: only units that were cached.
    pub deaths: Vec<DeathEvent>,
    /// Full-density resource snapshots, one per in-window step.
    pub resources: Vec<ResourceSnapshot>,
    /// Completed upgrades, in completion order.
    pub upgrades: Vec<UpgradeCompletion>,
}

impl PerspectiveLog {
    /// An empty log set for `perspective`.
    pub fn empty(perspective: Perspective) -> Self {
        Self {
            perspective,
            units: Vec::new(),
            deaths: Vec::new(),
            resources: Vec::new(),
            upgrades: Vec::new(),
        }
    }
}
