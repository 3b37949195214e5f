//! The replay-driver seam: the sole upstream dependency of the runner.
//!
//! A [`ReplayDriver`] binds a replay file to a playback engine instance and
//! yields a [`ReplaySession`] per observed perspective. The session is a
//! lazy per-step stream: each [`advance()`](ReplaySession::advance) call
//! exposes the engine's current world state — unit positions and vitals,
//! the observing player's resource counts, and the events (unit destroyed,
//! upgrade completed) that fired since the previous step.
//!
//! Everything about actually driving the engine — process and port
//! management, protocol handshake, async event callbacks — lives behind
//! this seam and is out of scope for the core.

use std::path::Path;

use smallvec::SmallVec;

use crate::config::TimeWindow;
use crate::error::DriverError;
use crate::id::{Perspective, UnitTag};
use crate::metadata::ReplayMetadata;

/// Events drained in one step.
///
/// Uses `SmallVec<[GameEvent; 2]>` because most steps carry zero, one, or
/// two events; bursts spill to the heap transparently.
pub type StepEvents = SmallVec<[GameEvent; 2]>;

/// Engine state for one unit at one step, as seen by one perspective.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitState {
    /// Engine-assigned tag, stable for the unit's lifetime.
    pub tag: UnitTag,
    /// Categorical unit type label (e.g. `"Marine"`, `"MineralField750"`).
    pub unit_type: String,
    /// Owning player: 1, 2, or 0 for neutral/ambiguous.
    pub player_id: u32,
    /// Map X coordinate.
    pub position_x: f32,
    /// Map Y coordinate.
    pub position_y: f32,
    /// Remembered-but-not-currently-visible observation (fog of war).
    pub is_snapshot: bool,
    /// Whether the engine currently flags this unit as a structure.
    pub is_structure: bool,
    /// Whether this is a mineral field map object.
    pub is_mineral_field: bool,
    /// Whether this is a vespene geyser map object.
    pub is_vespene_geyser: bool,
    /// Current hit points.
    pub health: f32,
    /// Current shield points.
    pub shield: f32,
    /// Current energy.
    pub energy: f32,
    /// Construction progress in `[0, 1]`.
    pub build_progress: f32,
    /// Remaining minerals, for mineral fields.
    pub mineral_contents: i32,
    /// Remaining vespene, for geysers.
    pub vespene_contents: i32,
}

impl UnitState {
    /// Remaining yield for resource map objects, `-1` otherwise.
    ///
    /// The sentinel keeps the column integral: vitals-bearing units have
    /// no meaningful remaining-resource value.
    pub fn resource_remaining(&self) -> i32 {
        if self.is_mineral_field {
            self.mineral_contents
        } else if self.is_vespene_geyser {
            self.vespene_contents
        } else {
            -1
        }
    }
}

/// The observing player's scalar resource state at one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerResources {
    /// Current mineral bank.
    pub minerals: u32,
    /// Current vespene bank.
    pub vespene: u32,
    /// Supply capacity, in raw engine units (half-supply is fractional).
    pub supply_cap: f32,
    /// Supply in use, in raw engine units.
    pub supply_used: f32,
    /// Supply in army units, in raw engine units.
    pub supply_army: f32,
}

/// An upgrade-completed event payload.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeEvent {
    /// Upgrade name (e.g. `"TerranInfantryWeaponsLevel1"`).
    pub upgrade: String,
    /// Player that completed the research.
    pub player_id: u32,
    /// Mineral cost of the research.
    pub mineral_cost: u32,
    /// Vespene cost of the research.
    pub vespene_cost: u32,
    /// Research duration, in engine ticks.
    pub research_ticks: f64,
}

/// An event that fired between the previous step and this one.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A unit left the world (destroyed, morphed away, or consumed).
    UnitDestroyed {
        /// Tag of the removed unit.
        tag: UnitTag,
    },
    /// A research completed for the observing player or an enemy whose
    /// completion was visible.
    UpgradeCompleted(UpgradeEvent),
}

/// One discrete advance of the simulated replay clock.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// In-game time, seconds. Monotonically non-decreasing per session.
    pub time: f64,
    /// Engine step counter, starting at 0.
    pub iteration: u64,
    /// Every unit currently known to this perspective, real or snapshot.
    pub units: Vec<UnitState>,
    /// The observing player's resource state.
    pub resources: PlayerResources,
    /// Events drained since the previous step.
    pub events: StepEvents,
}

/// A lazy per-step observation stream for one perspective.
pub trait ReplaySession {
    /// Advance the playback engine by one step.
    ///
    /// Returns `Ok(Some(step))` with the post-advance world state,
    /// `Ok(None)` when the stream is cleanly exhausted, or an error.
    /// [`DriverError::GameOver`] is the engine-level end-of-replay
    /// protocol signal and must be treated as a normal end by callers;
    /// every other error means the perspective failed.
    fn advance(&mut self) -> Result<Option<Step>, DriverError>;
}

/// Binds replay files to playback sessions.
///
/// Implementations own all engine lifecycle concerns (ports, processes,
/// protocol). Two sessions for the same replay must be independent: a
/// failure in one must not corrupt the other.
pub trait ReplayDriver {
    /// The session type produced by [`open`](Self::open).
    type Session: ReplaySession;

    /// Start a playback session for one perspective over `window`.
    fn open(
        &self,
        replay: &Path,
        perspective: Perspective,
        window: TimeWindow,
    ) -> Result<Self::Session, DriverError>;

    /// Read the replay's metadata record (player names, races, result).
    fn metadata(&self, replay: &Path) -> Result<ReplayMetadata, DriverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_unit(tag: u64) -> UnitState {
        UnitState {
            tag: UnitTag(tag),
            unit_type: "Marine".into(),
            player_id: 1,
            position_x: 10.0,
            position_y: 20.0,
            is_snapshot: false,
            is_structure: false,
            is_mineral_field: false,
            is_vespene_geyser: false,
            health: 45.0,
            shield: 0.0,
            energy: 0.0,
            build_progress: 1.0,
            mineral_contents: 0,
            vespene_contents: 0,
        }
    }

    #[test]
    fn combat_unit_has_sentinel_resource() {
        assert_eq!(bare_unit(1).resource_remaining(), -1);
    }

    #[test]
    fn mineral_field_reports_mineral_contents() {
        let mut field = bare_unit(2);
        field.unit_type = "MineralField".into();
        field.player_id = 0;
        field.is_mineral_field = true;
        field.mineral_contents = 1350;
        assert_eq!(field.resource_remaining(), 1350);
    }

    #[test]
    fn geyser_reports_vespene_contents() {
        let mut geyser = bare_unit(3);
        geyser.unit_type = "VespeneGeyser".into();
        geyser.player_id = 0;
        geyser.is_vespene_geyser = true;
        geyser.vespene_contents = 2250;
        assert_eq!(geyser.resource_remaining(), 2250);
    }
}
