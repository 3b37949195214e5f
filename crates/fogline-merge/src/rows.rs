//! Consolidated row types produced by the merge.

use fogline_core::{DeathEvent, Perspective, ResourceSnapshot, UnitObservation, UnitTag};

/// One ground-truth unit row: a merged observation with visibility and
/// ownership annotations.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundTruthUnitRow {
    /// In-game time of the observation, seconds.
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
    /// Hit points.
    pub health: f32,
    /// Shield points.
    pub shield: f32,
    /// Energy.
    pub energy: f32,
    /// Construction progress in `[0, 1]`.
    pub build_progress: f32,
    /// Remaining yield for resource map objects, `-1` otherwise.
    pub resource_remaining: i32,
    /// Whether player 1 observed this row (own units always count).
    pub visible_to_p1: bool,
    /// Whether player 2 observed this row (own units always count).
    pub visible_to_p2: bool,
    /// True iff `player_id == 1`: player 1's authoritative state.
    pub ground_truth_p1: bool,
    /// True iff `player_id == 2`: player 2's authoritative state.
    pub ground_truth_p2: bool,
    /// True iff the unit belongs to neither player.
    pub is_neutral: bool,
}

impl GroundTruthUnitRow {
    /// Seed a row from one perspective's observation.
    ///
    /// Non-visibility columns copy the observation; the observing
    /// perspective's flag is set and everything else is derived later.
    pub(crate) fn seed(obs: &UnitObservation, seen_by: Perspective) -> Self {
        Self {
            timestamp: obs.timestamp,
            unit_tag: obs.unit_tag,
            unit_type: obs.unit_type.clone(),
            player_id: obs.player_id,
            position_x: obs.position_x,
            position_y: obs.position_y,
            is_snapshot: obs.is_snapshot,
            health: obs.health,
            shield: obs.shield,
            energy: obs.energy,
            build_progress: obs.build_progress,
            resource_remaining: obs.resource_remaining,
            visible_to_p1: seen_by == Perspective::P1,
            visible_to_p2: seen_by == Perspective::P2,
            ground_truth_p1: false,
            ground_truth_p2: false,
            is_neutral: false,
        }
    }
}

/// One merged death row with per-perspective visibility.
#[derive(Clone, Debug, PartialEq)]
pub struct MergedDeathRow {
    /// In-game time of the removal, seconds.
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
    /// Whether player 1's perspective recorded this death.
    pub visible_to_p1: bool,
    /// Whether player 2's perspective recorded this death.
    pub visible_to_p2: bool,
}

impl MergedDeathRow {
    pub(crate) fn seed(death: &DeathEvent, seen_by: Perspective) -> Self {
        Self {
            timestamp: death.timestamp,
            unit_tag: death.unit_tag,
            unit_type: death.unit_type.clone(),
            player_id: death.player_id,
            position_x: death.position_x,
            position_y: death.position_y,
            visible_to_p1: seen_by == Perspective::P1,
            visible_to_p2: seen_by == Perspective::P2,
        }
    }
}

/// One player's columns of a merged resource row.
///
/// Supply fields are doubled relative to the raw engine units so that
/// half-supply units become integers; they stay `f32` here and the
/// schema normalizer enforces integrality when narrowing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerEconomy {
    /// Mineral bank.
    pub minerals: u32,
    /// Vespene bank.
    pub vespene: u32,
    /// Supply capacity, doubled.
    pub supply_cap: f32,
    /// Supply in use, doubled.
    pub supply_used: f32,
    /// Supply in army units, doubled.
    pub supply_army: f32,
}

impl PlayerEconomy {
    /// Double the raw supply values of one perspective's snapshot.
    pub(crate) fn doubled(snapshot: &ResourceSnapshot) -> Self {
        Self {
            minerals: snapshot.minerals,
            vespene: snapshot.vespene,
            supply_cap: snapshot.supply_cap * 2.0,
            supply_used: snapshot.supply_used * 2.0,
            supply_army: snapshot.supply_army * 2.0,
        }
    }
}

/// One joined resource row: both players' economies at one timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResourceRow {
    /// In-game time, seconds.
    pub timestamp: f64,
    /// Player 1's columns.
    pub p1: PlayerEconomy,
    /// Player 2's columns.
    pub p2: PlayerEconomy,
}
