//! Unit-state constructors for common game entities.

use fogline_core::{UnitState, UnitTag};

/// A full-health marine owned by `player` at the given position.
pub fn marine(tag: u64, player: u32, x: f32, y: f32) -> UnitState {
    UnitState {
        tag: UnitTag(tag),
        unit_type: "Marine".into(),
        player_id: player,
        position_x: x,
        position_y: y,
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

/// A neutral mineral field with `remaining` minerals.
pub fn mineral_field(tag: u64, x: f32, y: f32, remaining: i32) -> UnitState {
    UnitState {
        tag: UnitTag(tag),
        unit_type: "MineralField".into(),
        player_id: 0,
        position_x: x,
        position_y: y,
        is_snapshot: false,
        is_structure: false,
        is_mineral_field: true,
        is_vespene_geyser: false,
        health: 0.0,
        shield: 0.0,
        energy: 0.0,
        build_progress: 1.0,
        mineral_contents: remaining,
        vespene_contents: 0,
    }
}

/// A neutral vespene geyser with `remaining` gas.
pub fn vespene_geyser(tag: u64, x: f32, y: f32, remaining: i32) -> UnitState {
    UnitState {
        tag: UnitTag(tag),
        unit_type: "VespeneGeyser".into(),
        player_id: 0,
        position_x: x,
        position_y: y,
        is_snapshot: false,
        is_structure: false,
        is_mineral_field: false,
        is_vespene_geyser: true,
        health: 0.0,
        shield: 0.0,
        energy: 0.0,
        build_progress: 1.0,
        mineral_contents: 0,
        vespene_contents: remaining,
    }
}

/// A command-center-sized structure owned by `player`.
pub fn command_center(tag: u64, player: u32, x: f32, y: f32) -> UnitState {
    UnitState {
        tag: UnitTag(tag),
        unit_type: "CommandCenter".into(),
        player_id: player,
        position_x: x,
        position_y: y,
        is_snapshot: false,
        is_structure: true,
        is_mineral_field: false,
        is_vespene_geyser: false,
        health: 1500.0,
        shield: 0.0,
        energy: 0.0,
        build_progress: 1.0,
        mineral_contents: 0,
        vespene_contents: 0,
    }
}

/// The fog-of-war snapshot copy of `unit`.
pub fn snapshot_of(unit: &UnitState) -> UnitState {
    let mut copy = unit.clone();
    copy.is_snapshot = true;
    copy
}
