//! Seeded synthetic skirmish generator.
//!
//! Produces a deterministic two-perspective replay with the texture the
//! consolidator has to cope with: neutral resource nodes seen by both
//! sides, own units always present, enemy units flickering in and out of
//! vision as snapshots, a mid-game death, and one upgrade per player.

use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::smallvec;

use fogline_core::{GameEvent, Perspective, Step, UnitState, UnitTag, UpgradeEvent};

use crate::scripted::ScriptedReplay;
use crate::{economy, step_at, units};

/// Tag block for each player's army; player 1 owns 1xx, player 2 owns 2xx.
fn army_tags(player: u32) -> Vec<u64> {
    (0..6).map(|i| u64::from(player) * 100 + i).collect()
}

fn neutral_fields() -> Vec<UnitState> {
    vec![
        units::mineral_field(900, 20.0, 20.0, 1800),
        units::mineral_field(901, 22.0, 20.0, 1800),
        units::vespene_geyser(910, 24.0, 24.0, 2250),
        units::mineral_field(902, 140.0, 140.0, 1800),
        units::vespene_geyser(911, 138.0, 138.0, 2250),
    ]
}

/// Build one perspective's step stream.
fn perspective_steps(rng: &mut ChaCha8Rng, observer: Perspective, steps: u64) -> Vec<Step> {
    let own = observer.player_id();
    let enemy = observer.opponent().player_id();
    let own_base = if own == 1 { 25.0 } else { 135.0 };
    let enemy_base = if own == 1 { 135.0 } else { 25.0 };
    let death_step = steps * 2 / 3;

    let mut out = Vec::with_capacity(steps as usize);
    for i in 0..steps {
        let time = i as f64;
        let mut world = neutral_fields();
        world.push(units::command_center(u64::from(own) * 1000, own, own_base, own_base));

        for (slot, tag) in army_tags(own).into_iter().enumerate() {
            // The dead unit stops appearing after its death step.
            if slot == 0 && i >= death_step {
                continue;
            }
            let drift: f32 = rng.random_range(-1.0..1.0);
            world.push(units::marine(tag, own, own_base + slot as f32 + drift, time as f32));
        }

        // Enemy army drifts through vision: real while scouted, snapshot
        // (remembered at last seen position) otherwise.
        let scouting = (i / 10) % 3 == 0;
        for (slot, tag) in army_tags(enemy).into_iter().enumerate() {
            if slot >= 3 {
                continue; // only part of the enemy army is ever seen
            }
            let mut unit = units::marine(tag, enemy, enemy_base - slot as f32, time as f32);
            if !scouting {
                unit = units::snapshot_of(&unit);
                unit.position_y = (i / 10 * 10) as f32;
            }
            world.push(unit);
        }

        let bank = 50 + (i * 12) as u32;
        let used = 12.0 + i as f32 * 0.5;
        let mut step = step_at(
            time,
            i,
            world,
            economy(bank, bank / 3, (used + 8.0).min(200.0), used, i as f32 * 0.5),
        );

        if i == death_step {
            step.events = smallvec![GameEvent::UnitDestroyed {
                tag: UnitTag(u64::from(own) * 100),
            }];
        }
        if i == steps / 2 {
            step.events.push(GameEvent::UpgradeCompleted(UpgradeEvent {
                upgrade: format!("InfantryWeaponsLevel{own}"),
                player_id: own,
                mineral_cost: 100,
                vespene_cost: 100,
                research_ticks: 3584.0,
            }));
        }
        out.push(step);
    }
    out
}

/// A deterministic synthetic replay of `steps` one-second ticks.
///
/// The same `(seed, steps)` pair always yields the same replay, so
/// integration tests and benchmarks can assert exact row counts.
pub fn synthetic_skirmish(seed: u64, steps: u64) -> ScriptedReplay {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let p1 = perspective_steps(&mut rng, Perspective::P1, steps);
    let p2 = perspective_steps(&mut rng, Perspective::P2, steps);
    ScriptedReplay::new(
        p1,
        p2,
        ScriptedReplay::placeholder_metadata(&format!("synth-{seed}")),
    )
}
