//! Top-level consolidation of two completed perspective runs.

use tracing::debug;

use fogline_core::{ConsolidateError, PerspectiveLog, UpgradeCompletion};

use crate::deaths::merge_deaths;
use crate::resources::merge_resources;
use crate::rows::{GroundTruthUnitRow, MergedDeathRow, ResourceRow};
use crate::units::merge_units;

/// The consolidated ground-truth dataset for one replay.
///
/// `deaths` and `upgrades` are `None` when both source logs were empty —
/// the artifact is omitted, not written empty.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsolidatedReplay {
    /// Merged unit rows with visibility and ownership annotations.
    pub units: Vec<GroundTruthUnitRow>,
    /// Merged death rows, if any perspective recorded one.
    pub deaths: Option<Vec<MergedDeathRow>>,
    /// Joined resource curves, both players per row.
    pub resources: Vec<ResourceRow>,
    /// Concatenated upgrade completions, if any.
    pub upgrades: Option<Vec<UpgradeCompletion>>,
}

/// Merge two completed perspective runs of the same replay.
///
/// Pure and synchronous: no I/O, no suspension points. The preconditions
/// are hard invariants — a run that produced an empty unit or resource
/// log is an extraction anomaly and fails the whole replay.
pub fn consolidate(
    p1: &PerspectiveLog,
    p2: &PerspectiveLog,
) -> Result<ConsolidatedReplay, ConsolidateError> {
    for log in [p1, p2] {
        if log.units.is_empty() {
            return Err(ConsolidateError::EmptyUnitLog {
                perspective: log.perspective,
            });
        }
        if log.resources.is_empty() {
            return Err(ConsolidateError::EmptyResourceLog {
                perspective: log.perspective,
            });
        }
    }

    let units = merge_units(&p1.units, &p2.units);
    let deaths = merge_deaths(&p1.deaths, &p2.deaths);
    let resources = merge_resources(&p1.resources, &p2.resources)?;
    let upgrades = merge_upgrades(&p1.upgrades, &p2.upgrades);

    debug!(
        unit_rows = units.len(),
        death_rows = deaths.as_ref().map_or(0, Vec::len),
        resource_rows = resources.len(),
        upgrade_rows = upgrades.as_ref().map_or(0, Vec::len),
        "consolidated replay"
    );

    Ok(ConsolidatedReplay {
        units,
        deaths,
        resources,
        upgrades,
    })
}

/// Concatenate both perspectives' upgrade logs, completion-time order.
fn merge_upgrades(
    p1: &[UpgradeCompletion],
    p2: &[UpgradeCompletion],
) -> Option<Vec<UpgradeCompletion>> {
    if p1.is_empty() && p2.is_empty() {
        return None;
    }
    let mut merged: Vec<UpgradeCompletion> = p1.iter().chain(p2.iter()).cloned().collect();
    merged.sort_by(|a, b| a.time_completed.total_cmp(&b.time_completed));
    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fogline_core::{Perspective, ResourceSnapshot, UnitObservation, UnitTag};

    fn obs(time: f64, tag: u64, player: u32) -> UnitObservation {
        UnitObservation {
            timestamp: time,
            unit_tag: UnitTag(tag),
            unit_type: "Marine".into(),
            player_id: player,
            position_x: 0.0,
            position_y: 0.0,
            is_snapshot: false,
            health: 45.0,
            shield: 0.0,
            energy: 0.0,
            build_progress: 1.0,
            resource_remaining: -1,
        }
    }

    fn snap(time: f64) -> ResourceSnapshot {
        ResourceSnapshot {
            timestamp: time,
            minerals: 50,
            vespene: 0,
            supply_cap: 15.0,
            supply_used: 12.0,
            supply_army: 0.0,
        }
    }

    fn minimal_log(perspective: Perspective) -> PerspectiveLog {
        PerspectiveLog {
            perspective,
            units: vec![obs(1.0, 100 * u64::from(perspective.player_id()), perspective.player_id())],
            deaths: Vec::new(),
            resources: vec![snap(1.0)],
            upgrades: Vec::new(),
        }
    }

    #[test]
    fn minimal_pair_consolidates() {
        let out = consolidate(&minimal_log(Perspective::P1), &minimal_log(Perspective::P2))
            .expect("consolidates");
        assert_eq!(out.units.len(), 2);
        assert_eq!(out.resources.len(), 1);
        assert!(out.deaths.is_none());
        assert!(out.upgrades.is_none());
    }

    #[test]
    fn empty_unit_log_is_fatal() {
        let mut p1 = minimal_log(Perspective::P1);
        p1.units.clear();
        let err = consolidate(&p1, &minimal_log(Perspective::P2)).unwrap_err();
        assert_eq!(
            err,
            ConsolidateError::EmptyUnitLog {
                perspective: Perspective::P1
            }
        );
    }

    #[test]
    fn empty_resource_log_is_fatal() {
        let mut p2 = minimal_log(Perspective::P2);
        p2.resources.clear();
        let err = consolidate(&minimal_log(Perspective::P1), &p2).unwrap_err();
        assert_eq!(
            err,
            ConsolidateError::EmptyResourceLog {
                perspective: Perspective::P2
            }
        );
    }

    #[test]
    fn upgrades_concatenate_in_completion_order() {
        let mut p1 = minimal_log(Perspective::P1);
        let mut p2 = minimal_log(Perspective::P2);
        p1.upgrades.push(UpgradeCompletion {
            time_completed: 300.0,
            upgrade: "Stimpack".into(),
            player_id: 1,
            mineral_cost: 100,
            vespene_cost: 100,
            imputed_start: 200.0,
        });
        p2.upgrades.push(UpgradeCompletion {
            time_completed: 250.0,
            upgrade: "Burrow".into(),
            player_id: 2,
            mineral_cost: 100,
            vespene_cost: 100,
            imputed_start: 150.0,
        });
        let out = consolidate(&p1, &p2).unwrap();
        let upgrades = out.upgrades.unwrap();
        assert_eq!(upgrades[0].upgrade, "Burrow");
        assert_eq!(upgrades[1].upgrade, "Stimpack");
    }
}
