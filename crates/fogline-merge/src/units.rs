//! The two-stream unit merge.

use indexmap::map::Entry;
use indexmap::IndexMap;

use fogline_core::{Perspective, UnitObservation, UnitTag};

use crate::rows::GroundTruthUnitRow;

/// Composite group key: exact timestamp bits plus unit tag.
///
/// Grouping is exact-equality on the timestamp — slightly desynced tick
/// cadences intentionally do not collapse into one row.
type GroupKey = (u64, UnitTag);

fn key_of(obs: &UnitObservation) -> GroupKey {
    (obs.timestamp.to_bits(), obs.unit_tag)
}

/// Merge both perspectives' unit logs into ground-truth rows.
///
/// Player 1's rows are folded in first, so wherever both perspectives
/// report the same `(timestamp, unit_tag)` the non-visibility columns
/// come from player 1's copy — an arbitrary but deterministic tie-break
/// preserved from the stable concatenation order. Visibility flags OR
/// across the group, own-player visibility is forced afterwards, and the
/// ownership flags are derived from `player_id`.
///
/// Output is sorted by `(timestamp, unit_tag)`.
pub fn merge_units(p1: &[UnitObservation], p2: &[UnitObservation]) -> Vec<GroundTruthUnitRow> {
    let mut groups: IndexMap<GroupKey, GroundTruthUnitRow> =
        IndexMap::with_capacity(p1.len() + p2.len());

    let tagged = p1
        .iter()
        .map(|obs| (obs, Perspective::P1))
        .chain(p2.iter().map(|obs| (obs, Perspective::P2)));

    for (obs, seen_by) in tagged {
        match groups.entry(key_of(obs)) {
            Entry::Vacant(slot) => {
                slot.insert(GroundTruthUnitRow::seed(obs, seen_by));
            }
            Entry::Occupied(mut slot) => {
                let row = slot.get_mut();
                match seen_by {
                    Perspective::P1 => row.visible_to_p1 = true,
                    Perspective::P2 => row.visible_to_p2 = true,
                }
            }
        }
    }

    let mut rows: Vec<GroundTruthUnitRow> = groups.into_values().collect();
    for row in &mut rows {
        // Players always see their own units; raw visibility data
        // misreports them under fog-of-war bookkeeping. Neutral units
        // keep their observed flags.
        match row.player_id {
            1 => row.visible_to_p1 = true,
            2 => row.visible_to_p2 = true,
            _ => {}
        }
        row.ground_truth_p1 = row.player_id == 1;
        row.ground_truth_p2 = row.player_id == 2;
        row.is_neutral = !(row.ground_truth_p1 || row.ground_truth_p2);
    }

    rows.sort_by(|a, b| {
        a.timestamp
            .total_cmp(&b.timestamp)
            .then_with(|| a.unit_tag.cmp(&b.unit_tag))
    });
    rows
}
