//! The two-stream death merge.

use indexmap::map::Entry;
use indexmap::IndexMap;

use fogline_core::{DeathEvent, Perspective, UnitTag};

use crate::rows::MergedDeathRow;

/// OR-merge both perspectives' death logs by `(timestamp, unit_tag)`.
///
/// A perspective with an empty death log contributes a uniformly-false
/// visibility column, not a missing one — every merged row carries both
/// flags. Returns `None` when both logs are empty: the artifact is
/// omitted entirely, which is distinct from present-but-empty.
pub fn merge_deaths(p1: &[DeathEvent], p2: &[DeathEvent]) -> Option<Vec<MergedDeathRow>> {
    if p1.is_empty() && p2.is_empty() {
        return None;
    }

    let mut groups: IndexMap<(u64, UnitTag), MergedDeathRow> =
        IndexMap::with_capacity(p1.len() + p2.len());

    let tagged = p1
        .iter()
        .map(|death| (death, Perspective::P1))
        .chain(p2.iter().map(|death| (death, Perspective::P2)));

    for (death, seen_by) in tagged {
        match groups.entry((death.timestamp.to_bits(), death.unit_tag)) {
            Entry::Vacant(slot) => {
                slot.insert(MergedDeathRow::seed(death, seen_by));
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

    let mut rows: Vec<MergedDeathRow> = groups.into_values().collect();
    rows.sort_by(|a, b| {
        a.timestamp
            .total_cmp(&b.timestamp)
            .then_with(|| a.unit_tag.cmp(&b.unit_tag))
    });
    Some(rows)
}
