//! The resource outer-join with supply doubling and forward-fill.

use fogline_core::{ConsolidateError, Perspective, ResourceSnapshot};

use crate::rows::{PlayerEconomy, ResourceRow};

/// Outer-join both perspectives' resource curves on timestamp.
///
/// Each side's supply columns are doubled first (half-supply units become
/// integers). The joined rows are sorted by timestamp ascending and any
/// side missing a sample at a joined timestamp is forward-filled from its
/// most recent earlier sample — slightly desynced tick cadences leave
/// one-sided gaps, and carrying the last value forward is exact for
/// step-wise curves. Backward-fill is never applied: a gap at the first
/// joined row means a perspective started sampling late, which violates
/// the same-window invariant and fails the replay.
pub fn merge_resources(
    p1: &[ResourceSnapshot],
    p2: &[ResourceSnapshot],
) -> Result<Vec<ResourceRow>, ConsolidateError> {
    // Union of timestamps, ascending, deduplicated via exact bits.
    let mut stamps: Vec<f64> = p1
        .iter()
        .chain(p2.iter())
        .map(|snap| snap.timestamp)
        .collect();
    stamps.sort_by(f64::total_cmp);
    stamps.dedup_by(|a, b| a.to_bits() == b.to_bits());

    let mut rows = Vec::with_capacity(stamps.len());
    let mut cursor1 = Fill::new(p1);
    let mut cursor2 = Fill::new(p2);

    for timestamp in stamps {
        let e1 = cursor1
            .at(timestamp)
            .ok_or(ConsolidateError::LeadingResourceGap {
                perspective: Perspective::P1,
                timestamp,
            })?;
        let e2 = cursor2
            .at(timestamp)
            .ok_or(ConsolidateError::LeadingResourceGap {
                perspective: Perspective::P2,
                timestamp,
            })?;
        rows.push(ResourceRow {
            timestamp,
            p1: e1,
            p2: e2,
        });
    }
    Ok(rows)
}

/// Forward-fill cursor over one side's time-ordered samples.
struct Fill<'a> {
    samples: &'a [ResourceSnapshot],
    next: usize,
    last: Option<PlayerEconomy>,
}

impl<'a> Fill<'a> {
    fn new(samples: &'a [ResourceSnapshot]) -> Self {
        Self {
            samples,
            next: 0,
            last: None,
        }
    }

    /// The freshest economy at or before `timestamp`, if any sample
    /// precedes it.
    fn at(&mut self, timestamp: f64) -> Option<PlayerEconomy> {
        while self.next < self.samples.len() && self.samples[self.next].timestamp <= timestamp {
            self.last = Some(PlayerEconomy::doubled(&self.samples[self.next]));
            self.next += 1;
        }
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(time: f64, minerals: u32, cap: f32, used: f32, army: f32) -> ResourceSnapshot {
        ResourceSnapshot {
            timestamp: time,
            minerals,
            vespene: minerals / 4,
            supply_cap: cap,
            supply_used: used,
            supply_army: army,
        }
    }

    #[test]
    fn aligned_inputs_join_one_to_one() {
        let p1 = vec![snap(0.0, 50, 15.0, 12.0, 0.0), snap(1.0, 60, 15.0, 12.5, 0.5)];
        let p2 = vec![snap(0.0, 50, 14.0, 12.0, 0.0), snap(1.0, 55, 14.0, 13.0, 1.0)];
        let rows = merge_resources(&p1, &p2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].timestamp, 0.0);
        assert_eq!(rows[1].p1.minerals, 60);
        assert_eq!(rows[1].p2.minerals, 55);
    }

    #[test]
    fn supply_columns_are_doubled() {
        let p1 = vec![snap(0.0, 50, 15.0, 12.5, 0.5)];
        let p2 = vec![snap(0.0, 50, 14.0, 12.0, 0.0)];
        let rows = merge_resources(&p1, &p2).unwrap();
        assert_eq!(rows[0].p1.supply_cap, 30.0);
        assert_eq!(rows[0].p1.supply_used, 25.0);
        assert_eq!(rows[0].p1.supply_army, 1.0);
    }

    #[test]
    fn desynced_tick_forward_fills_the_gap() {
        // P2 missed the t=1 tick; its t=0 values carry forward.
        let p1 = vec![
            snap(0.0, 50, 15.0, 12.0, 0.0),
            snap(1.0, 62, 15.0, 12.0, 0.0),
            snap(2.0, 74, 15.0, 12.0, 0.0),
        ];
        let p2 = vec![snap(0.0, 55, 14.0, 12.0, 0.0), snap(2.0, 79, 14.0, 12.0, 0.0)];
        let rows = merge_resources(&p1, &p2).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].timestamp, 1.0);
        assert_eq!(rows[1].p2.minerals, 55); // filled from t=0
        assert_eq!(rows[2].p2.minerals, 79); // real sample resumes
    }

    #[test]
    fn leading_gap_is_fatal() {
        // P2 starts sampling after P1's first tick — nothing to fill
        // the first row from.
        let p1 = vec![snap(0.0, 50, 15.0, 12.0, 0.0), snap(1.0, 62, 15.0, 12.0, 0.0)];
        let p2 = vec![snap(1.0, 55, 14.0, 12.0, 0.0)];
        let err = merge_resources(&p1, &p2).unwrap_err();
        assert_eq!(
            err,
            ConsolidateError::LeadingResourceGap {
                perspective: Perspective::P2,
                timestamp: 0.0,
            }
        );
    }

    #[test]
    fn first_row_complete_for_same_window_inputs() {
        let p1 = vec![snap(3.0, 50, 15.0, 12.0, 0.0)];
        let p2 = vec![snap(3.0, 51, 14.0, 12.0, 0.0)];
        let rows = merge_resources(&p1, &p2).unwrap();
        assert_eq!(rows.len(), 1);
        // Both sides present at the first (and only) row.
        assert_eq!(rows[0].p1.minerals, 50);
        assert_eq!(rows[0].p2.minerals, 51);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Raw supply values land on integer or half-integer steps.
        fn arb_supply() -> impl Strategy<Value = f32> {
            (0u32..400).prop_map(|half_units| half_units as f32 / 2.0)
        }

        proptest! {
            #[test]
            fn double_then_halve_is_exact(raw in arb_supply()) {
                let p1 = vec![snap(0.0, 10, raw, raw, raw)];
                let p2 = vec![snap(0.0, 10, 0.0, 0.0, 0.0)];
                let rows = merge_resources(&p1, &p2).unwrap();
                prop_assert_eq!(rows[0].p1.supply_cap / 2.0, raw);
                prop_assert_eq!(rows[0].p1.supply_used / 2.0, raw);
                prop_assert_eq!(rows[0].p1.supply_army / 2.0, raw);
            }

            #[test]
            fn join_covers_union_of_timestamps(
                times1 in prop::collection::btree_set(0u32..60, 1..30),
                times2 in prop::collection::btree_set(0u32..60, 1..30),
            ) {
                // Anchor both sides at t=0 so no leading gap occurs.
                let build = |times: &std::collections::BTreeSet<u32>| {
                    std::iter::once(0u32)
                        .chain(times.iter().copied())
                        .collect::<std::collections::BTreeSet<u32>>()
                        .into_iter()
                        .map(|t| snap(f64::from(t), t, 10.0, 5.0, 0.0))
                        .collect::<Vec<_>>()
                };
                let p1 = build(&times1);
                let p2 = build(&times2);
                let rows = merge_resources(&p1, &p2).unwrap();

                let union: std::collections::BTreeSet<u32> = p1
                    .iter()
                    .chain(p2.iter())
                    .map(|s| s.timestamp as u32)
                    .collect();
                prop_assert_eq!(rows.len(), union.len());
                // Ascending, no duplicates.
                for pair in rows.windows(2) {
                    prop_assert!(pair[0].timestamp < pair[1].timestamp);
                }
            }
        }
    }
}
