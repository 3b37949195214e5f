//! Write-behind observation cache with interval flushing.
//!
//! [`ObservationCache`] maintains two tag-keyed maps over the same
//! observations:
//!
//! - the **persistent cache** keeps a unit's latest observation until the
//!   unit is removed from the world — the death log reads terminal state
//!   from it;
//! - the **interval cache** keeps the latest observation since the last
//!   flush — [`flush_into`](ObservationCache::flush_into) drains it into
//!   the unit log every Nth step.
//!
//! This yields sparse sampling (only every Nth step persisted) that always
//! reflects the most recent state *as of* the sampled step rather than the
//! state exactly at it — an intentional approximation trading precision
//! for volume.

use indexmap::IndexMap;

use fogline_core::{UnitObservation, UnitState, UnitTag};

/// Ghost filter for stale fog-of-war copies of resource map objects.
///
/// A unit that is simultaneously a remembered snapshot, a mineral field or
/// vespene geyser, and flagged as a structure is a leftover entry for a
/// depleted or never-real resource node and must not reach the caches.
pub fn is_resource_ghost(unit: &UnitState) -> bool {
    unit.is_snapshot && (unit.is_mineral_field || unit.is_vespene_geyser) && unit.is_structure
}

/// Tag-keyed cache of the freshest observation per unit.
///
/// Insertion order is deterministic (`IndexMap`), and the flush order is
/// made explicit on top of that: drained entries are sorted by tag so the
/// unit log's within-timestamp row order is identical across perspectives
/// and runs.
#[derive(Debug, Default)]
pub struct ObservationCache {
    persistent: IndexMap<UnitTag, UnitObservation>,
    interval: IndexMap<UnitTag, UnitObservation>,
}

impl ObservationCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a unit's state at `time`, overwriting both caches.
    ///
    /// Resource ghosts are excluded entirely; every other unit — real or
    /// snapshot — passes through. Last write per step wins.
    pub fn record(&mut self, time: f64, unit: &UnitState) {
        if is_resource_ghost(unit) {
            return;
        }
        let obs = UnitObservation::capture(time, unit);
        self.persistent.insert(unit.tag, obs.clone());
        self.interval.insert(unit.tag, obs);
    }

    /// Drain the interval cache into `log`, sorted by unit tag.
    ///
    /// The persistent cache is untouched: a flushed unit stays known
    /// until it is removed from the world.
    pub fn flush_into(&mut self, log: &mut Vec<UnitObservation>) {
        let mut drained: Vec<UnitObservation> =
            self.interval.drain(..).map(|(_, obs)| obs).collect();
        drained.sort_by_key(|obs| obs.unit_tag);
        log.append(&mut drained);
    }

    /// Remove a unit from the persistent cache, returning its last
    /// observation.
    ///
    /// The interval cache keeps its copy: the unit's final sampled state
    /// still reaches the unit log at the next flush.
    pub fn remove(&mut self, tag: UnitTag) -> Option<UnitObservation> {
        self.persistent.shift_remove(&tag)
    }

    /// Whether `tag` is currently known to this perspective.
    pub fn contains(&self, tag: UnitTag) -> bool {
        self.persistent.contains_key(&tag)
    }

    /// Units currently in the persistent cache.
    pub fn known_units(&self) -> usize {
        self.persistent.len()
    }

    /// Observations pending the next flush.
    pub fn pending(&self) -> usize {
        self.interval.len()
    }
}
