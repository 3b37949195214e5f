//! Terminal observations for units that leave the world.

use tracing::trace;

use fogline_core::{DeathEvent, UnitTag};

use crate::cache::ObservationCache;

/// Accumulates one death record per removed unit this perspective knew.
///
/// Lossy by contract: a unit destroyed while never cached (always out of
/// vision) produces no record, and there is no retry.
#[derive(Debug, Default)]
pub struct DeathLog {
    events: Vec<DeathEvent>,
}

impl DeathLog {
    /// An empty death log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a unit-removed event at `time`.
    ///
    /// Pops the tag from the persistent cache and emits one record from
    /// its last known state. An uncached tag is silently dropped.
    pub fn record_destroyed(&mut self, time: f64, tag: UnitTag, cache: &mut ObservationCache) {
        let Some(last) = cache.remove(tag) else {
            trace!(%tag, "destroyed unit was never cached, dropping");
            return;
        };
        self.events.push(DeathEvent {
            timestamp: time,
            unit_tag: tag,
            unit_type: last.unit_type,
            player_id: last.player_id,
            position_x: last.position_x,
            position_y: last.position_y,
        });
    }

    /// Records accumulated so far.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no deaths were recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consume the log, yielding the accumulated records.
    pub fn into_events(self) -> Vec<DeathEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fogline_test_utils::units;

    #[test]
    fn cached_unit_yields_death_record_at_removal_time() {
        let mut cache = ObservationCache::new();
        let mut deaths = DeathLog::new();
        cache.record(40.0, &units::marine(101, 1, 12.0, 34.0));

        deaths.record_destroyed(45.0, UnitTag(101), &mut cache);

        let events = deaths.into_events();
        assert_eq!(events.len(), 1);
        let death = &events[0];
        // Removal time, but last-cached position and ownership.
        assert_eq!(death.timestamp, 45.0);
        assert_eq!(death.position_x, 12.0);
        assert_eq!(death.position_y, 34.0);
        assert_eq!(death.player_id, 1);
        // Gone from the persistent cache.
        assert!(!cache.contains(UnitTag(101)));
    }

    #[test]
    fn uncached_unit_is_silently_dropped() {
        let mut cache = ObservationCache::new();
        let mut deaths = DeathLog::new();

        deaths.record_destroyed(45.0, UnitTag(999), &mut cache);
        assert!(deaths.is_empty());
    }

    #[test]
    fn double_destroy_emits_single_record() {
        let mut cache = ObservationCache::new();
        let mut deaths = DeathLog::new();
        cache.record(40.0, &units::marine(101, 1, 12.0, 34.0));

        deaths.record_destroyed(45.0, UnitTag(101), &mut cache);
        deaths.record_destroyed(46.0, UnitTag(101), &mut cache);
        assert_eq!(deaths.len(), 1);
    }
}
