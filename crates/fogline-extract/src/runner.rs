//! Drives one playback session across the extraction window.

use tracing::{debug, info};

use fogline_core::{
    DriverError, ExtractError, ExtractionConfig, GameEvent, Perspective, PerspectiveLog,
    ReplaySession,
};

use crate::cache::ObservationCache;
use crate::deaths::DeathLog;
use crate::samplers::{ResourceSampler, UpgradeSampler};

/// Runs one perspective's playback to end-of-window or end-of-replay.
///
/// The runner is internally single-threaded and synchronous: every cache
/// and log mutation happens inside the step loop, so there is no
/// concurrent access to a run's state. Two runners for the same replay
/// are independent units of work — a failure in one never corrupts the
/// other, and serial versus parallel scheduling cannot change the output.
///
/// # Termination
///
/// A clean end-of-stream or the engine's game-over protocol signal ends
/// the run normally. Any other driver error fails the run; per contract
/// the partial logs are discarded (the error return drops them).
#[derive(Clone, Copy, Debug)]
pub struct PerspectiveRunner {
    config: ExtractionConfig,
}

impl PerspectiveRunner {
    /// A runner for the given window/interval configuration.
    ///
    /// The configuration is expected to be validated already; see
    /// [`ExtractionConfig::validate`].
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Drive `session` to completion and return the four observation logs.
    pub fn run<S: ReplaySession>(
        &self,
        perspective: Perspective,
        mut session: S,
    ) -> Result<PerspectiveLog, ExtractError> {
        let mut cache = ObservationCache::new();
        let mut deaths = DeathLog::new();
        let mut resources = ResourceSampler::new();
        let mut upgrades = UpgradeSampler::new();
        let mut units = Vec::new();
        let mut steps_seen: u64 = 0;

        loop {
            let step = match session.advance() {
                Ok(Some(step)) => step,
                Ok(None) => break,
                Err(DriverError::GameOver) => {
                    debug!(%perspective, steps_seen, "engine reported game over");
                    break;
                }
                Err(source) => {
                    return Err(ExtractError::Step {
                        perspective,
                        steps_seen,
                        source,
                    });
                }
            };
            steps_seen += 1;

            if step.time > self.config.end_time {
                debug!(%perspective, time = step.time, "window end reached");
                break;
            }

            // Events drain on every step. Deaths are gated by the cache:
            // before the window opens the cache is empty, so nothing can
            // be emitted for units that were never sampled.
            for event in &step.events {
                match event {
                    GameEvent::UnitDestroyed { tag } => {
                        deaths.record_destroyed(step.time, *tag, &mut cache);
                    }
                    GameEvent::UpgradeCompleted(upgrade) => {
                        upgrades.record(step.time, upgrade);
                    }
                }
            }

            if step.time < self.config.start_time {
                continue;
            }

            for unit in &step.units {
                cache.record(step.time, unit);
            }
            if step.iteration % self.config.interval == 0 {
                cache.flush_into(&mut units);
            }
            resources.sample(step.time, &step.resources);
        }

        info!(
            %perspective,
            steps_seen,
            unit_rows = units.len(),
            deaths = deaths.len(),
            resource_ticks = resources.len(),
            "perspective run complete"
        );

        Ok(PerspectiveLog {
            perspective,
            units,
            deaths: deaths.into_events(),
            resources: resources.into_snapshots(),
            upgrades: upgrades.into_completions(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fogline_core::UnitTag;
    use fogline_test_utils::{economy, step_at, units, ScriptedSession, SessionEnd};
    use smallvec::smallvec;

    fn config(start: f64, end: f64, interval: u64) -> ExtractionConfig {
        ExtractionConfig {
            start_time: start,
            end_time: end,
            interval,
        }
    }

    /// Steps at 1-second cadence with one marine per player, iterations
    /// matching the index.
    fn simple_steps(n: u64) -> Vec<fogline_core::Step> {
        (0..n)
            .map(|i| {
                step_at(
                    i as f64,
                    i,
                    vec![
                        units::marine(100, 1, i as f32, 0.0),
                        units::marine(200, 2, 0.0, i as f32),
                    ],
                    economy(50 + i as u32, 0, 15.0, 12.0, 1.0),
                )
            })
            .collect()
    }

    #[test]
    fn samples_only_on_interval_steps() {
        let session = ScriptedSession::new(simple_steps(10), SessionEnd::Clean);
        let runner = PerspectiveRunner::new(config(0.0, 100.0, 4));
        let log = runner.run(Perspective::P1, session).unwrap();

        // Iterations 0, 4, 8 flush; two units each.
        assert_eq!(log.units.len(), 6);
        // Resources are full density.
        assert_eq!(log.resources.len(), 10);
        // Flushed state is the freshest as of the sampled step.
        assert_eq!(log.units[2].timestamp, 4.0);
    }

    #[test]
    fn no_partial_flush_at_end_of_run() {
        // 6 steps, interval 4: flushes at iterations 0 and 4 only; the
        // state recorded at step 5 stays in the interval cache.
        let session = ScriptedSession::new(simple_steps(6), SessionEnd::Clean);
        let runner = PerspectiveRunner::new(config(0.0, 100.0, 4));
        let log = runner.run(Perspective::P1, session).unwrap();
        assert_eq!(log.units.len(), 4);
    }

    #[test]
    fn window_start_skips_sampling_but_not_events() {
        let mut steps = simple_steps(10);
        // Destroy tag 100 at t=3, before the window opens at t=5.
        steps[3].events = smallvec![GameEvent::UnitDestroyed { tag: UnitTag(100) }];
        let session = ScriptedSession::new(steps, SessionEnd::Clean);
        let runner = PerspectiveRunner::new(config(5.0, 100.0, 1));
        let log = runner.run(Perspective::P1, session).unwrap();

        // Nothing cached before t=5, so the pre-window death is dropped.
        assert!(log.deaths.is_empty());
        // Sampling starts at t=5: 5 resource ticks (t=5..=9).
        assert_eq!(log.resources.len(), 5);
        assert_eq!(log.resources[0].timestamp, 5.0);
        // Tag 100 was destroyed before ever being sampled.
        assert!(log.units.iter().all(|o| o.unit_tag != UnitTag(100)));
    }

    #[test]
    fn window_end_terminates_run() {
        let session = ScriptedSession::new(simple_steps(100), SessionEnd::Clean);
        let runner = PerspectiveRunner::new(config(0.0, 9.0, 1));
        let log = runner.run(Perspective::P1, session).unwrap();
        // t=0..=9 inclusive; the t=10 step breaks the loop.
        assert_eq!(log.resources.len(), 10);
    }

    #[test]
    fn game_over_is_swallowed() {
        let session = ScriptedSession::new(simple_steps(5), SessionEnd::GameOver);
        let runner = PerspectiveRunner::new(config(0.0, 100.0, 1));
        let log = runner.run(Perspective::P2, session).unwrap();
        assert_eq!(log.resources.len(), 5);
        assert_eq!(log.perspective, Perspective::P2);
    }

    #[test]
    fn protocol_error_fails_the_run() {
        let session = ScriptedSession::new(
            simple_steps(5),
            SessionEnd::Protocol {
                reason: "websocket closed".into(),
            },
        );
        let runner = PerspectiveRunner::new(config(0.0, 100.0, 1));
        let err = runner.run(Perspective::P1, session).unwrap_err();
        match err {
            ExtractError::Step {
                perspective,
                steps_seen,
                source: DriverError::Protocol { .. },
            } => {
                assert_eq!(perspective, Perspective::P1);
                assert_eq!(steps_seen, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn death_mid_run_captures_last_cached_state() {
        let mut steps = simple_steps(10);
        steps[7].events = smallvec![GameEvent::UnitDestroyed { tag: UnitTag(200) }];
        // The engine no longer reports the unit on its death step.
        steps[7].units.retain(|u| u.tag != UnitTag(200));
        for step in &mut steps[8..] {
            step.units.retain(|u| u.tag != UnitTag(200));
        }
        let session = ScriptedSession::new(steps, SessionEnd::Clean);
        let runner = PerspectiveRunner::new(config(0.0, 100.0, 1));
        let log = runner.run(Perspective::P1, session).unwrap();

        assert_eq!(log.deaths.len(), 1);
        let death = &log.deaths[0];
        assert_eq!(death.unit_tag, UnitTag(200));
        assert_eq!(death.timestamp, 7.0);
        // Position from the last cached step (t=6).
        assert_eq!(death.position_y, 6.0);
    }

    #[test]
    fn upgrade_events_are_recorded() {
        let mut steps = simple_steps(10);
        steps[6].events = smallvec![GameEvent::UpgradeCompleted(fogline_core::UpgradeEvent {
            upgrade: "Stimpack".into(),
            player_id: 1,
            mineral_cost: 100,
            vespene_cost: 100,
            research_ticks: 2240.0,
        })];
        let session = ScriptedSession::new(steps, SessionEnd::Clean);
        let runner = PerspectiveRunner::new(config(0.0, 100.0, 1));
        let log = runner.run(Perspective::P1, session).unwrap();

        assert_eq!(log.upgrades.len(), 1);
        assert_eq!(log.upgrades[0].time_completed, 6.0);
    }
}
