//! Scripted driver and session: canned per-step streams with
//! configurable termination.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::path::Path;

use fogline_core::{
    DriverError, GameResult, Perspective, PlayerMetadata, Race, ReplayDriver, ReplayMetadata,
    ReplaySession, Step, TimeWindow,
};

/// How a scripted session terminates after its steps are exhausted.
#[derive(Clone, Debug)]
pub enum SessionEnd {
    /// `Ok(None)` — clean end of stream.
    Clean,
    /// `Err(DriverError::GameOver)` — the engine's end-of-replay signal.
    GameOver,
    /// `Err(DriverError::Protocol)` — a deterministic failure, for
    /// testing one-perspective-failed paths.
    Protocol {
        /// Reason string surfaced in the error.
        reason: String,
    },
}

/// A canned per-step stream for one perspective.
#[derive(Debug)]
pub struct ScriptedSession {
    steps: VecDeque<Step>,
    end: SessionEnd,
}

impl ScriptedSession {
    /// A session yielding `steps` in order, then terminating per `end`.
    pub fn new(steps: Vec<Step>, end: SessionEnd) -> Self {
        Self {
            steps: steps.into(),
            end,
        }
    }
}

impl ReplaySession for ScriptedSession {
    fn advance(&mut self) -> Result<Option<Step>, DriverError> {
        match self.steps.pop_front() {
            Some(step) => Ok(Some(step)),
            None => match &self.end {
                SessionEnd::Clean => Ok(None),
                SessionEnd::GameOver => Err(DriverError::GameOver),
                SessionEnd::Protocol { reason } => Err(DriverError::Protocol {
                    reason: reason.clone(),
                }),
            },
        }
    }
}

/// Both perspectives' scripted streams for one replay, plus metadata.
#[derive(Clone, Debug)]
pub struct ScriptedReplay {
    /// Player 1's steps.
    pub p1: Vec<Step>,
    /// Player 2's steps.
    pub p2: Vec<Step>,
    /// How player 1's session terminates.
    pub p1_end: SessionEnd,
    /// How player 2's session terminates.
    pub p2_end: SessionEnd,
    /// Metadata returned by the driver.
    pub metadata: ReplayMetadata,
}

impl ScriptedReplay {
    /// A replay where both sessions end cleanly.
    pub fn new(p1: Vec<Step>, p2: Vec<Step>, metadata: ReplayMetadata) -> Self {
        Self {
            p1,
            p2,
            p1_end: SessionEnd::Clean,
            p2_end: SessionEnd::Clean,
            metadata,
        }
    }

    /// Placeholder metadata for a replay id.
    pub fn placeholder_metadata(replay_id: &str) -> ReplayMetadata {
        ReplayMetadata {
            replay_id: replay_id.to_owned(),
            map_name: "Scripted Plateau".into(),
            duration_seconds: 600.0,
            players: vec![
                PlayerMetadata {
                    player_id: 1,
                    name: "alice".into(),
                    race: Race::Terran,
                    result: GameResult::Win,
                },
                PlayerMetadata {
                    player_id: 2,
                    name: "bob".into(),
                    race: Race::Zerg,
                    result: GameResult::Loss,
                },
            ],
        }
    }
}

/// A [`ReplayDriver`] over canned replays, keyed by file name.
///
/// `open` looks the replay up by the path's final component, so batch
/// code can use ordinary paths without any real files existing.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    replays: HashMap<String, ScriptedReplay>,
}

impl ScriptedDriver {
    /// An empty driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a replay under `file_name` (e.g. `"123_a_b_Map.SC2Replay"`).
    pub fn insert(&mut self, file_name: &str, replay: ScriptedReplay) {
        self.replays.insert(file_name.to_owned(), replay);
    }

    fn lookup(&self, replay: &Path) -> Result<&ScriptedReplay, DriverError> {
        let name = replay
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.replays
            .get(name)
            .ok_or_else(|| DriverError::ReplayNotFound {
                path: replay.to_owned(),
            })
    }
}

impl ReplayDriver for ScriptedDriver {
    type Session = ScriptedSession;

    fn open(
        &self,
        replay: &Path,
        perspective: Perspective,
        _window: TimeWindow,
    ) -> Result<Self::Session, DriverError> {
        let scripted = self.lookup(replay)?;
        let (steps, end) = match perspective {
            Perspective::P1 => (scripted.p1.clone(), scripted.p1_end.clone()),
            Perspective::P2 => (scripted.p2.clone(), scripted.p2_end.clone()),
        };
        Ok(ScriptedSession::new(steps, end))
    }

    fn metadata(&self, replay: &Path) -> Result<ReplayMetadata, DriverError> {
        Ok(self.lookup(replay)?.metadata.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{economy, step_at, units};

    fn one_step_replay() -> ScriptedReplay {
        let step = |player| {
            step_at(
                1.0,
                0,
                vec![units::marine(100 + u64::from(player), player, 0.0, 0.0)],
                economy(50, 0, 15.0, 12.0, 1.0),
            )
        };
        ScriptedReplay::new(
            vec![step(1)],
            vec![step(2)],
            ScriptedReplay::placeholder_metadata("7"),
        )
    }

    #[test]
    fn sessions_yield_scripted_steps_then_end() {
        let mut driver = ScriptedDriver::new();
        driver.insert("7_a_b_Map.SC2Replay", one_step_replay());

        let window = TimeWindow {
            start: 0.0,
            end: 100.0,
        };
        let mut session = driver
            .open(Path::new("7_a_b_Map.SC2Replay"), Perspective::P1, window)
            .unwrap();
        assert!(session.advance().unwrap().is_some());
        assert!(session.advance().unwrap().is_none());
    }

    #[test]
    fn unknown_replay_is_not_found() {
        let driver = ScriptedDriver::new();
        let window = TimeWindow {
            start: 0.0,
            end: 100.0,
        };
        let err = driver
            .open(Path::new("missing.SC2Replay"), Perspective::P1, window)
            .unwrap_err();
        assert!(matches!(err, DriverError::ReplayNotFound { .. }));
    }

    #[test]
    fn game_over_surfaces_after_steps() {
        let mut replay = one_step_replay();
        replay.p1_end = SessionEnd::GameOver;
        let mut driver = ScriptedDriver::new();
        driver.insert("7_a_b_Map.SC2Replay", replay);

        let window = TimeWindow {
            start: 0.0,
            end: 100.0,
        };
        let mut session = driver
            .open(Path::new("7_a_b_Map.SC2Replay"), Perspective::P1, window)
            .unwrap();
        assert!(session.advance().unwrap().is_some());
        assert!(matches!(
            session.advance().unwrap_err(),
            DriverError::GameOver
        ));
    }
}
