//! Replay metadata record, persisted as a sidecar next to the parquet
//! artifacts and consumed by downstream feature scripts.
//!
//! The driver supplies this record — unpacking the replay archive itself
//! is the collaborator's concern, not the core's.

use serde::{Deserialize, Serialize};

/// Playable race of one participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Race {
    /// Terran.
    Terran,
    /// Protoss.
    Protoss,
    /// Zerg.
    Zerg,
    /// Random pick, resolved in-game.
    Random,
}

/// Final outcome for one participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// The player won.
    Win,
    /// The player lost.
    Loss,
    /// The game ended in a tie.
    Tie,
    /// The replay carries no decision for this player.
    Undecided,
}

/// One participant's metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerMetadata {
    /// Engine player ID (1 or 2).
    pub player_id: u32,
    /// Display name.
    pub name: String,
    /// Race played.
    pub race: Race,
    /// Final result. The win/loss label downstream models train on.
    pub result: GameResult,
}

/// Replay-level metadata keyed by replay identifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayMetadata {
    /// Replay identifier (the numeric filename prefix for ladder dumps).
    pub replay_id: String,
    /// Map title.
    pub map_name: String,
    /// Game duration, seconds.
    pub duration_seconds: f64,
    /// Both participants, in player-ID order.
    pub players: Vec<PlayerMetadata>,
}

impl ReplayMetadata {
    /// Look up a participant by engine player ID.
    pub fn player(&self, player_id: u32) -> Option<&PlayerMetadata> {
        self.players.iter().find(|p| p.player_id == player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReplayMetadata {
        ReplayMetadata {
            replay_id: "4299043".into(),
            map_name: "Ley Lines AIE".into(),
            duration_seconds: 843.5,
            players: vec![
                PlayerMetadata {
                    player_id: 1,
                    name: "Xena".into(),
                    race: Race::Protoss,
                    result: GameResult::Win,
                },
                PlayerMetadata {
                    player_id: 2,
                    name: "negativeZero".into(),
                    race: Race::Terran,
                    result: GameResult::Loss,
                },
            ],
        }
    }

    #[test]
    fn player_lookup_by_id() {
        let meta = sample();
        assert_eq!(meta.player(2).unwrap().name, "negativeZero");
        assert!(meta.player(3).is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let meta = sample();
        let json = serde_json::to_string(&meta).unwrap();
        let back: ReplayMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }
}
