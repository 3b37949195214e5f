//! Strongly-typed identifiers for units and observing perspectives.

use std::fmt;

/// Opaque engine-assigned identifier for a unit.
///
/// Stable for the unit's lifetime and unique within a replay. The engine
/// reuses tags across replays, so a `UnitTag` is only meaningful together
/// with the replay it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitTag(pub u64);

impl fmt::Display for UnitTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UnitTag {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// One player's fog-of-war-limited view of a replay.
///
/// A replay is always extracted twice, once per perspective, and the two
/// observation streams are consolidated afterwards. The perspective also
/// names which player's units count as ground truth in that stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Perspective {
    /// Player 1's viewpoint.
    P1,
    /// Player 2's viewpoint.
    P2,
}

impl Perspective {
    /// Both perspectives, in extraction order.
    pub const BOTH: [Perspective; 2] = [Perspective::P1, Perspective::P2];

    /// The engine player ID observed from this perspective.
    pub fn player_id(self) -> u32 {
        match self {
            Self::P1 => 1,
            Self::P2 => 2,
        }
    }

    /// The other player's perspective.
    pub fn opponent(self) -> Self {
        match self {
            Self::P1 => Self::P2,
            Self::P2 => Self::P1,
        }
    }
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.player_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perspective_player_ids() {
        assert_eq!(Perspective::P1.player_id(), 1);
        assert_eq!(Perspective::P2.player_id(), 2);
    }

    #[test]
    fn perspective_opponent_is_involution() {
        for p in Perspective::BOTH {
            assert_eq!(p.opponent().opponent(), p);
            assert_ne!(p.opponent(), p);
        }
    }

    #[test]
    fn unit_tag_display_is_bare_number() {
        assert_eq!(UnitTag(4350279681).to_string(), "4350279681");
    }
}
