//! Narration events emitted by the turn controller.
//!
//! Events are plain values. The engine never formats text; renderers match
//! on [`GameEvent`] and present it however they like.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, TokenIndex, TrackPosition};
use crate::rules::Standing;

/// Something that happened during play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// A player begins a turn sequence.
    TurnStarted { player: PlayerId },

    Rolled { player: PlayerId, value: u8 },

    /// A token left the yard onto the start cell.
    TokenEntered { player: PlayerId, token: TokenIndex },

    /// A token advanced along the track (or into home).
    TokenMoved {
        player: PlayerId,
        token: TokenIndex,
        from: TrackPosition,
        to: TrackPosition,
    },

    /// An opponent's token was sent back to the yard.
    Captured {
        by: PlayerId,
        victim: PlayerId,
        token: TokenIndex,
        cell: u32,
    },

    /// The roll allowed no legal move.
    NoValidMoves { player: PlayerId, roll: u8 },

    /// The top face was rolled; the same player rolls again.
    BonusGranted { player: PlayerId, streak: u8 },

    /// Too many consecutive top-face rolls; the turn ends without a move.
    Forfeited { player: PlayerId, streak: u8 },

    /// The player brought every token home.
    PlayerFinished { player: PlayerId, rank: u8 },

    /// Control passes to another player.
    TurnPassed { from: PlayerId, to: PlayerId },

    GameOver { standings: Vec<Standing> },
}

impl GameEvent {
    /// The player the event is about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::TurnStarted { player }
            | GameEvent::Rolled { player, .. }
            | GameEvent::TokenEntered { player, .. }
            | GameEvent::TokenMoved { player, .. }
            | GameEvent::NoValidMoves { player, .. }
            | GameEvent::BonusGranted { player, .. }
            | GameEvent::Forfeited { player, .. }
            | GameEvent::PlayerFinished { player, .. } => Some(*player),
            GameEvent::Captured { by, .. } => Some(*by),
            GameEvent::TurnPassed { from, .. } => Some(*from),
            GameEvent::GameOver { .. } => None,
        }
    }
}

/// An event stamped with when it happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Turn number (starts at 1, bumped whenever control passes).
    pub turn: u32,

    /// Sequence number across the whole game.
    pub sequence: u32,

    pub event: GameEvent,
}

impl EventRecord {
    #[must_use]
    pub fn new(turn: u32, sequence: u32, event: GameEvent) -> Self {
        Self {
            turn,
            sequence,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_player() {
        let p1 = PlayerId::new(1);

        assert_eq!(GameEvent::Rolled { player: p1, value: 3 }.player(), Some(p1));
        assert_eq!(
            GameEvent::Captured {
                by: p1,
                victim: PlayerId::new(0),
                token: TokenIndex::new(2),
                cell: 10,
            }
            .player(),
            Some(p1)
        );
        assert_eq!(GameEvent::GameOver { standings: vec![] }.player(), None);
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = GameEvent::TokenEntered {
            player: PlayerId::new(0),
            token: TokenIndex::new(1),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"token_entered\""));

        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }

    #[test]
    fn test_event_record_serialization() {
        let record = EventRecord::new(
            3,
            17,
            GameEvent::TokenMoved {
                player: PlayerId::new(0),
                token: TokenIndex::new(0),
                from: TrackPosition::OnTrack(4),
                to: TrackPosition::InHome,
            },
        );

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: EventRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
