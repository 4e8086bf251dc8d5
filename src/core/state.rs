//! Shared board state.
//!
//! ## GameState
//!
//! Everything that changes during play: every player's tokens, whose turn it
//! is, the finish order, the game-over flag and the event history. It is
//! mutated only by the turn controller; in the concurrent configuration the
//! controller itself is reachable only under the scheduler's lock.
//!
//! The history uses `im::Vector`, so cloning a state for a renderer or a
//! replay is cheap.
//!
//! ## BoardSnapshot
//!
//! A flattened, renderable view: player name to ordered token states.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::board::TrackPosition;
use super::config::LudoConfig;
use super::player::{Player, PlayerId, PlayerMap, Token};
use crate::events::{EventRecord, GameEvent};
use crate::rules::RankingTracker;

/// Mutable aggregate of the game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    players: PlayerMap<Player>,

    /// Player whose turn it is.
    current: PlayerId,

    /// Turn number (starts at 1, bumped whenever control passes).
    turn_number: u32,

    /// Next event sequence number.
    sequence: u32,

    ranking: RankingTracker,

    history: Vector<EventRecord>,
}

impl GameState {
    /// Seat players in the order their names are given, all tokens in the yard.
    ///
    /// `config` must already be validated and `names.len()` must equal
    /// `config.player_count`.
    #[must_use]
    pub(crate) fn new(config: &LudoConfig, names: &[String]) -> Self {
        let players = PlayerMap::new(config.player_count, |id| {
            Player::new(id, names[id.index()].clone(), config.tokens_per_player)
        });

        Self {
            players,
            current: PlayerId::new(0),
            turn_number: 1,
            sequence: 0,
            ranking: RankingTracker::new(config.player_count, config.end_condition),
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn ranking(&self) -> &RankingTracker {
        &self.ranking
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.ranking.is_game_over()
    }

    /// Every event so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<EventRecord> {
        &self.history
    }

    /// Position of every token, by player then token index.
    pub fn positions(&self) -> impl Iterator<Item = (PlayerId, &Token)> {
        self.players
            .iter()
            .flat_map(|(id, p)| p.tokens().iter().map(move |t| (id, t)))
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            turn: self.turn_number,
            current: self.current,
            game_over: self.is_game_over(),
            players: self
                .players
                .iter()
                .map(|(id, p)| PlayerSnapshot {
                    id,
                    name: p.name.clone(),
                    tokens: p.tokens().iter().map(|t| t.position).collect(),
                    finished: p.finished(),
                    rank: p.rank(),
                })
                .collect(),
        }
    }

    // === Mutation (turn controller only) ===

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    pub(crate) fn players_mut(&mut self) -> &mut PlayerMap<Player> {
        &mut self.players
    }

    pub(crate) fn ranking_mut(&mut self) -> &mut RankingTracker {
        &mut self.ranking
    }

    /// Hand the turn to `next`, bumping the turn number if it changed hands.
    pub(crate) fn set_current(&mut self, next: PlayerId) {
        if next != self.current {
            self.turn_number += 1;
        }
        self.current = next;
    }

    /// Stamp and append an event, returning the stored record.
    pub(crate) fn record(&mut self, event: GameEvent) -> EventRecord {
        let record = EventRecord::new(self.turn_number, self.sequence, event);
        self.sequence += 1;
        self.history.push_back(record.clone());
        record
    }
}

/// One player's row in a [`BoardSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub tokens: Vec<TrackPosition>,
    pub finished: u8,
    pub rank: Option<u8>,
}

/// Renderable view of the board after a state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub turn: u32,
    pub current: PlayerId,
    pub game_over: bool,
    pub players: Vec<PlayerSnapshot>,
}

impl BoardSnapshot {
    /// Token states of the player with display name `name`.
    #[must_use]
    pub fn tokens_of(&self, name: &str) -> Option<&[TrackPosition]> {
        self.players
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.tokens.as_slice())
    }
}
