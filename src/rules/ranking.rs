//! Finish order and game-end detection.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EndCondition, PlayerId, MAX_PLAYERS};

/// A player's place in the final standings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub rank: u8,
    /// False for the player left over under [`EndCondition::AllButOne`],
    /// who is last without ever finishing.
    pub finished: bool,
}

/// Records completion order and decides when the game is over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingTracker {
    player_count: usize,
    end_condition: EndCondition,
    finish_order: SmallVec<[PlayerId; MAX_PLAYERS]>,
}

impl RankingTracker {
    #[must_use]
    pub fn new(player_count: usize, end_condition: EndCondition) -> Self {
        Self {
            player_count,
            end_condition,
            finish_order: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn end_condition(&self) -> EndCondition {
        self.end_condition
    }

    /// Players that finished, first finisher first.
    #[must_use]
    pub fn finish_order(&self) -> &[PlayerId] {
        &self.finish_order
    }

    #[must_use]
    pub fn has_finished(&self, player: PlayerId) -> bool {
        self.finish_order.contains(&player)
    }

    /// Record that `player` brought every token home and return their rank.
    ///
    /// Recording the same player twice returns the original rank.
    pub fn record_finish(&mut self, player: PlayerId) -> u8 {
        if let Some(pos) = self.finish_order.iter().position(|&p| p == player) {
            return pos as u8 + 1;
        }
        self.finish_order.push(player);
        self.finish_order.len() as u8
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        let finished = self.finish_order.len();
        match self.end_condition {
            EndCondition::AllButOne => finished + 1 >= self.player_count,
            EndCondition::AllFinish => finished >= self.player_count,
        }
    }

    /// First seat after `current` (wrapping, `current` itself last) that
    /// has not finished. `None` once everybody has.
    #[must_use]
    pub fn next_to_act(&self, current: PlayerId) -> Option<PlayerId> {
        let mut candidate = current;
        for _ in 0..self.player_count {
            candidate = candidate.next(self.player_count);
            if !self.has_finished(candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// Finishers in order, followed by anyone left unfinished in seat order.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .finish_order
            .iter()
            .enumerate()
            .map(|(i, &player)| Standing {
                player,
                rank: i as u8 + 1,
                finished: true,
            })
            .collect();

        let next_rank = standings.len() as u8 + 1;
        standings.extend(
            PlayerId::all(self.player_count)
                .filter(|p| !self.has_finished(*p))
                .map(|player| Standing {
                    player,
                    rank: next_rank,
                    finished: false,
                }),
        );
        standings
    }
}
