//! Player agents: the engine's input boundary.
//!
//! The engine never picks a token itself. Whoever drives a seat (a human
//! behind a prompt, a network client, a strategy) implements
//! [`PlayerAgent`]. Two reference agents are provided for simulations:
//!
//! - [`FirstLegalAgent`]: always moves the lowest-indexed legal token
//! - [`RandomAgent`]: picks uniformly among legal tokens

use crate::core::{GameRng, GameState, PlayerId, TokenIndex};
use crate::error::TurnError;

/// Decides which token to move.
pub trait PlayerAgent {
    /// Acknowledgment before each roll. Blocking here pauses the turn.
    fn ready_to_roll(&mut self, _state: &GameState, _player: PlayerId) {}

    /// Pick one token for `roll`. `legal` is never empty.
    ///
    /// Returning a token outside `legal` is rejected without changing the
    /// game; the agent is told via [`PlayerAgent::choice_rejected`] and asked
    /// again.
    fn choose_token(
        &mut self,
        state: &GameState,
        player: PlayerId,
        roll: u8,
        legal: &[TokenIndex],
    ) -> TokenIndex;

    fn choice_rejected(&mut self, _error: &TurnError) {}
}

impl<A: PlayerAgent + ?Sized> PlayerAgent for Box<A> {
    fn ready_to_roll(&mut self, state: &GameState, player: PlayerId) {
        (**self).ready_to_roll(state, player);
    }

    fn choose_token(
        &mut self,
        state: &GameState,
        player: PlayerId,
        roll: u8,
        legal: &[TokenIndex],
    ) -> TokenIndex {
        (**self).choose_token(state, player, roll, legal)
    }

    fn choice_rejected(&mut self, error: &TurnError) {
        (**self).choice_rejected(error);
    }
}

/// Moves the first legal token.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegalAgent;

impl PlayerAgent for FirstLegalAgent {
    fn choose_token(
        &mut self,
        _state: &GameState,
        _player: PlayerId,
        _roll: u8,
        legal: &[TokenIndex],
    ) -> TokenIndex {
        legal[0]
    }
}

/// Moves a uniformly random legal token.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl PlayerAgent for RandomAgent {
    fn choose_token(
        &mut self,
        _state: &GameState,
        _player: PlayerId,
        _roll: u8,
        legal: &[TokenIndex],
    ) -> TokenIndex {
        self.rng.choose(legal).copied().unwrap_or(legal[0])
    }
}
