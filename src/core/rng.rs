//! Dice and deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces an identical game
//! - **Serializable**: O(1) state capture and restore for replays
//! - **Pluggable**: the turn controller rolls through the [`Dice`] trait,
//!   so tests can script exact roll sequences with [`ScriptedDice`]
//!
//! ```
//! use rust_ludo::core::{Dice, GameRng};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.roll(6), b.roll(6));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of die rolls.
pub trait Dice {
    /// Roll a die with faces `1..=max_face`.
    fn roll(&mut self, max_face: u8) -> u8;
}

/// Seeded ChaCha8 RNG.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the operating system. Log [`GameRng::seed`] to replay.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl Dice for GameRng {
    fn roll(&mut self, max_face: u8) -> u8 {
        self.inner.gen_range(1..=max_face)
    }
}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of
/// how many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed roll sequence, cycling when exhausted.
///
/// Values above the die's top face are clamped to it.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    rolls: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    /// # Panics
    ///
    /// Panics if `rolls` is empty or contains a zero.
    pub fn new(rolls: impl Into<Vec<u8>>) -> Self {
        let rolls = rolls.into();
        assert!(!rolls.is_empty(), "ScriptedDice needs at least one roll");
        assert!(rolls.iter().all(|&r| r > 0), "die rolls start at 1");
        Self { rolls, cursor: 0 }
    }

    /// Rolls handed out so far.
    #[must_use]
    pub fn rolled(&self) -> usize {
        self.cursor
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, max_face: u8) -> u8 {
        let value = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        value.min(max_face)
    }
}

impl<D: Dice + ?Sized> Dice for Box<D> {
    fn roll(&mut self, max_face: u8) -> u8 {
        (**self).roll(max_face)
    }
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn roll(&mut self, max_face: u8) -> u8 {
        (**self).roll(max_face)
    }
}
