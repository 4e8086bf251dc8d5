//! Error types.
//!
//! Only configuration problems are fatal. Everything that can go wrong
//! during play is a recoverable [`TurnError`]: the turn does not advance and
//! the caller is expected to retry with a corrected input.

use std::path::PathBuf;

use crate::core::{PlayerId, TokenIndex};
use crate::turn::PhaseKind;

/// Invalid game setup, rejected before any state is created.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("player count must be between {min} and {max}, got {got}")]
    PlayerCount { got: usize, min: usize, max: usize },

    #[error("expected {expected} player names, got {got}")]
    NameCount { expected: usize, got: usize },

    #[error("tokens per player must be between 1 and {max}, got {got}")]
    TokenCount { got: usize, max: usize },

    #[error("die must have at least 2 faces, got {0}")]
    DieFaces(u8),

    #[error("entry value {entry} is not a face of a {faces}-sided die")]
    EntryValue { entry: u8, faces: u8 },

    #[error("track length must exceed the die's maximum face ({faces}), got {length}")]
    TrackLength { length: u32, faces: u8 },

    #[error("safe zone {position} lies outside a track of length {length}")]
    SafeZoneOutOfRange { position: u32, length: u32 },

    #[error("forfeit threshold must be at least 1")]
    ForfeitThreshold,

    #[error("failed to read config from {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A turn-level input that was rejected without changing the game state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("{player} cannot move token {token} (legal: {legal:?})")]
    InvalidChoice {
        player: PlayerId,
        token: TokenIndex,
        legal: Vec<TokenIndex>,
    },

    #[error("expected phase {expected:?}, controller is in {actual:?}")]
    WrongPhase {
        expected: PhaseKind,
        actual: PhaseKind,
    },

    #[error("roll {roll} outside 1..={max_face}")]
    RollOutOfRange { roll: u8, max_face: u8 },

    #[error("the game is already over")]
    GameOver,

    #[error("{player} has no token {token}")]
    UnknownToken { player: PlayerId, token: TokenIndex },

    #[error("{0} has already finished")]
    AlreadyFinished(PlayerId),
}

/// Failures of the turn scheduler itself, never of the game rules.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("expected one agent per player ({expected}), got {got}")]
    AgentCount { expected: usize, got: usize },

    #[error("shared board lock poisoned by a panicking agent")]
    Poisoned,

    #[error("agent thread for {0} panicked")]
    AgentPanicked(PlayerId),

    #[error(transparent)]
    Turn(#[from] TurnError),
}
