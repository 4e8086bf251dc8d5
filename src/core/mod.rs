//! Core engine types: board geometry, players and tokens, state, dice,
//! configuration.
//!
//! Nothing in this module decides what is legal; it only stores and
//! describes the board. Rules live in [`crate::rules`].

pub mod board;
pub mod player;
pub mod rng;
pub mod config;
pub mod state;

pub use board::{Board, Destination, TrackPosition};
pub use player::{Player, PlayerId, PlayerMap, Token, TokenIndex, MAX_TOKENS};
pub use rng::{Dice, GameRng, GameRngState, ScriptedDice};
pub use config::{EndCondition, HomeEntryRule, LudoConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use state::{BoardSnapshot, GameState, PlayerSnapshot};
