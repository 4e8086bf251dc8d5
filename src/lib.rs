//! # rust-ludo
//!
//! A Ludo rules engine with a turn state machine and two turn schedulers.
//!
//! ## Design Principles
//!
//! 1. **Rules Are Pure**: [`Rules::evaluate_move`] only inspects the board.
//!    Nothing changes until a planned move is applied.
//!
//! 2. **Variants Are Configuration**: home entry (exact roll or overshoot),
//!    the end condition (all but one or everybody finishes) and blocking on
//!    entry are fields of [`LudoConfig`], never hardcoded.
//!
//! 3. **No I/O In The Engine**: input arrives through [`PlayerAgent`],
//!    output leaves as [`GameEvent`] values and [`BoardSnapshot`]s handed
//!    to a [`GameObserver`].
//!
//! ## Architecture
//!
//! - **One Mutation Path**: only the [`TurnController`] changes the
//!   [`GameState`]. Schedulers decide *when* it runs, never *what* it does.
//!
//! - **Persistent History**: the event log is an `im::Vector`, so cloning a
//!   state for analysis is cheap.
//!
//! - **Deterministic Dice**: [`GameRng`] is seeded ChaCha8, so a seed and a
//!   set of deterministic agents replay a game exactly, under either
//!   scheduler.
//!
//! ## Modules
//!
//! - `core`: board geometry, players and tokens, state, dice, configuration
//! - `rules`: move legality and resolution, finish ranking
//! - `turn`: the turn controller (rolls, bonus chains, forfeits, passing)
//! - `scheduler`: sequential and thread-per-agent turn scheduling
//! - `events`: narration events and observers
//! - `agents`: the player input boundary and reference agents
//! - `error`: error types
//!
//! ## Example
//!
//! ```
//! use rust_ludo::{FirstLegalAgent, GameRng, LudoConfig, NullObserver};
//! use rust_ludo::{SequentialScheduler, TurnController};
//!
//! let names = vec!["Red".to_string(), "Blue".to_string()];
//! let mut game = TurnController::new(LudoConfig::new(2), names).unwrap();
//! let mut scheduler = SequentialScheduler::new(GameRng::new(42), NullObserver);
//!
//! let result = scheduler
//!     .run(&mut game, &mut [FirstLegalAgent, FirstLegalAgent])
//!     .unwrap();
//! assert!(result.winner().is_some());
//! ```

pub mod agents;
pub mod core;
pub mod error;
pub mod events;
pub mod rules;
pub mod scheduler;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    Board, Destination, TrackPosition,
    Player, PlayerId, PlayerMap, Token, TokenIndex, MAX_TOKENS,
    Dice, GameRng, GameRngState, ScriptedDice,
    EndCondition, HomeEntryRule, LudoConfig, MAX_PLAYERS, MIN_PLAYERS,
    BoardSnapshot, GameState, PlayerSnapshot,
};

pub use crate::rules::{
    AppliedMove, Capture, MoveOutcome, PlannedMove, Rules,
    RankingTracker, Standing,
};

pub use crate::turn::{
    MoveReport, PhaseKind, RollOutcome, TurnController, TurnEnd, TurnPhase, TurnSummary,
};

pub use crate::scheduler::{ConcurrentScheduler, GameResult, SequentialScheduler};

pub use crate::events::{EventLog, EventRecord, GameEvent, GameObserver, NullObserver};

pub use crate::agents::{FirstLegalAgent, PlayerAgent, RandomAgent};

pub use crate::error::{ConfigError, SchedulerError, TurnError};
