//! Game rules.
//!
//! - [`Rules`]: move legality and resolution (entry, blocking, home entry,
//!   captures)
//! - [`RankingTracker`]: finish order and the configured end condition
//!
//! Rules never decide whose turn it is; that is the turn controller's job.

pub mod movement;
pub mod ranking;

pub use movement::{AppliedMove, Capture, MoveOutcome, PlannedMove, Rules};
pub use ranking::{RankingTracker, Standing};
