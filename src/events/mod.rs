//! Game events: the engine's output boundary.
//!
//! Every state change the turn controller makes is narrated as a
//! [`GameEvent`], stamped into an [`EventRecord`] and appended to the game
//! history. A [`GameObserver`] receives the same records as they happen,
//! followed by a fresh board snapshot.

mod event;
mod observer;

pub use event::{EventRecord, GameEvent};
pub use observer::{EventLog, GameObserver, NullObserver};
