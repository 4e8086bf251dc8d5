//! Observers: consumers of events and board snapshots.

use crate::core::BoardSnapshot;

use super::event::EventRecord;

/// Receives every event and a snapshot after every state change.
///
/// Called while the caller holds exclusive access to the game, so an
/// observer sees each turn as one uninterrupted sequence.
pub trait GameObserver {
    fn on_event(&mut self, record: &EventRecord);

    fn on_snapshot(&mut self, _snapshot: &BoardSnapshot) {}
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {
    fn on_event(&mut self, _record: &EventRecord) {}
}

/// Keeps everything it is shown.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<EventRecord>,
    pub snapshots: Vec<BoardSnapshot>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, record: &EventRecord) {
        self.events.push(record.clone());
    }

    fn on_snapshot(&mut self, snapshot: &BoardSnapshot) {
        self.snapshots.push(snapshot.clone());
    }
}

impl<O: GameObserver + ?Sized> GameObserver for &mut O {
    fn on_event(&mut self, record: &EventRecord) {
        (**self).on_event(record);
    }

    fn on_snapshot(&mut self, snapshot: &BoardSnapshot) {
        (**self).on_snapshot(snapshot);
    }
}

impl<O: GameObserver + ?Sized> GameObserver for Box<O> {
    fn on_event(&mut self, record: &EventRecord) {
        (**self).on_event(record);
    }

    fn on_snapshot(&mut self, snapshot: &BoardSnapshot) {
        (**self).on_snapshot(snapshot);
    }
}
