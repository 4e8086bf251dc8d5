//! Board geometry: track positions, safe zones and position arithmetic.
//!
//! All players share one circular track of `track_length` cells. Every token
//! enters at cell 0 and finishes once it has travelled `track_length` cells,
//! so the finish threshold equals the track length. Nothing here holds game
//! state.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::config::{HomeEntryRule, LudoConfig};

/// Where a token is.
///
/// Invariant: an `OnTrack` cell is always `< track_length`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackPosition {
    /// Not yet entered.
    InYard,
    /// On the shared track.
    OnTrack(u32),
    /// Finished; immovable and immune to capture.
    InHome,
}

impl TrackPosition {
    #[must_use]
    pub const fn is_home(self) -> bool {
        matches!(self, TrackPosition::InHome)
    }

    #[must_use]
    pub const fn is_yard(self) -> bool {
        matches!(self, TrackPosition::InYard)
    }

    /// The track cell, if the token is on the track.
    #[must_use]
    pub const fn cell(self) -> Option<u32> {
        match self {
            TrackPosition::OnTrack(cell) => Some(cell),
            _ => None,
        }
    }
}

impl std::fmt::Display for TrackPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackPosition::InYard => write!(f, "Yard"),
            TrackPosition::OnTrack(cell) => write!(f, "{}", cell),
            TrackPosition::InHome => write!(f, "Home"),
        }
    }
}

/// Result of advancing a track cell by a roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Track(u32),
    Home,
    /// Past the finish under the exact-roll rule.
    Overshoot,
}

/// Static board geometry derived from a validated config.
#[derive(Clone, Debug)]
pub struct Board {
    track_length: u32,
    safe_zones: FxHashSet<u32>,
    home_entry: HomeEntryRule,
}

impl Board {
    #[must_use]
    pub fn new(config: &LudoConfig) -> Self {
        Self {
            track_length: config.track_length,
            safe_zones: config.safe_zones.iter().copied().collect(),
            home_entry: config.home_entry,
        }
    }

    #[must_use]
    pub fn track_length(&self) -> u32 {
        self.track_length
    }

    /// Distance a token travels before it is home.
    #[must_use]
    pub fn finish_threshold(&self) -> u32 {
        self.track_length
    }

    /// Cell a token lands on when it leaves the yard.
    #[must_use]
    pub const fn start_cell(&self) -> u32 {
        0
    }

    #[must_use]
    pub fn home_entry(&self) -> HomeEntryRule {
        self.home_entry
    }

    /// True iff `cell` is a capture-free cell.
    #[must_use]
    pub fn is_safe_zone(&self, cell: u32) -> bool {
        self.safe_zones.contains(&cell)
    }

    /// Sorted safe-zone cells.
    #[must_use]
    pub fn safe_zones(&self) -> Vec<u32> {
        let mut cells: Vec<u32> = self.safe_zones.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// Advance from track cell `from` by `roll` under the active home rule.
    ///
    /// A step past `u32::MAX` is always beyond the finish threshold.
    #[must_use]
    pub fn destination(&self, from: u32, roll: u8) -> Destination {
        let threshold = self.finish_threshold();
        let target = match from.checked_add(u32::from(roll)) {
            Some(target) if target < threshold => return Destination::Track(target),
            Some(target) => target,
            None => return self.past_threshold(false),
        };
        self.past_threshold(target == threshold)
    }

    fn past_threshold(&self, exact: bool) -> Destination {
        match self.home_entry {
            HomeEntryRule::Overshoot => Destination::Home,
            HomeEntryRule::Exact if exact => Destination::Home,
            HomeEntryRule::Exact => Destination::Overshoot,
        }
    }
}
