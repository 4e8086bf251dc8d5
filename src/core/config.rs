//! Game configuration.
//!
//! Every rule variant that differs between Ludo implementations is an
//! explicit field here rather than a hardcoded choice:
//! - `HomeEntryRule`: exact roll vs. any overshoot to finish
//! - `EndCondition`: stop when all but one finished vs. when all finished
//! - `block_on_entry`: whether an own token on the start cell blocks entry
//!
//! Configs load from TOML and must pass [`LudoConfig::validate`] before a
//! game is created.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::player::MAX_TOKENS;

/// Fewest players a game may seat.
pub const MIN_PLAYERS: usize = 2;
/// Most players a game may seat.
pub const MAX_PLAYERS: usize = 4;

/// How a token on the track enters home.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeEntryRule {
    /// Only a roll landing exactly on the finish threshold enters home.
    #[default]
    Exact,
    /// Any roll reaching or passing the finish threshold enters home.
    Overshoot,
}

/// When the game is over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndCondition {
    /// Ends once a single player is left unfinished; that player is last.
    #[default]
    AllButOne,
    /// Ends only when every player has finished.
    AllFinish,
}

/// Complete rules configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LudoConfig {
    /// Seated players (2-4).
    pub player_count: usize,

    /// Tokens each player races home (1-4).
    pub tokens_per_player: usize,

    /// Cells on the shared track; also the finish threshold.
    pub track_length: u32,

    /// Faces on the die. Rolling the top face grants a bonus roll.
    pub die_faces: u8,

    /// Roll required to bring a token out of the yard.
    pub entry_value: u8,

    /// Cells where tokens cannot be captured.
    pub safe_zones: Vec<u32>,

    /// Consecutive top-face rolls that forfeit the turn.
    pub forfeit_threshold: u8,

    pub home_entry: HomeEntryRule,

    pub end_condition: EndCondition,

    /// An own token on the start cell blocks entering from the yard.
    pub block_on_entry: bool,
}

impl Default for LudoConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            tokens_per_player: MAX_TOKENS,
            track_length: 52,
            die_faces: 6,
            entry_value: 6,
            safe_zones: vec![0, 13, 26, 39],
            forfeit_threshold: 3,
            home_entry: HomeEntryRule::Exact,
            end_condition: EndCondition::AllButOne,
            block_on_entry: true,
        }
    }
}

impl LudoConfig {
    /// Default rules for `player_count` players.
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LudoConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// The top die face.
    #[must_use]
    pub fn max_face(&self) -> u8 {
        self.die_faces
    }

    /// Check every field; the only fatal precondition of the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount {
                got: self.player_count,
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }
        if !(1..=MAX_TOKENS).contains(&self.tokens_per_player) {
            return Err(ConfigError::TokenCount {
                got: self.tokens_per_player,
                max: MAX_TOKENS,
            });
        }
        if self.die_faces < 2 {
            return Err(ConfigError::DieFaces(self.die_faces));
        }
        if self.entry_value == 0 || self.entry_value > self.die_faces {
            return Err(ConfigError::EntryValue {
                entry: self.entry_value,
                faces: self.die_faces,
            });
        }
        if self.track_length <= u32::from(self.die_faces) {
            return Err(ConfigError::TrackLength {
                length: self.track_length,
                faces: self.die_faces,
            });
        }
        if let Some(&position) = self.safe_zones.iter().find(|&&p| p >= self.track_length) {
            return Err(ConfigError::SafeZoneOutOfRange {
                position,
                length: self.track_length,
            });
        }
        if self.forfeit_threshold == 0 {
            return Err(ConfigError::ForfeitThreshold);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    #[must_use]
    pub fn with_tokens_per_player(mut self, count: usize) -> Self {
        self.tokens_per_player = count;
        self
    }

    /// Set the track length. Safe zones are left untouched.
    #[must_use]
    pub fn with_track_length(mut self, length: u32) -> Self {
        self.track_length = length;
        self
    }

    #[must_use]
    pub fn with_die_faces(mut self, faces: u8) -> Self {
        self.die_faces = faces;
        self
    }

    #[must_use]
    pub fn with_entry_value(mut self, value: u8) -> Self {
        self.entry_value = value;
        self
    }

    #[must_use]
    pub fn with_safe_zones(mut self, cells: impl Into<Vec<u32>>) -> Self {
        self.safe_zones = cells.into();
        self
    }

    #[must_use]
    pub fn with_forfeit_threshold(mut self, threshold: u8) -> Self {
        self.forfeit_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_home_entry(mut self, rule: HomeEntryRule) -> Self {
        self.home_entry = rule;
        self
    }

    #[must_use]
    pub fn with_end_condition(mut self, condition: EndCondition) -> Self {
        self.end_condition = condition;
        self
    }

    #[must_use]
    pub fn with_block_on_entry(mut self, block: bool) -> Self {
        self.block_on_entry = block;
        self
    }
}
