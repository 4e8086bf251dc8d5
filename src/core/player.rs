//! Players and their tokens.
//!
//! ## PlayerId
//!
//! Seat identifier, 0-based in turn order.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access, indexed by `PlayerId`.
//!
//! ## Player
//!
//! A player's tokens and aggregate progress: finished-token count, the
//! consecutive bonus-roll streak and the finish rank.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use super::board::TrackPosition;

/// Maximum number of tokens a player may own.
pub const MAX_TOKENS: usize = 4;

/// Player identifier. The first player to act is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use rust_ludo::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The seat after this one, wrapping around the table.
    #[must_use]
    pub const fn next(self, player_count: usize) -> Self {
        Self(((self.0 as usize + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Index of a token within its owner's token set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenIndex(pub u8);

impl TokenIndex {
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over the token indices of a player owning `count` tokens.
    pub fn all(count: usize) -> impl Iterator<Item = TokenIndex> {
        (0..count as u8).map(TokenIndex)
    }
}

impl std::fmt::Display for TokenIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use rust_ludo::core::{PlayerId, PlayerMap};
///
/// let mut finished: PlayerMap<u8> = PlayerMap::with_value(4, 0);
/// finished[PlayerId::new(1)] = 2;
/// assert_eq!(finished[PlayerId::new(1)], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();
        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data, or `None` for an unknown seat.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// A single token and where it currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub index: TokenIndex,
    pub position: TrackPosition,
}

impl Token {
    /// A fresh token waiting in the yard.
    #[must_use]
    pub const fn in_yard(index: TokenIndex) -> Self {
        Self {
            index,
            position: TrackPosition::InYard,
        }
    }
}

/// A seated player and their progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    tokens: SmallVec<[Token; MAX_TOKENS]>,
    finished: u8,
    consecutive_bonus: u8,
    rank: Option<u8>,
}

impl Player {
    /// Seat a player with every token in the yard.
    pub fn new(id: PlayerId, name: impl Into<String>, token_count: usize) -> Self {
        Self {
            id,
            name: name.into(),
            tokens: TokenIndex::all(token_count).map(Token::in_yard).collect(),
            finished: 0,
            consecutive_bonus: 0,
            rank: None,
        }
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn token(&self, index: TokenIndex) -> Option<&Token> {
        self.tokens.get(index.index())
    }

    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Number of tokens that have reached home.
    #[must_use]
    pub fn finished(&self) -> u8 {
        self.finished
    }

    /// True once every token is home.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.finished as usize == self.tokens.len()
    }

    #[must_use]
    pub fn consecutive_bonus(&self) -> u8 {
        self.consecutive_bonus
    }

    #[must_use]
    pub fn rank(&self) -> Option<u8> {
        self.rank
    }

    /// Whether another token of this player sits on track cell `cell`.
    #[must_use]
    pub fn occupies(&self, cell: u32, except: TokenIndex) -> bool {
        self.tokens
            .iter()
            .any(|t| t.index != except && t.position == TrackPosition::OnTrack(cell))
    }

    /// Tokens of this player sitting on track cell `cell`.
    pub fn tokens_at(&self, cell: u32) -> impl Iterator<Item = TokenIndex> + '_ {
        self.tokens
            .iter()
            .filter(move |t| t.position == TrackPosition::OnTrack(cell))
            .map(|t| t.index)
    }

    /// Move a token, keeping the finished count in step with `InHome`.
    pub(crate) fn set_position(&mut self, index: TokenIndex, position: TrackPosition) {
        let token = &mut self.tokens[index.index()];
        let was_home = token.position.is_home();
        token.position = position;
        match (was_home, position.is_home()) {
            (false, true) => self.finished += 1,
            (true, false) => self.finished -= 1,
            _ => {}
        }
    }

    /// Record a maximum-face roll, returning the new streak length.
    pub(crate) fn bump_bonus(&mut self) -> u8 {
        self.consecutive_bonus += 1;
        self.consecutive_bonus
    }

    pub(crate) fn reset_bonus(&mut self) {
        self.consecutive_bonus = 0;
    }

    pub(crate) fn assign_rank(&mut self, rank: u8) {
        debug_assert!(self.rank.is_none(), "rank assigned twice");
        self.rank = Some(rank);
    }
}
