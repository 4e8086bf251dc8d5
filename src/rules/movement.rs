//! Move legality and resolution.
//!
//! [`Rules::evaluate_move`] is a pure predicate: it reports whether a token
//! may move for a roll and, if so, exactly what would happen (destination and
//! captures). Nothing changes until [`Rules::apply_move`] is called with the
//! resulting plan, so the same evaluation filters a player's candidate
//! tokens and drives the actual move.

use smallvec::SmallVec;
use tracing::debug;

use crate::core::{
    Board, Destination, HomeEntryRule, LudoConfig, Player, PlayerId, PlayerMap, TokenIndex,
    TrackPosition, MAX_TOKENS,
};

/// Up to three opponents with four tokens each can share a cell.
const MAX_CAPTURES: usize = 12;

/// An opposing token that a move would send back to the yard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capture {
    pub victim: PlayerId,
    pub token: TokenIndex,
    pub cell: u32,
}

/// A legal move, fully resolved but not yet applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedMove {
    pub player: PlayerId,
    pub token: TokenIndex,
    pub from: TrackPosition,
    pub to: TrackPosition,
    pub captures: SmallVec<[Capture; MAX_CAPTURES]>,
}

impl PlannedMove {
    /// True when the move brings a token out of the yard.
    #[must_use]
    pub fn is_entry(&self) -> bool {
        self.from.is_yard()
    }
}

/// Result of evaluating one token for one roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Home already, stuck in the yard, overshooting, or not a real token.
    NotMovable,
    /// Another of the player's own tokens holds the destination cell.
    Blocked,
    Legal(PlannedMove),
}

impl MoveOutcome {
    #[must_use]
    pub fn is_legal(&self) -> bool {
        matches!(self, MoveOutcome::Legal(_))
    }
}

/// What applying a move did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedMove {
    pub plan: PlannedMove,
    /// The moved token reached home.
    pub reached_home: bool,
    /// The mover now has every token home.
    pub completed: bool,
}

/// Movement rules derived from a validated config.
#[derive(Clone, Debug)]
pub struct Rules {
    board: Board,
    entry_value: u8,
    max_face: u8,
    block_on_entry: bool,
}

impl Rules {
    #[must_use]
    pub fn new(config: &LudoConfig) -> Self {
        Self {
            board: Board::new(config),
            entry_value: config.entry_value,
            max_face: config.max_face(),
            block_on_entry: config.block_on_entry,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The home-entry variant these rules enforce.
    #[must_use]
    pub fn home_entry(&self) -> HomeEntryRule {
        self.board.home_entry()
    }

    #[must_use]
    pub fn entry_value(&self) -> u8 {
        self.entry_value
    }

    #[must_use]
    pub fn max_face(&self) -> u8 {
        self.max_face
    }

    /// Decide whether `token` of `player` may move `roll` cells.
    #[must_use]
    pub fn evaluate_move(
        &self,
        players: &PlayerMap<Player>,
        player: PlayerId,
        token: TokenIndex,
        roll: u8,
    ) -> MoveOutcome {
        if roll == 0 || roll > self.max_face {
            return MoveOutcome::NotMovable;
        }
        let Some(mover) = players.get(player) else {
            return MoveOutcome::NotMovable;
        };
        let Some(current) = mover.token(token) else {
            return MoveOutcome::NotMovable;
        };

        let from = current.position;
        let cell = match from {
            TrackPosition::InHome => return MoveOutcome::NotMovable,
            TrackPosition::InYard => {
                if roll != self.entry_value {
                    return MoveOutcome::NotMovable;
                }
                let start = self.board.start_cell();
                if self.block_on_entry && mover.occupies(start, token) {
                    return MoveOutcome::Blocked;
                }
                start
            }
            TrackPosition::OnTrack(cell) => match self.board.destination(cell, roll) {
                Destination::Overshoot => return MoveOutcome::NotMovable,
                Destination::Home => {
                    return MoveOutcome::Legal(PlannedMove {
                        player,
                        token,
                        from,
                        to: TrackPosition::InHome,
                        captures: SmallVec::new(),
                    });
                }
                Destination::Track(next) => {
                    if mover.occupies(next, token) {
                        return MoveOutcome::Blocked;
                    }
                    next
                }
            },
        };

        MoveOutcome::Legal(PlannedMove {
            player,
            token,
            from,
            to: TrackPosition::OnTrack(cell),
            captures: self.captures_at(players, player, cell),
        })
    }

    /// Opposing tokens a token of `player` arriving at `cell` would capture.
    fn captures_at(
        &self,
        players: &PlayerMap<Player>,
        player: PlayerId,
        cell: u32,
    ) -> SmallVec<[Capture; MAX_CAPTURES]> {
        if self.board.is_safe_zone(cell) {
            return SmallVec::new();
        }
        players
            .iter()
            .filter(|(id, _)| *id != player)
            .flat_map(|(victim, p)| {
                p.tokens_at(cell).map(move |token| Capture {
                    victim,
                    token,
                    cell,
                })
            })
            .collect()
    }

    /// Tokens of `player` that may legally move `roll` cells, in index order.
    #[must_use]
    pub fn legal_tokens(
        &self,
        players: &PlayerMap<Player>,
        player: PlayerId,
        roll: u8,
    ) -> SmallVec<[TokenIndex; MAX_TOKENS]> {
        let Some(mover) = players.get(player) else {
            return SmallVec::new();
        };
        TokenIndex::all(mover.token_count())
            .filter(|&t| self.evaluate_move(players, player, t, roll).is_legal())
            .collect()
    }

    /// True iff at least one token of `player` can move `roll` cells.
    #[must_use]
    pub fn has_any_legal_move(&self, players: &PlayerMap<Player>, player: PlayerId, roll: u8) -> bool {
        players.get(player).is_some_and(|mover| {
            TokenIndex::all(mover.token_count())
                .any(|t| self.evaluate_move(players, player, t, roll).is_legal())
        })
    }

    /// Apply a plan produced by [`Rules::evaluate_move`] against the same
    /// board. Captured tokens go back to the yard.
    pub fn apply_move(&self, players: &mut PlayerMap<Player>, plan: PlannedMove) -> AppliedMove {
        for capture in &plan.captures {
            debug!(
                by = %plan.player,
                victim = %capture.victim,
                token = %capture.token,
                cell = capture.cell,
                "token captured"
            );
            players[capture.victim].set_position(capture.token, TrackPosition::InYard);
        }

        let mover = &mut players[plan.player];
        mover.set_position(plan.token, plan.to);

        AppliedMove {
            reached_home: plan.to.is_home(),
            completed: mover.is_complete(),
            plan,
        }
    }
}
