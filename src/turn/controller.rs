//! The turn state machine.
//!
//! ```text
//!            ┌──────────── bonus roll ─────────────┐
//!            v                                      │
//!     AwaitingRoll ──roll──> AwaitingTokenChoice ──choose──┤
//!        │    ^                                     │
//!        │    └──── next player ──── TurnEnding <───┘
//!        │                              ^
//!        └── no move / forfeit ─────────┘
//!
//!     any state ──last required finisher──> GameOver
//! ```
//!
//! Each step is a separate call (`submit_roll`, `choose_token`, `end_turn`)
//! so a presentation layer can pause between them. [`TurnController::play_turn`]
//! runs a whole turn sequence, including every chained bonus roll, against
//! a [`PlayerAgent`].

use smallvec::SmallVec;
use tracing::{debug, info, instrument, warn};

use crate::agents::PlayerAgent;
use crate::core::{
    BoardSnapshot, Dice, GameState, LudoConfig, PlayerId, TokenIndex, TrackPosition, MAX_TOKENS,
};
use crate::error::{ConfigError, TurnError};
use crate::events::{EventRecord, GameEvent, GameObserver};
use crate::rules::{AppliedMove, MoveOutcome, Rules};

/// Where the controller is within a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingRoll,
    AwaitingTokenChoice {
        roll: u8,
        legal: SmallVec<[TokenIndex; MAX_TOKENS]>,
    },
    TurnEnding(TurnEnd),
    GameOver,
}

impl TurnPhase {
    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        match self {
            TurnPhase::AwaitingRoll => PhaseKind::AwaitingRoll,
            TurnPhase::AwaitingTokenChoice { .. } => PhaseKind::AwaitingTokenChoice,
            TurnPhase::TurnEnding(_) => PhaseKind::TurnEnding,
            TurnPhase::GameOver => PhaseKind::GameOver,
        }
    }
}

/// [`TurnPhase`] without its payload, for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseKind {
    AwaitingRoll,
    AwaitingTokenChoice,
    TurnEnding,
    GameOver,
}

/// Why a turn sequence ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnEnd {
    /// A move was made with a non-bonus roll.
    Moved,
    /// The roll allowed no move.
    NoValidMoves,
    /// Too many consecutive top-face rolls.
    Forfeited,
    /// The player brought their last token home.
    PlayerFinished,
    GameOver,
}

/// What a roll led to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RollOutcome {
    /// Pick one of `legal` with [`TurnController::choose_token`].
    ChooseToken {
        roll: u8,
        legal: SmallVec<[TokenIndex; MAX_TOKENS]>,
    },
    /// Nothing can move. With `bonus` the same player rolls again.
    NoValidMoves { roll: u8, bonus: bool },
    Forfeited { roll: u8 },
}

impl RollOutcome {
    #[must_use]
    pub fn roll(&self) -> u8 {
        match self {
            RollOutcome::ChooseToken { roll, .. }
            | RollOutcome::NoValidMoves { roll, .. }
            | RollOutcome::Forfeited { roll } => *roll,
        }
    }
}

/// Result of a confirmed token choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub applied: AppliedMove,
    /// Set when this move finished the player.
    pub rank: Option<u8>,
    /// The same player rolls again.
    pub bonus: bool,
}

/// Everything that happened in one player's turn sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnSummary {
    pub player: PlayerId,
    pub rolls: Vec<u8>,
    pub moves: Vec<MoveReport>,
    pub end: TurnEnd,
    /// Who acts next; `None` once the game is over.
    pub next: Option<PlayerId>,
}

/// Owns the game and enforces turn order.
#[derive(Clone, Debug)]
pub struct TurnController {
    config: LudoConfig,
    rules: Rules,
    state: GameState,
    phase: TurnPhase,
    pending: Vec<EventRecord>,
}

impl TurnController {
    /// Validate `config`, seat `names` in turn order and start player 0's turn.
    pub fn new(config: LudoConfig, names: Vec<String>) -> Result<Self, ConfigError> {
        config.validate()?;
        if names.len() != config.player_count {
            return Err(ConfigError::NameCount {
                expected: config.player_count,
                got: names.len(),
            });
        }

        let rules = Rules::new(&config);
        let state = GameState::new(&config, &names);
        let mut controller = Self {
            config,
            rules,
            state,
            phase: TurnPhase::AwaitingRoll,
            pending: Vec::new(),
        };

        info!(
            players = controller.config.player_count,
            home_entry = ?controller.config.home_entry,
            end_condition = ?controller.config.end_condition,
            "game created"
        );
        let first = controller.state.current_player();
        controller.emit(GameEvent::TurnStarted { player: first });
        Ok(controller)
    }

    #[must_use]
    pub fn config(&self) -> &LudoConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.state.snapshot()
    }

    /// Events recorded since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.pending)
    }

    /// Put a token somewhere without any rule checks or captures.
    ///
    /// Board setup for puzzles and tests. A player left with every token
    /// home is ranked and the game may end. If that player is the one to
    /// act, their turn ends as if the last token had walked home. Tokens
    /// of a ranked player stay put.
    pub fn place_token(
        &mut self,
        player: PlayerId,
        token: TokenIndex,
        position: TrackPosition,
    ) -> Result<(), TurnError> {
        if self.phase == TurnPhase::GameOver {
            return Err(TurnError::GameOver);
        }
        let known = self
            .state
            .players()
            .get(player)
            .and_then(|p| p.token(token))
            .is_some();
        if !known {
            return Err(TurnError::UnknownToken { player, token });
        }
        if self.state.ranking().has_finished(player) {
            return Err(TurnError::AlreadyFinished(player));
        }

        self.state.player_mut(player).set_position(token, position);
        if !self.state.player(player).is_complete() {
            return Ok(());
        }

        self.finish_player(player);
        if self.state.is_game_over() {
            self.finish_game();
        } else if player == self.state.current_player() {
            self.state.player_mut(player).reset_bonus();
            self.phase = TurnPhase::TurnEnding(TurnEnd::PlayerFinished);
        }
        Ok(())
    }

    /// Roll `dice` for the current player.
    pub fn roll(&mut self, dice: &mut (impl Dice + ?Sized)) -> Result<RollOutcome, TurnError> {
        self.expect_phase(PhaseKind::AwaitingRoll)?;
        let value = dice.roll(self.rules.max_face());
        self.submit_roll(value)
    }

    /// Resolve a roll made outside the engine.
    pub fn submit_roll(&mut self, roll: u8) -> Result<RollOutcome, TurnError> {
        self.expect_phase(PhaseKind::AwaitingRoll)?;
        let max_face = self.rules.max_face();
        if roll == 0 || roll > max_face {
            return Err(TurnError::RollOutOfRange { roll, max_face });
        }

        let player = self.state.current_player();
        self.emit(GameEvent::Rolled { player, value: roll });
        debug!(%player, roll, "rolled");

        let is_bonus = roll == max_face;
        if is_bonus {
            let streak = self.state.player_mut(player).bump_bonus();
            if streak >= self.config.forfeit_threshold {
                self.state.player_mut(player).reset_bonus();
                info!(%player, streak, "turn forfeited");
                self.emit(GameEvent::Forfeited { player, streak });
                self.phase = TurnPhase::TurnEnding(TurnEnd::Forfeited);
                return Ok(RollOutcome::Forfeited { roll });
            }
        } else {
            self.state.player_mut(player).reset_bonus();
        }

        let legal = self.rules.legal_tokens(self.state.players(), player, roll);
        if legal.is_empty() {
            self.emit(GameEvent::NoValidMoves { player, roll });
            if is_bonus {
                self.grant_bonus(player);
            } else {
                self.phase = TurnPhase::TurnEnding(TurnEnd::NoValidMoves);
            }
            return Ok(RollOutcome::NoValidMoves {
                roll,
                bonus: is_bonus,
            });
        }

        self.phase = TurnPhase::AwaitingTokenChoice {
            roll,
            legal: legal.clone(),
        };
        Ok(RollOutcome::ChooseToken { roll, legal })
    }

    /// Move `token` for the pending roll.
    ///
    /// A token outside the legal set is rejected with
    /// [`TurnError::InvalidChoice`] and nothing changes.
    pub fn choose_token(&mut self, token: TokenIndex) -> Result<MoveReport, TurnError> {
        let (roll, legal) = match &self.phase {
            TurnPhase::AwaitingTokenChoice { roll, legal } => (*roll, legal),
            other => {
                return Err(Self::phase_error(PhaseKind::AwaitingTokenChoice, other.kind()));
            }
        };
        let player = self.state.current_player();

        let plan = match self.rules.evaluate_move(self.state.players(), player, token, roll) {
            MoveOutcome::Legal(plan) if legal.contains(&token) => plan,
            _ => {
                let err = TurnError::InvalidChoice {
                    player,
                    token,
                    legal: legal.to_vec(),
                };
                warn!(%player, %token, roll, "rejected token choice");
                return Err(err);
            }
        };

        let applied = self.rules.apply_move(self.state.players_mut(), plan);
        self.narrate_move(&applied);

        let mut rank = None;
        let mut bonus = false;
        if applied.completed {
            rank = Some(self.finish_player(player));
            self.state.player_mut(player).reset_bonus();
            if self.state.is_game_over() {
                self.finish_game();
            } else {
                self.phase = TurnPhase::TurnEnding(TurnEnd::PlayerFinished);
            }
        } else if roll == self.rules.max_face() {
            bonus = true;
            self.grant_bonus(player);
        } else {
            self.phase = TurnPhase::TurnEnding(TurnEnd::Moved);
        }

        Ok(MoveReport {
            applied,
            rank,
            bonus,
        })
    }

    /// Pass control to the next player who has not finished.
    pub fn end_turn(&mut self) -> Result<PlayerId, TurnError> {
        self.expect_phase(PhaseKind::TurnEnding)?;
        let from = self.state.current_player();
        let Some(next) = self.state.ranking().next_to_act(from) else {
            self.finish_game();
            return Err(TurnError::GameOver);
        };

        self.state.set_current(next);
        if next != from {
            self.emit(GameEvent::TurnPassed { from, to: next });
        }
        self.emit(GameEvent::TurnStarted { player: next });
        self.phase = TurnPhase::AwaitingRoll;
        Ok(next)
    }

    /// Play the current player's whole turn sequence.
    ///
    /// Rolls until the turn ends (bonus rolls chain), asks `agent` for every
    /// token choice and re-asks after a rejected one. `observer` receives
    /// each event and a snapshot after every step.
    #[instrument(skip_all, fields(player = %self.state.current_player(), turn = self.state.turn_number()))]
    pub fn play_turn<D, A, O>(
        &mut self,
        dice: &mut D,
        agent: &mut A,
        observer: &mut O,
    ) -> Result<TurnSummary, TurnError>
    where
        D: Dice + ?Sized,
        A: PlayerAgent + ?Sized,
        O: GameObserver + ?Sized,
    {
        self.expect_phase(PhaseKind::AwaitingRoll)?;
        let player = self.state.current_player();
        let mut rolls = Vec::new();
        let mut moves = Vec::new();
        self.flush(observer);

        let end = loop {
            agent.ready_to_roll(&self.state, player);
            let outcome = self.roll(dice)?;
            rolls.push(outcome.roll());

            if let RollOutcome::ChooseToken { roll, legal } = outcome {
                loop {
                    let choice = agent.choose_token(&self.state, player, roll, &legal);
                    match self.choose_token(choice) {
                        Ok(report) => {
                            moves.push(report);
                            break;
                        }
                        Err(err @ TurnError::InvalidChoice { .. }) => agent.choice_rejected(&err),
                        Err(err) => return Err(err),
                    }
                }
            }
            self.flush(observer);

            match self.phase {
                TurnPhase::AwaitingRoll => continue,
                TurnPhase::TurnEnding(end) => break end,
                TurnPhase::GameOver => break TurnEnd::GameOver,
                TurnPhase::AwaitingTokenChoice { .. } => continue,
            }
        };

        let next = if end == TurnEnd::GameOver {
            None
        } else {
            Some(self.end_turn()?)
        };
        self.flush(observer);

        Ok(TurnSummary {
            player,
            rolls,
            moves,
            end,
            next,
        })
    }

    // === Internals ===

    fn expect_phase(&self, expected: PhaseKind) -> Result<(), TurnError> {
        let actual = self.phase.kind();
        if actual == expected {
            Ok(())
        } else {
            Err(Self::phase_error(expected, actual))
        }
    }

    fn phase_error(expected: PhaseKind, actual: PhaseKind) -> TurnError {
        if actual == PhaseKind::GameOver {
            TurnError::GameOver
        } else {
            TurnError::WrongPhase { expected, actual }
        }
    }

    fn emit(&mut self, event: GameEvent) {
        let record = self.state.record(event);
        self.pending.push(record);
    }

    /// Deliver pending events, then the board as it now stands.
    fn flush<O: GameObserver + ?Sized>(&mut self, observer: &mut O) {
        if self.pending.is_empty() {
            return;
        }
        for record in self.pending.drain(..) {
            observer.on_event(&record);
        }
        observer.on_snapshot(&self.state.snapshot());
    }

    fn grant_bonus(&mut self, player: PlayerId) {
        let streak = self.state.player(player).consecutive_bonus();
        self.emit(GameEvent::BonusGranted { player, streak });
        self.phase = TurnPhase::AwaitingRoll;
    }

    fn narrate_move(&mut self, applied: &AppliedMove) {
        let plan = &applied.plan;
        for capture in &plan.captures {
            self.emit(GameEvent::Captured {
                by: plan.player,
                victim: capture.victim,
                token: capture.token,
                cell: capture.cell,
            });
        }
        if plan.is_entry() {
            self.emit(GameEvent::TokenEntered {
                player: plan.player,
                token: plan.token,
            });
        } else {
            self.emit(GameEvent::TokenMoved {
                player: plan.player,
                token: plan.token,
                from: plan.from,
                to: plan.to,
            });
        }
    }

    /// Rank a player who just completed. Returns the rank.
    fn finish_player(&mut self, player: PlayerId) -> u8 {
        let rank = self.state.ranking_mut().record_finish(player);
        self.state.player_mut(player).assign_rank(rank);
        info!(%player, rank, "player finished");
        self.emit(GameEvent::PlayerFinished { player, rank });
        rank
    }

    fn finish_game(&mut self) {
        if self.phase == TurnPhase::GameOver {
            return;
        }
        let standings = self.state.ranking().standings();
        info!(?standings, "game over");
        self.emit(GameEvent::GameOver { standings });
        self.phase = TurnPhase::GameOver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::FirstLegalAgent;
    use crate::core::{EndCondition, HomeEntryRule, ScriptedDice};
    use crate::events::NullObserver;

    const A: PlayerId = PlayerId::new(0);
    const B: PlayerId = PlayerId::new(1);
    const T0: TokenIndex = TokenIndex::new(0);

    fn names(n: usize) -> Vec<String> {
        ["Ada", "Bob", "Cy", "Di"][..n].iter().map(|s| s.to_string()).collect()
    }

    fn controller(config: LudoConfig) -> TurnController {
        let n = config.player_count;
        TurnController::new(config, names(n)).unwrap()
    }

    #[test]
    fn test_rejects_bad_setup() {
        assert!(matches!(
            TurnController::new(LudoConfig::new(5), names(4)),
            Err(ConfigError::PlayerCount { .. })
        ));
        assert!(matches!(
            TurnController::new(LudoConfig::new(3), names(2)),
            Err(ConfigError::NameCount { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn test_enter_then_pass() {
        let mut game = controller(LudoConfig::new(2).with_track_length(50));

        let outcome = game.submit_roll(6).unwrap();
        assert!(matches!(outcome, RollOutcome::ChooseToken { roll: 6, .. }));
        let report = game.choose_token(T0).unwrap();
        assert!(report.bonus);
        assert_eq!(game.phase(), &TurnPhase::AwaitingRoll);
        assert_eq!(game.current_player(), A);

        game.submit_roll(4).unwrap();
        game.choose_token(T0).unwrap();
        assert_eq!(game.phase(), &TurnPhase::TurnEnding(TurnEnd::Moved));
        assert_eq!(game.end_turn().unwrap(), B);
        assert_eq!(
            game.state().player(A).tokens()[0].position,
            TrackPosition::OnTrack(4)
        );
    }

    #[test]
    fn test_no_valid_moves_ends_turn() {
        let mut game = controller(LudoConfig::new(2));

        let outcome = game.submit_roll(3).unwrap();
        assert_eq!(outcome, RollOutcome::NoValidMoves { roll: 3, bonus: false });
        assert_eq!(game.phase(), &TurnPhase::TurnEnding(TurnEnd::NoValidMoves));
    }

    #[test]
    fn test_invalid_choice_keeps_state() {
        let mut game = controller(LudoConfig::new(2));
        game.place_token(A, T0, TrackPosition::OnTrack(3)).unwrap();
        game.submit_roll(2).unwrap();
        let before = game.snapshot();

        let err = game.choose_token(TokenIndex::new(1)).unwrap_err();
        assert!(matches!(err, TurnError::InvalidChoice { .. }));
        let err = game.choose_token(TokenIndex::new(9)).unwrap_err();
        assert!(matches!(err, TurnError::InvalidChoice { .. }));

        assert_eq!(game.snapshot(), before);
        assert!(matches!(game.phase(), TurnPhase::AwaitingTokenChoice { .. }));
        assert!(game.choose_token(T0).is_ok());
    }

    #[test]
    fn test_wrong_phase_and_range() {
        let mut game = controller(LudoConfig::new(2));

        assert!(matches!(
            game.choose_token(T0),
            Err(TurnError::WrongPhase { .. })
        ));
        assert!(matches!(game.end_turn(), Err(TurnError::WrongPhase { .. })));
        assert_eq!(
            game.submit_roll(7),
            Err(TurnError::RollOutOfRange { roll: 7, max_face: 6 })
        );
    }

    #[test]
    fn test_three_sixes_forfeit() {
        let mut game = controller(LudoConfig::new(2).with_track_length(50));
        game.place_token(A, T0, TrackPosition::OnTrack(1)).unwrap();
        let before = game.state().player(A).tokens().to_vec();

        // Choose the on-track token on each bonus six, forfeit on the third.
        for _ in 0..2 {
            game.submit_roll(6).unwrap();
            game.choose_token(T0).unwrap();
        }
        let outcome = game.submit_roll(6).unwrap();

        assert_eq!(outcome, RollOutcome::Forfeited { roll: 6 });
        assert_eq!(game.state().player(A).consecutive_bonus(), 0);
        assert_eq!(game.state().player(A).tokens()[0].position, TrackPosition::OnTrack(13));
        assert_ne!(game.state().player(A).tokens(), before.as_slice());
        assert_eq!(game.end_turn().unwrap(), B);
    }

    #[test]
    fn test_bonus_without_move_rolls_again() {
        let mut game = controller(LudoConfig::new(2));
        game.place_token(A, T0, TrackPosition::OnTrack(49)).unwrap();
        game.place_token(A, TokenIndex::new(1), TrackPosition::InHome).unwrap();
        game.place_token(A, TokenIndex::new(2), TrackPosition::InHome).unwrap();
        game.place_token(A, TokenIndex::new(3), TrackPosition::InHome).unwrap();

        let outcome = game.submit_roll(6).unwrap();
        assert_eq!(outcome, RollOutcome::NoValidMoves { roll: 6, bonus: true });
        assert_eq!(game.phase(), &TurnPhase::AwaitingRoll);
        assert_eq!(game.current_player(), A);
    }

    #[test]
    fn test_finishing_ranks_and_ends_two_player_game() {
        let mut game = controller(LudoConfig::new(2).with_tokens_per_player(1));
        game.place_token(A, T0, TrackPosition::OnTrack(48)).unwrap();

        game.submit_roll(4).unwrap();
        let report = game.choose_token(T0).unwrap();

        assert_eq!(report.rank, Some(1));
        assert!(game.is_game_over());
        assert_eq!(game.state().player(A).rank(), Some(1));
        assert_eq!(game.submit_roll(3), Err(TurnError::GameOver));

        let events = game.drain_events();
        assert!(matches!(
            events.last().map(|r| &r.event),
            Some(GameEvent::GameOver { standings }) if standings.len() == 2
        ));
    }

    #[test]
    fn test_finisher_is_skipped_under_all_finish() {
        let config = LudoConfig::new(3)
            .with_tokens_per_player(1)
            .with_end_condition(EndCondition::AllFinish)
            .with_home_entry(HomeEntryRule::Overshoot);
        let mut game = controller(config);
        game.place_token(A, T0, TrackPosition::OnTrack(50)).unwrap();

        game.submit_roll(6).unwrap();
        let report = game.choose_token(T0).unwrap();
        assert_eq!(report.rank, Some(1));
        assert!(!report.bonus);
        assert_eq!(game.phase(), &TurnPhase::TurnEnding(TurnEnd::PlayerFinished));

        assert_eq!(game.end_turn().unwrap(), B);
        game.submit_roll(1).unwrap();
        assert_eq!(game.end_turn().unwrap(), PlayerId::new(2));
        game.submit_roll(1).unwrap();
        assert_eq!(game.end_turn().unwrap(), B);
    }

    #[test]
    fn test_placing_last_token_home_ends_current_turn() {
        let config = LudoConfig::new(3)
            .with_tokens_per_player(1)
            .with_end_condition(EndCondition::AllFinish);
        let mut game = controller(config);

        game.place_token(A, T0, TrackPosition::InHome).unwrap();
        assert_eq!(game.state().player(A).rank(), Some(1));
        assert_eq!(game.phase(), &TurnPhase::TurnEnding(TurnEnd::PlayerFinished));
        assert_eq!(
            game.submit_roll(2),
            Err(TurnError::WrongPhase {
                expected: PhaseKind::AwaitingRoll,
                actual: PhaseKind::TurnEnding,
            })
        );
        assert_eq!(game.end_turn().unwrap(), B);

        // Finishing someone who is not acting leaves the turn alone.
        game.place_token(PlayerId::new(2), T0, TrackPosition::InHome).unwrap();
        assert_eq!(game.phase(), &TurnPhase::AwaitingRoll);
        assert_eq!(game.current_player(), B);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_place_token_refusals_keep_state() {
        let mut game = controller(LudoConfig::new(3).with_tokens_per_player(1));
        game.place_token(A, T0, TrackPosition::InHome).unwrap();

        assert_eq!(
            game.place_token(A, T0, TrackPosition::OnTrack(3)),
            Err(TurnError::AlreadyFinished(A))
        );
        let ada = game.state().player(A);
        assert!(ada.is_complete());
        assert_eq!(ada.rank(), Some(1));
        assert_eq!(ada.tokens()[0].position, TrackPosition::InHome);
        assert_eq!(game.state().ranking().finish_order(), &[A]);

        assert_eq!(
            game.place_token(B, TokenIndex::new(1), TrackPosition::OnTrack(3)),
            Err(TurnError::UnknownToken { player: B, token: TokenIndex::new(1) })
        );
        assert_eq!(
            game.place_token(PlayerId::new(3), T0, TrackPosition::OnTrack(3)),
            Err(TurnError::UnknownToken { player: PlayerId::new(3), token: T0 })
        );

        game.place_token(B, T0, TrackPosition::InHome).unwrap();
        assert!(game.is_game_over());
        assert_eq!(
            game.place_token(PlayerId::new(2), T0, TrackPosition::InHome),
            Err(TurnError::GameOver)
        );
    }

    #[test]
    fn test_roll_near_u32_max_track_end() {
        let config = LudoConfig::new(2)
            .with_track_length(u32::MAX)
            .with_home_entry(HomeEntryRule::Exact);
        let mut game = controller(config);
        game.place_token(A, T0, TrackPosition::OnTrack(u32::MAX - 2)).unwrap();

        let outcome = game.submit_roll(5).unwrap();
        assert_eq!(outcome, RollOutcome::NoValidMoves { roll: 5, bonus: false });
        assert_eq!(
            game.state().player(A).tokens()[0].position,
            TrackPosition::OnTrack(u32::MAX - 2)
        );
    }

    #[test]
    fn test_play_turn_chains_bonus() {
        let mut game = controller(LudoConfig::new(2).with_track_length(50));
        let mut dice = ScriptedDice::new([6, 4]);

        let summary = game
            .play_turn(&mut dice, &mut FirstLegalAgent, &mut NullObserver)
            .unwrap();

        assert_eq!(summary.player, A);
        assert_eq!(summary.rolls, vec![6, 4]);
        assert_eq!(summary.moves.len(), 2);
        assert_eq!(summary.end, TurnEnd::Moved);
        assert_eq!(summary.next, Some(B));
        assert_eq!(game.current_player(), B);
    }

    #[test]
    fn test_events_narrate_turn() {
        let mut game = controller(LudoConfig::new(2));
        game.drain_events();

        game.submit_roll(2).unwrap();
        game.end_turn().unwrap();

        let events: Vec<_> = game.drain_events().into_iter().map(|r| r.event).collect();
        assert_eq!(
            events,
            vec![
                GameEvent::Rolled { player: A, value: 2 },
                GameEvent::NoValidMoves { player: A, roll: 2 },
                GameEvent::TurnPassed { from: A, to: B },
                GameEvent::TurnStarted { player: B },
            ]
        );
    }
}
