//! Board invariants checked after every turn of randomly configured games.

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use rust_ludo::{
    EndCondition, GameEvent, GameRng, HomeEntryRule, LudoConfig, MoveOutcome, NullObserver,
    PlayerId, RandomAgent, Rules, TokenIndex, TrackPosition, TurnController, TurnEnd,
};

/// Upper bound on turns so a pathological seed cannot hang the suite.
const TURN_LIMIT: usize = 5_000;

fn config_strategy() -> impl Strategy<Value = LudoConfig> {
    (
        2usize..=4,
        1usize..=4,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(players, tokens, overshoot, all_finish, block_on_entry)| {
            LudoConfig::new(players)
                .with_tokens_per_player(tokens)
                .with_home_entry(if overshoot {
                    HomeEntryRule::Overshoot
                } else {
                    HomeEntryRule::Exact
                })
                .with_end_condition(if all_finish {
                    EndCondition::AllFinish
                } else {
                    EndCondition::AllButOne
                })
                .with_block_on_entry(block_on_entry)
        })
}

fn check_board(game: &TurnController) -> Result<(), TestCaseError> {
    let config = game.config();
    for (id, player) in game.state().players().iter() {
        let mut cells = FxHashSet::default();
        for token in player.tokens() {
            match token.position {
                TrackPosition::OnTrack(cell) => {
                    prop_assert!(cell < config.track_length, "{id} token off the track at {cell}");
                    if config.block_on_entry {
                        prop_assert!(cells.insert(cell), "{id} stacked two tokens on {cell}");
                    }
                }
                TrackPosition::InYard | TrackPosition::InHome => {}
            }
        }

        let home = player.tokens().iter().filter(|t| t.position.is_home()).count();
        prop_assert_eq!(player.finished() as usize, home);
        prop_assert_eq!(player.rank().is_some(), player.is_complete());
        prop_assert!(player.consecutive_bonus() < config.forfeit_threshold);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_invariants_hold_every_turn(config in config_strategy(), seed in any::<u64>()) {
        let players = config.player_count;
        let names = (0..players).map(|i| format!("P{i}")).collect();
        let mut game = TurnController::new(config.clone(), names).unwrap();
        let mut dice = GameRng::new(seed);
        let mut agents: Vec<RandomAgent> =
            (0..players as u64).map(|i| RandomAgent::new(seed ^ i)).collect();

        let mut turns = 0;
        while !game.is_game_over() && turns < TURN_LIMIT {
            let seat = game.current_player();
            game.play_turn(&mut dice, &mut agents[seat.index()], &mut NullObserver).unwrap();
            check_board(&game)?;
            turns += 1;
        }

        let safe: FxHashSet<u32> = config.safe_zones.iter().copied().collect();
        let mut ranks = Vec::new();
        for record in game.state().history().iter() {
            match &record.event {
                GameEvent::Captured { cell, .. } => {
                    prop_assert!(!safe.contains(cell));
                }
                GameEvent::PlayerFinished { rank, .. } => ranks.push(*rank),
                _ => {}
            }
        }
        let expected: Vec<u8> = (1..=ranks.len() as u8).collect();
        prop_assert_eq!(ranks, expected);
    }

    #[test]
    fn prop_yard_exit_needs_entry_value(roll in 1u8..=6, entry in 1u8..=6) {
        let config = LudoConfig::new(2).with_entry_value(entry);
        let rules = Rules::new(&config);
        let game = TurnController::new(config, vec!["A".into(), "B".into()]).unwrap();

        let outcome = rules.evaluate_move(game.state().players(), PlayerId::new(0), TokenIndex::new(0), roll);
        match outcome {
            MoveOutcome::Legal(plan) => {
                prop_assert_eq!(roll, entry);
                prop_assert_eq!(plan.to, TrackPosition::OnTrack(0));
            }
            _ => {
                prop_assert_ne!(roll, entry);
            }
        }
    }

    #[test]
    fn prop_home_tokens_never_move(roll in 1u8..=6, overshoot in any::<bool>()) {
        let rule = if overshoot { HomeEntryRule::Overshoot } else { HomeEntryRule::Exact };
        let config = LudoConfig::new(2).with_home_entry(rule);
        let mut game = TurnController::new(config, vec!["A".into(), "B".into()]).unwrap();
        game.place_token(PlayerId::new(0), TokenIndex::new(2), TrackPosition::InHome).unwrap();

        let outcome = game.rules().evaluate_move(
            game.state().players(),
            PlayerId::new(0),
            TokenIndex::new(2),
            roll,
        );
        prop_assert_eq!(outcome, MoveOutcome::NotMovable);
    }

    #[test]
    fn prop_forfeit_leaves_board_untouched_by_last_roll(seed in any::<u64>()) {
        let config = LudoConfig::new(2);
        let mut game = TurnController::new(config, vec!["A".into(), "B".into()]).unwrap();
        let mut dice = GameRng::new(seed);
        let mut agents = [RandomAgent::new(seed), RandomAgent::new(!seed)];

        for _ in 0..200 {
            if game.is_game_over() {
                break;
            }
            let seat = game.current_player();
            let before = game.snapshot();
            let summary = game.play_turn(&mut dice, &mut agents[seat.index()], &mut NullObserver).unwrap();
            if summary.end == TurnEnd::Forfeited {
                // The forfeiting roll moved nothing.
                prop_assert!(summary.moves.len() < summary.rolls.len());
                prop_assert_eq!(game.state().player(seat).consecutive_bonus(), 0);
                prop_assert!(summary.rolls.iter().all(|&r| r == 6));
                prop_assert_ne!(before.current, game.current_player());
            }
        }
    }
}
