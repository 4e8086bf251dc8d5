use tracing::{debug, info, instrument};

use crate::agents::PlayerAgent;
use crate::core::Dice;
use crate::error::SchedulerError;
use crate::events::GameObserver;
use crate::turn::TurnController;

use super::{check_agents, GameResult};

/// Plays every turn on the calling thread.
#[derive(Debug)]
pub struct SequentialScheduler<D, O> {
    dice: D,
    observer: O,
}

impl<D: Dice, O: GameObserver> SequentialScheduler<D, O> {
    pub fn new(dice: D, observer: O) -> Self {
        Self { dice, observer }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Run `controller` to game over. `agents[i]` plays seat `i`.
    #[instrument(skip_all, fields(players = agents.len()))]
    pub fn run<A: PlayerAgent>(
        &mut self,
        controller: &mut TurnController,
        agents: &mut [A],
    ) -> Result<GameResult, SchedulerError> {
        check_agents(controller, agents.len())?;

        let mut turns = 0;
        while !controller.is_game_over() {
            let seat = controller.current_player();
            let summary =
                controller.play_turn(&mut self.dice, &mut agents[seat.index()], &mut self.observer)?;
            turns += 1;
            debug!(
                player = %summary.player,
                rolls = ?summary.rolls,
                moves = summary.moves.len(),
                end = ?summary.end,
                "turn complete"
            );
        }

        info!(turns, "sequential game finished");
        Ok(GameResult::from_controller(controller, turns))
    }
}
