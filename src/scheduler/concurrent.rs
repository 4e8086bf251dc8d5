//! One thread per agent, one lock for the table.
//!
//! Each agent thread loops:
//!
//! 1. lock the table
//! 2. wait on `turn_changed` until it is this seat's turn or the game is over
//! 3. exit on game over, otherwise play the whole turn sequence (bonus rolls
//!    included) while still holding the lock
//! 4. unlock and wake everybody
//!
//! Holding the lock for the whole sequence means no other thread ever sees
//! half a turn. There is no timeout: an agent that never returns from
//! `choose_token` stalls the game.

use std::sync::{Condvar, Mutex};
use std::thread;

use tracing::{debug, info, instrument, warn};

use crate::agents::PlayerAgent;
use crate::core::{Dice, PlayerId};
use crate::error::SchedulerError;
use crate::events::GameObserver;
use crate::turn::TurnController;

use super::{check_agents, GameResult};

/// Everything a turn mutates, owned by the lock.
struct Table<'a, D, O> {
    controller: &'a mut TurnController,
    dice: &'a mut D,
    observer: &'a mut O,
    turns: usize,
    /// Set when a seat hit an error, so the others stop waiting.
    aborted: bool,
}

impl<D, O> Table<'_, D, O> {
    fn should_wait(&self, seat: PlayerId) -> bool {
        !self.aborted && !self.controller.is_game_over() && self.controller.current_player() != seat
    }
}

/// Wakes every waiter when dropped, including during a panic unwind, so a
/// poisoned lock is noticed instead of waited on forever.
struct WakeOnDrop<'a>(&'a Condvar);

impl Drop for WakeOnDrop<'_> {
    fn drop(&mut self) {
        self.0.notify_all();
    }
}

/// Plays each seat on its own thread.
#[derive(Debug)]
pub struct ConcurrentScheduler<D, O> {
    dice: D,
    observer: O,
}

impl<D, O> ConcurrentScheduler<D, O>
where
    D: Dice + Send,
    O: GameObserver + Send,
{
    pub fn new(dice: D, observer: O) -> Self {
        Self { dice, observer }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Run `controller` to game over with one scoped thread per agent.
    /// `agents[i]` plays seat `i`.
    #[instrument(skip_all, fields(players = agents.len()))]
    pub fn run<A: PlayerAgent + Send>(
        &mut self,
        controller: &mut TurnController,
        agents: &mut [A],
    ) -> Result<GameResult, SchedulerError> {
        check_agents(controller, agents.len())?;

        let table = Mutex::new(Table {
            controller: &mut *controller,
            dice: &mut self.dice,
            observer: &mut self.observer,
            turns: 0,
            aborted: false,
        });
        let turn_changed = Condvar::new();

        let outcomes: Vec<Result<(), SchedulerError>> = thread::scope(|scope| {
            let handles: Vec<_> = agents
                .iter_mut()
                .enumerate()
                .map(|(i, agent)| {
                    let seat = PlayerId::new(i as u8);
                    let table = &table;
                    let turn_changed = &turn_changed;
                    let handle = scope.spawn(move || seat_loop(seat, agent, table, turn_changed));
                    (seat, handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(seat, handle)| {
                    handle
                        .join()
                        .unwrap_or(Err(SchedulerError::AgentPanicked(seat)))
                })
                .collect()
        });

        // A panic explains any poisoning seen by the other seats.
        let panicked = outcomes.iter().find_map(|r| match r {
            Err(SchedulerError::AgentPanicked(seat)) => Some(*seat),
            _ => None,
        });
        if let Some(seat) = panicked {
            return Err(SchedulerError::AgentPanicked(seat));
        }
        outcomes.into_iter().collect::<Result<Vec<()>, _>>()?;

        let turns = table
            .into_inner()
            .map_err(|_| SchedulerError::Poisoned)?
            .turns;
        info!(turns, "concurrent game finished");
        Ok(GameResult::from_controller(controller, turns))
    }
}

fn seat_loop<A, D, O>(
    seat: PlayerId,
    agent: &mut A,
    table: &Mutex<Table<'_, D, O>>,
    turn_changed: &Condvar,
) -> Result<(), SchedulerError>
where
    A: PlayerAgent,
    D: Dice,
    O: GameObserver,
{
    debug!(%seat, "agent thread started");
    loop {
        let _wake = WakeOnDrop(turn_changed);
        let guard = table.lock().map_err(|_| SchedulerError::Poisoned)?;
        let mut guard = turn_changed
            .wait_while(guard, |t| t.should_wait(seat))
            .map_err(|_| SchedulerError::Poisoned)?;

        if guard.aborted || guard.controller.is_game_over() {
            debug!(%seat, "agent thread exiting");
            return Ok(());
        }

        let t = &mut *guard;
        match t.controller.play_turn(&mut *t.dice, agent, &mut *t.observer) {
            Ok(summary) => {
                t.turns += 1;
                debug!(%seat, end = ?summary.end, next = ?summary.next, "turn complete");
            }
            Err(err) => {
                warn!(%seat, %err, "turn failed, stopping all seats");
                t.aborted = true;
                return Err(err.into());
            }
        }
    }
}
