//! Turn scheduling.
//!
//! A scheduler drives a [`TurnController`] until the game is over, handing
//! each turn to the agent seated at the current player.
//!
//! - [`SequentialScheduler`]: one control loop on the calling thread
//! - [`ConcurrentScheduler`]: one thread per agent, turns serialized by a
//!   single lock and a turn-changed condition variable
//!
//! Both produce a [`GameResult`]. Game over is the only way a run ends
//! normally.

mod concurrent;
mod sequential;

pub use concurrent::ConcurrentScheduler;
pub use sequential::SequentialScheduler;

use serde::{Deserialize, Serialize};

use crate::core::BoardSnapshot;
use crate::error::SchedulerError;
use crate::rules::Standing;
use crate::turn::TurnController;

/// How a finished game came out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub standings: Vec<Standing>,
    /// Turn sequences played, bonus rolls included in their turn.
    pub turns: usize,
    pub board: BoardSnapshot,
}

impl GameResult {
    fn from_controller(controller: &TurnController, turns: usize) -> Self {
        Self {
            standings: controller.state().ranking().standings(),
            turns,
            board: controller.snapshot(),
        }
    }

    /// The first-ranked player.
    #[must_use]
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.iter().find(|s| s.finished && s.rank == 1)
    }
}

fn check_agents(controller: &TurnController, agents: usize) -> Result<(), SchedulerError> {
    let expected = controller.state().player_count();
    if agents == expected {
        Ok(())
    } else {
        Err(SchedulerError::AgentCount {
            expected,
            got: agents,
        })
    }
}
