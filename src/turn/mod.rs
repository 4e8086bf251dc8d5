//! Turn control: phases, bonus rolls, forfeiture and turn passing.

mod controller;

pub use controller::{
    MoveReport, PhaseKind, RollOutcome, TurnController, TurnEnd, TurnPhase, TurnSummary,
};
