//! Round phase state machine
//!
//! A round is `Open` while it accepts votes and `Resolving` while the turn
//! resolver runs. There is no terminal phase: the game runs until the process
//! stops.
//!
//! ```text
//! Open --begin_resolution--> Resolving --finish_resolution--> Open
//! ```

use crate::game::error::{GameError, GameResult};
use tracing::error;

/// Phase of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundPhase {
    /// Accepting votes, timer running
    ///
    /// Valid transitions: → Resolving
    #[default]
    Open,

    /// Turn resolver is selecting and committing the winner
    ///
    /// Valid transitions: → Open (next round)
    Resolving,
}

impl RoundPhase {
    /// Check if this phase admits votes
    pub fn accepts_votes(&self) -> bool {
        matches!(self, RoundPhase::Open)
    }
}

/// Round number plus phase, with validated transitions
#[derive(Debug, Clone, Default)]
pub struct RoundStateContext {
    /// Round number, starting at 0
    pub round: u64,
    pub phase: RoundPhase,
}

impl RoundStateContext {
    /// Transition to the next round phase
    ///
    /// An invalid transition is logged and leaves the phase unchanged.
    pub fn transition_to(&mut self, next_phase: RoundPhase) -> GameResult<()> {
        let valid = matches!(
            (self.phase, next_phase),
            (RoundPhase::Open, RoundPhase::Resolving) | (RoundPhase::Resolving, RoundPhase::Open)
        );

        if !valid {
            error!(
                "[ROUND] Invalid round state transition: {:?} -> {:?} in round {}",
                self.phase, next_phase, self.round
            );
            return Err(GameError::InvalidStateTransition {
                message: format!(
                    "{:?} -> {:?} in round {}",
                    self.phase, next_phase, self.round
                ),
            });
        }

        self.phase = next_phase;
        Ok(())
    }

    /// Enter `Resolving` for the current round
    pub fn begin_resolution(&mut self) -> GameResult<()> {
        self.transition_to(RoundPhase::Resolving)
    }

    /// Leave `Resolving` and open the next round
    pub fn finish_resolution(&mut self) -> GameResult<()> {
        self.transition_to(RoundPhase::Open)?;
        self.round += 1;
        Ok(())
    }
}
