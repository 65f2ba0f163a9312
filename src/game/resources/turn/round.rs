//! The current voting round

use crate::game::resources::turn::timer::RoundTimer;
use crate::game::rules::Position;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// One voting interval: its deadline and the position votes are checked
/// against
#[derive(Debug, Clone)]
pub struct Round {
    pub number: u64,
    pub timer: RoundTimer,
    /// Position at round start (or after an administrative reset)
    pub reference: Position,
}

impl Round {
    pub fn open(number: u64, reference: Position, now: DateTime<Utc>, turn_length: Duration) -> Self {
        Self {
            number,
            timer: RoundTimer::open(now, turn_length),
            reference,
        }
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.timer.deadline
    }
}
