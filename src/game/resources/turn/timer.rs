//! Round deadline bookkeeping
//!
//! Each round's deadline is computed from the moment the round opens, not
//! from the previous deadline. A slow resolution therefore pushes every later
//! deadline back by the same amount; the clock is self-rescheduling rather
//! than fixed-rate.
//!
//! A timer carries two views of the same deadline: the wall-clock time shown
//! to clients and the monotonic tokio instant the scheduler sleeps until.
//! Both are taken when the round opens, so wall-clock jumps never move the
//! moment a round actually fires.

use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;
use tokio::time::Instant;

/// Thirty years, used when a turn length overflows the monotonic clock
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Deadline of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTimer {
    /// Advertised deadline
    pub deadline: DateTime<Utc>,
    /// When the scheduler resolves the round
    pub fires_at: Instant,
}

impl RoundTimer {
    /// Timer for a round opening at `now` and lasting `turn_length`
    pub fn open(now: DateTime<Utc>, turn_length: Duration) -> Self {
        let length = TimeDelta::from_std(turn_length).unwrap_or(TimeDelta::MAX);
        let opened = Instant::now();
        Self {
            deadline: now.checked_add_signed(length).unwrap_or(DateTime::<Utc>::MAX_UTC),
            fires_at: opened
                .checked_add(turn_length)
                .unwrap_or_else(|| opened + FAR_FUTURE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_deadline_is_turn_length_after_open() {
        let now = Utc::now();
        let timer = RoundTimer::open(now, Duration::from_secs(20));

        assert_eq!(
            timer.deadline - now,
            TimeDelta::seconds(20),
            "deadline should be 20s after open"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_on_monotonic_clock() {
        let opened = Instant::now();
        let timer = RoundTimer::open(Utc::now(), Duration::from_secs(20));

        assert_eq!(timer.fires_at - opened, Duration::from_secs(20));

        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(
            timer.fires_at - Instant::now(),
            Duration::from_secs(15),
            "only the tokio clock moves the firing point"
        );
    }

    #[test]
    fn test_huge_turn_length_does_not_overflow() {
        let timer = RoundTimer::open(Utc::now(), Duration::from_secs(u64::MAX));
        assert!(timer.fires_at > Instant::now());
    }
}
