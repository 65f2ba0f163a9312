//! Turn resolver - turns a round's votes into at most one committed move
//!
//! # Selection Policies
//!
//! | Policy        | Winner                                                  |
//! |---------------|---------------------------------------------------------|
//! | `MostVotes`   | strictly highest weight; ties go to the earliest candidate in ledger order |
//! | `Probability` | roulette wheel: chance of winning equals vote share     |
//!
//! The roulette wheel draws `r` uniformly from `[0, 1)` and walks the
//! candidates in ledger order, subtracting `weight / total` from `r`; the
//! first candidate that drives `r` below zero wins.
//!
//! # Resolution Steps
//!
//! 1. Select a winner among the candidates still legal on the live position
//! 2. Commit the winner through the [`PositionOracle`]
//! 3. Append a [`HistoryEntry`] with the full pre-clear candidate list
//! 4. Clear the ledger
//!
//! A round without votes commits nothing but still gets a history entry.

use crate::core::SelectionPolicy;
use crate::game::error::GameResult;
use crate::game::resources::{CandidateMove, HistoryEntry, RoundHistory, VoteLedger};
use crate::game::rules::PositionOracle;
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{info, warn};

/// Result of resolving one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub round: u64,
    /// Committed notation, `None` for an empty round
    pub winner: Option<String>,
    pub total_votes: u32,
    /// FEN after the round
    pub fen: String,
}

/// Pick the index of the winning candidate, or `None` when nobody voted.
pub fn select_winner<R: Rng>(
    candidates: &[CandidateMove],
    policy: SelectionPolicy,
    rng: &mut R,
) -> Option<usize> {
    let total: u32 = candidates.iter().map(|c| c.weight).sum();
    if total == 0 {
        return None;
    }

    match policy {
        SelectionPolicy::MostVotes => most_votes(candidates),
        SelectionPolicy::Probability => roulette(candidates, total, rng.random::<f64>()),
    }
}

fn most_votes(candidates: &[CandidateMove]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        // Strictly greater keeps the first candidate on ties
        if candidate.weight > 0 && best.map_or(true, |(_, weight)| candidate.weight > weight) {
            best = Some((index, candidate.weight));
        }
    }
    best.map(|(index, _)| index)
}

/// Roulette walk with a pre-drawn `draw` in `[0, 1)`. `total` must be > 0.
fn roulette(candidates: &[CandidateMove], total: u32, draw: f64) -> Option<usize> {
    let mut remaining = draw;
    for (index, candidate) in candidates.iter().enumerate() {
        remaining -= f64::from(candidate.weight) / f64::from(total);
        if remaining < 0.0 {
            return Some(index);
        }
    }

    // Float rounding can leave a sliver above zero after the last subtraction
    candidates.iter().rposition(|c| c.weight > 0)
}

/// Runs the resolution steps over the session's components
#[derive(Debug, Clone, Copy)]
pub struct TurnResolver {
    pub policy: SelectionPolicy,
}

impl TurnResolver {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { policy }
    }

    /// Resolve `round`: select, commit, record, clear.
    ///
    /// On `Err` (an illegal commit) nothing has been recorded or cleared;
    /// the error is a logic fault and must reach the process.
    pub fn resolve<R: Rng>(
        &self,
        round: u64,
        oracle: &mut PositionOracle,
        ledger: &mut VoteLedger,
        history: &mut RoundHistory,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> GameResult<RoundOutcome> {
        let snapshot = ledger.current_votes();
        let total_votes = ledger.total_weight();

        // Votes cast before a position-only reset no longer apply
        let live = oracle.position();
        let eligible: Vec<CandidateMove> = snapshot
            .iter()
            .filter(|c| PositionOracle::validate(&c.notation, live))
            .cloned()
            .collect();
        if eligible.len() < snapshot.len() {
            warn!(
                "[RESOLVER] Round {}: {} stale candidate(s) excluded from selection",
                round,
                snapshot.len() - eligible.len()
            );
        }

        let winner = select_winner(&eligible, self.policy, rng).map(|i| eligible[i].notation.clone());

        let position = match &winner {
            Some(notation) => oracle.commit(notation)?,
            None => oracle.current_position(),
        };

        history.push(HistoryEntry {
            round,
            winner: winner.clone(),
            candidates: snapshot,
            fen_after: position.fen(),
            resolved_at: now,
        });
        ledger.clear();

        match &winner {
            Some(notation) => info!(
                "[RESOLVER] Round {} resolved ({}): {} won with {} vote(s) cast",
                round, self.policy, notation, total_votes
            ),
            None => info!("[RESOLVER] Round {} resolved with no move committed", round),
        }

        Ok(RoundOutcome {
            round,
            winner,
            total_votes,
            fen: position.fen(),
        })
    }
}
