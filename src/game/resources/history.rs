//! Round history - append-only record of resolved rounds
//!
//! Every resolution appends exactly one [`HistoryEntry`], including rounds in
//! which nobody voted, so gaps in play are visible instead of silently
//! skipped. Entries are never mutated or removed while the process runs.

use crate::game::resources::ledger::CandidateMove;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of one resolved round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Round number, starting at 0
    pub round: u64,
    /// Winning notation, `None` when nothing was committed
    pub winner: Option<String>,
    /// Every candidate with its final weight, in ledger order
    pub candidates: Vec<CandidateMove>,
    /// FEN after the round was resolved
    pub fen_after: String,
    pub resolved_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Total votes cast in the round
    pub fn total_votes(&self) -> u32 {
        self.candidates.iter().map(|c| c.weight).sum()
    }

    pub fn is_empty_round(&self) -> bool {
        self.winner.is_none()
    }
}

/// Chronological list of resolved rounds
///
/// Index 0 = first resolved round.
#[derive(Debug, Default, Clone)]
pub struct RoundHistory {
    entries: Vec<HistoryEntry>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Entries from `start` to the latest; empty when `start` is past the end
    pub fn since(&self, start: usize) -> &[HistoryEntry] {
        self.entries.get(start..).unwrap_or(&[])
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
