//! Vote ledger - who voted for what in the current round
//!
//! Holds one live vote per participant and the aggregated weight of every
//! candidate move. Candidates keep the order in which they first appeared,
//! which is also the order the turn resolver walks them in.
//!
//! # Invariants
//!
//! - Sum of candidate weights equals the number of participants with a live vote
//! - No candidate with weight 0 is ever stored
//! - Every stored notation passed the legality gate ([`ValidatedMove`])

use crate::game::rules::ValidatedMove;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Opaque participant identifier supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A distinct proposed move and the number of participants backing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMove {
    pub notation: String,
    pub weight: u32,
}

/// What a call to [`VoteLedger::cast_vote`] changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteChange {
    /// First vote from this participant this round
    New,
    /// Vote moved away from `previous`
    Changed { previous: String },
    /// Same candidate as before, nothing changed
    Unchanged,
}

/// Ledger of live votes for one round
#[derive(Debug, Default, Clone)]
pub struct VoteLedger {
    /// Participant -> notation of their live vote
    votes: HashMap<ParticipantId, String>,
    /// Candidates in order of first appearance
    candidates: Vec<CandidateMove>,
    /// Sum of all candidate weights
    total_weight: u32,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `participant`'s vote, retracting their previous one
    pub fn cast_vote(&mut self, participant: &ParticipantId, candidate: &ValidatedMove) -> VoteChange {
        let notation = candidate.notation();

        let change = match self.votes.get(participant) {
            Some(previous) if previous == notation => return VoteChange::Unchanged,
            Some(previous) => {
                let previous = previous.clone();
                self.decrement(&previous);
                VoteChange::Changed { previous }
            }
            None => VoteChange::New,
        };

        self.increment(notation);
        self.votes.insert(participant.clone(), notation.to_string());

        debug!(
            "[LEDGER] {} voted {:?} ({:?}), total weight {}",
            participant, notation, change, self.total_weight
        );
        debug_assert!(self.check_invariant());
        change
    }

    /// Candidates with weights, in order of first appearance
    pub fn current_votes(&self) -> Vec<CandidateMove> {
        self.candidates.clone()
    }

    /// Borrow the candidate list
    pub fn candidates(&self) -> &[CandidateMove] {
        &self.candidates
    }

    /// Notation `participant` currently votes for
    pub fn vote_of(&self, participant: &ParticipantId) -> Option<&str> {
        self.votes.get(participant).map(String::as_str)
    }

    pub fn total_weight(&self) -> u32 {
        self.total_weight
    }

    /// Number of participants with a live vote
    pub fn voter_count(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Drop every vote and candidate
    pub fn clear(&mut self) {
        self.votes.clear();
        self.candidates.clear();
        self.total_weight = 0;
    }

    /// True when the weight bookkeeping is consistent
    pub fn check_invariant(&self) -> bool {
        let sum: u32 = self.candidates.iter().map(|c| c.weight).sum();
        sum == self.total_weight
            && self.total_weight as usize == self.votes.len()
            && self.candidates.iter().all(|c| c.weight > 0)
    }

    fn increment(&mut self, notation: &str) {
        match self.candidates.iter_mut().find(|c| c.notation == notation) {
            Some(candidate) => candidate.weight += 1,
            None => self.candidates.push(CandidateMove {
                notation: notation.to_string(),
                weight: 1,
            }),
        }
        self.total_weight += 1;
    }

    fn decrement(&mut self, notation: &str) {
        if let Some(index) = self.candidates.iter().position(|c| c.notation == notation) {
            let candidate = &mut self.candidates[index];
            candidate.weight -= 1;
            if candidate.weight == 0 {
                self.candidates.remove(index);
            }
            self.total_weight -= 1;
        }
    }
}
