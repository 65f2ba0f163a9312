//! Game state owned by the session
//!
//! - `ledger` - live votes and candidate weights ([`VoteLedger`])
//! - `history` - resolved rounds ([`RoundHistory`])
//! - `turn` - round phase, deadline and reference position

pub mod history;
pub mod ledger;
pub mod turn;


pub use history::{HistoryEntry, RoundHistory};
pub use ledger::{CandidateMove, ParticipantId, VoteChange, VoteLedger};
pub use turn::{Round, RoundPhase, RoundStateContext, RoundTimer};
