//! Game module - the turn-resolution engine
//!
//! Votes flow through the position oracle into the ledger; at every round
//! boundary the scheduler asks the session to resolve, which selects a
//! winner, commits it, records history and opens the next round.
//!
//! ```text
//! cast_vote --> PositionOracle::check_candidate --> VoteLedger::cast_vote
//!
//! RoundScheduler --> GameSession::resolve_round --> TurnResolver::resolve
//!                                                    |- select_winner
//!                                                    |- PositionOracle::commit
//!                                                    |- RoundHistory::push
//!                                                    '- VoteLedger::clear
//! ```
//!
//! # Module Organization
//!
//! - `rules` - position oracle over `shakmaty`
//! - `resources` - vote ledger, round history, round phase and deadline
//! - `resolver` - selection policies and the resolution steps
//! - `session` - [`GameSession`], the single owner of mutable state
//! - `scheduler` - [`RoundScheduler`], the tokio task driving rounds
//! - `error` - [`GameError`]

pub mod error;
pub mod resolver;
pub mod resources;
pub mod rules;
pub mod scheduler;
pub mod session;

// Re-export the main entry points
pub use error::{GameError, GameResult};
pub use resolver::{select_winner, RoundOutcome, TurnResolver};
pub use resources::{CandidateMove, HistoryEntry, ParticipantId, RoundPhase, VoteChange};
pub use rules::{Position, PositionOracle, ValidatedMove};
pub use scheduler::{RoundScheduler, SchedulerHandle};
pub use session::{GameSession, GameSnapshot};
