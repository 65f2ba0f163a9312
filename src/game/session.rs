//! Game session - the single owner of all mutable game state
//!
//! Position, vote ledger, current round, round phase, history and the
//! selection RNG live together behind one mutex. Every operation takes the
//! lock for its whole duration, so:
//!
//! - concurrent votes never interleave their retract/add steps
//! - resolution never overlaps a vote that is mid-flight
//! - readers always see a consistent snapshot
//!
//! The session is shared as `Arc<GameSession>` between the HTTP handlers and
//! the [`crate::game::RoundScheduler`].

use crate::core::{GameConfig, ResetScope};
use crate::game::error::{GameError, GameResult};
use crate::game::resolver::{RoundOutcome, TurnResolver};
use crate::game::resources::{
    CandidateMove, HistoryEntry, ParticipantId, Round, RoundHistory, RoundPhase,
    RoundStateContext, VoteChange, VoteLedger,
};
use crate::game::rules::{Position, PositionOracle};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Everything a client needs to render the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub pgn: String,
    pub fen: String,
    /// Caller's own vote, when a participant was given
    pub vote: Option<String>,
    pub round: u64,
    pub deadline: DateTime<Utc>,
    pub candidates: Vec<CandidateMove>,
    /// Participants with a live vote
    pub voters: usize,
    /// `1-0`, `0-1` or `1/2-1/2` once the game has ended
    pub outcome: Option<&'static str>,
}

struct SessionState {
    oracle: PositionOracle,
    ledger: VoteLedger,
    history: RoundHistory,
    round: Round,
    phase: RoundStateContext,
    rng: StdRng,
}

/// Shared handle to the one running game
pub struct GameSession {
    config: GameConfig,
    resolver: TurnResolver,
    state: Mutex<SessionState>,
}

impl GameSession {
    /// New game at the standard start, first round opening now
    pub fn new(config: GameConfig) -> Self {
        Self::new_at(config, Utc::now())
    }

    /// New game whose first round opens at `now`
    pub fn new_at(config: GameConfig, now: DateTime<Utc>) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let oracle = PositionOracle::new();
        let phase = RoundStateContext::default();
        let round = Round::open(phase.round, oracle.current_position(), now, config.turn_length());

        info!(
            "[SESSION] Game started: {}s rounds, {} selection, reset scope {:?}",
            config.turn_length_secs, config.selection_policy, config.reset_scope
        );

        Self {
            resolver: TurnResolver::new(config.selection_policy),
            config,
            state: Mutex::new(SessionState {
                oracle,
                ledger: VoteLedger::new(),
                history: RoundHistory::new(),
                round,
                phase,
                rng,
            }),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Validate `notation` against the current round and record the vote.
    ///
    /// Rejections ([`GameError::is_rejection`]) leave the ledger untouched.
    pub fn cast_vote(&self, participant: &ParticipantId, notation: &str) -> GameResult<VoteChange> {
        let mut state = self.state.lock();

        if !state.phase.phase.accepts_votes() {
            return Err(GameError::RoundClosed {
                round: state.phase.round,
            });
        }

        let candidate = match PositionOracle::check_candidate(notation, &state.round.reference) {
            Ok(candidate) => candidate,
            Err(e) => {
                debug!("[SESSION] Rejected vote from {}: {}", participant, e);
                return Err(e);
            }
        };

        Ok(state.ledger.cast_vote(participant, &candidate))
    }

    /// Consistent view of position, round and votes
    pub fn snapshot(&self, participant: Option<&ParticipantId>) -> GameSnapshot {
        let state = self.state.lock();
        let position = state.oracle.position();

        GameSnapshot {
            pgn: position.pgn(),
            fen: position.fen(),
            vote: participant
                .and_then(|p| state.ledger.vote_of(p))
                .map(str::to_string),
            round: state.phase.round,
            deadline: state.round.deadline(),
            candidates: state.ledger.current_votes(),
            voters: state.ledger.voter_count(),
            outcome: position.outcome(),
        }
    }

    pub fn current_position(&self) -> Position {
        self.state.lock().oracle.current_position()
    }

    /// Candidates in ledger order
    pub fn current_votes(&self) -> Vec<CandidateMove> {
        self.state.lock().ledger.current_votes()
    }

    pub fn vote_of(&self, participant: &ParticipantId) -> Option<String> {
        self.state
            .lock()
            .ledger
            .vote_of(participant)
            .map(str::to_string)
    }

    /// Deadline of the round currently open
    pub fn round_deadline(&self) -> DateTime<Utc> {
        self.state.lock().round.deadline()
    }

    /// Monotonic instant at which the current round should be resolved
    pub fn resolution_due(&self) -> Instant {
        self.state.lock().round.timer.fires_at
    }

    pub fn round_phase(&self) -> RoundPhase {
        self.state.lock().phase.phase
    }

    /// History entries from `start` to the latest
    pub fn history_since(&self, start: usize) -> Vec<HistoryEntry> {
        self.state.lock().history.since(start).to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.state.lock().history.len()
    }

    /// Administrative reset: position back to the start.
    ///
    /// The round timer keeps running. The round's reference moves to the
    /// start position so new votes validate against it; whether votes
    /// already cast survive depends on [`ResetScope`].
    pub fn reset(&self) -> Position {
        let mut state = self.state.lock();
        let position = state.oracle.reset();
        state.round.reference = position.clone();

        match self.config.reset_scope {
            ResetScope::PositionAndVotes => state.ledger.clear(),
            ResetScope::Position => {
                if !state.ledger.is_empty() {
                    warn!(
                        "[SESSION] Reset kept {} vote(s); they can no longer win",
                        state.ledger.voter_count()
                    );
                }
            }
        }

        info!("[SESSION] Game reset during round {}", state.phase.round);
        position
    }

    /// Resolve the current round now and open the next one
    pub fn resolve_round(&self) -> GameResult<RoundOutcome> {
        self.resolve_round_at(Utc::now())
    }

    /// Resolve the current round at `now` and open the next one, with its
    /// deadline measured from `now`
    pub fn resolve_round_at(&self, now: DateTime<Utc>) -> GameResult<RoundOutcome> {
        let mut guard = self.state.lock();
        let SessionState {
            oracle,
            ledger,
            history,
            round,
            phase,
            rng,
        } = &mut *guard;

        phase.begin_resolution()?;
        let outcome = self
            .resolver
            .resolve(phase.round, oracle, ledger, history, rng, now)
            .inspect_err(|e| {
                error!("[SESSION] Round {} failed to resolve: {}", phase.round, e);
            })?;
        phase.finish_resolution()?;

        *round = Round::open(
            phase.round,
            oracle.current_position(),
            now,
            self.config.turn_length(),
        );
        debug!(
            "[SESSION] Round {} open until {}",
            round.number,
            round.deadline()
        );

        Ok(outcome)
    }
}
