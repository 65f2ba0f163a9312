//! Error types for game module
//!
//! Provides custom error types for game logic including vote validation,
//! move commits and round state management.

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Candidate notation did not parse or contains an illegal move
    #[error("Invalid move: {message}")]
    InvalidMove { message: String },

    /// Candidate history does not lead to the reference position
    #[error("Position mismatch: candidate starts from {found}, expected {expected}")]
    PositionMismatch { expected: String, found: String },

    /// Vote arrived while the round was not accepting votes
    #[error("Round {round} is not accepting votes")]
    RoundClosed { round: u64 },

    /// A move reached commit without being legal on the live position.
    /// Only the turn resolver commits, so this is a logic error.
    #[error("Illegal commit of {notation}: {message}")]
    IllegalCommit { notation: String, message: String },

    /// Invalid round phase transition
    #[error("Invalid round state transition: {message}")]
    InvalidStateTransition { message: String },
}

impl GameError {
    /// True for errors that mean the vote was rejected, as opposed to a
    /// broken game
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GameError::InvalidMove { .. }
                | GameError::PositionMismatch { .. }
                | GameError::RoundClosed { .. }
        )
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
