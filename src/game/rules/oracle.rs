//! Position oracle - the only code that talks to the chess rules library
//!
//! Wraps `shakmaty` to answer the two questions the voting core needs:
//! "is this candidate one legal move beyond the reference position?" and
//! "apply this move to the live game".
//!
//! # Candidate Format
//!
//! A candidate is PGN movetext of the whole game including the proposed move.
//! Validation replays everything but the last move from the standard start,
//! requires the resulting position to match the reference position exactly
//! (full FEN, clocks included), then requires the last move to be legal from
//! there. A participant therefore cannot smuggle in a fabricated history or
//! a multi-move candidate.

use crate::game::error::{GameError, GameResult};
use crate::game::rules::notation::{render_movetext, tokenize_movetext};
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{Chess, Color, EnPassantMode, Move, Outcome, Position as _};
use tracing::{debug, info};

/// Immutable snapshot of the game: SAN moves from the standard start plus
/// the board they lead to
#[derive(Debug, Clone)]
pub struct Position {
    moves: Vec<String>,
    board: Chess,
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl Position {
    /// Standard starting position, no moves played
    pub fn start() -> Self {
        Self {
            moves: Vec::new(),
            board: Chess::default(),
        }
    }

    /// Game so far as PGN movetext
    pub fn pgn(&self) -> String {
        render_movetext(&self.moves)
    }

    /// Board as FEN
    pub fn fen(&self) -> String {
        fen_of(&self.board)
    }

    /// SAN moves played since the start
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// Number of half-moves played
    pub fn ply(&self) -> usize {
        self.moves.len()
    }

    /// Game result (`1-0`, `0-1`, `1/2-1/2`) once the game is over
    pub fn outcome(&self) -> Option<&'static str> {
        self.board.outcome().map(|outcome| match outcome {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw => "1/2-1/2",
        })
    }

    /// Legal moves from here, in SAN
    pub fn legal_moves(&self) -> Vec<String> {
        self.board
            .legal_moves()
            .iter()
            .map(|m| SanPlus::from_move(self.board.clone(), m).to_string())
            .collect()
    }

    /// Candidate notation for playing `san` next: this game's movetext with
    /// the move appended. Legality is not checked.
    pub fn continuation(&self, san: &str) -> String {
        let mut moves = self.moves.clone();
        moves.push(san.to_string());
        render_movetext(&moves)
    }

    /// New snapshot with `m` applied. `m` must be legal on this board.
    fn with_move(&self, m: &Move) -> Position {
        let san = SanPlus::from_move(self.board.clone(), m).to_string();
        let mut board = self.board.clone();
        board.play_unchecked(m);

        let mut moves = self.moves.clone();
        moves.push(san);

        Position { moves, board }
    }
}

/// A candidate that passed [`PositionOracle::check_candidate`]
///
/// Only the oracle constructs these, so holding one proves the legality gate
/// ran against `reference_fen`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMove {
    notation: String,
    san: String,
    reference_fen: String,
}

impl ValidatedMove {
    /// Canonical movetext: reference game plus the move, normalized so that
    /// spelling variants of the same move share one ledger entry
    pub fn notation(&self) -> &str {
        &self.notation
    }

    /// The proposed move alone, in SAN
    pub fn san(&self) -> &str {
        &self.san
    }

    /// FEN of the position the move was validated against
    pub fn reference_fen(&self) -> &str {
        &self.reference_fen
    }
}

/// Owner of the live position
#[derive(Debug, Default)]
pub struct PositionOracle {
    live: Position,
}

impl PositionOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the live position
    pub fn current_position(&self) -> Position {
        self.live.clone()
    }

    /// Borrow the live position
    pub fn position(&self) -> &Position {
        &self.live
    }

    /// Fail-closed legality gate
    pub fn validate(notation: &str, reference: &Position) -> bool {
        Self::check_candidate(notation, reference).is_ok()
    }

    /// Legality gate with the reason for rejection
    pub fn check_candidate(notation: &str, reference: &Position) -> GameResult<ValidatedMove> {
        let (m, san) = parse_candidate(notation, reference)?;
        debug!("[ORACLE] Candidate {:?} accepted as {} ({:?})", notation, san, m);

        let mut moves = reference.moves.clone();
        moves.push(san.clone());

        Ok(ValidatedMove {
            notation: render_movetext(&moves),
            san,
            reference_fen: reference.fen(),
        })
    }

    /// Apply a validated candidate to the live position.
    ///
    /// The candidate is validated again against the live position; failure
    /// means the caller skipped validation and is reported as
    /// [`GameError::IllegalCommit`].
    pub fn commit(&mut self, notation: &str) -> GameResult<Position> {
        let (m, san) =
            parse_candidate(notation, &self.live).map_err(|e| GameError::IllegalCommit {
                notation: notation.to_string(),
                message: e.to_string(),
            })?;

        self.live = self.live.with_move(&m);
        info!(
            "[ORACLE] Committed {} (ply {}), position now {}",
            san,
            self.live.ply(),
            self.live.fen()
        );
        Ok(self.live.clone())
    }

    /// Back to the standard starting position
    pub fn reset(&mut self) -> Position {
        self.live = Position::start();
        info!("[ORACLE] Position reset to start");
        self.live.clone()
    }
}

/// Replay the candidate and return its final move, legal on `reference`,
/// with the move's canonical SAN
fn parse_candidate(notation: &str, reference: &Position) -> GameResult<(Move, String)> {
    let tokens = tokenize_movetext(notation);
    let Some((last, history)) = tokens.split_last() else {
        return Err(GameError::InvalidMove {
            message: "no moves in candidate".to_string(),
        });
    };

    let mut board = Chess::default();
    for token in history {
        let m = parse_san(&board, token)?;
        board.play_unchecked(&m);
    }

    let found = fen_of(&board);
    let expected = reference.fen();
    if found != expected {
        return Err(GameError::PositionMismatch { expected, found });
    }

    let m = parse_san(&reference.board, last)?;
    let san = SanPlus::from_move(reference.board.clone(), &m).to_string();
    Ok((m, san))
}

fn parse_san(board: &Chess, token: &str) -> GameResult<Move> {
    let san_plus: SanPlus = token.parse().map_err(|e| GameError::InvalidMove {
        message: format!("{token:?} is not SAN: {e}"),
    })?;

    san_plus.san.to_move(board).map_err(|e| GameError::InvalidMove {
        message: format!("{token} is not legal here: {e}"),
    })
}

fn fen_of(board: &Chess) -> String {
    Fen::from_position(board.clone(), EnPassantMode::Legal).to_string()
}
