use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use community_chess::game::{GameError, GameSession, GameSnapshot, HistoryEntry, ParticipantId};
use shared::protocol::{
    ErrorResponse, GameStateResponse, HistoryEntryResponse, HistoryVote, ResetResponse, VoteCount,
    VoteRequest, VoteResponse,
};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<GameSession>,
}

/// Error returned by handlers
#[derive(Debug)]
pub enum ApiError {
    /// The request was understood but refused (bad move, stale position, closed round)
    Rejected(String),
    /// Something went wrong inside the game
    Internal(String),
}

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        if e.is_rejection() {
            ApiError::Rejected(e.to_string())
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Rejected(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ApiError::Internal(message) => {
                error!("[API] Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

pub fn router(session: Arc<GameSession>) -> Router {
    let state = AppState { session };

    Router::new()
        .route("/gameState", get(game_state))
        .route("/gameState/{id}", get(game_state_for))
        .route("/vote", post(vote))
        .route("/history", get(history))
        .route("/history/{start}", get(history_since))
        .route("/reset", get(reset).post(reset))
        .with_state(state)
}

async fn game_state(State(state): State<AppState>) -> Json<GameStateResponse> {
    Json(game_state_response(state.session.snapshot(None)))
}

async fn game_state_for(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<GameStateResponse> {
    let participant = ParticipantId::new(id);
    Json(game_state_response(
        state.session.snapshot(Some(&participant)),
    ))
}

async fn vote(
    State(state): State<AppState>,
    Json(payload): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, ApiError> {
    if payload.id.trim().is_empty() {
        return Err(ApiError::Rejected("missing participant id".to_string()));
    }

    let participant = ParticipantId::new(payload.id);
    let change = state.session.cast_vote(&participant, &payload.pgn)?;
    debug!("[API] Vote from {}: {:?}", participant, change);

    Ok(Json(VoteResponse { accepted: true }))
}

async fn history(State(state): State<AppState>) -> Json<Vec<HistoryEntryResponse>> {
    Json(history_response(&state.session.history_since(0)))
}

/// A start that is not a number reads from the beginning
async fn history_since(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Json<Vec<HistoryEntryResponse>> {
    Json(history_response(
        &state.session.history_since(parse_history_start(&start)),
    ))
}

fn parse_history_start(raw: &str) -> usize {
    raw.trim().parse().unwrap_or(0)
}

async fn reset(State(state): State<AppState>) -> Json<ResetResponse> {
    let position = state.session.reset();
    info!("[API] Game reset requested");
    Json(ResetResponse {
        pgn: position.pgn(),
        fen: position.fen(),
    })
}

fn game_state_response(snapshot: GameSnapshot) -> GameStateResponse {
    GameStateResponse {
        pgn: snapshot.pgn,
        fen: snapshot.fen,
        vote_pgn: snapshot.vote,
        end_time_ms: snapshot.deadline.timestamp_millis(),
        votes: snapshot
            .candidates
            .into_iter()
            .map(|c| VoteCount {
                pgn: c.notation,
                votes: c.weight,
            })
            .collect(),
        round: snapshot.round,
        outcome: snapshot.outcome.map(str::to_string),
    }
}

fn history_response(entries: &[HistoryEntry]) -> Vec<HistoryEntryResponse> {
    entries.iter().map(history_entry_response).collect()
}

fn history_entry_response(entry: &HistoryEntry) -> HistoryEntryResponse {
    HistoryEntryResponse {
        round: entry.round,
        winner: entry.winner.clone(),
        votes: entry
            .candidates
            .iter()
            .map(|c| HistoryVote {
                pgn: c.notation.clone(),
                votes: c.weight,
                winner: entry.winner.as_deref() == Some(c.notation.as_str()),
            })
            .collect(),
        fen_after: entry.fen_after.clone(),
        resolved_at_ms: entry.resolved_at.timestamp_millis(),
    }
}
