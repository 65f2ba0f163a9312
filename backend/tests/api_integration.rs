//! Backend API Integration Tests
//!
//! Tests for the Axum HTTP endpoints using Router::oneshot pattern.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use backend::api;
use community_chess::core::{GameConfig, SelectionPolicy};
use community_chess::game::GameSession;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Helper to create a session with deterministic selection
fn test_session() -> Arc<GameSession> {
    Arc::new(GameSession::new(GameConfig {
        selection_policy: SelectionPolicy::MostVotes,
        rng_seed: Some(1),
        ..GameConfig::default()
    }))
}

fn participant() -> String {
    uuid::Uuid::new_v4().to_string()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    (status, body)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

async fn post_vote(app: &Router, id: &str, pgn: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri("/vote")
            .header("content-type", "application/json")
            .body(Body::from(json!({"id": id, "pgn": pgn}).to_string()))
            .unwrap(),
    )
    .await
}

// ============================================================================
// Game State Tests
// ============================================================================

#[tokio::test]
async fn test_initial_game_state() {
    let app = api::router(test_session());

    let (status, body) = get_json(&app, "/gameState").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pgn"], json!(""));
    assert_eq!(body["fen"], json!(START_FEN));
    assert_eq!(body["votePgn"], Value::Null);
    assert_eq!(body["votes"], json!([]));
    assert_eq!(body["round"], json!(0));
    assert!(body["endTimeMs"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_game_state_reports_callers_vote() {
    let app = api::router(test_session());
    let alice = participant();

    let (status, body) = post_vote(&app, &alice, "1. e4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], json!(true));

    let (_, mine) = get_json(&app, &format!("/gameState/{alice}")).await;
    assert_eq!(mine["votePgn"], json!("1. e4"));
    assert_eq!(mine["votes"], json!([{"pgn": "1. e4", "votes": 1}]));

    let (_, theirs) = get_json(&app, &format!("/gameState/{}", participant())).await;
    assert_eq!(theirs["votePgn"], Value::Null);
}

// ============================================================================
// Vote Tests
// ============================================================================

#[tokio::test]
async fn test_illegal_vote_is_rejected() {
    let app = api::router(test_session());

    let (status, body) = post_vote(&app, &participant(), "1. e5").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().is_some());

    let (_, state) = get_json(&app, "/gameState").await;
    assert_eq!(state["votes"], json!([]));
}

#[tokio::test]
async fn test_vote_for_wrong_position_is_rejected() {
    let app = api::router(test_session());

    let (status, _) = post_vote(&app, &participant(), "1. e4 e5").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_vote_without_id_is_rejected() {
    let app = api::router(test_session());

    let (status, _) = post_vote(&app, "  ", "1. e4").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_revote_moves_weight() {
    let app = api::router(test_session());
    let alice = participant();
    let bob = participant();

    post_vote(&app, &alice, "1. e4").await;
    post_vote(&app, &bob, "1. e4").await;
    post_vote(&app, &alice, "1. d4").await;

    let (_, state) = get_json(&app, "/gameState").await;
    assert_eq!(
        state["votes"],
        json!([{"pgn": "1. e4", "votes": 1}, {"pgn": "1. d4", "votes": 1}])
    );
}

// ============================================================================
// History Tests
// ============================================================================

#[tokio::test]
async fn test_history_after_resolution() {
    let session = test_session();
    let app = api::router(Arc::clone(&session));

    post_vote(&app, &participant(), "1. e4").await;
    post_vote(&app, &participant(), "1. d4").await;
    post_vote(&app, &participant(), "1. d4").await;
    session.resolve_round().unwrap();
    session.resolve_round().unwrap();

    let (status, history) = get_json(&app, "/history").await;
    assert_eq!(status, StatusCode::OK);
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["winner"], json!("1. d4"));
    assert_eq!(
        entries[0]["votes"],
        json!([
            {"pgn": "1. e4", "votes": 1, "winner": false},
            {"pgn": "1. d4", "votes": 2, "winner": true}
        ])
    );
    assert_eq!(entries[1]["winner"], Value::Null);

    let (_, tail) = get_json(&app, "/history/1").await;
    assert_eq!(tail.as_array().unwrap().len(), 1);
    assert_eq!(tail[0]["round"], json!(1));

    let (_, state) = get_json(&app, "/gameState").await;
    assert_eq!(state["pgn"], json!("1. d4"));
    assert_eq!(state["round"], json!(2));
}

#[tokio::test]
async fn test_history_past_the_end_is_empty() {
    let app = api::router(test_session());

    let (status, body) = get_json(&app, "/history/50").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_history_with_non_numeric_start_reads_from_beginning() {
    let session = test_session();
    let app = api::router(Arc::clone(&session));

    session.resolve_round().unwrap();
    session.resolve_round().unwrap();

    let (status, body) = get_json(&app, "/history/abc").await;

    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["round"], json!(0));
}

// ============================================================================
// Reset Tests
// ============================================================================

#[tokio::test]
async fn test_reset_returns_start_position() {
    let session = test_session();
    let app = api::router(Arc::clone(&session));

    post_vote(&app, &participant(), "1. e4").await;
    session.resolve_round().unwrap();

    let (status, body) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/reset")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fen"], json!(START_FEN));
    assert_eq!(body["pgn"], json!(""));

    // New votes validate against the start position again
    let (status, _) = post_vote(&app, &participant(), "1. c4").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_legacy_get_reset() {
    let app = api::router(test_session());

    let (status, body) = get_json(&app, "/reset").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fen"], json!(START_FEN));
}
