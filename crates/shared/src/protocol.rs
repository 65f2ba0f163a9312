use serde::{Deserialize, Serialize};

/// One candidate move and its vote count, as shown in the move list
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VoteCount {
    pub pgn: String,
    pub votes: u32,
}

/// Response to `GET /gameState/{id}`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameStateResponse {
    /// Game so far as PGN movetext
    pub pgn: String,
    pub fen: String,
    /// Caller's current vote, if any
    pub vote_pgn: Option<String>,
    /// Round deadline, ms since the Unix epoch
    pub end_time_ms: i64,
    /// Candidates in order of first appearance
    pub votes: Vec<VoteCount>,
    pub round: u64,
    /// `1-0`, `0-1` or `1/2-1/2` once the game is over
    pub outcome: Option<String>,
}

/// Body of `POST /vote`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VoteRequest {
    /// Participant identifier
    pub id: String,
    /// Whole game including the proposed move, as PGN movetext
    pub pgn: String,
}

/// Successful `POST /vote`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VoteResponse {
    pub accepted: bool,
}

/// A candidate in a resolved round
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HistoryVote {
    pub pgn: String,
    pub votes: u32,
    pub winner: bool,
}

/// One entry of `GET /history/{start}`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryResponse {
    pub round: u64,
    /// Winning notation, `None` when nobody voted
    pub winner: Option<String>,
    pub votes: Vec<HistoryVote>,
    pub fen_after: String,
    pub resolved_at_ms: i64,
}

/// Response to the administrative reset
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ResetResponse {
    pub pgn: String,
    pub fen: String,
}

/// Error body for rejected requests
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_game_state_uses_legacy_field_names() {
        let state = GameStateResponse {
            pgn: "1. e4".to_string(),
            fen: "fen".to_string(),
            vote_pgn: None,
            end_time_ms: 1_700_000_000_000,
            votes: vec![VoteCount {
                pgn: "1. e4 e5".to_string(),
                votes: 2,
            }],
            round: 1,
            outcome: None,
        };

        let value = serde_json::to_value(&state).expect("Should serialize");
        assert_eq!(value["votePgn"], serde_json::Value::Null);
        assert_eq!(value["endTimeMs"], json!(1_700_000_000_000i64));
        assert_eq!(value["votes"][0]["votes"], json!(2));
        assert!(value.get("vote_pgn").is_none());
    }

    #[test]
    fn test_vote_request_deserialization() {
        let request: VoteRequest =
            serde_json::from_str(r#"{"id": "abc-123", "pgn": "1. d4"}"#).expect("Should deserialize");
        assert_eq!(request.id, "abc-123");
        assert_eq!(request.pgn, "1. d4");
    }

    #[test]
    fn test_vote_request_requires_id() {
        let result = serde_json::from_str::<VoteRequest>(r#"{"pgn": "1. d4"}"#);
        assert!(result.is_err(), "votes without a participant id are malformed");
    }

    #[test]
    fn test_history_entry_field_names() {
        let entry = HistoryEntryResponse {
            round: 0,
            winner: Some("1. e4".to_string()),
            votes: vec![HistoryVote {
                pgn: "1. e4".to_string(),
                votes: 1,
                winner: true,
            }],
            fen_after: "fen".to_string(),
            resolved_at_ms: 5,
        };

        let value = serde_json::to_value(&entry).expect("Should serialize");
        assert_eq!(value["fenAfter"], json!("fen"));
        assert_eq!(value["resolvedAtMs"], json!(5));
        assert_eq!(value["votes"][0]["winner"], json!(true));
    }
}
