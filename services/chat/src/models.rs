//! Entities and request/response payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed-width rendering of `created_at`, used both in storage and in history
/// entries. Fixed width keeps lexical order equal to chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// One stored question/answer pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    pub reply: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for `/register` and `/login`
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Request body for `/chat`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub username: String,
    pub message: String,
}

/// Confirmation body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response body for `/chat`
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// One entry of `/history/{username}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: String,
    pub answer: String,
    pub at: String,
}

impl From<ChatTurn> for HistoryEntry {
    fn from(turn: ChatTurn) -> Self {
        Self {
            question: turn.message,
            answer: turn.reply,
            at: turn.created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}
