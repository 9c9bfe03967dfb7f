//! Wire types for the Sage backend API.

use serde::{Deserialize, Serialize};

use crate::message::Sender;

/// A conversation thread as listed by `GET /api/sessions`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Response of `GET /api/sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionList {
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub current_session_id: Option<i64>,
}

/// A stored message as returned by `GET /api/sessions/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredMessage {
    pub message: String,
    pub sender: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl StoredMessage {
    pub fn sender(&self) -> Sender {
        Sender::from_wire(&self.sender)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SessionMessages {
    pub messages: Vec<StoredMessage>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Assistant reply from `POST /api/chat` or `POST /api/upload`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
    /// Set by `/api/chat`: the session the exchange was stored in.
    #[serde(default)]
    pub session_id: Option<i64>,
    /// Set by `/api/upload`: the stored file name.
    #[serde(default)]
    pub filename: Option<String>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
