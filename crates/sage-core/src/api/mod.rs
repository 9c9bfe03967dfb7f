//! Client for the Sage backend HTTP API.
//!
//! | call | method |
//! |---|---|
//! | list sessions | `GET /api/sessions` |
//! | get session | `GET /api/sessions/{id}` |
//! | delete session | `DELETE /api/sessions/{id}` |
//! | new chat | `POST /api/new-chat` |
//! | send message | `POST /api/chat` |
//! | upload file | `POST /api/upload` |
//! | health | `GET /health` |

mod client;
mod error;
mod types;

pub use client::{DEFAULT_UPLOAD_PROMPT, SageClient};
pub use error::ApiError;
pub use types::{ChatReply, Health, Session, SessionList, StoredMessage};
