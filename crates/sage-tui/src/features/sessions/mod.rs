//! Session sidebar: history list, loading, deletion and new chat.

pub mod render;
mod state;
mod update;

pub use state::{SessionRow, SessionsState};
pub use update::{
    delete_session, handle_session_event, list_sessions, load_session, start_new_chat,
};

/// Row shown when the backend has no sessions.
pub const EMPTY_PLACEHOLDER: &str = "No chat history yet";
