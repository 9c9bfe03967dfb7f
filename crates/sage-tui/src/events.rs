//! UI event types.
//!
//! Everything the reducer reacts to: terminal input, frame ticks, task
//! lifecycle notifications and the results of async work.

use crossterm::event::Event;
use sage_core::api::{ChatReply, Session, StoredMessage};
use sage_core::attachment::{AttachmentRejection, FileCandidate};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};
use crate::input::SendKind;

#[derive(Debug)]
pub enum UiEvent {
    /// Render cadence tick.
    Tick,
    /// Current terminal size, sent before the other events of a frame.
    Frame {
        width: u16,
        height: u16,
    },
    Terminal(Event),
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },
    Session(SessionUiEvent),
    Chat(ChatUiEvent),
    Attachment(AttachmentUiEvent),
}

/// Session API results. Failures were already logged by the handler.
#[derive(Debug)]
pub enum SessionUiEvent {
    ListLoaded {
        sessions: Vec<Session>,
        current_session_id: Option<i64>,
    },
    ListFailed,
    Loaded {
        id: i64,
        messages: Vec<StoredMessage>,
    },
    LoadFailed {
        id: i64,
    },
    Deleted {
        id: i64,
    },
    DeleteFailed {
        id: i64,
    },
    NewChatStarted,
    NewChatFailed,
}

/// Outcome of a send or upload.
#[derive(Debug)]
pub enum ChatUiEvent {
    Replied { kind: SendKind, reply: ChatReply },
    Failed { kind: SendKind },
    Cancelled,
}

#[derive(Debug)]
pub enum AttachmentUiEvent {
    Inspected { candidate: FileCandidate },
    InspectFailed { rejection: AttachmentRejection },
}
