//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! Every network or disk operation is an effect; the reducer never does I/O.
//!
//! Task-backed effects carry the `TaskId` the reducer claimed for them, so
//! a late result can be matched against the currently active task.

use std::path::PathBuf;

use sage_core::attachment::PendingAttachment;
use sage_core::prefs::Theme;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};

#[derive(Debug)]
pub enum UiEffect {
    Quit,

    /// `GET /api/sessions`
    ListSessions { task: TaskId },

    /// `GET /api/sessions/{id}`
    LoadSession { task: TaskId, id: i64 },

    /// `DELETE /api/sessions/{id}`
    DeleteSession { task: TaskId, id: i64 },

    /// `POST /api/new-chat`
    StartNewChat { task: TaskId },

    /// `POST /api/chat`
    SendChat { task: TaskId, message: String },

    /// `POST /api/upload`. The attachment has already left the state.
    UploadFile {
        task: TaskId,
        attachment: PendingAttachment,
        message: String,
    },

    /// Stat and sniff a file the user wants to attach.
    InspectFile { task: TaskId, path: PathBuf },

    /// Write the theme preference to the state file.
    PersistTheme { theme: Theme },

    /// Cancel a running task via its token.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}
