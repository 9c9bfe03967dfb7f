//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── layout: ChatLayout           (welcome vs. conversation)
//! │   ├── input: InputState            (composer text)
//! │   ├── transcript: TranscriptState  (message nodes, typing indicator, scroll)
//! │   ├── sessions: SessionsState      (sidebar rows, current session id)
//! │   ├── attachment: AttachmentState  (pending file, at most one)
//! │   ├── chrome: ChromeState          (theme, sidebar visibility)
//! │   ├── task_seq: TaskSeq            (async task id generator)
//! │   └── tasks: Tasks                 (task lifecycle state)
//! └── overlay: Option<Overlay>         (modal overlays)
//! ```
//!
//! `TuiState` and the overlay are split so overlay key handlers can borrow
//! the overlay mutably while reading the rest of the state.

use sage_core::attachment::PendingAttachment;
use sage_core::config::Config;
use sage_core::prefs::Theme;

use crate::attachment::AttachmentState;
use crate::chrome::ChromeState;
use crate::common::{TaskId, TaskKind, TaskSeq, Tasks};
use crate::input::InputState;
use crate::overlays::Overlay;
use crate::sessions::SessionsState;
use crate::transcript::TranscriptState;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config, theme: Theme) -> Self {
        Self {
            tui: TuiState::new(config, theme),
            overlay: None,
        }
    }
}

/// Which main panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatLayout {
    /// Banner and quick suggestions. No session loaded, no messages.
    #[default]
    Welcome,
    /// Message list.
    Conversation,
}

/// TUI state (non-overlay).
pub struct TuiState {
    pub should_quit: bool,
    pub config: Config,
    pub layout: ChatLayout,
    pub input: InputState,
    pub transcript: TranscriptState,
    pub sessions: SessionsState,
    pub attachment: AttachmentState,
    pub chrome: ChromeState,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    /// Advanced every tick; drives the typing animation.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(config: Config, theme: Theme) -> Self {
        Self {
            should_quit: false,
            config,
            layout: ChatLayout::Welcome,
            input: InputState::default(),
            transcript: TranscriptState::default(),
            sessions: SessionsState::default(),
            attachment: AttachmentState::default(),
            chrome: ChromeState::new(theme),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
        }
    }

    pub fn current_session_id(&self) -> Option<i64> {
        self.sessions.current_id()
    }

    pub fn selected_file(&self) -> Option<&PendingAttachment> {
        self.attachment.selected()
    }

    pub fn is_welcome(&self) -> bool {
        self.layout == ChatLayout::Welcome
    }

    /// Switches to the message list. Idempotent.
    pub fn enter_conversation(&mut self) {
        self.layout = ChatLayout::Conversation;
    }

    /// Back to a fresh chat: no session, no messages, welcome layout.
    pub fn reset_to_welcome(&mut self) {
        self.sessions.set_current(None);
        self.transcript.clear();
        self.layout = ChatLayout::Welcome;
    }

    /// Claims a new task id for `kind`, superseding any running one.
    pub fn begin_task(&mut self, kind: TaskKind) -> TaskId {
        let id = self.task_seq.next_id();
        self.tasks.state_mut(kind).begin(id);
        id
    }
}
