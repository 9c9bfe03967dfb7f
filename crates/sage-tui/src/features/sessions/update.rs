//! Session list, load, delete and new-chat reducers.

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::SessionUiEvent;
use crate::state::{ChatLayout, TuiState};
use crate::{input, transcript};

/// Requests a fresh session list.
pub fn list_sessions(tui: &mut TuiState) -> Vec<UiEffect> {
    let task = tui.begin_task(TaskKind::SessionList);
    vec![UiEffect::ListSessions { task }]
}

pub fn load_session(tui: &mut TuiState, id: i64) -> Vec<UiEffect> {
    let task = tui.begin_task(TaskKind::SessionLoad);
    vec![UiEffect::LoadSession { task, id }]
}

/// Issues the delete. Confirmation happens before this is called.
pub fn delete_session(tui: &mut TuiState, id: i64) -> Vec<UiEffect> {
    let task = tui.begin_task(TaskKind::SessionDelete);
    vec![UiEffect::DeleteSession { task, id }]
}

pub fn start_new_chat(tui: &mut TuiState) -> Vec<UiEffect> {
    let task = tui.begin_task(TaskKind::NewChat);
    vec![UiEffect::StartNewChat { task }]
}

pub fn handle_session_event(tui: &mut TuiState, event: SessionUiEvent) -> Vec<UiEffect> {
    match event {
        SessionUiEvent::ListLoaded {
            sessions,
            current_session_id,
        } => {
            tui.sessions.render_sessions(sessions);
            // Adopting a server id on the welcome screen would leave a
            // session "current" with nothing shown.
            if tui.layout == ChatLayout::Conversation
                && let Some(id) = current_session_id
            {
                tui.sessions.set_current(Some(id));
            }
            vec![]
        }
        SessionUiEvent::Loaded { id, messages } => {
            // A reply still in flight belongs to the conversation being left.
            let mut effects = input::cancel_send(tui);
            transcript::render_history(&mut tui.transcript, &tui.config, messages);
            tui.sessions.set_current(Some(id));
            tui.enter_conversation();
            tui.chrome.sidebar_open = false;
            tui.transcript.scroll_to_bottom();
            effects.extend(list_sessions(tui));
            effects
        }
        SessionUiEvent::Deleted { id } => {
            let mut effects = Vec::new();
            if tui.current_session_id() == Some(id) {
                effects.extend(start_new_chat(tui));
            }
            effects.extend(list_sessions(tui));
            effects
        }
        SessionUiEvent::NewChatStarted => {
            let mut effects = input::cancel_send(tui);
            tui.reset_to_welcome();
            tui.chrome.sidebar_open = false;
            effects.extend(list_sessions(tui));
            effects
        }
        SessionUiEvent::ListFailed
        | SessionUiEvent::LoadFailed { .. }
        | SessionUiEvent::DeleteFailed { .. }
        | SessionUiEvent::NewChatFailed => vec![],
    }
}
