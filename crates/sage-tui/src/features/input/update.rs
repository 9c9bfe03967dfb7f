//! Composer keys and the send pipeline reducer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sage_core::message::Sender;

use super::{DEFAULT_CAPTION, SendKind};
use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::ChatUiEvent;
use crate::state::TuiState;
use crate::{sessions, transcript};

pub fn handle_input_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Enter if shift || alt => {
            tui.input.buffer.insert_newline();
            vec![]
        }
        KeyCode::Enter => send_message(tui),
        KeyCode::Char('j') if ctrl => {
            tui.input.buffer.insert_newline();
            vec![]
        }
        KeyCode::Char(c @ '1'..='4') if alt => {
            let index = (c as usize) - ('1' as usize);
            match tui.config.suggestions.get(index).cloned() {
                Some(text) if tui.is_welcome() => send_suggestion(tui, &text),
                _ => vec![],
            }
        }
        KeyCode::PageUp => {
            let page = tui.transcript.page_size();
            tui.transcript.scroll_up(page);
            vec![]
        }
        KeyCode::PageDown => {
            let page = tui.transcript.page_size();
            tui.transcript.scroll_down(page);
            vec![]
        }
        _ => {
            tui.input.buffer.input(key);
            vec![]
        }
    }
}

/// Sends the composer text, or the pending attachment with the text as
/// its caption.
///
/// Does nothing when there is neither text nor an attachment, and while a
/// previous send is still in flight (the typed text stays put).
pub fn send_message(tui: &mut TuiState) -> Vec<UiEffect> {
    if tui.input.is_blank() && tui.selected_file().is_none() {
        return vec![];
    }
    if tui.tasks.send.is_running() {
        return vec![];
    }

    let message = tui.input.text().trim().to_string();
    tui.enter_conversation();
    tui.input.clear();
    let task = tui.begin_task(TaskKind::Send);

    match tui.attachment.take() {
        Some(attachment) => {
            let caption = if message.is_empty() {
                DEFAULT_CAPTION
            } else {
                message.as_str()
            };
            let bubble = format!("📎 {}: {}", attachment.name, caption);
            transcript::render_message(&mut tui.transcript, &tui.config, bubble, Sender::User);
            tui.transcript.show_typing();
            vec![UiEffect::UploadFile {
                task,
                attachment,
                message,
            }]
        }
        None => {
            transcript::render_message(
                &mut tui.transcript,
                &tui.config,
                message.clone(),
                Sender::User,
            );
            tui.transcript.show_typing();
            vec![UiEffect::SendChat { task, message }]
        }
    }
}

/// Puts a canned prompt in the composer and sends it.
pub fn send_suggestion(tui: &mut TuiState, text: &str) -> Vec<UiEffect> {
    tui.input.set_text(text);
    send_message(tui)
}

/// Abandons the in-flight send: the indicator goes away and whatever the
/// call returns later is dropped.
pub fn cancel_send(tui: &mut TuiState) -> Vec<UiEffect> {
    if !tui.tasks.send.is_running() {
        return vec![];
    }
    let token = tui.tasks.send.cancel.take();
    tui.tasks.send.clear();
    tui.transcript.hide_typing();
    vec![UiEffect::CancelTask {
        kind: TaskKind::Send,
        token,
    }]
}

pub fn handle_chat_event(tui: &mut TuiState, event: ChatUiEvent) -> Vec<UiEffect> {
    tui.transcript.hide_typing();
    match event {
        ChatUiEvent::Replied { kind, reply } => {
            transcript::render_message(
                &mut tui.transcript,
                &tui.config,
                reply.response,
                Sender::Assistant,
            );
            if kind == SendKind::Chat
                && let Some(id) = reply.session_id
            {
                tui.sessions.set_current(Some(id));
            }
            sessions::list_sessions(tui)
        }
        ChatUiEvent::Failed { kind } => {
            transcript::render_message(
                &mut tui.transcript,
                &tui.config,
                kind.failure_text(),
                Sender::Assistant,
            );
            vec![]
        }
        ChatUiEvent::Cancelled => vec![],
    }
}
