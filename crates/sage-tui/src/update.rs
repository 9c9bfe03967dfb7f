//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::overlays::{self, AttachFileState, ConfirmDeleteState, Overlay};
use crate::state::{AppState, TuiState};
use crate::{attachment, chrome, input, render, sessions, transcript};

const MOUSE_SCROLL_LINES: usize = 3;

/// Effects to run once at startup.
pub fn init(app: &mut AppState) -> Vec<UiEffect> {
    sessions::list_sessions(&mut app.tui)
}

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Frame { width, height } => {
            handle_frame(&mut app.tui, width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tui.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                tracing::debug!(?kind, id = completed.id.0, "dropping stale task result");
                vec![]
            }
        }
        UiEvent::Session(event) => sessions::handle_session_event(&mut app.tui, event),
        UiEvent::Chat(event) => input::handle_chat_event(&mut app.tui, event),
        UiEvent::Attachment(event) => attachment::handle_attachment_event(app, event),
    }
}

fn handle_frame(tui: &mut TuiState, width: u16, height: u16) {
    let areas = render::layout(tui, Rect::new(0, 0, width, height));
    let palette = tui.chrome.palette();
    let max = transcript::render::max_scroll(
        &mut tui.transcript,
        &palette,
        areas.main.width,
        areas.main.height,
    );
    tui.transcript.set_viewport(areas.main.height, max);
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            if let Some(overlay) = app.overlay.as_mut() {
                overlay.handle_paste(&text);
            } else if !app.tui.chrome.sidebar_open {
                app.tui.input.buffer.insert_str(&text);
            }
            vec![]
        }
        Event::Mouse(mouse) => {
            match mouse.kind {
                MouseEventKind::ScrollUp => app.tui.transcript.scroll_up(MOUSE_SCROLL_LINES),
                MouseEventKind::ScrollDown => app.tui.transcript.scroll_down(MOUSE_SCROLL_LINES),
                _ => {}
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }
    if app.overlay.is_some() {
        return overlays::handle_overlay_key(app, key);
    }

    if ctrl {
        match key.code {
            KeyCode::Char('t') => return chrome::toggle_theme(&mut app.tui.chrome),
            KeyCode::Char('b') => {
                chrome::toggle_sidebar(&mut app.tui.chrome);
                return vec![];
            }
            KeyCode::Char('o') => {
                app.overlay = Some(Overlay::AttachFile(AttachFileState::default()));
                return vec![];
            }
            KeyCode::Char('x') => {
                attachment::clear_attachment(&mut app.tui.attachment);
                return vec![];
            }
            KeyCode::Char('n') => return sessions::start_new_chat(&mut app.tui),
            _ => {}
        }
    }

    if app.tui.chrome.sidebar_open {
        return handle_sidebar_key(app, key);
    }
    if key.code == KeyCode::Esc {
        return input::cancel_send(&mut app.tui);
    }
    input::handle_input_key(&mut app.tui, key)
}

/// The open sidebar owns the keyboard. Delete is checked before load so a
/// delete never also opens the row.
fn handle_sidebar_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let tui = &mut app.tui;
    match key.code {
        KeyCode::Esc => {
            tui.chrome.sidebar_open = false;
            vec![]
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(session) = tui.sessions.selected_session() {
                app.overlay = Some(Overlay::ConfirmDelete(ConfirmDeleteState::new(
                    session.id,
                    session.title.clone(),
                )));
            }
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') => {
            tui.sessions.select_prev();
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            tui.sessions.select_next();
            vec![]
        }
        KeyCode::Enter => match tui.sessions.selected_session().map(|s| s.id) {
            Some(id) => sessions::load_session(tui, id),
            None => vec![],
        },
        KeyCode::Char('n') => sessions::start_new_chat(tui),
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use sage_core::api::{ChatReply, Session, StoredMessage};
    use sage_core::attachment::FileCandidate;
    use sage_core::config::Config;
    use sage_core::message::{MessageBody, Sender};
    use sage_core::prefs::Theme;

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskKind};
    use crate::events::{AttachmentUiEvent, ChatUiEvent, SessionUiEvent};
    use crate::input::SendKind;

    const MIB: u64 = 1024 * 1024;

    fn app() -> AppState {
        AppState::new(Config::default(), Theme::Light)
    }

    fn press(app: &mut AppState, code: KeyCode, modifiers: KeyModifiers) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(code, modifiers))),
        )
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch), KeyModifiers::NONE);
        }
    }

    fn complete(app: &mut AppState, kind: TaskKind, id: TaskId, event: UiEvent) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id,
                    result: Box::new(event),
                },
            },
        )
    }

    fn task_of(effects: &[UiEffect]) -> TaskId {
        effects
            .iter()
            .find_map(|e| match e {
                UiEffect::ListSessions { task }
                | UiEffect::LoadSession { task, .. }
                | UiEffect::DeleteSession { task, .. }
                | UiEffect::StartNewChat { task }
                | UiEffect::SendChat { task, .. }
                | UiEffect::UploadFile { task, .. }
                | UiEffect::InspectFile { task, .. } => Some(*task),
                _ => None,
            })
            .expect("effect with a task")
    }

    fn is_list(effect: &UiEffect) -> bool {
        matches!(effect, UiEffect::ListSessions { .. })
    }

    fn session(id: i64, title: &str) -> Session {
        Session {
            id,
            title: title.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    fn stored(message: &str, sender: &str) -> StoredMessage {
        StoredMessage {
            message: message.to_string(),
            sender: sender.to_string(),
            created_at: None,
        }
    }

    fn reply(text: &str, session_id: Option<i64>) -> ChatReply {
        ChatReply {
            response: text.to_string(),
            session_id,
            filename: None,
        }
    }

    fn candidate(name: &str, mime_type: &str, size: u64) -> FileCandidate {
        FileCandidate {
            path: PathBuf::from(format!("/tmp/{name}")),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size,
        }
    }

    /// Runs a file through the inspect task as if the runtime had sniffed it.
    fn pick_file(app: &mut AppState, candidate: FileCandidate) -> Vec<UiEffect> {
        let effects = attachment::inspect_path(app, candidate.path.clone());
        let task = task_of(&effects);
        complete(
            app,
            TaskKind::FileInspect,
            task,
            UiEvent::Attachment(AttachmentUiEvent::Inspected { candidate }),
        )
    }

    fn load(app: &mut AppState, id: i64, messages: Vec<StoredMessage>) -> Vec<UiEffect> {
        let effects = sessions::load_session(&mut app.tui, id);
        let task = task_of(&effects);
        complete(
            app,
            TaskKind::SessionLoad,
            task,
            UiEvent::Session(SessionUiEvent::Loaded { id, messages }),
        )
    }

    fn assistant_texts(app: &AppState) -> Vec<String> {
        app.tui
            .transcript
            .messages()
            .iter()
            .filter(|n| n.sender == Sender::Assistant)
            .map(|n| n.body.raw().to_string())
            .collect()
    }

    #[test]
    fn test_init_requests_session_list() {
        let mut app = app();
        let effects = init(&mut app);
        assert!(matches!(effects.as_slice(), [UiEffect::ListSessions { .. }]));
        assert!(app.tui.tasks.session_list.is_running());
    }

    #[test]
    fn test_empty_send_is_a_noop() {
        let mut app = app();
        type_text(&mut app, "   ");

        let effects = press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(effects.is_empty());
        assert!(app.tui.is_welcome());
        assert!(app.tui.transcript.is_empty());
        assert!(!app.tui.transcript.is_typing());
        assert_eq!(app.tui.input.text(), "   ");
        assert!(!app.tui.tasks.send.is_running());
    }

    #[test]
    fn test_send_renders_user_message_and_reply() {
        let mut app = app();
        type_text(&mut app, "I can't sleep");

        let effects = press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::SendChat { message, .. }] if message == "I can't sleep"
        ));
        assert!(!app.tui.is_welcome());
        assert!(app.tui.transcript.is_typing());
        assert_eq!(app.tui.input.text(), "");

        let effects = complete(
            &mut app,
            TaskKind::Send,
            task_of(&effects),
            UiEvent::Chat(ChatUiEvent::Replied {
                kind: SendKind::Chat,
                reply: reply("Try a fixed bedtime.", Some(12)),
            }),
        );
        assert!(!app.tui.transcript.is_typing());
        assert_eq!(assistant_texts(&app), vec!["Try a fixed bedtime."]);
        assert_eq!(app.tui.current_session_id(), Some(12));
        assert!(effects.iter().any(is_list));
    }

    #[test]
    fn test_chat_failure_renders_fixed_text() {
        let mut app = app();
        type_text(&mut app, "hello");
        let effects = press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        let after = complete(
            &mut app,
            TaskKind::Send,
            task_of(&effects),
            UiEvent::Chat(ChatUiEvent::Failed {
                kind: SendKind::Chat,
            }),
        );
        assert!(after.is_empty());
        assert_eq!(
            assistant_texts(&app),
            vec!["Connection error. Please try again."]
        );
        assert!(!app.tui.transcript.is_typing());
        assert_eq!(app.tui.current_session_id(), None);
    }

    #[test]
    fn test_user_script_tag_is_escaped() {
        let mut app = app();
        type_text(&mut app, "<script>alert('x')</script>");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        let node = &app.tui.transcript.messages()[0];
        assert_eq!(
            node.body,
            MessageBody::PlainText("<script>alert('x')</script>".to_string())
        );
        assert!(node.body.to_html().starts_with("&lt;script&gt;"));
        assert_eq!(node.display_text(), "<script>alert('x')</script>");
    }

    #[test]
    fn test_second_send_while_in_flight_keeps_text() {
        let mut app = app();
        type_text(&mut app, "first");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        type_text(&mut app, "second");

        let effects = press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(effects.is_empty());
        assert_eq!(app.tui.input.text(), "second");
        assert_eq!(app.tui.transcript.messages().len(), 1);
    }

    #[test]
    fn test_esc_cancels_send_and_drops_late_reply() {
        let mut app = app();
        type_text(&mut app, "hello");
        let effects = press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        let task = task_of(&effects);

        let cancel = press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(matches!(
            cancel.as_slice(),
            [UiEffect::CancelTask {
                kind: TaskKind::Send,
                ..
            }]
        ));
        assert!(!app.tui.transcript.is_typing());
        assert!(!app.tui.tasks.send.is_running());

        let late = complete(
            &mut app,
            TaskKind::Send,
            task,
            UiEvent::Chat(ChatUiEvent::Replied {
                kind: SendKind::Chat,
                reply: reply("too late", None),
            }),
        );
        assert!(late.is_empty());
        assert!(assistant_texts(&app).is_empty());
    }

    #[test]
    fn test_unsupported_type_is_rejected_without_mutation() {
        let mut app = app();
        pick_file(&mut app, candidate("notes.txt", "text/plain", 10));

        assert!(app.tui.selected_file().is_none());
        assert!(matches!(
            &app.overlay,
            Some(Overlay::Alert(alert)) if alert.message == "Please upload an image or PDF file."
        ));
    }

    #[test]
    fn test_size_limit() {
        let mut app = app();
        pick_file(&mut app, candidate("mri.png", "image/png", 11 * MIB));
        assert!(app.tui.selected_file().is_none());
        assert!(matches!(
            &app.overlay,
            Some(Overlay::Alert(alert)) if alert.message == "File size should be less than 10MB."
        ));

        app.overlay = None;
        pick_file(&mut app, candidate("xray.png", "image/png", 9 * MIB));
        assert!(app.overlay.is_none());
        assert_eq!(
            app.tui.attachment.preview_label().as_deref(),
            Some("📎 xray.png")
        );
    }

    #[test]
    fn test_unreadable_file_alerts() {
        let mut app = app();
        let effects = attachment::inspect_path(&mut app, PathBuf::from("/nope"));
        complete(
            &mut app,
            TaskKind::FileInspect,
            task_of(&effects),
            UiEvent::Attachment(AttachmentUiEvent::InspectFailed {
                rejection: sage_core::attachment::AttachmentRejection::Unreadable {
                    reason: "not found".into(),
                },
            }),
        );
        assert!(matches!(
            &app.overlay,
            Some(Overlay::Alert(alert)) if alert.message == "Could not read that file."
        ));
    }

    #[test]
    fn test_upload_clears_attachment_before_reply() {
        let mut app = app();
        pick_file(&mut app, candidate("rash.png", "image/png", MIB));

        let effects = press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.tui.selected_file().is_none());
        assert!(app.tui.attachment.preview_label().is_none());
        match effects.as_slice() {
            [UiEffect::UploadFile {
                attachment,
                message,
                ..
            }] => {
                assert_eq!(attachment.name, "rash.png");
                assert_eq!(message, "");
            }
            other => panic!("unexpected effects: {other:?}"),
        }
        assert_eq!(
            app.tui.transcript.messages()[0].body.raw(),
            "📎 rash.png: Analyze this"
        );
        assert!(app.tui.transcript.is_typing());
    }

    #[test]
    fn test_upload_caption_uses_typed_text() {
        let mut app = app();
        pick_file(&mut app, candidate("scan.pdf", "application/pdf", MIB));
        type_text(&mut app, "is this normal?");

        let effects = press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::UploadFile { message, .. }] if message == "is this normal?"
        ));
        assert_eq!(
            app.tui.transcript.messages()[0].body.raw(),
            "📎 scan.pdf: is this normal?"
        );
    }

    #[test]
    fn test_upload_failure_appends_one_apology() {
        let mut app = app();
        pick_file(&mut app, candidate("rash.png", "image/png", MIB));
        let effects = press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        let after = complete(
            &mut app,
            TaskKind::Send,
            task_of(&effects),
            UiEvent::Chat(ChatUiEvent::Failed {
                kind: SendKind::Upload,
            }),
        );
        assert!(after.is_empty());
        assert_eq!(
            assistant_texts(&app),
            vec!["Sorry, couldn't process that file."]
        );
        assert!(!app.tui.transcript.is_typing());
    }

    #[test]
    fn test_ctrl_x_clears_attachment() {
        let mut app = app();
        pick_file(&mut app, candidate("rash.png", "image/png", MIB));
        press(&mut app, KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert!(app.tui.selected_file().is_none());
    }

    #[test]
    fn test_ctrl_o_opens_attach_prompt() {
        let mut app = app();
        press(&mut app, KeyCode::Char('o'), KeyModifiers::CONTROL);
        assert!(matches!(app.overlay, Some(Overlay::AttachFile(_))));

        type_text(&mut app, "/tmp/a.pdf");
        let effects = press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.overlay.is_none());
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::InspectFile { path, .. }] if path == &PathBuf::from("/tmp/a.pdf")
        ));
    }

    #[test]
    fn test_load_session_replaces_messages() {
        let mut app = app();
        type_text(&mut app, "old");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        app.tui.chrome.sidebar_open = true;

        let effects = load(
            &mut app,
            5,
            vec![
                stored("I twisted my ankle", "user"),
                stored("Rest, ice, compress, elevate.", "sage"),
                stored("Thanks", "user"),
            ],
        );

        assert_eq!(app.tui.current_session_id(), Some(5));
        let got: Vec<(Sender, &str)> = app
            .tui
            .transcript
            .messages()
            .iter()
            .map(|n| (n.sender, n.body.raw()))
            .collect();
        assert_eq!(
            got,
            vec![
                (Sender::User, "I twisted my ankle"),
                (Sender::Assistant, "Rest, ice, compress, elevate."),
                (Sender::User, "Thanks"),
            ]
        );
        assert!(!app.tui.is_welcome());
        assert!(!app.tui.chrome.sidebar_open);
        assert_eq!(app.tui.transcript.scroll_offset(), 0);
        assert!(effects.iter().any(is_list));
    }

    #[test]
    fn test_load_failure_leaves_state() {
        let mut app = app();
        load(&mut app, 5, vec![stored("hi", "user")]);

        let effects = sessions::load_session(&mut app.tui, 9);
        let after = complete(
            &mut app,
            TaskKind::SessionLoad,
            task_of(&effects),
            UiEvent::Session(SessionUiEvent::LoadFailed { id: 9 }),
        );
        assert!(after.is_empty());
        assert_eq!(app.tui.current_session_id(), Some(5));
        assert_eq!(app.tui.transcript.messages().len(), 1);
    }

    #[test]
    fn test_new_chat_restores_welcome() {
        let mut app = app();
        load(&mut app, 5, vec![stored("hi", "user")]);
        app.tui.chrome.sidebar_open = true;

        let effects = press(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert!(matches!(effects.as_slice(), [UiEffect::StartNewChat { .. }]));

        let after = complete(
            &mut app,
            TaskKind::NewChat,
            task_of(&effects),
            UiEvent::Session(SessionUiEvent::NewChatStarted),
        );
        assert_eq!(app.tui.current_session_id(), None);
        assert!(app.tui.transcript.is_empty());
        assert!(app.tui.is_welcome());
        assert!(!app.tui.chrome.sidebar_open);
        assert!(after.iter().any(is_list));
    }

    #[test]
    fn test_new_chat_failure_keeps_conversation() {
        let mut app = app();
        load(&mut app, 5, vec![stored("hi", "user")]);
        let effects = sessions::start_new_chat(&mut app.tui);
        complete(
            &mut app,
            TaskKind::NewChat,
            task_of(&effects),
            UiEvent::Session(SessionUiEvent::NewChatFailed),
        );
        assert_eq!(app.tui.current_session_id(), Some(5));
        assert!(!app.tui.is_welcome());
    }

    #[test]
    fn test_new_chat_drops_reply_still_in_flight() {
        let mut app = app();
        type_text(&mut app, "hello");
        let send = task_of(&press(&mut app, KeyCode::Enter, KeyModifiers::NONE));

        let effects = press(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
        let after = complete(
            &mut app,
            TaskKind::NewChat,
            task_of(&effects),
            UiEvent::Session(SessionUiEvent::NewChatStarted),
        );
        assert!(after.iter().any(|e| matches!(
            e,
            UiEffect::CancelTask {
                kind: TaskKind::Send,
                ..
            }
        )));
        assert!(!app.tui.transcript.is_typing());

        let late = complete(
            &mut app,
            TaskKind::Send,
            send,
            UiEvent::Chat(ChatUiEvent::Replied {
                kind: SendKind::Chat,
                reply: reply("Hi!", Some(99)),
            }),
        );
        assert!(late.is_empty());
        assert!(app.tui.is_welcome());
        assert!(app.tui.transcript.is_empty());
        assert_eq!(app.tui.current_session_id(), None);
    }

    #[test]
    fn test_loading_session_drops_reply_still_in_flight() {
        let mut app = app();
        type_text(&mut app, "hello");
        let send = task_of(&press(&mut app, KeyCode::Enter, KeyModifiers::NONE));

        let effects = load(&mut app, 5, vec![stored("earlier question", "user")]);
        assert!(effects.iter().any(|e| matches!(
            e,
            UiEffect::CancelTask {
                kind: TaskKind::Send,
                ..
            }
        )));
        assert!(!app.tui.tasks.send.is_running());

        let late = complete(
            &mut app,
            TaskKind::Send,
            send,
            UiEvent::Chat(ChatUiEvent::Replied {
                kind: SendKind::Chat,
                reply: reply("meant for another chat", Some(99)),
            }),
        );
        assert!(late.is_empty());
        assert_eq!(app.tui.current_session_id(), Some(5));
        assert_eq!(app.tui.transcript.messages().len(), 1);
        assert!(assistant_texts(&app).is_empty());
    }

    #[test]
    fn test_server_current_id_only_adopted_in_conversation() {
        let mut app = app();
        let effects = init(&mut app);
        complete(
            &mut app,
            TaskKind::SessionList,
            task_of(&effects),
            UiEvent::Session(SessionUiEvent::ListLoaded {
                sessions: vec![session(3, "Cough")],
                current_session_id: Some(3),
            }),
        );
        assert_eq!(app.tui.current_session_id(), None);
        assert!(app.tui.is_welcome());
        assert_eq!(app.tui.sessions.sessions().len(), 1);

        app.tui.enter_conversation();
        let effects = sessions::list_sessions(&mut app.tui);
        complete(
            &mut app,
            TaskKind::SessionList,
            task_of(&effects),
            UiEvent::Session(SessionUiEvent::ListLoaded {
                sessions: vec![session(3, "Cough")],
                current_session_id: Some(3),
            }),
        );
        assert_eq!(app.tui.current_session_id(), Some(3));
    }

    #[test]
    fn test_stale_list_result_is_dropped() {
        let mut app = app();
        let first = task_of(&sessions::list_sessions(&mut app.tui));
        let second = task_of(&sessions::list_sessions(&mut app.tui));

        complete(
            &mut app,
            TaskKind::SessionList,
            first,
            UiEvent::Session(SessionUiEvent::ListLoaded {
                sessions: vec![session(1, "Stale")],
                current_session_id: None,
            }),
        );
        assert!(app.tui.sessions.is_empty());
        assert!(app.tui.tasks.session_list.is_running());

        complete(
            &mut app,
            TaskKind::SessionList,
            second,
            UiEvent::Session(SessionUiEvent::ListLoaded {
                sessions: vec![session(2, "Fresh")],
                current_session_id: None,
            }),
        );
        assert_eq!(app.tui.sessions.sessions()[0].title, "Fresh");
    }

    #[test]
    fn test_deleting_current_session_starts_new_chat() {
        let mut app = app();
        load(&mut app, 4, vec![stored("hi", "user")]);

        let effects = sessions::delete_session(&mut app.tui, 4);
        let after = complete(
            &mut app,
            TaskKind::SessionDelete,
            task_of(&effects),
            UiEvent::Session(SessionUiEvent::Deleted { id: 4 }),
        );
        assert!(after.iter().any(|e| matches!(e, UiEffect::StartNewChat { .. })));
        assert!(after.iter().any(is_list));
    }

    #[test]
    fn test_deleting_other_session_only_refreshes() {
        let mut app = app();
        load(&mut app, 4, vec![stored("hi", "user")]);

        let effects = sessions::delete_session(&mut app.tui, 8);
        let after = complete(
            &mut app,
            TaskKind::SessionDelete,
            task_of(&effects),
            UiEvent::Session(SessionUiEvent::Deleted { id: 8 }),
        );
        assert_eq!(after.len(), 1);
        assert!(is_list(&after[0]));
        assert_eq!(app.tui.current_session_id(), Some(4));
    }

    #[test]
    fn test_sidebar_delete_asks_before_loading() {
        let mut app = app();
        app.tui
            .sessions
            .render_sessions(vec![session(1, "Cough"), session(2, "Sleep")]);
        press(&mut app, KeyCode::Char('b'), KeyModifiers::CONTROL);
        assert!(app.tui.chrome.sidebar_open);

        press(&mut app, KeyCode::Down, KeyModifiers::NONE);
        let effects = press(&mut app, KeyCode::Char('d'), KeyModifiers::NONE);
        assert!(effects.is_empty());
        assert!(!app.tui.tasks.session_load.is_running());
        assert!(matches!(
            &app.overlay,
            Some(Overlay::ConfirmDelete(c)) if c.session_id == 2
        ));

        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        let effects = press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::LoadSession { id: 2, .. }]
        ));
    }

    #[test]
    fn test_sidebar_keys_do_not_reach_input() {
        let mut app = app();
        press(&mut app, KeyCode::Char('b'), KeyModifiers::CONTROL);
        type_text(&mut app, "xyz");
        assert_eq!(app.tui.input.text(), "");

        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.tui.chrome.sidebar_open);
    }

    #[test]
    fn test_ctrl_t_toggles_and_persists_theme() {
        let mut app = app();
        let effects = press(&mut app, KeyCode::Char('t'), KeyModifiers::CONTROL);
        assert_eq!(app.tui.chrome.theme, Theme::Dark);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::PersistTheme { theme: Theme::Dark }]
        ));
    }

    #[test]
    fn test_ctrl_c_quits_even_with_overlay() {
        let mut app = app();
        app.overlay = Some(Overlay::AttachFile(AttachFileState::default()));
        let effects = press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }

    #[test]
    fn test_paste_goes_to_composer() {
        let mut app = app();
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("line one\nline two".to_string())),
        );
        assert_eq!(app.tui.input.text(), "line one\nline two");
    }

    #[test]
    fn test_frame_clamps_scroll() {
        let mut app = app();
        load(&mut app, 1, vec![stored("hi", "user")]);
        app.tui.transcript.scroll_up(500);
        update(
            &mut app,
            UiEvent::Frame {
                width: 80,
                height: 40,
            },
        );
        assert_eq!(app.tui.transcript.scroll_offset(), 0);
    }
}
