//! Modal overlays.
//!
//! An open overlay takes all keyboard input. Each one owns its state, key
//! handler and render function; key handlers report what should happen
//! next as an `OverlayUpdate`, and the reducer turns its actions into
//! effects.
//!
//! - `alert.rs`: validation alerts
//! - `confirm_delete.rs`: session delete confirmation
//! - `attach_file.rs`: file path prompt
//! - `render_utils.rs`: shared drawing

mod alert;
mod attach_file;
mod confirm_delete;
pub mod render_utils;

use std::path::PathBuf;

pub use alert::AlertState;
pub use attach_file::AttachFileState;
pub use confirm_delete::{CONFIRM_PROMPT, ConfirmDeleteState};
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::features::chrome::Palette;
use crate::state::AppState;
use crate::{attachment, sessions};

#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Work requested by an overlay, turned into effects by the reducer.
#[derive(Debug, PartialEq, Eq)]
pub enum OverlayAction {
    DeleteSession(i64),
    InspectFile(PathBuf),
}

#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub actions: Vec<OverlayAction>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            actions: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_action(mut self, action: OverlayAction) -> Self {
        self.actions.push(action);
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    Alert(AlertState),
    ConfirmDelete(ConfirmDeleteState),
    AttachFile(AttachFileState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        match self {
            Overlay::Alert(a) => a.render(frame, area, palette),
            Overlay::ConfirmDelete(c) => c.render(frame, area, palette),
            Overlay::AttachFile(f) => f.render(frame, area, palette),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Alert(a) => a.handle_key(key),
            Overlay::ConfirmDelete(c) => c.handle_key(key),
            Overlay::AttachFile(f) => f.handle_key(key),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let Overlay::AttachFile(f) = self {
            f.handle_paste(text);
        }
    }
}

pub trait OverlayExt {
    fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        if let Some(overlay) = self {
            overlay.render(frame, area, palette);
        }
    }
}

/// Routes a key to the open overlay and applies its update.
pub fn handle_overlay_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let Some(overlay) = app.overlay.as_mut() else {
        return vec![];
    };
    let update = overlay.handle_key(key);
    if matches!(update.transition, OverlayTransition::Close) {
        app.overlay = None;
    }

    let mut effects = Vec::new();
    for action in update.actions {
        match action {
            OverlayAction::DeleteSession(id) => {
                effects.extend(sessions::delete_session(&mut app.tui, id));
            }
            OverlayAction::InspectFile(path) => {
                effects.extend(attachment::inspect_path(app, path));
            }
        }
    }
    effects
}
