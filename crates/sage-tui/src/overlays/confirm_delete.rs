//! "Delete this conversation?" confirmation.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::render_utils::{InputHint, OverlayConfig, render_message, render_overlay};
use super::{OverlayAction, OverlayUpdate};
use crate::common::truncate_with_ellipsis;
use crate::features::chrome::Palette;

pub const CONFIRM_PROMPT: &str = "Delete this conversation?";

#[derive(Debug, Clone)]
pub struct ConfirmDeleteState {
    pub session_id: i64,
    pub title: String,
}

impl ConfirmDeleteState {
    pub fn new(session_id: i64, title: impl Into<String>) -> Self {
        Self {
            session_id,
            title: title.into(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                OverlayUpdate::close().with_action(OverlayAction::DeleteSession(self.session_id))
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let hints = [InputHint::new("y", "delete"), InputHint::new("n", "keep")];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: CONFIRM_PROMPT,
                border_color: palette.error,
                width: 46,
                height: 6,
                hints: &hints,
            },
            palette,
        );
        let title = truncate_with_ellipsis(&self.title, layout.body.width as usize);
        render_message(
            frame,
            layout.body,
            &title,
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
        );
    }
}
