//! Blocking alert, the terminal stand-in for a browser `alert()`.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_message, render_overlay};
use crate::features::chrome::Palette;

#[derive(Debug, Clone)]
pub struct AlertState {
    pub message: String,
}

impl AlertState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let hints = [InputHint::new("Enter", "ok")];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Sage",
                border_color: palette.error,
                width: 48,
                height: 6,
                hints: &hints,
            },
            palette,
        );
        render_message(
            frame,
            layout.body,
            &self.message,
            Style::default().fg(palette.fg),
        );
    }
}
