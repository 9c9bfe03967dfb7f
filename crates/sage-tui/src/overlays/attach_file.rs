//! Path prompt for attaching a file.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use super::render_utils::{InputHint, OverlayConfig, render_input_line, render_overlay};
use super::{OverlayAction, OverlayUpdate};
use crate::features::chrome::Palette;

#[derive(Debug, Clone, Default)]
pub struct AttachFileState {
    pub input: String,
    pub error: Option<String>,
}

impl AttachFileState {
    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.error = None;
        }

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Enter => match parse_path(&self.input) {
                Some(path) => OverlayUpdate::close().with_action(OverlayAction::InspectFile(path)),
                None => {
                    self.error = Some("Type the path of an image or PDF".to_string());
                    OverlayUpdate::stay()
                }
            },
            KeyCode::Backspace => {
                self.input.pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.error = None;
        self.input.push_str(text.trim_end_matches(['\r', '\n']));
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let hints = [InputHint::new("Enter", "attach"), InputHint::new("Esc", "cancel")];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Attach file",
                border_color: palette.chip,
                width: 64,
                height: 5,
                hints: &hints,
            },
            palette,
        );
        let line = Rect::new(layout.body.x, layout.body.y, layout.body.width, 1);
        render_input_line(frame, line, &self.input, "~/Downloads/scan.pdf", palette);

        let (text, style) = match &self.error {
            Some(error) => (error.as_str(), Style::default().fg(palette.error)),
            None => (
                "Images (JPEG, PNG, GIF, WebP) or PDF, up to 10MB",
                Style::default().fg(palette.muted),
            ),
        };
        if layout.body.height > 1 {
            frame.render_widget(
                Paragraph::new(Span::styled(text, style)),
                Rect::new(layout.body.x, layout.body.y + 1, layout.body.width, 1),
            );
        }
    }
}

/// Trims, strips the quotes terminals add to dropped paths, and expands
/// a leading `~`.
fn parse_path(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(trimmed);
    if unquoted.is_empty() {
        return None;
    }
    if let Some(rest) = unquoted.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return Some(home.join(rest));
    }
    Some(PathBuf::from(unquoted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_strips_quotes() {
        assert_eq!(
            parse_path("  '/tmp/x ray.png' "),
            Some(PathBuf::from("/tmp/x ray.png"))
        );
        assert_eq!(parse_path("\"/tmp/a.pdf\""), Some(PathBuf::from("/tmp/a.pdf")));
        assert_eq!(parse_path("   "), None);
        assert_eq!(parse_path("''"), None);
    }

    #[test]
    fn test_parse_path_expands_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(parse_path("~/scan.pdf"), Some(home.join("scan.pdf")));
        }
    }

    #[test]
    fn test_enter_on_empty_input_stays_with_error() {
        let mut state = AttachFileState::default();
        let update = state.handle_key(KeyEvent::from(KeyCode::Enter));
        assert!(matches!(update.transition, crate::overlays::OverlayTransition::Stay));
        assert!(state.error.is_some());
    }

    #[test]
    fn test_enter_with_path_requests_inspection() {
        let mut state = AttachFileState::default();
        state.handle_paste("/tmp/rash.png\n");
        let update = state.handle_key(KeyEvent::from(KeyCode::Enter));
        assert!(matches!(
            update.actions.as_slice(),
            [OverlayAction::InspectFile(p)] if p == &PathBuf::from("/tmp/rash.png")
        ));
    }
}
