use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::InputState;
use crate::common::sanitize_for_display;
use crate::features::chrome::Palette;

const MAX_VISIBLE_LINES: usize = 6;
const PLACEHOLDER: &str = "Ask Sage about your health…";

/// Height of the composer box, borders included.
pub fn input_height(input: &InputState) -> u16 {
    let lines = input.buffer.lines().len().clamp(1, MAX_VISIBLE_LINES);
    lines as u16 + 2
}

pub fn render_input(
    frame: &mut Frame,
    area: Rect,
    input: &InputState,
    sending: bool,
    palette: &Palette,
) {
    let title = if sending {
        " Sending… (Esc to cancel) "
    } else {
        " Message "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if sending {
            palette.muted
        } else {
            palette.accent
        }))
        .title(title)
        .style(Style::default().bg(palette.bg).fg(palette.fg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (row, col) = input.buffer.cursor_position();
    let height = inner.height as usize;
    let skip = (row + 1).saturating_sub(height.max(1));

    let lines: Vec<Line<'static>> = if input.text().is_empty() {
        vec![Line::from(Span::styled(
            PLACEHOLDER,
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        ))]
    } else {
        input
            .buffer
            .lines()
            .into_iter()
            .skip(skip)
            .take(height)
            .map(|l| Line::from(sanitize_for_display(l).into_owned()))
            .collect()
    };
    frame.render_widget(Paragraph::new(lines), inner);

    let x = inner.x + (col as u16).min(inner.width.saturating_sub(1));
    let y = inner.y + (row - skip) as u16;
    frame.set_cursor_position(Position::new(x, y));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_height_grows_then_caps() {
        let mut input = InputState::default();
        assert_eq!(input_height(&input), 3);
        input.set_text("a\nb\nc");
        assert_eq!(input_height(&input), 5);
        input.set_text(&"x\n".repeat(20));
        assert_eq!(input_height(&input), 8);
    }
}
