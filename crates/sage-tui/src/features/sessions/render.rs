use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::{EMPTY_PLACEHOLDER, SessionsState};
use crate::common::truncate_with_ellipsis;
use crate::features::chrome::Palette;

/// Sidebar width in columns, borders included.
pub const SIDEBAR_WIDTH: u16 = 34;

const DELETE_GLYPH: &str = "✕";

pub fn render_sidebar(frame: &mut Frame, area: Rect, state: &SessionsState, palette: &Palette) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" Chat history ")
        .title_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(palette.bg).fg(palette.fg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let list_height = inner.height.saturating_sub(1);
    let lines = sidebar_lines(state, palette, inner.width, list_height as usize);
    frame.render_widget(
        Paragraph::new(lines),
        Rect::new(inner.x, inner.y, inner.width, list_height),
    );

    let hints = Line::from(Span::styled(
        "↑↓ select · ⏎ open · d delete · n new",
        Style::default().fg(palette.muted),
    ));
    frame.render_widget(
        Paragraph::new(hints),
        Rect::new(inner.x, inner.y + list_height, inner.width, 1),
    );
}

/// Builds the visible rows, scrolled so the selected row stays in view.
pub fn sidebar_lines(
    state: &SessionsState,
    palette: &Palette,
    width: u16,
    height: usize,
) -> Vec<Line<'static>> {
    if state.is_empty() {
        return vec![Line::from(Span::styled(
            EMPTY_PLACEHOLDER,
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        ))];
    }

    let rows = state.rows();
    let selected = rows.iter().position(|r| r.selected).unwrap_or(0);
    let skip = (selected + 1).saturating_sub(height.max(1));
    // marker (2) + title + gap (1) + delete glyph (1)
    let title_width = (width as usize).saturating_sub(4);

    rows.iter()
        .skip(skip)
        .take(height.max(1))
        .map(|row| {
            let mut style = Style::default().fg(palette.fg);
            if row.active {
                style = style.fg(palette.accent).add_modifier(Modifier::BOLD);
            }
            if row.selected {
                style = style.bg(palette.selection_bg);
            }
            let marker = if row.active { "● " } else { "  " };
            let title = truncate_with_ellipsis(row.title, title_width);
            let pad = title_width.saturating_sub(unicode_width::UnicodeWidthStr::width(
                title.as_str(),
            ));
            Line::from(vec![
                Span::styled(marker, style),
                Span::styled(format!("{title}{} ", " ".repeat(pad)), style),
                Span::styled(DELETE_GLYPH, style.fg(palette.muted)),
            ])
        })
        .collect()
}
