//! Shared drawing for modal overlays.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::common::truncate_with_ellipsis;
use crate::features::chrome::Palette;

/// Centers a `width` x `height` box in `area`, shrinking it to fit.
pub fn overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

pub struct OverlayConfig<'a> {
    pub title: &'a str,
    pub border_color: Color,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
}

/// Body rectangle of a drawn overlay (inside the border, above the hints).
pub struct OverlayLayout {
    pub body: Rect,
}

/// Clears the background, draws the border, title and hint row.
pub fn render_overlay(
    frame: &mut Frame,
    area: Rect,
    config: &OverlayConfig<'_>,
    palette: &Palette,
) -> OverlayLayout {
    let popup = overlay_area(area, config.width, config.height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.border_color))
        .title(format!(" {} ", config.title))
        .title_style(
            Style::default()
                .fg(config.border_color)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(palette.bg).fg(palette.fg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let footer_height = u16::from(!config.hints.is_empty());
    let body_height = inner.height.saturating_sub(footer_height);
    if footer_height > 0 {
        let footer = Rect::new(inner.x, inner.y + body_height, inner.width, 1);
        render_hints(frame, footer, config.hints, config.border_color, palette);
    }

    OverlayLayout {
        body: Rect::new(inner.x, inner.y, inner.width, body_height),
    }
}

pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

fn render_hints(
    frame: &mut Frame,
    area: Rect,
    hints: &[InputHint<'_>],
    highlight: Color,
    palette: &Palette,
) {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(palette.muted)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(palette.muted),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Wrapped, centered message text.
pub fn render_message(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    frame.render_widget(
        Paragraph::new(text.to_string())
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Draws `> value█`, keeping the tail of long values visible.
pub fn render_input_line(
    frame: &mut Frame,
    area: Rect,
    value: &str,
    placeholder: &str,
    palette: &Palette,
) {
    let max_width = area.width.saturating_sub(3) as usize;
    let mut spans = vec![Span::styled("> ", Style::default().fg(palette.muted))];
    if value.is_empty() {
        spans.push(Span::styled("█", Style::default().fg(palette.accent)));
        spans.push(Span::styled(
            truncate_with_ellipsis(placeholder, max_width),
            Style::default().fg(palette.muted),
        ));
    } else {
        spans.push(Span::styled(
            tail_within(value, max_width),
            Style::default().fg(palette.fg),
        ));
        spans.push(Span::styled("█", Style::default().fg(palette.accent)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Keeps the end of `text` within `max_width` columns, prefixed with `…`
/// when cut.
fn tail_within(text: &str, max_width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if text.width() <= max_width {
        return text.to_string();
    }
    let mut kept: Vec<char> = Vec::new();
    let mut width = 1;
    for ch in text.chars().rev() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        kept.push(ch);
    }
    std::iter::once('…').chain(kept.into_iter().rev()).collect()
}
