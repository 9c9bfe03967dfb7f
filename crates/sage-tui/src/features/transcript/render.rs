//! Transcript drawing.
//!
//! Nodes become header + body lines; the body is wrapped to the viewport
//! and the typing indicator, when visible, is drawn last.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use sage_core::markup::{MarkupLine, SpanStyle};
use sage_core::message::Sender;

use super::state::{MessageNode, TranscriptState};
use crate::common::{sanitize_for_display, wrap_ranges};
use crate::features::chrome::Palette;

const BODY_INDENT: &str = "   ";
const SPINNER: [&str; 4] = ["   ", ".  ", ".. ", "..."];

/// Builds every display line of the transcript for a given width.
pub fn build_lines(
    state: &TranscriptState,
    palette: &Palette,
    width: u16,
    spinner_frame: usize,
) -> Vec<Line<'static>> {
    let body_width = (width as usize).saturating_sub(BODY_INDENT.len()).max(1);
    let mut lines = Vec::new();

    for node in state.messages() {
        lines.push(header_line(node, palette));
        for markup in &node.lines {
            lines.extend(body_lines(markup, palette, body_width));
        }
        lines.push(Line::default());
    }

    if state.is_typing() {
        let dots = SPINNER[(spinner_frame / 8) % SPINNER.len()];
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", Sender::Assistant.avatar()),
                Style::default().fg(palette.assistant),
            ),
            Span::styled(
                format!("{} is typing{dots}", Sender::Assistant.label()),
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]));
    }

    lines
}

/// Largest scroll offset for a viewport, in lines from the bottom.
///
/// The line count is cached per width, so repeated frames with an
/// unchanged transcript do not re-wrap it.
pub fn max_scroll(
    state: &mut TranscriptState,
    palette: &Palette,
    width: u16,
    height: u16,
) -> usize {
    let lines = match state.cached_line_count(width) {
        Some(lines) => lines,
        None => {
            let lines = build_lines(state, palette, width, 0).len();
            state.cache_line_count(width, lines);
            lines
        }
    };
    lines.saturating_sub(height as usize)
}

pub fn render_transcript(
    frame: &mut Frame,
    area: Rect,
    state: &TranscriptState,
    palette: &Palette,
    spinner_frame: usize,
) {
    let lines = build_lines(state, palette, area.width, spinner_frame);
    let height = area.height as usize;
    let max_offset = lines.len().saturating_sub(height);
    let offset = state.scroll_offset().min(max_offset);
    let start = lines.len().saturating_sub(height + offset);
    let visible: Vec<Line<'static>> = lines.into_iter().skip(start).take(height).collect();

    let paragraph = Paragraph::new(visible).style(Style::default().fg(palette.fg).bg(palette.bg));
    frame.render_widget(paragraph, area);
}

fn header_line(node: &MessageNode, palette: &Palette) -> Line<'static> {
    let color = match node.sender {
        Sender::User => palette.user,
        Sender::Assistant => palette.assistant,
    };
    Line::from(vec![
        Span::styled(
            format!("{} ", node.avatar()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            node.sender.label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", node.timestamp),
            Style::default().fg(palette.muted),
        ),
    ])
}

fn body_lines(markup: &MarkupLine, palette: &Palette, width: usize) -> Vec<Line<'static>> {
    let mut text = String::new();
    let mut bounds = Vec::with_capacity(markup.spans.len());
    for span in &markup.spans {
        let start = text.len();
        text.push_str(&sanitize_for_display(&span.text));
        bounds.push((start, text.len(), span_style(span.style, palette)));
    }

    wrap_ranges(&text, width)
        .into_iter()
        .map(|range| {
            let mut spans = vec![Span::raw(BODY_INDENT)];
            for &(start, end, style) in &bounds {
                let lo = start.max(range.start);
                let hi = end.min(range.end);
                if lo < hi {
                    spans.push(Span::styled(text[lo..hi].to_string(), style));
                }
            }
            Line::from(spans)
        })
        .collect()
}

fn span_style(style: SpanStyle, palette: &Palette) -> Style {
    let mut out = Style::default().fg(palette.fg);
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.code {
        out = out.fg(palette.accent);
    }
    out
}

#[cfg(test)]
mod tests {
    use sage_core::prefs::Theme;

    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_lines_include_avatar_label_and_timestamp() {
        let mut state = TranscriptState::default();
        state.push(MessageNode::new(Sender::User, "hi", true, "08:15".into()));
        let palette = Palette::for_theme(Theme::Light);

        let lines = build_lines(&state, &palette, 40, 0);
        assert_eq!(plain(&lines[0]), "U You  08:15");
        assert_eq!(plain(&lines[1]), "   hi");
    }

    #[test]
    fn test_typing_indicator_is_last() {
        let mut state = TranscriptState::default();
        state.push(MessageNode::new(Sender::User, "hi", true, String::new()));
        state.show_typing();
        let palette = Palette::for_theme(Theme::Dark);

        let lines = build_lines(&state, &palette, 40, 0);
        let last = lines.last().map(plain).unwrap_or_default();
        assert!(last.starts_with("✚ Sage is typing"));
    }

    #[test]
    fn test_styled_spans_survive_wrapping() {
        let mut state = TranscriptState::default();
        state.push(MessageNode::new(
            Sender::Assistant,
            "<b>bold words</b> then plain words",
            true,
            String::new(),
        ));
        let palette = Palette::for_theme(Theme::Light);

        let lines = build_lines(&state, &palette, 16, 0);
        let body: Vec<String> = lines[1..lines.len() - 1].iter().map(plain).collect();
        assert_eq!(body, vec!["   bold words ", "   then plain ", "   words"]);
        assert!(lines[1].spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_max_scroll_counts_overflow() {
        let mut state = TranscriptState::default();
        for i in 0..5 {
            state.push(MessageNode::new(Sender::User, format!("m{i}"), true, String::new()));
        }
        let palette = Palette::for_theme(Theme::Light);
        // 3 lines per node
        assert_eq!(max_scroll(&mut state, &palette, 40, 10), 5);
        assert_eq!(max_scroll(&mut state, &palette, 40, 100), 0);
        assert_eq!(state.cached_line_count(40), Some(15));
    }

    #[test]
    fn test_max_scroll_recounts_after_width_change() {
        let mut state = TranscriptState::default();
        state.push(MessageNode::new(
            Sender::Assistant,
            "alpha beta gamma delta",
            true,
            String::new(),
        ));
        let palette = Palette::for_theme(Theme::Light);
        let wide = max_scroll(&mut state, &palette, 80, 0);
        let narrow = max_scroll(&mut state, &palette, 12, 0);
        assert!(narrow > wide);
        assert_eq!(state.cached_line_count(12), Some(narrow));
    }
}
