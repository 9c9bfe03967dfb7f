//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::common::{TaskKind, truncate_with_ellipsis};
use crate::features::chrome::Palette;
use crate::overlays::OverlayExt;
use crate::state::{AppState, TuiState};
use crate::{attachment, input, sessions, transcript};

const HEADER_HEIGHT: u16 = 1;
const FOOTER_HEIGHT: u16 = 1;
const CHIP_HEIGHT: u16 = 1;

/// Horizontal padding on each side of the message area.
pub const TRANSCRIPT_MARGIN: u16 = 1;

const WELCOME_TITLE: &str = "Welcome to Sage";
const WELCOME_SUBTITLE: &str =
    "Your health assistant. Ask about symptoms, medication, sleep or nutrition.";

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatAreas {
    pub header: Rect,
    /// Messages or the welcome banner.
    pub main: Rect,
    pub chip: Option<Rect>,
    pub input: Rect,
    pub footer: Rect,
    /// Drawn over the left edge of the body when open.
    pub sidebar: Option<Rect>,
}

/// Splits the screen. The reducer uses this too, so scroll clamping sees
/// the same main area the renderer draws into.
pub fn layout(state: &TuiState, area: Rect) -> ChatAreas {
    let chip_height = if state.selected_file().is_some() {
        CHIP_HEIGHT
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(chip_height),
            Constraint::Length(input::render::input_height(&state.input)),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    let body = chunks[1];
    let main = Rect {
        x: body.x + TRANSCRIPT_MARGIN,
        y: body.y,
        width: body.width.saturating_sub(TRANSCRIPT_MARGIN * 2),
        height: body.height,
    };
    let sidebar = state.chrome.sidebar_open.then(|| {
        let width = sessions::render::SIDEBAR_WIDTH.min(area.width);
        Rect {
            x: area.x,
            y: body.y,
            width,
            height: body.height + chip_height + chunks[3].height,
        }
    });

    ChatAreas {
        header: chunks[0],
        main,
        chip: (chip_height > 0).then_some(chunks[2]),
        input: chunks[3],
        footer: chunks[4],
        sidebar,
    }
}

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;
    let palette = state.chrome.palette();
    let areas = layout(state, area);

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        area,
    );

    render_header(state, frame, areas.header, &palette);

    if state.is_welcome() && state.transcript.is_empty() && !state.transcript.is_typing() {
        render_welcome(state, frame, areas.main, &palette);
    } else {
        transcript::render::render_transcript(
            frame,
            areas.main,
            &state.transcript,
            &palette,
            state.spinner_frame,
        );
    }

    if let (Some(chip), Some(label)) = (areas.chip, state.attachment.preview_label()) {
        attachment::render_preview_chip(frame, chip, &label, &palette);
    }

    input::render::render_input(
        frame,
        areas.input,
        &state.input,
        state.tasks.state(TaskKind::Send).is_running(),
        &palette,
    );
    render_footer(state, frame, areas.footer, &palette);

    if let Some(sidebar) = areas.sidebar {
        // Backdrop: dim everything the panel does not cover.
        frame
            .buffer_mut()
            .set_style(area, Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(Clear, sidebar);
        sessions::render::render_sidebar(frame, sidebar, &state.sessions, &palette);
    }

    app.overlay.render(frame, area, &palette);
}

fn render_header(state: &TuiState, frame: &mut Frame, area: Rect, palette: &Palette) {
    let title = state
        .current_session_id()
        .and_then(|id| state.sessions.sessions().iter().find(|s| s.id == id))
        .map(|s| s.title.clone())
        .unwrap_or_else(|| "New chat".to_string());
    let budget = (area.width as usize).saturating_sub(14);

    let line = Line::from(vec![
        Span::styled(
            " ✚ Sage ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(palette.border)),
        Span::styled(
            truncate_with_ellipsis(&title, budget),
            Style::default().fg(palette.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Lines of the welcome banner: greeting plus the numbered suggestions.
pub fn welcome_lines(state: &TuiState, palette: &Palette, width: u16) -> Vec<Line<'static>> {
    let budget = (width as usize).saturating_sub(10);
    let mut lines = vec![
        Line::from(Span::styled(
            WELCOME_TITLE,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            WELCOME_SUBTITLE,
            Style::default().fg(palette.muted),
        )),
        Line::default(),
    ];
    for (i, suggestion) in state.config.suggestions.iter().take(4).enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("Alt+{}  ", i + 1),
                Style::default().fg(palette.muted),
            ),
            Span::styled(
                truncate_with_ellipsis(suggestion, budget),
                Style::default().fg(palette.fg),
            ),
        ]));
    }
    lines
}

fn render_welcome(state: &TuiState, frame: &mut Frame, area: Rect, palette: &Palette) {
    let lines = welcome_lines(state, palette, area.width);
    let top = area.height.saturating_sub(lines.len() as u16) / 2;
    let banner = Rect {
        y: area.y + top,
        height: area.height.saturating_sub(top),
        ..area
    };
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        banner,
    );
}

fn render_footer(state: &TuiState, frame: &mut Frame, area: Rect, palette: &Palette) {
    let key = Style::default().fg(palette.accent);
    let text = Style::default().fg(palette.muted);
    let pairs: &[(&str, &str)] = if state.chrome.sidebar_open {
        &[
            ("↑↓", " select  "),
            ("Enter", " open  "),
            ("d", " delete  "),
            ("n", " new chat  "),
            ("Esc", " close"),
        ]
    } else {
        &[
            ("Enter", " send  "),
            ("Ctrl+O", " attach  "),
            ("Ctrl+B", " history  "),
            ("Ctrl+N", " new chat  "),
            ("Ctrl+T", " theme  "),
            ("Ctrl+C", " quit"),
        ]
    };
    let spans: Vec<Span> = pairs
        .iter()
        .flat_map(|(k, label)| [Span::styled(*k, key), Span::styled(*label, text)])
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
