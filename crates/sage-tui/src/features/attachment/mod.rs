//! Pending attachment: selection, validation and the preview chip.

use std::path::PathBuf;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use sage_core::attachment::{self, AttachmentRejection, FileCandidate, PendingAttachment};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::AttachmentUiEvent;
use crate::features::chrome::Palette;
use crate::overlays::{AlertState, Overlay};
use crate::state::AppState;

/// At most one file waiting for the next send.
#[derive(Debug, Default)]
pub struct AttachmentState {
    selected: Option<PendingAttachment>,
}

impl AttachmentState {
    pub fn selected(&self) -> Option<&PendingAttachment> {
        self.selected.as_ref()
    }

    /// Moves the attachment out, leaving nothing selected.
    pub fn take(&mut self) -> Option<PendingAttachment> {
        self.selected.take()
    }

    pub fn preview_label(&self) -> Option<String> {
        self.selected.as_ref().map(PendingAttachment::preview_label)
    }
}

/// Validates a picked file and stores it. A rejection leaves the current
/// selection untouched.
///
/// # Errors
/// Returns the rejection for the caller to alert on.
pub fn handle_file_select(
    state: &mut AttachmentState,
    candidate: FileCandidate,
) -> Result<(), AttachmentRejection> {
    let pending = attachment::validate(candidate)?;
    tracing::debug!(name = %pending.name, size = pending.size, "attachment selected");
    state.selected = Some(pending);
    Ok(())
}

pub fn clear_attachment(state: &mut AttachmentState) {
    state.selected = None;
}

/// Asks the runtime to stat and sniff `path`.
pub fn inspect_path(app: &mut AppState, path: PathBuf) -> Vec<UiEffect> {
    let task = app.tui.begin_task(TaskKind::FileInspect);
    vec![UiEffect::InspectFile { task, path }]
}

pub fn handle_attachment_event(app: &mut AppState, event: AttachmentUiEvent) -> Vec<UiEffect> {
    let rejection = match event {
        AttachmentUiEvent::Inspected { candidate } => {
            match handle_file_select(&mut app.tui.attachment, candidate) {
                Ok(()) => return vec![],
                Err(rejection) => rejection,
            }
        }
        AttachmentUiEvent::InspectFailed { rejection } => rejection,
    };
    tracing::info!(%rejection, "attachment rejected");
    app.overlay = Some(Overlay::Alert(AlertState::new(rejection.alert_message())));
    vec![]
}

/// Draws the `📎 name` chip above the composer.
pub fn render_preview_chip(frame: &mut Frame, area: Rect, label: &str, palette: &Palette) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {label} "),
            Style::default()
                .fg(palette.chip)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Ctrl+X to remove", Style::default().fg(palette.muted)),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(palette.bg)),
        area,
    );
}
