//! Message view model and scroll position.

use sage_core::markup::{MarkupLine, render_markup};
use sage_core::message::{MessageBody, Sender};

/// One rendered chat bubble.
#[derive(Debug, Clone)]
pub struct MessageNode {
    pub sender: Sender,
    pub body: MessageBody,
    /// Display lines interpreted from the body's markup form.
    pub lines: Vec<MarkupLine>,
    /// Local wall-clock time at which the node was rendered.
    pub timestamp: String,
}

impl MessageNode {
    pub fn new(
        sender: Sender,
        text: impl Into<String>,
        trust_assistant_html: bool,
        timestamp: String,
    ) -> Self {
        let body = MessageBody::for_sender(sender, text, trust_assistant_html);
        let lines = render_markup(&body.to_html());
        Self {
            sender,
            body,
            lines,
            timestamp,
        }
    }

    pub fn avatar(&self) -> &'static str {
        self.sender.avatar()
    }

    /// Text as displayed, one line per markup line.
    pub fn display_text(&self) -> String {
        self.lines
            .iter()
            .map(MarkupLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Rendered messages in order, plus the typing indicator placeholder.
///
/// The indicator is not a message: replacing or clearing the messages
/// leaves it alone, and it always draws after the last message.
#[derive(Debug, Default)]
pub struct TranscriptState {
    messages: Vec<MessageNode>,
    typing: bool,
    /// Lines scrolled up from the bottom. 0 follows the latest message.
    scroll_offset: usize,
    viewport_height: u16,
    /// `(width, lines)` from the last layout pass. Reset on any change.
    line_count: Option<(u16, usize)>,
}

impl TranscriptState {
    pub fn messages(&self) -> &[MessageNode] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Appends after all existing messages and follows the bottom.
    pub fn push(&mut self, node: MessageNode) {
        self.messages.push(node);
        self.line_count = None;
        self.scroll_to_bottom();
    }

    /// Replaces every message at once.
    pub fn replace(&mut self, nodes: Vec<MessageNode>) {
        self.messages = nodes;
        self.line_count = None;
        self.scroll_to_bottom();
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.line_count = None;
        self.scroll_offset = 0;
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn show_typing(&mut self) {
        self.typing = true;
        self.line_count = None;
        self.scroll_to_bottom();
    }

    pub fn hide_typing(&mut self) {
        self.typing = false;
        self.line_count = None;
    }

    pub fn cached_line_count(&self, width: u16) -> Option<usize> {
        self.line_count
            .filter(|(cached, _)| *cached == width)
            .map(|(_, lines)| lines)
    }

    pub fn cache_line_count(&mut self, width: u16, lines: usize) {
        self.line_count = Some((width, lines));
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Records the viewport and clamps the offset to what overflows it.
    pub fn set_viewport(&mut self, height: u16, max_offset: usize) {
        self.viewport_height = height;
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// Lines moved by PageUp/PageDown.
    pub fn page_size(&self) -> usize {
        (self.viewport_height as usize / 2).max(1)
    }
}
