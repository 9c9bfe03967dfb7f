use super::text_buffer::TextBuffer;

/// Composer state.
#[derive(Debug, Default)]
pub struct InputState {
    pub buffer: TextBuffer,
}

impl InputState {
    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn is_blank(&self) -> bool {
        self.buffer.is_blank()
    }

    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
