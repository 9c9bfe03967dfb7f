//! Composer and the message send pipeline.

pub mod render;
mod state;
pub mod text_buffer;
mod update;

pub use state::InputState;
pub use update::{cancel_send, handle_chat_event, handle_input_key, send_message, send_suggestion};

/// Caption shown in the user bubble when a file goes out without text.
pub const DEFAULT_CAPTION: &str = "Analyze this";

/// Which endpoint a send went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendKind {
    Chat,
    Upload,
}

impl SendKind {
    /// Assistant text rendered when the call fails.
    pub fn failure_text(self) -> &'static str {
        match self {
            SendKind::Chat => "Connection error. Please try again.",
            SendKind::Upload => "Sorry, couldn't process that file.",
        }
    }
}
