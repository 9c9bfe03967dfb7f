//! Message model shared by the client and the UI.
//!
//! `MessageBody` makes the rendering trust boundary explicit: user text is
//! always `PlainText` and gets escaped, assistant text is `TrustedHtml`
//! (inserted as-is) unless the configuration turns that off.

use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    /// Maps the backend's sender field. Anything that is not `"user"` is
    /// the assistant (the backend stores `"sage"`).
    pub fn from_wire(value: &str) -> Self {
        if value == "user" {
            Sender::User
        } else {
            Sender::Assistant
        }
    }

    /// Avatar glyph shown next to the bubble.
    pub fn avatar(self) -> &'static str {
        match self {
            Sender::User => "U",
            Sender::Assistant => "✚",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Sage",
        }
    }
}

/// Message text tagged with how it may be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    /// Untrusted text; escaped before it becomes markup.
    PlainText(String),
    /// Server-formatted markup, inserted without escaping.
    TrustedHtml(String),
}

impl MessageBody {
    /// Builds the body for a sender under the given trust setting.
    pub fn for_sender(sender: Sender, text: impl Into<String>, trust_assistant_html: bool) -> Self {
        let text = text.into();
        match sender {
            Sender::Assistant if trust_assistant_html => MessageBody::TrustedHtml(text),
            Sender::User | Sender::Assistant => MessageBody::PlainText(text),
        }
    }

    /// Returns the markup form of the body.
    pub fn to_html(&self) -> String {
        match self {
            MessageBody::PlainText(text) => escape_html(text),
            MessageBody::TrustedHtml(html) => html.clone(),
        }
    }

    /// Returns the original text as received.
    pub fn raw(&self) -> &str {
        match self {
            MessageBody::PlainText(text) | MessageBody::TrustedHtml(text) => text,
        }
    }

    pub fn is_trusted(&self) -> bool {
        matches!(self, MessageBody::TrustedHtml(_))
    }
}

/// Escapes text so it cannot be interpreted as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
