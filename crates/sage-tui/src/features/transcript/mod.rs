//! Transcript feature: rendered messages and the typing indicator.

pub mod render;
mod state;

use std::fmt::Write;

use chrono::{DateTime, Local, TimeZone};
use sage_core::api::StoredMessage;
use sage_core::config::Config;
use sage_core::message::Sender;
pub use state::{MessageNode, TranscriptState};

const FALLBACK_TIME_FORMAT: &str = "%H:%M";

/// Renders one message: builds the node and appends it after all existing
/// messages, then follows the bottom.
pub fn render_message(
    transcript: &mut TranscriptState,
    config: &Config,
    text: impl Into<String>,
    sender: Sender,
) {
    let node = build_node(config, text, sender, Local::now());
    transcript.push(node);
}

/// Replaces the whole message view with a fetched session history.
pub fn render_history(
    transcript: &mut TranscriptState,
    config: &Config,
    messages: Vec<StoredMessage>,
) {
    let now = Local::now();
    let nodes = messages
        .into_iter()
        .map(|m| {
            let sender = m.sender();
            build_node(config, m.message, sender, now)
        })
        .collect();
    transcript.replace(nodes);
}

fn build_node<Tz: TimeZone>(
    config: &Config,
    text: impl Into<String>,
    sender: Sender,
    at: DateTime<Tz>,
) -> MessageNode
where
    Tz::Offset: std::fmt::Display,
{
    MessageNode::new(
        sender,
        text,
        config.trust_assistant_html,
        format_timestamp(&config.time_format, &at),
    )
}

/// Formats a local time, falling back to `HH:MM` for an invalid format.
pub fn format_timestamp<Tz: TimeZone>(format: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    if write!(out, "{}", at.format(format)).is_ok() {
        return out;
    }
    out.clear();
    let _ = write!(out, "{}", at.format(FALLBACK_TIME_FORMAT));
    out
}
