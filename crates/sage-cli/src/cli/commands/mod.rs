//! CLI command handlers.

pub mod ask;
pub mod config;
pub mod health;
pub mod sessions;
pub mod upload;

use anyhow::{Context, Result};
use sage_core::api::SageClient;
use sage_core::config::Config;
use sage_core::markup::render_markup;
use sage_core::message::{MessageBody, Sender};

pub fn client(config: &Config) -> Result<SageClient> {
    SageClient::from_config(config).context("build API client")
}

/// Plain-text form of a message as the TUI would show it.
pub fn plain_text(config: &Config, sender: Sender, text: &str) -> String {
    let body = MessageBody::for_sender(sender, text, config.trust_assistant_html);
    render_markup(&body.to_html())
        .iter()
        .map(|line| line.text())
        .collect::<Vec<_>>()
        .join("\n")
}
