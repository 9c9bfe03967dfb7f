use anyhow::{Context, Result};
use sage_core::api::SageClient;
use sage_core::config::Config;
use sage_core::message::Sender;

use super::plain_text;

pub async fn run(client: &SageClient, config: &Config, message: &str) -> Result<()> {
    let message = message.trim();
    if message.is_empty() {
        anyhow::bail!("Message is empty");
    }
    let reply = client.send_chat(message).await.context("send message")?;
    tracing::info!(session_id = ?reply.session_id, "reply received");
    println!("{}", plain_text(config, Sender::Assistant, &reply.response));
    Ok(())
}
