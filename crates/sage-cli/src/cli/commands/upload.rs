use std::path::Path;

use anyhow::{Context, Result, anyhow};
use sage_core::api::SageClient;
use sage_core::attachment;
use sage_core::config::Config;
use sage_core::message::Sender;

use super::plain_text;

pub async fn run(client: &SageClient, config: &Config, file: &Path, message: &str) -> Result<()> {
    let pending = attachment::inspect_file(file)
        .await
        .and_then(attachment::validate)
        .map_err(|rejection| anyhow!("{}: {}", rejection.alert_message(), rejection))?;

    let reply = client
        .upload(&pending, message.trim())
        .await
        .with_context(|| format!("upload {}", pending.name))?;
    println!("{}", plain_text(config, Sender::Assistant, &reply.response));
    Ok(())
}
