//! Session command handlers.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use sage_core::api::SageClient;
use sage_core::config::Config;

use super::plain_text;

pub async fn list(client: &SageClient) -> Result<()> {
    let list = client.list_sessions().await.context("list sessions")?;
    if list.sessions.is_empty() {
        println!("No chat history yet");
        return Ok(());
    }
    for session in list.sessions {
        let marker = if list.current_session_id == Some(session.id) {
            "*"
        } else {
            " "
        };
        let updated = session.updated_at.as_deref().unwrap_or("");
        println!("{marker} {:>5}  {}  {}", session.id, session.title, updated);
    }
    Ok(())
}

pub async fn show(client: &SageClient, config: &Config, id: i64) -> Result<()> {
    let messages = client
        .get_session(id)
        .await
        .with_context(|| format!("load session {id}"))?;
    if messages.is_empty() {
        println!("Session {id} has no messages.");
    }
    for message in messages {
        let sender = message.sender();
        println!("{} {}:", sender.avatar(), sender.label());
        println!("{}\n", plain_text(config, sender, &message.message));
    }
    Ok(())
}

pub async fn delete(client: &SageClient, id: i64, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete this conversation (session {id})? [y/N] "))? {
        println!("Cancelled.");
        return Ok(());
    }
    client
        .delete_session(id)
        .await
        .with_context(|| format!("delete session {id}"))?;
    println!("Deleted session {id}");
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    let mut out = io::stdout();
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
