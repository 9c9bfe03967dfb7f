use anyhow::{Context, Result};
use sage_core::api::SageClient;

pub async fn run(client: &SageClient) -> Result<()> {
    let health = client
        .health()
        .await
        .with_context(|| format!("check {}", client.base_url()))?;
    match health.service {
        Some(service) => println!("{}: {}", service, health.status),
        None => println!("{}", health.status),
    }
    Ok(())
}
