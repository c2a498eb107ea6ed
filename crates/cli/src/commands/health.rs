//! Health command handler.

use clap::Args;
use ikms_api::create_client;
use ikms_core::{config::AppConfig, AppResult};

/// Check that the backend is reachable
#[derive(Args, Debug)]
pub struct HealthCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl HealthCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing health command");

        let client = create_client(config)?;
        let health = client.health().await?;

        if self.json {
            let json = serde_json::to_string_pretty(&health)?;
            println!("{}", json);
        } else {
            match health.version {
                Some(ref version) => {
                    println!("{}: {} (version {})", client.base_url(), health.status, version)
                }
                None => println!("{}: {}", client.base_url(), health.status),
            }
        }

        Ok(())
    }
}
