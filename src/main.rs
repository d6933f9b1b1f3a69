use anyhow::{Context, Result};
use log::{error, info};
use seeder::{api_client::ApiClient, profile::PayloadProfile, scenarios};
use service::{config::Config, logging::Logger};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    if let Err(e) = seed(&config).await {
        error!("Seeding aborted: {e:#}");
        std::process::exit(1);
    }
}

async fn seed(config: &Config) -> Result<()> {
    info!(
        "Seeding fixtures at [{}] with the {} schema...",
        config.base_url(),
        config.variant()
    );

    let client = ApiClient::new(
        reqwest::Client::new(),
        config.base_url().to_string(),
        PayloadProfile::for_variant(config.variant()),
    );
    let plan = scenarios::SeedPlan::for_variant(config.variant());

    let report = scenarios::run(&client, &plan)
        .await
        .with_context(|| format!("Failed to seed fixtures at {}", config.base_url()))?;

    info!("Seeded match {}", report.match_id);
    Ok(())
}
