//! Bot binary for telepdf.
//!
//! A thin shim over the library crate: load `.env`, initialise tracing,
//! read configuration, wire the services, run the dispatcher.

use anyhow::{Context, Result};
use std::sync::Arc;
use telepdf::{BotConfig, ChromePdfRenderer, FlowStore, OpenAiGenerator, Services};
use teloxide::Bot;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // A missing credential aborts here, before any connection is attempted.
    let config = BotConfig::from_env().context("configuration")?;
    tracing::info!(?config, "starting telepdf");

    let bot = Bot::new(config.telegram_token.clone());
    let services = Services {
        generator: Arc::new(OpenAiGenerator::from_config(&config)),
        renderer: Arc::new(ChromePdfRenderer::new()),
    };
    let store = Arc::new(FlowStore::default());

    telepdf::bot::run(bot, store, services).await;
    tracing::info!("telepdf stopped");
    Ok(())
}
