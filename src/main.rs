use anyhow::{Context, Result};
use rental_scout::config::Config;
use rental_scout::notifier::{LogNotifier, Notifier, TelegramNotifier};
use rental_scout::{run_monitoring_loop, sources, HttpFetcher};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🏠 Rental Scout - agency listing monitor");
    info!("==========================================");

    let config = Config::from_env().context("Invalid configuration")?;

    let fetcher = Arc::new(HttpFetcher::new(config.http_timeout)?);

    let notifier: Arc<dyn Notifier> = match &config.telegram {
        Some(telegram) => {
            info!("Announcing new listings to Telegram chat {}", telegram.chat_id);
            Arc::new(TelegramNotifier::new(
                telegram.api_base.clone(),
                telegram.bot_token.clone(),
                telegram.chat_id.clone(),
            )?)
        }
        None => {
            warn!("TELEGRAM_BOT_TOKEN not set, new listings will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let monitoring = run_monitoring_loop(
        sources::default_sources(),
        config.interval_minutes,
        fetcher,
        notifier,
    );

    tokio::select! {
        result = monitoring => result,
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for shutdown signal")?;
            info!("👋 Shutting down");
            Ok(())
        }
    }
}
