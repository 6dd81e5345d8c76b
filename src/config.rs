use crate::notifier::TELEGRAM_API_BASE;
use crate::monitor::poll_interval;
use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Telegram destination, only present when a bot token is configured
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_base: String,
    pub bot_token: String,
    pub chat_id: String,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub interval_minutes: u64,
    pub http_timeout: Duration,
    /// None means dry run: announcements only go to the log
    pub telegram: Option<TelegramConfig>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let interval_minutes: u64 = lookup("SCRAPE_INTERVAL_MINUTES")
            .unwrap_or_else(|| "10".to_string())
            .trim()
            .parse()
            .context("SCRAPE_INTERVAL_MINUTES must be a positive integer")?;
        poll_interval(interval_minutes).context("Invalid SCRAPE_INTERVAL_MINUTES")?;

        let timeout_secs: u64 = lookup("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .trim()
            .parse()
            .context("HTTP_TIMEOUT_SECS must be a valid number")?;

        let telegram = match lookup("TELEGRAM_BOT_TOKEN").filter(|t| !t.trim().is_empty()) {
            Some(bot_token) => Some(TelegramConfig {
                api_base: lookup("TELEGRAM_API_BASE")
                    .unwrap_or_else(|| TELEGRAM_API_BASE.to_string()),
                bot_token,
                chat_id: lookup("TELEGRAM_CHAT_ID")
                    .context("TELEGRAM_CHAT_ID must be set when TELEGRAM_BOT_TOKEN is")?,
            }),
            None => None,
        };

        Ok(Self {
            interval_minutes,
            http_timeout: Duration::from_secs(timeout_secs),
            telegram,
        })
    }
}
