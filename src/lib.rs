pub mod config;
pub mod dedup;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod monitor;
pub mod notifier;
pub mod scrapers;
pub mod sources;

pub use dedup::DedupStore;
pub use fetcher::{HttpFetcher, Page, PageFetcher};
pub use models::{Listing, Source};
pub use monitor::{run_monitoring_loop, CycleReport, Monitor};
pub use notifier::{LogNotifier, Notifier, TelegramNotifier};
