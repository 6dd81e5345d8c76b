use crate::dedup::DedupStore;
use crate::fetcher::PageFetcher;
use crate::models::Source;
use crate::notifier::Notifier;
use crate::scrapers::ListingExtractor;
use crate::sources;
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Counters for one pass over all sources
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub sources_scanned: usize,
    pub sources_failed: usize,
    pub links_discovered: usize,
    pub pages_failed: usize,
    pub listings_extracted: usize,
    pub new_listings: usize,
    pub notifications_failed: usize,
}

impl CycleReport {
    fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            sources_scanned: 0,
            sources_failed: 0,
            links_discovered: 0,
            pages_failed: 0,
            listings_extracted: 0,
            new_listings: 0,
            notifications_failed: 0,
        }
    }
}

/// Polls every source in order, announces each reference the first time it is seen
pub struct Monitor {
    sources: Vec<Source>,
    fetcher: Arc<dyn PageFetcher>,
    notifier: Arc<dyn Notifier>,
    store: DedupStore,
}

impl Monitor {
    pub fn new(
        sources: Vec<Source>,
        fetcher: Arc<dyn PageFetcher>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        sources::validate(&sources)?;
        let store = DedupStore::for_sources(&sources);

        Ok(Self {
            sources,
            fetcher,
            notifier,
            store,
        })
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn store(&self) -> &DedupStore {
        &self.store
    }

    /// One pass over every source. Failures are logged and counted, never returned.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let mut report = CycleReport::start();

        for source in &self.sources {
            scan_source(
                source,
                self.fetcher.as_ref(),
                self.notifier.as_ref(),
                &mut self.store,
                &mut report,
            )
            .await;
        }

        report.finished_at = Some(Utc::now());
        report
    }

    /// Cycles forever, sleeping `interval` between passes
    pub async fn run(mut self, interval: Duration) {
        loop {
            let report = self.run_cycle().await;
            info!(
                "✅ Cycle done: {} new listing(s), {} extracted, {}/{} source(s) failed, {} page(s) failed",
                report.new_listings,
                report.listings_extracted,
                report.sources_failed,
                report.sources_scanned,
                report.pages_failed,
            );
            if report.notifications_failed > 0 {
                warn!("{} notification(s) could not be delivered", report.notifications_failed);
            }

            debug!("Sleeping {:?} until next cycle", interval);
            tokio::time::sleep(interval).await;
        }
    }
}

async fn scan_source(
    source: &Source,
    fetcher: &dyn PageFetcher,
    notifier: &dyn Notifier,
    store: &mut DedupStore,
    report: &mut CycleReport,
) {
    report.sources_scanned += 1;
    info!("🔎 [{}] Scanning search page", source.name);

    let search_page = match fetcher.fetch(&source.search_url).await {
        Ok(page) => page,
        Err(e) => {
            warn!("[{}] Skipping source this cycle: {}", source.name, e);
            report.sources_failed += 1;
            return;
        }
    };

    let links = source.strategy.discover_detail_links(&search_page.document());
    report.links_discovered += links.len();
    info!("[{}] Found {} detail page(s)", source.name, links.len());

    for link in links {
        let page = match fetcher.fetch(&link).await {
            Ok(page) => page,
            Err(e) => {
                warn!("[{}] Skipping detail page: {}", source.name, e);
                report.pages_failed += 1;
                continue;
            }
        };

        let Some(listing) = source.strategy.extract_listing(&page.document(), &page.url) else {
            continue;
        };
        report.listings_extracted += 1;

        if !store.observe(&source.name, &listing.reference) {
            debug!("[{}] Already seen: {}", source.name, listing.reference);
            continue;
        }

        info!("🏠 [{}] New listing {} at {}", source.name, listing.reference, listing.url);
        report.new_listings += 1;

        // Stays marked as seen even when delivery fails
        if let Err(e) = notifier.send(&source.announcement(&listing)).await {
            warn!("[{}] Failed to notify listing {}: {}", source.name, listing.reference, e);
            report.notifications_failed += 1;
        }
    }
}

/// Entry point for the process: validates the setup, then polls until the task is dropped
pub async fn run_monitoring_loop(
    sources: Vec<Source>,
    interval_minutes: u64,
    fetcher: Arc<dyn PageFetcher>,
    notifier: Arc<dyn Notifier>,
) -> Result<()> {
    let interval = poll_interval(interval_minutes)?;

    let monitor = Monitor::new(sources, fetcher, notifier)?;
    info!(
        "Watching {} source(s), one cycle every {} minute(s)",
        monitor.sources().len(),
        interval_minutes
    );

    monitor.run(interval).await;
    Ok(())
}

/// Sleep between cycles for a whole number of minutes, rejecting zero and overflow
pub fn poll_interval(minutes: u64) -> Result<Duration> {
    if minutes == 0 {
        bail!("Polling interval must be at least one minute");
    }

    match minutes.checked_mul(60) {
        Some(secs) => Ok(Duration::from_secs(secs)),
        None => bail!("Polling interval of {} minutes is too large", minutes),
    }
}
