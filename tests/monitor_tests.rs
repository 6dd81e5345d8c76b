use async_trait::async_trait;
use rental_scout::error::{FetchError, NotifyError};
use rental_scout::scrapers::Agency;
use rental_scout::{run_monitoring_loop, Monitor, Notifier, Page, PageFetcher, Source};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Serves pages from memory; unknown URLs answer 404
#[derive(Default)]
struct FakeFetcher {
    pages: Mutex<HashMap<String, String>>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    fn serve(&self, url: &str, body: impl Into<String>) {
        self.pages.lock().unwrap().insert(url.to_string(), body.into());
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.pages.lock().unwrap().get(url) {
            Some(body) => Ok(Page::new(url, body.clone())),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingNotifier {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(NotifyError::Rejected("chat not found".to_string()));
        }
        Ok(())
    }
}

const GIBOIRE_SEARCH: &str = "https://www.giboire.com/recherche-location";
const GUENNO_SEARCH: &str = "https://www.guenno.com/biens/recherche";

fn giboire_results(paths: &[&str]) -> String {
    let cards: String = paths
        .iter()
        .map(|path| {
            format!(
                r#"<div><article><div>photo</div><div><h2><a href="{}">T2</a></h2></div></article></div>"#,
                path
            )
        })
        .collect();
    format!(r#"<html><body><div class="result-grid_wrap">{}</div></body></html>"#, cards)
}

fn giboire_detail(reference: &str) -> String {
    format!(
        r#"<html><body><p class="presentation-bien_exclu_desc_ref">Réf : {}</p></body></html>"#,
        reference
    )
}

fn guenno_results(paths: &[&str]) -> String {
    let cards: String = paths
        .iter()
        .map(|path| format!(r#"<article><a href="{}">voir</a></article>"#, path))
        .collect();
    format!(r#"<div class="section-content">{}</div>"#, cards)
}

fn guenno_detail(reference: &str) -> String {
    format!(
        r#"<div id="realty_area" class="realty_details"><span class="grey-ref">Ref : {}</span></div>"#,
        reference
    )
}

fn giboire() -> Source {
    Source::new("Giboire", "GIBOIRE", GIBOIRE_SEARCH, Agency::Giboire)
}

fn guenno() -> Source {
    Source::new("Guenno", "GUENNO", GUENNO_SEARCH, Agency::Guenno)
}

fn monitor(
    sources: Vec<Source>,
    fetcher: &Arc<FakeFetcher>,
    notifier: &Arc<RecordingNotifier>,
) -> Monitor {
    Monitor::new(sources, fetcher.clone(), notifier.clone()).unwrap()
}

#[tokio::test]
async fn test_only_new_references_are_announced() {
    let fetcher = Arc::new(FakeFetcher::default());
    let notifier = Arc::new(RecordingNotifier::default());

    fetcher.serve(GIBOIRE_SEARCH, giboire_results(&["/bien/a1", "/bien/a2"]));
    fetcher.serve("https://www.giboire.com/bien/a1", giboire_detail("A1"));
    fetcher.serve("https://www.giboire.com/bien/a2", giboire_detail("A2"));

    let mut monitor = monitor(vec![giboire()], &fetcher, &notifier);

    let report = monitor.run_cycle().await;
    assert_eq!(report.new_listings, 2);
    assert_eq!(
        notifier.sent(),
        vec![
            "GIBOIRE\nNouvelle annonce immobilière !\nRéférence : A1\nURL : https://www.giboire.com/bien/a1",
            "GIBOIRE\nNouvelle annonce immobilière !\nRéférence : A2\nURL : https://www.giboire.com/bien/a2",
        ]
    );

    fetcher.serve(GIBOIRE_SEARCH, giboire_results(&["/bien/a1", "/bien/a3"]));
    fetcher.serve("https://www.giboire.com/bien/a3", giboire_detail("A3"));

    let report = monitor.run_cycle().await;
    assert_eq!(report.listings_extracted, 2);
    assert_eq!(report.new_listings, 1);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 3);
    assert!(sent[2].contains("Référence : A3"));
    assert_eq!(monitor.store().seen_count("Giboire"), 3);
}

#[tokio::test]
async fn test_failed_search_page_does_not_stop_other_sources() {
    let fetcher = Arc::new(FakeFetcher::default());
    let notifier = Arc::new(RecordingNotifier::default());

    // Nothing served for Giboire: its search page fails
    fetcher.serve(GUENNO_SEARCH, guenno_results(&["/biens/1"]));
    fetcher.serve("https://www.guenno.com/biens/1", guenno_detail("G1"));

    let mut monitor = monitor(vec![giboire(), guenno()], &fetcher, &notifier);
    let report = monitor.run_cycle().await;

    assert_eq!(report.sources_scanned, 2);
    assert_eq!(report.sources_failed, 1);
    assert_eq!(report.new_listings, 1);
    assert_eq!(notifier.sent().len(), 1);
    assert!(notifier.sent()[0].starts_with("GUENNO\n"));
}

#[tokio::test]
async fn test_failed_detail_page_is_skipped() {
    let fetcher = Arc::new(FakeFetcher::default());
    let notifier = Arc::new(RecordingNotifier::default());

    fetcher.serve(
        GIBOIRE_SEARCH,
        giboire_results(&["/bien/1", "/bien/broken", "/bien/3"]),
    );
    fetcher.serve("https://www.giboire.com/bien/1", giboire_detail("R1"));
    fetcher.serve("https://www.giboire.com/bien/3", giboire_detail("R3"));

    let mut monitor = monitor(vec![giboire()], &fetcher, &notifier);
    let report = monitor.run_cycle().await;

    assert_eq!(report.links_discovered, 3);
    assert_eq!(report.pages_failed, 1);
    assert_eq!(report.new_listings, 2);

    let sent = notifier.sent();
    assert!(sent[0].contains("R1"));
    assert!(sent[1].contains("R3"));
}

#[tokio::test]
async fn test_detail_pages_are_visited_in_discovery_order() {
    let fetcher = Arc::new(FakeFetcher::default());
    let notifier = Arc::new(RecordingNotifier::default());

    fetcher.serve(GIBOIRE_SEARCH, giboire_results(&["/bien/z", "/bien/m", "/bien/a"]));

    let mut monitor = monitor(vec![giboire()], &fetcher, &notifier);
    monitor.run_cycle().await;

    assert_eq!(
        fetcher.requests(),
        vec![
            GIBOIRE_SEARCH,
            "https://www.giboire.com/bien/z",
            "https://www.giboire.com/bien/m",
            "https://www.giboire.com/bien/a",
        ]
    );
}

#[tokio::test]
async fn test_same_reference_in_two_sources_is_announced_twice() {
    let fetcher = Arc::new(FakeFetcher::default());
    let notifier = Arc::new(RecordingNotifier::default());

    fetcher.serve(GIBOIRE_SEARCH, giboire_results(&["/bien/1"]));
    fetcher.serve("https://www.giboire.com/bien/1", giboire_detail("4521"));
    fetcher.serve(GUENNO_SEARCH, guenno_results(&["/biens/1"]));
    fetcher.serve("https://www.guenno.com/biens/1", guenno_detail("4521"));

    let mut monitor = monitor(vec![giboire(), guenno()], &fetcher, &notifier);
    let report = monitor.run_cycle().await;

    assert_eq!(report.new_listings, 2);
    assert_eq!(notifier.sent().len(), 2);
}

#[tokio::test]
async fn test_failed_delivery_is_not_retried() {
    let fetcher = Arc::new(FakeFetcher::default());
    let notifier = Arc::new(RecordingNotifier::failing());

    fetcher.serve(GIBOIRE_SEARCH, giboire_results(&["/bien/1"]));
    fetcher.serve("https://www.giboire.com/bien/1", giboire_detail("X1"));

    let mut monitor = monitor(vec![giboire()], &fetcher, &notifier);

    let first = monitor.run_cycle().await;
    assert_eq!(first.new_listings, 1);
    assert_eq!(first.notifications_failed, 1);

    let second = monitor.run_cycle().await;
    assert_eq!(second.new_listings, 0);
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_page_without_reference_is_not_announced() {
    let fetcher = Arc::new(FakeFetcher::default());
    let notifier = Arc::new(RecordingNotifier::default());

    fetcher.serve(GIBOIRE_SEARCH, giboire_results(&["/bien/1"]));
    fetcher.serve(
        "https://www.giboire.com/bien/1",
        r#"<p class="presentation-bien_exclu_desc_ref">Réf : </p>"#,
    );

    let mut monitor = monitor(vec![giboire()], &fetcher, &notifier);
    let report = monitor.run_cycle().await;

    assert_eq!(report.listings_extracted, 0);
    assert!(notifier.sent().is_empty());
}

#[test]
fn test_duplicate_source_names_are_rejected() {
    let fetcher = Arc::new(FakeFetcher::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let result = Monitor::new(vec![giboire(), giboire()], fetcher, notifier);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_zero_interval_is_rejected() {
    let fetcher = Arc::new(FakeFetcher::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let result = run_monitoring_loop(vec![giboire()], 0, fetcher, notifier).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_oversized_interval_is_rejected() {
    let fetcher = Arc::new(FakeFetcher::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let result = run_monitoring_loop(vec![giboire()], u64::MAX / 10, fetcher, notifier).await;
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_loop_repeats_on_interval_and_keeps_seen_references() {
    let fetcher = Arc::new(FakeFetcher::default());
    let notifier = Arc::new(RecordingNotifier::default());

    fetcher.serve(GIBOIRE_SEARCH, giboire_results(&["/bien/a1"]));
    fetcher.serve("https://www.giboire.com/bien/a1", giboire_detail("A1"));

    let monitoring = run_monitoring_loop(vec![giboire()], 10, fetcher.clone(), notifier.clone());

    // Cycles start at t=0, t=10min and t=20min; the next one would be at t=30min
    let result = tokio::time::timeout(Duration::from_secs(25 * 60), monitoring).await;
    assert!(result.is_err(), "monitoring loop returned");

    let search_requests = fetcher
        .requests()
        .iter()
        .filter(|url| url.as_str() == GIBOIRE_SEARCH)
        .count();
    assert_eq!(search_requests, 3);
    assert_eq!(fetcher.requests().len(), 6);
    assert_eq!(notifier.sent().len(), 1);
}
