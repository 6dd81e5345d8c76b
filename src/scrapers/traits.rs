use crate::models::Listing;
use scraper::Html;

/// Common interface of every agency strategy.
/// Adding a site means adding an implementation, the monitor loop never changes.
pub trait ListingExtractor: Send + Sync {
    /// Detail page URLs found on a search results page, in document order
    fn discover_detail_links(&self, document: &Html) -> Vec<String>;

    /// The listing described by a detail page, if its reference can be read
    fn extract_listing(&self, document: &Html, page_url: &str) -> Option<Listing>;
}
