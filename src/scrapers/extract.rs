use crate::models::Listing;
use crate::scrapers::types::{AgencyProfile, DuplicateLinks, LinkRule, MissingAnchor, ReferenceRule};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, warn};
use url::Url;

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!("Invalid selector {:?}: {:?}", css, e);
            None
        }
    }
}

/// Elements matching `inner` inside every element matching `outer`, in document order
fn nested<'a>(document: &'a Html, outer: &str, inner: &str) -> Vec<ElementRef<'a>> {
    let (Some(outer), Some(inner)) = (selector(outer), selector(inner)) else {
        return Vec::new();
    };

    document
        .select(&outer)
        .flat_map(|scope| scope.select(&inner).collect::<Vec<_>>())
        .collect()
}

fn resolve(origin: &str, href: &str) -> Option<String> {
    let joined = Url::parse(origin).and_then(|base| base.join(href));
    match joined {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            warn!("Cannot resolve {:?} against {}: {}", href, origin, e);
            None
        }
    }
}

pub fn discover_links(profile: &AgencyProfile, document: &Html) -> Vec<String> {
    let LinkRule {
        container,
        item,
        anchor,
        duplicates,
        missing_anchor,
    } = profile.links;

    let items = nested(document, container, item);
    if items.is_empty() {
        warn!("[{}] No listing element matched {} {}", profile.name, container, item);
        return Vec::new();
    }

    let anchor_css = anchor;
    let Some(anchor) = selector(anchor) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::with_capacity(items.len());

    for element in items {
        let href = element
            .select(&anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty());

        let Some(href) = href else {
            if missing_anchor == MissingAnchor::Warn {
                warn!("[{}] Listing element without link ({})", profile.name, anchor_css);
            }
            continue;
        };

        let Some(url) = resolve(profile.origin, href) else {
            continue;
        };

        if duplicates == DuplicateLinks::Remove && !seen.insert(url.clone()) {
            continue;
        }

        links.push(url);
    }

    debug!("[{}] Discovered {} detail links", profile.name, links.len());
    links
}

pub fn extract_reference(profile: &AgencyProfile, document: &Html, page_url: &str) -> Option<Listing> {
    let ReferenceRule {
        scope,
        node,
        contains,
        grammar,
    } = profile.reference;

    let nodes = match scope {
        Some(scope) => nested(document, scope, node),
        None => match selector(node) {
            Some(node) => document.select(&node).collect(),
            None => Vec::new(),
        },
    };

    let mut candidates = 0;
    for element in nodes {
        let text = element.text().collect::<String>();
        if contains.is_some_and(|marker| !text.contains(marker)) {
            continue;
        }
        candidates += 1;

        match grammar.parse(&text) {
            Ok(reference) => return Some(Listing::new(reference, page_url)),
            Err(e) => warn!("[{}] {} on {}", profile.name, e, page_url),
        }
    }

    if candidates == 0 {
        warn!("[{}] No reference node ({}) on {}", profile.name, node, page_url);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::{Agency, ListingExtractor};
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` with a subscriber writing into memory and returns what was logged
    fn logs_of(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    const DETAIL_URL: &str = "https://agenceducolombier.com/bien/col-1";

    #[test]
    fn empty_reference_is_reported() {
        let document = Html::parse_document(
            r#"<div class="wpestate_estate_property_design_intext_details"><p>REF: </p></div>"#,
        );

        let mut listing = Some(Listing::new("unset", ""));
        let logs = logs_of(|| {
            listing = Agency::AgenceDuColombier.extract_listing(&document, DETAIL_URL);
        });

        assert_eq!(listing, None);
        assert!(logs.contains("WARN"), "{}", logs);
        assert!(logs.contains("[Agence du Colombier] empty reference"), "{}", logs);
        assert!(logs.contains(DETAIL_URL), "{}", logs);
    }

    #[test]
    fn missing_reference_node_is_reported() {
        let document = Html::parse_document("<p>Page en maintenance</p>");

        let logs = logs_of(|| {
            assert_eq!(Agency::Giboire.extract_listing(&document, DETAIL_URL), None);
        });

        assert!(logs.contains("[Giboire] No reference node"), "{}", logs);
    }

    #[test]
    fn successful_extraction_is_quiet() {
        let document = Html::parse_document(r#"<p class="presentation-bien_exclu_desc_ref">Réf : AB1234</p>"#);

        let logs = logs_of(|| {
            assert!(Agency::Giboire.extract_listing(&document, DETAIL_URL).is_some());
        });

        assert!(!logs.contains("WARN"), "{}", logs);
    }

    #[test]
    fn element_without_link_is_reported() {
        let document = Html::parse_document(
            r#"<div id="primary" class="content-area listofposts grid">
                 <article><div class="panel"><div class="entry-content"><a href="/location/t2">T2</a></div></div></article>
                 <article><div class="panel">sans lien</div></article>
               </div>"#,
        );

        let mut found = Vec::new();
        let logs = logs_of(|| {
            found = Agency::Kermarrec.discover_detail_links(&document);
        });

        assert_eq!(found.len(), 1);
        assert!(logs.contains("WARN"), "{}", logs);
        assert!(logs.contains("[Kermarrec] Listing element without link"), "{}", logs);
    }

    #[test]
    fn foncia_wrappers_without_link_are_not_reported() {
        let document = Html::parse_document(
            r#"<div class="p-col-12 mosaic-list large ng-star-inserted">
                 <div><div>img</div><div><div>prix</div><div>surface</div><a href="/location/1.htm">1</a></div></div>
               </div>"#,
        );

        let mut found = Vec::new();
        let logs = logs_of(|| {
            found = Agency::Foncia.discover_detail_links(&document);
        });

        assert_eq!(found, vec!["https://fr.foncia.com/location/1.htm"]);
        assert!(!logs.contains("without link"), "{}", logs);
    }
}
