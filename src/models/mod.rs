use crate::scrapers::Agency;
use serde::{Deserialize, Serialize};

/// One property ad observed on an agency site
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listing {
    /// The agency's own identifier for the ad, used verbatim as dedup key
    pub reference: String,
    /// Detail page the reference was extracted from
    pub url: String,
}

impl Listing {
    pub fn new(reference: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            url: url.into(),
        }
    }
}

/// A monitored site: where to look and how to read it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Display label, unique across the registry. Also the dedup partition key.
    pub name: String,
    /// Header line of the notification message
    pub title: String,
    /// Search results page fetched every cycle
    pub search_url: String,
    pub strategy: Agency,
}

impl Source {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        search_url: impl Into<String>,
        strategy: Agency,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            search_url: search_url.into(),
            strategy,
        }
    }

    /// Text sent to the notification channel for a newly seen listing
    pub fn announcement(&self, listing: &Listing) -> String {
        format!(
            "{}\nNouvelle annonce immobilière !\nRéférence : {}\nURL : {}",
            self.title, listing.reference, listing.url
        )
    }
}
