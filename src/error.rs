use thiserror::Error;

/// Failure to turn a URL into a page body
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failure to deliver a message to the notification channel
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notification API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Notification API rejected the message: {0}")]
    Rejected(String),
}

/// A reference node was found but its text does not fit the agency's label grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("label {label:?} not found in {raw:?}")]
    MissingLabel { label: &'static str, raw: String },

    #[error("empty reference after label {label:?} in {raw:?}")]
    EmptyReference { label: &'static str, raw: String },
}
