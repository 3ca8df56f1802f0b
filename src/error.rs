use thiserror::Error;

/// Errors raised while crawling, extracting or saving products
#[derive(Debug, Error)]
pub enum CrawlError {
    /// No WebDriver session could be created
    #[error("failed to connect to WebDriver: {0}")]
    Connect(String),

    /// Navigation or page source retrieval failed
    #[error("failed to load {url}: {reason}")]
    Navigation { url: String, reason: String },

    /// The WebDriver session went away mid-crawl
    #[error("lost WebDriver session while loading {url}")]
    SessionLost { url: String },

    /// Navigation did not finish within the page load timeout
    #[error("timed out loading {url}")]
    Timeout { url: String },

    /// The WebDriver session could not be closed cleanly
    #[error("failed to close WebDriver session: {0}")]
    Shutdown(String),

    /// The fetched source had no markup to extract from
    #[error("page {url} has no content")]
    EmptyPage { url: String },

    /// A configured CSS selector does not parse
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    /// The configuration could not be read or is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Writing the output failed
    #[error("failed to write output: {0}")]
    Output(String),
}

impl CrawlError {
    /// Whether this error ends the whole crawl rather than a single product visit
    pub fn is_fatal(&self) -> bool {
        matches!(self, CrawlError::Connect(_) | CrawlError::SessionLost { .. })
    }
}

impl From<std::io::Error> for CrawlError {
    fn from(err: std::io::Error) -> Self {
        CrawlError::Output(err.to_string())
    }
}

impl From<csv::Error> for CrawlError {
    fn from(err: csv::Error) -> Self {
        CrawlError::Output(err.to_string())
    }
}

impl From<serde_json::Error> for CrawlError {
    fn from(err: serde_json::Error) -> Self {
        CrawlError::Config(err.to_string())
    }
}
