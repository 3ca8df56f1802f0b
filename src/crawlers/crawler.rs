use crate::error::CrawlError;
use crate::parsers::RawPage;
use std::time::Duration;

/// How a fetcher decides a freshly loaded page is ready to read
#[derive(Debug, Clone)]
pub enum Readiness {
    /// Wait for an element to appear; if the wait fails, sleep `fallback` and
    /// read whatever has rendered
    WaitFor {
        selector: String,
        timeout: Duration,
        fallback: Duration,
    },
    /// Sleep a fixed time after navigation
    Settle(Duration),
}

/// Renders URLs and hands back their HTML.
///
/// Implementations own one browser session for the whole crawl and are
/// driven strictly one page at a time.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Load `url` and return its source once `readiness` is satisfied
    async fn fetch(&mut self, url: &str, readiness: &Readiness) -> Result<RawPage, CrawlError>;

    /// Release the underlying session
    async fn close(self) -> Result<(), CrawlError>;
}
