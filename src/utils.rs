use crate::error::CrawlError;
use std::time::Duration;
use url::Url;

/// Build the URL of one search-results page (1-based `page`)
pub fn search_url(base_url: &str, query: &str, page: u32) -> Result<String, CrawlError> {
    let raw = format!("{}/search", base_url.trim_end_matches('/'));
    let mut url = Url::parse(&raw)
        .map_err(|e| CrawlError::Config(format!("bad base_url `{}`: {}", base_url, e)))?;

    // form encoding turns spaces into '+'
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("page", &page.to_string());

    Ok(url.to_string())
}

/// Resolve `href` against `base` and drop its query string and fragment
pub fn canonical_url(base: &Url, href: &str) -> Option<String> {
    let mut url = base.join(href).ok()?;
    url.set_query(None);
    url.set_fragment(None);
    Some(url.to_string())
}

/// Sleep for a fixed delay, skipping zero-length delays
pub async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
