pub mod clean;
pub mod details;
pub mod links;

#[cfg(test)]
mod tests;

pub use details::DetailExtractor;
pub use links::LinkExtractor;

use crate::error::CrawlError;
use scraper::{ElementRef, Selector};

/// HTML source of a rendered page and the URL it came from
#[derive(Debug, Clone)]
pub struct RawPage {
    pub url: String,
    pub html: String,
}

impl RawPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

/// Compile a CSS selector, reporting which one was bad
pub(crate) fn compile_selector(selector: &str) -> Result<Selector, CrawlError> {
    Selector::parse(selector).map_err(|e| CrawlError::Selector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

/// Text of an element: every descendant text node trimmed, empty pieces dropped
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<String>()
}
