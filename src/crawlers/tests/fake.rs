use crate::crawlers::crawler::{PageFetcher, Readiness};
use crate::error::CrawlError;
use crate::parsers::RawPage;
use std::collections::HashSet;
use url::Url;

/// In-memory fetcher: search pages come from `search`, product pages are
/// synthesised from their path.
pub struct FakeFetcher {
    search: Box<dyn Fn(u32) -> Vec<String>>,
    pub failing: HashSet<String>,
    pub lost_session: HashSet<String>,
    /// Product pages that load but render nothing
    pub blank: HashSet<String>,
    pub requests: Vec<String>,
}

impl FakeFetcher {
    /// `search` maps a page index to the product hrefs it lists
    pub fn new(search: impl Fn(u32) -> Vec<String> + 'static) -> Self {
        Self {
            search: Box::new(search),
            failing: HashSet::new(),
            lost_session: HashSet::new(),
            blank: HashSet::new(),
            requests: Vec::new(),
        }
    }

    /// Ten fresh products on every page, forever
    pub fn endless() -> Self {
        Self::new(|page| (0..10).map(|i| href(&format!("item-{}-{}", page, i))).collect())
    }

    pub fn search_requests(&self) -> usize {
        self.requests.iter().filter(|u| u.contains("/search?")).count()
    }

    pub fn product_requests(&self) -> usize {
        self.requests.len() - self.search_requests()
    }
}

/// Product-card href as the listing renders it
pub fn href(slug: &str) -> String {
    format!("/{}/p/itm{}?pid={}&lid=LST&marketplace=FLIPKART", slug, slug.len(), slug)
}

/// Canonical URL that `href(slug)` resolves to
pub fn product_url(slug: &str) -> String {
    format!("https://www.flipkart.com/{}/p/itm{}", slug, slug.len())
}

impl PageFetcher for FakeFetcher {
    async fn fetch(&mut self, url: &str, _readiness: &Readiness) -> Result<RawPage, CrawlError> {
        self.requests.push(url.to_string());

        if self.lost_session.contains(url) {
            return Err(CrawlError::SessionLost {
                url: url.to_string(),
            });
        }
        if self.failing.contains(url) {
            return Err(CrawlError::Navigation {
                url: url.to_string(),
                reason: "net::ERR_CONNECTION_RESET".to_string(),
            });
        }

        if self.blank.contains(url) {
            return Ok(RawPage::new(url, " "));
        }

        let parsed = Url::parse(url).unwrap();
        if parsed.path() == "/search" {
            let page = parsed
                .query_pairs()
                .find(|(k, _)| k == "page")
                .map(|(_, v)| v.parse::<u32>().unwrap())
                .unwrap();
            let anchors = (self.search)(page)
                .iter()
                .map(|h| format!("<a href=\"{}\">card</a>", h))
                .collect::<String>();
            return Ok(RawPage::new(
                url,
                format!("<html><body><div class=\"_1AtVbE\">{}</div></body></html>", anchors),
            ));
        }

        let slug = parsed.path().trim_start_matches('/').split('/').next().unwrap().to_string();
        Ok(RawPage::new(
            url,
            format!(
                "<html><body><span class=\"VU-ZEz\">Acme {} Maxi Dress</span>\
                 <div class=\"Nx9bqj\">₹499</div></body></html>",
                slug
            ),
        ))
    }

    async fn close(self) -> Result<(), CrawlError> {
        Ok(())
    }
}
