use crate::config::ProductLinkRules;
use crate::error::CrawlError;
use crate::parsers::{RawPage, compile_selector};
use crate::utils::canonical_url;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Finds product-card links on a search-results page
#[derive(Debug)]
pub struct LinkExtractor {
    base: Url,
    rules: ProductLinkRules,
    anchors: Selector,
}

impl LinkExtractor {
    pub fn new(base_url: &str, rules: ProductLinkRules) -> Result<Self, CrawlError> {
        let base = Url::parse(base_url)
            .map_err(|e| CrawlError::Config(format!("bad base_url `{}`: {}", base_url, e)))?;

        Ok(Self {
            base,
            rules,
            anchors: compile_selector(r#"a[href^="/"]"#)?,
        })
    }

    /// Whether a site-relative href points at a product page
    pub fn is_product_link(&self, href: &str) -> bool {
        // `//host/...` is protocol-relative, not a path on this site
        if href.starts_with("//") {
            return false;
        }

        let Some((path, query)) = href.split_once('?') else {
            return false;
        };

        path.contains(&self.rules.path_marker)
            && query
                .split('&')
                .any(|pair| pair.split('=').next() == Some(self.rules.id_param.as_str()))
    }

    /// Whether a resolved URL still points at the configured site
    fn is_on_site(&self, url: &str) -> bool {
        Url::parse(url).is_ok_and(|u| u.origin() == self.base.origin())
    }

    /// Canonical product URLs on the page, each once, in document order.
    ///
    /// An empty result means the listing has run out of results.
    pub fn extract_links(&self, page: &RawPage) -> Vec<String> {
        let doc = Html::parse_document(&page.html);

        let mut seen = HashSet::new();
        let links = doc
            .select(&self.anchors)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| self.is_product_link(href))
            .filter_map(|href| canonical_url(&self.base, href))
            .filter(|url| self.is_on_site(url))
            .filter(|url| seen.insert(url.clone()))
            .collect::<Vec<String>>();

        ::log::debug!("Found {} product links in {}", links.len(), page.url);
        links
    }
}
