use crate::config::CrawlConfig;
use crate::crawlers::crawler::{PageFetcher, Readiness};
use crate::error::CrawlError;
use crate::parsers::{DetailExtractor, LinkExtractor};
use crate::results::{CrawlSummary, ProductFailure, ProductRecord, StopReason};
use crate::utils::{pause, search_url};
use std::collections::HashSet;

/// Mutable state of one crawl, owned by the controller
#[derive(Debug, Clone)]
pub struct CrawlState {
    /// Product URLs already handed to the detail extractor
    pub visited: HashSet<String>,
    pub collected: Vec<ProductRecord>,
    /// 1-based index of the search page being crawled
    pub current_page: u32,
    pub pages_visited: u32,
    pub failures: Vec<ProductFailure>,
}

impl Default for CrawlState {
    fn default() -> Self {
        Self {
            visited: HashSet::new(),
            collected: Vec::new(),
            current_page: 1,
            pages_visited: 0,
            failures: Vec::new(),
        }
    }
}

/// Walks the search listing page by page and collects product records.
///
/// Each search page is fetched, its product links visited in order, and the
/// crawl stops once `target_rows` records are held, a page has no links, or
/// `max_pages` has been crawled. A failing product visit is logged and
/// skipped; a failing search page or a lost browser session ends the crawl
/// with an error.
pub struct CrawlController {
    config: CrawlConfig,
    links: LinkExtractor,
    details: DetailExtractor,
    state: CrawlState,
}

impl CrawlController {
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        config.validate()?;
        let links = LinkExtractor::new(&config.base_url, config.links.clone())?;
        let details = DetailExtractor::new(&config.selectors)?;

        Ok(Self {
            config,
            links,
            details,
            state: CrawlState::default(),
        })
    }

    /// Run the crawl to completion with `fetcher`
    pub async fn run<F: PageFetcher>(
        mut self,
        fetcher: &mut F,
    ) -> Result<CrawlSummary, CrawlError> {
        let stop_reason = loop {
            if self.target_reached() {
                ::log::info!(
                    "Reached target of {} products. Stopping.",
                    self.config.target_rows
                );
                break StopReason::TargetReached;
            }

            if let Some(reason) = self.crawl_page(fetcher).await? {
                break reason;
            }

            if self.target_reached() {
                continue;
            }

            if self.state.current_page >= self.config.max_pages {
                ::log::info!(
                    "Reached page limit of {}. Stopping.",
                    self.config.max_pages
                );
                break StopReason::PageLimit;
            }

            pause(self.config.page_delay()).await;
            self.state.current_page += 1;
        };

        Ok(CrawlSummary {
            records: self.state.collected,
            stop_reason,
            pages_visited: self.state.pages_visited,
            failures: self.state.failures,
        })
    }

    fn target_reached(&self) -> bool {
        self.state.collected.len() >= self.config.target_rows
    }

    /// Crawl the current search page. Returns a stop reason when the listing
    /// has run dry.
    async fn crawl_page<F: PageFetcher>(
        &mut self,
        fetcher: &mut F,
    ) -> Result<Option<StopReason>, CrawlError> {
        let page_index = self.state.current_page;
        let url = search_url(&self.config.base_url, &self.config.query, page_index)?;

        let readiness = Readiness::WaitFor {
            selector: self.config.results_selector.clone(),
            timeout: self.config.search_wait(),
            fallback: self.config.search_fallback_delay(),
        };
        let page = fetcher.fetch(&url, &readiness).await?;
        self.state.pages_visited += 1;

        let links = self.links.extract_links(&page);
        if links.is_empty() {
            ::log::info!("No results found on page {}. Stopping.", page_index);
            return Ok(Some(StopReason::NoResults { page: page_index }));
        }
        ::log::info!("Page {}: {} product links", page_index, links.len());

        for link in links {
            if self.target_reached() {
                break;
            }

            if !self.state.visited.insert(link.clone()) {
                ::log::debug!("Skipping already visited product: {}", link);
                continue;
            }

            match self.visit_product(fetcher, &link).await {
                Ok(record) => {
                    ::log::info!(
                        "[+] {} | {} | {} | Reviews: {}",
                        show(&record.name),
                        show(&record.brand),
                        show(&record.category_type),
                        show(&record.review_count)
                    );
                    self.state.collected.push(record);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    ::log::warn!("Failed {}: {}", link, e);
                    self.state.failures.push(ProductFailure {
                        url: link,
                        reason: e.to_string(),
                    });
                }
            }

            pause(self.config.request_delay()).await;
        }

        Ok(None)
    }

    async fn visit_product<F: PageFetcher>(
        &self,
        fetcher: &mut F,
        url: &str,
    ) -> Result<ProductRecord, CrawlError> {
        let readiness = Readiness::Settle(self.config.product_settle_delay());
        let page = fetcher.fetch(url, &readiness).await?;
        self.details.extract_details(&page)
    }
}

fn show<T: std::fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "-".to_string(), |v| v.to_string())
}
