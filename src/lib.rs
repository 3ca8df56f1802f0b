// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod output;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::CrawlConfig;
pub use error::CrawlError;
pub use results::{CrawlSummary, ProductRecord, StopReason};

use crawlers::{CrawlController, PageFetcher, WebFetcher};
use output::{CsvSink, Sink};
use std::path::{Path, PathBuf};

/// Main builder for a product crawl
pub struct Products {
    config: CrawlConfig,
}

impl Default for Products {
    fn default() -> Self {
        Self::new()
    }
}

impl Products {
    /// Create a builder with the default crawl configuration
    pub fn new() -> Self {
        Self {
            config: CrawlConfig::default(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: CrawlConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, CrawlError> {
        let config = CrawlConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self, CrawlError> {
        let config = CrawlConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    /// Set the search query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.config.query = query.into();
        self
    }

    /// Set the highest search page to visit
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set how many products to collect before stopping
    pub fn with_target_rows(mut self, target_rows: usize) -> Self {
        self.config.target_rows = target_rows;
        self
    }

    /// Set where the CSV is written
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Set the WebDriver endpoint
    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.config.webdriver_url = url.into();
        self
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawl with a WebDriver browser and write the configured CSV file
    pub async fn run(mut self) -> Result<CrawlSummary, CrawlError> {
        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.config.webdriver_url = webdriver_url;
            }
        }

        // Fail on bad settings before a browser is started
        let controller = CrawlController::new(self.config.clone())?;
        let fetcher = WebFetcher::connect(&self.config).await?;
        let mut sink = CsvSink::new(&self.config.output_path);

        crawl_with(controller, fetcher, &mut sink).await
    }

    /// Crawl with any fetcher and sink
    pub async fn run_with<F: PageFetcher, S: Sink>(
        self,
        fetcher: F,
        sink: &mut S,
    ) -> Result<CrawlSummary, CrawlError> {
        let controller = CrawlController::new(self.config)?;
        crawl_with(controller, fetcher, sink).await
    }
}

/// Run the crawl, release the fetcher whatever the outcome, then save
async fn crawl_with<F: PageFetcher, S: Sink>(
    controller: CrawlController,
    mut fetcher: F,
    sink: &mut S,
) -> Result<CrawlSummary, CrawlError> {
    let result = controller.run(&mut fetcher).await;

    if let Err(e) = fetcher.close().await {
        ::log::warn!("{}", e);
    }

    let summary = result?;
    sink.write_all(&summary.records)?;
    ::log::debug!(
        "Saved {} rows -> {} ({} pages, {} failed products, stopped: {:?})",
        summary.records.len(),
        sink.describe(),
        summary.pages_visited,
        summary.failures.len(),
        summary.stop_reason
    );

    Ok(summary)
}
