use crate::error::CrawlError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a product crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Site root that search and product paths are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Search query, as typed into the site's search box
    #[serde(default = "default_query")]
    pub query: String,

    /// Highest search-results page index to visit
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Stop once this many products have been collected
    #[serde(default = "default_target_rows")]
    pub target_rows: usize,

    /// Where the CSV output is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Element that signals a rendered search-results page
    #[serde(default = "default_results_selector")]
    pub results_selector: String,

    /// How long to wait for the results element before falling back
    #[serde(default = "default_search_wait_secs")]
    pub search_wait_secs: u64,

    /// Fixed delay used when the results element never shows up
    #[serde(default = "default_search_fallback_delay_ms")]
    pub search_fallback_delay_ms: u64,

    /// Settle time after navigating to a product page
    #[serde(default = "default_product_settle_delay_ms")]
    pub product_settle_delay_ms: u64,

    /// Pause between product page requests
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Pause between search-results pages
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Upper bound on a single navigation
    #[serde(default = "default_page_load_timeout_secs")]
    pub page_load_timeout_secs: u64,

    /// Rules deciding which anchors are product cards
    #[serde(default)]
    pub links: ProductLinkRules,

    /// Ordered fallback selectors per product field
    #[serde(default)]
    pub selectors: SelectorRules,
}

/// Identifies product-card anchors on a search-results page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductLinkRules {
    /// Path segment every product URL contains
    #[serde(default = "default_path_marker")]
    pub path_marker: String,

    /// Query parameter carrying the product id
    #[serde(default = "default_id_param")]
    pub id_param: String,
}

impl Default for ProductLinkRules {
    fn default() -> Self {
        Self {
            path_marker: default_path_marker(),
            id_param: default_id_param(),
        }
    }
}

/// CSS selectors tried in order for each product field.
///
/// The site ships several markup variants at once, so each field lists every
/// class name it has been seen under, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorRules {
    #[serde(default = "default_name_selectors")]
    pub name: Vec<String>,

    #[serde(default = "default_brand_selectors")]
    pub brand: Vec<String>,

    /// Matches every link of the breadcrumb trail
    #[serde(default = "default_breadcrumb_selector")]
    pub breadcrumb: String,

    #[serde(default = "default_sale_price_selectors")]
    pub sale_price: Vec<String>,

    #[serde(default = "default_mrp_selectors")]
    pub mrp: Vec<String>,

    #[serde(default = "default_rating_selectors")]
    pub rating: Vec<String>,

    #[serde(default = "default_reviews_selectors")]
    pub reviews: Vec<String>,

    /// Subtype keywords matched against the product name, in priority order
    #[serde(default = "default_category_keywords")]
    pub category_keywords: Vec<String>,
}

impl Default for SelectorRules {
    fn default() -> Self {
        Self {
            name: default_name_selectors(),
            brand: default_brand_selectors(),
            breadcrumb: default_breadcrumb_selector(),
            sale_price: default_sale_price_selectors(),
            mrp: default_mrp_selectors(),
            rating: default_rating_selectors(),
            reviews: default_reviews_selectors(),
            category_keywords: default_category_keywords(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.flipkart.com".to_string()
}

fn default_query() -> String {
    "women dress".to_string()
}

fn default_max_pages() -> u32 {
    100
}

fn default_target_rows() -> usize {
    1000
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data/raw/women_dresses_raw.csv")
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_results_selector() -> String {
    "div._1AtVbE".to_string()
}

fn default_search_wait_secs() -> u64 {
    20
}

fn default_search_fallback_delay_ms() -> u64 {
    2000
}

fn default_product_settle_delay_ms() -> u64 {
    2000
}

fn default_request_delay_ms() -> u64 {
    1500
}

fn default_page_delay_ms() -> u64 {
    2000
}

fn default_page_load_timeout_secs() -> u64 {
    45
}

fn default_path_marker() -> String {
    "/p/".to_string()
}

fn default_id_param() -> String {
    "pid".to_string()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_name_selectors() -> Vec<String> {
    strings(&["span.VU-ZEz", "span.B_NuCI", "h1.yhB1nd"])
}

fn default_brand_selectors() -> Vec<String> {
    strings(&["span.mEh187", "span.G6XhRU"])
}

fn default_breadcrumb_selector() -> String {
    "a._2whKao".to_string()
}

fn default_sale_price_selectors() -> Vec<String> {
    strings(&["div._30jeq3", "div.Nx9bqj", "div.CxhGGd"])
}

fn default_mrp_selectors() -> Vec<String> {
    strings(&["div._3I9_wc", "div.yRaY8j"])
}

fn default_rating_selectors() -> Vec<String> {
    strings(&["div._3LWZlK", "div.XQDdHH._1Quie7"])
}

fn default_reviews_selectors() -> Vec<String> {
    strings(&["span._2_R_DZ", "div.DRxq-P"])
}

fn default_category_keywords() -> Vec<String> {
    strings(&[
        "Maxi",
        "Midi",
        "A-line",
        "Fit and Flare",
        "Bodycon",
        "Shift",
        "Gown",
        "Kaftan",
    ])
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            query: default_query(),
            max_pages: default_max_pages(),
            target_rows: default_target_rows(),
            output_path: default_output_path(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            results_selector: default_results_selector(),
            search_wait_secs: default_search_wait_secs(),
            search_fallback_delay_ms: default_search_fallback_delay_ms(),
            product_settle_delay_ms: default_product_settle_delay_ms(),
            request_delay_ms: default_request_delay_ms(),
            page_delay_ms: default_page_delay_ms(),
            page_load_timeout_secs: default_page_load_timeout_secs(),
            links: ProductLinkRules::default(),
            selectors: SelectorRules::default(),
        }
    }
}

impl CrawlConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CrawlError> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .map_err(|e| CrawlError::Config(format!("{}: {}", path.display(), e)))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| CrawlError::Config(format!("{}: {}", path.display(), e)))?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CrawlError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the crawl cannot run with
    pub fn validate(&self) -> Result<(), CrawlError> {
        if url::Url::parse(&self.base_url).is_err() {
            return Err(CrawlError::Config(format!(
                "base_url `{}` is not an absolute URL",
                self.base_url
            )));
        }
        if self.max_pages == 0 {
            return Err(CrawlError::Config("max_pages must be at least 1".into()));
        }
        if self.selectors.name.is_empty() {
            return Err(CrawlError::Config("at least one name selector is required".into()));
        }
        Ok(())
    }

    /// Same configuration with every fixed delay set to zero
    pub fn without_delays(mut self) -> Self {
        self.search_wait_secs = 0;
        self.search_fallback_delay_ms = 0;
        self.product_settle_delay_ms = 0;
        self.request_delay_ms = 0;
        self.page_delay_ms = 0;
        self
    }

    pub fn search_wait(&self) -> Duration {
        Duration::from_secs(self.search_wait_secs)
    }

    pub fn search_fallback_delay(&self) -> Duration {
        Duration::from_millis(self.search_fallback_delay_ms)
    }

    pub fn product_settle_delay(&self) -> Duration {
        Duration::from_millis(self.product_settle_delay_ms)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }
}
