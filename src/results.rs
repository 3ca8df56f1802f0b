use serde::{Deserialize, Serialize};

/// Output columns, in the order they are written
pub const COLUMNS: [&str; 8] = [
    "Product Name",
    "Brand",
    "Category Type",
    "MRP (Maximum Retail Price)",
    "Discounted Price / Sale Price",
    "Rating",
    "Number of Reviews",
    "Product URL",
];

/// One scraped product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Product Name")]
    pub name: Option<String>,

    #[serde(rename = "Brand")]
    pub brand: Option<String>,

    /// Dress subtype, from the breadcrumb trail or the product name
    #[serde(rename = "Category Type")]
    pub category_type: Option<String>,

    #[serde(rename = "MRP (Maximum Retail Price)")]
    pub mrp: Option<f64>,

    #[serde(rename = "Discounted Price / Sale Price")]
    pub sale_price: Option<f64>,

    #[serde(rename = "Rating")]
    pub rating: Option<f64>,

    #[serde(rename = "Number of Reviews")]
    pub review_count: Option<u64>,

    /// Canonical product URL, unique within a crawl
    #[serde(rename = "Product URL")]
    pub source_url: String,
}

impl ProductRecord {
    /// Create a record with only its URL set
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            name: None,
            brand: None,
            category_type: None,
            mrp: None,
            sale_price: None,
            rating: None,
            review_count: None,
            source_url: source_url.into(),
        }
    }
}

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The target row count was collected
    TargetReached,
    /// A search page had no product links
    NoResults { page: u32 },
    /// The configured page cap was passed
    PageLimit,
}

/// A product link that was skipped
#[derive(Debug, Clone)]
pub struct ProductFailure {
    pub url: String,
    pub reason: String,
}

/// Outcome of one crawl
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub records: Vec<ProductRecord>,
    pub stop_reason: StopReason,
    /// Search pages that were fetched
    pub pages_visited: u32,
    pub failures: Vec<ProductFailure>,
}
