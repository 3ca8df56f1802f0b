use clap::Parser;
use std::path::PathBuf;
use yield_product::{CrawlError, Products};

/// Every flag is optional; without any the built-in crawl settings are used.
#[derive(Parser, Debug)]
#[command(name = "yield-product")]
#[command(about = "Crawler that yields product records from a paginated search listing")]
#[command(version)]
pub struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Search query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Highest search-results page to visit
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Stop after collecting this many products
    #[arg(short, long)]
    pub target_rows: Option<usize>,

    /// CSV output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// WebDriver endpoint (WEBDRIVER_URL takes precedence)
    #[arg(long)]
    pub webdriver_url: Option<String>,
}

/// Build the crawl from the config file, then apply flag overrides
pub fn into_products(args: Args) -> Result<Products, CrawlError> {
    let mut products = Products::new();
    if let Some(path) = &args.config {
        products = products.with_config_file(path)?;
    }
    if let Some(query) = args.query {
        products = products.with_query(query);
    }
    if let Some(max_pages) = args.max_pages {
        products = products.with_max_pages(max_pages);
    }
    if let Some(target_rows) = args.target_rows {
        products = products.with_target_rows(target_rows);
    }
    if let Some(output) = args.output {
        products = products.with_output_path(output);
    }
    if let Some(url) = args.webdriver_url {
        products = products.with_webdriver_url(url);
    }
    Ok(products)
}
