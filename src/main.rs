use clap::Parser;
use std::process::ExitCode;

mod args;
use args::{Args, into_products};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging, showing progress unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let products = match into_products(args) {
        Ok(products) => products,
        Err(e) => {
            ::log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = products.config();
    ::log::info!(
        "Starting crawl for \"{}\" (up to {} products, {} pages)",
        config.query,
        config.target_rows,
        config.max_pages
    );
    println!("Note: crawling requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using {}",
        config.webdriver_url
    );

    let output_path = config.output_path.clone();
    let start_time = std::time::Instant::now();

    match products.run().await {
        Ok(summary) => {
            println!(
                "Saved {} rows -> {}",
                summary.records.len(),
                output_path.display()
            );
            ::log::info!(
                "Crawl complete in {:.2} seconds",
                start_time.elapsed().as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Crawl failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
