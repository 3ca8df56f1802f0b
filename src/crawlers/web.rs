use crate::config::CrawlConfig;
use crate::crawlers::crawler::{PageFetcher, Readiness};
use crate::error::CrawlError;
use crate::parsers::RawPage;
use crate::utils::pause;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

/// Local endpoints tried when the configured WebDriver refuses a session
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// [`PageFetcher`] backed by a single WebDriver browser session
pub struct WebFetcher {
    client: Client,
    page_load_timeout: Duration,
}

impl WebFetcher {
    /// Open a browser session on the configured WebDriver, or on a common
    /// local endpoint if that one is unavailable.
    pub async fn connect(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let capabilities = chrome_capabilities(config.headless);

        match open_session(&config.webdriver_url, &capabilities).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", config.webdriver_url);
                return Ok(Self::new(client, config.page_load_timeout()));
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    config.webdriver_url,
                    e
                );
            }
        }

        for url in FALLBACK_WEBDRIVER_URLS.iter() {
            if *url == config.webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = open_session(url, &capabilities).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(Self::new(client, config.page_load_timeout()));
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(CrawlError::Connect(format!(
            "no WebDriver server accepted a session (tried {} and fallbacks)",
            config.webdriver_url
        )))
    }

    pub fn new(client: Client, page_load_timeout: Duration) -> Self {
        Self {
            client,
            page_load_timeout,
        }
    }

    /// Navigate, bounded by the page load timeout
    async fn navigate(&self, url: &str) -> Result<(), CrawlError> {
        match timeout(self.page_load_timeout, self.client.goto(url)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(classify_error(e, url)),
            Err(_) => Err(CrawlError::Timeout {
                url: url.to_string(),
            }),
        }
    }

    async fn wait_until_ready(&self, url: &str, readiness: &Readiness) {
        match readiness {
            Readiness::WaitFor {
                selector,
                timeout,
                fallback,
            } => {
                let waited = self
                    .client
                    .wait()
                    .at_most(*timeout)
                    .for_element(Locator::Css(selector.as_str()))
                    .await;

                if let Err(e) = waited {
                    ::log::debug!(
                        "`{}` did not appear on {} ({}), sleeping {:?} instead",
                        selector,
                        url,
                        e,
                        fallback
                    );
                    pause(*fallback).await;
                }
            }
            Readiness::Settle(delay) => pause(*delay).await,
        }
    }
}

impl PageFetcher for WebFetcher {
    async fn fetch(&mut self, url: &str, readiness: &Readiness) -> Result<RawPage, CrawlError> {
        let started = std::time::Instant::now();

        self.navigate(url).await?;
        self.wait_until_ready(url, readiness).await;

        let html = self
            .client
            .source()
            .await
            .map_err(|e| classify_error(e, url))?;

        ::log::debug!(
            "Loaded {} ({} bytes) in {:.2} seconds",
            url,
            html.len(),
            started.elapsed().as_secs_f64()
        );

        Ok(RawPage::new(url, html))
    }

    async fn close(self) -> Result<(), CrawlError> {
        self.client
            .close()
            .await
            .map_err(|e| CrawlError::Shutdown(e.to_string()))
    }
}

async fn open_session(
    webdriver_url: &str,
    capabilities: &serde_json::Map<String, serde_json::Value>,
) -> Result<Client, fantoccini::error::NewSessionError> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities.clone());
    builder.connect(webdriver_url).await
}

/// Chrome options for an unattended crawl
fn chrome_capabilities(headless: bool) -> serde_json::Map<String, serde_json::Value> {
    let mut args = vec!["--disable-gpu", "--no-sandbox", "--window-size=1920,1080"];
    if headless {
        args.insert(0, "--headless=new");
    }

    let mut capabilities = serde_json::Map::new();
    capabilities.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    capabilities
}

/// Map a WebDriver command error, singling out a dead session
fn classify_error(error: fantoccini::error::CmdError, url: &str) -> CrawlError {
    let message = error.to_string();
    if is_session_lost(&message) {
        ::log::warn!("Lost session while loading {}", url);
        CrawlError::SessionLost {
            url: url.to_string(),
        }
    } else {
        CrawlError::Navigation {
            url: url.to_string(),
            reason: message,
        }
    }
}

fn is_session_lost(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("unable to find session")
        || message.contains("invalid session id")
        || message.contains("session deleted")
}
