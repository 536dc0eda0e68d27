//! Page fetching strategies for news feeds.
//!
//! Two interchangeable ways to obtain rendered markup: a plain HTTP GET
//! with a browser-like user agent, and a headless Chrome render for sites
//! that only populate their article lists from JavaScript. The extractor
//! downstream doesn't care which one produced the markup.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use reqwest::Client;
use tracing::{info, warn};

use crate::error::{CollectError, Result};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Timeout for plain HTTP fetches
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// How long to wait for the body element after navigation
const BODY_TIMEOUT: Duration = Duration::from_secs(10);

/// Settle time after scrolling, for lazy-loaded article lists
const SETTLE_DELAY: Duration = Duration::from_secs(2);

/// A way to turn a URL into rendered markup.
///
/// Failures are returned as errors; the caller decides whether a failed
/// source is fatal (it never is for the scraping collector).
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain HTTP GET fetcher with a fixed timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .with_context(|| format!("request failed for {}", url))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .with_context(|| format!("failed reading response for {}", url))?;

        if !status.is_success() {
            return Err(CollectError::Fetch(format!("{} ({})", url, status)).into());
        }

        Ok(body)
    }
}

/// Headless Chrome fetcher for JS-heavy pages.
///
/// Launches a fresh browser per fetch, waits for the page to settle,
/// scrolls to trigger lazy-loaded content and captures the rendered DOM.
/// Slower than [`HttpFetcher`] but survives client-side rendering.
pub struct BrowserFetcher;

#[async_trait]
impl Fetch for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let url = url.to_string();
        tokio::task::spawn_blocking(move || render_page(&url))
            .await
            .map_err(|e| CollectError::Browser(format!("render task failed: {}", e)))?
    }
}

/// Render a page with headless Chrome and return the final markup.
fn render_page(url: &str) -> Result<String> {
    info!("Launching headless Chrome for {}", url);

    let options = LaunchOptions {
        headless: true,
        sandbox: false, // May be needed on some systems
        args: vec![
            std::ffi::OsStr::new("--disable-blink-features=AutomationControlled"),
            std::ffi::OsStr::new("--disable-dev-shm-usage"),
            std::ffi::OsStr::new("--window-size=1920,1080"),
        ],
        ..Default::default()
    };

    let browser = Browser::new(options)
        .context("Failed to launch headless Chrome. Is Chrome/Chromium installed?")?;

    let tab = browser
        .new_tab()
        .context("Failed to create new browser tab")?;

    tab.navigate_to(url).context("Failed to navigate to URL")?;
    tab.wait_until_navigated()
        .context("Timed out waiting for navigation to settle")?;

    tab.wait_for_element_with_custom_timeout("body", BODY_TIMEOUT)
        .context("Timed out waiting for page body")?;

    // Scroll in two steps so lazy-loaded article lists get a chance to
    // populate before we capture the DOM.
    if let Err(e) = tab.evaluate("window.scrollTo(0, document.body.scrollHeight / 2);", false) {
        warn!("Scroll to mid-page failed: {}", e);
    }
    std::thread::sleep(Duration::from_secs(1));
    if let Err(e) = tab.evaluate("window.scrollTo(0, document.body.scrollHeight);", false) {
        warn!("Scroll to bottom failed: {}", e);
    }
    std::thread::sleep(SETTLE_DELAY);

    tab.get_content().context("Failed to get page content")
}
