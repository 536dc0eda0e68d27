//! Integration tests for the web scraping collector and orchestrator
//!
//! These tests use a fake fetcher, so no network or browser is involved:
//! - provenance stamping of source name/URL on extracted events
//! - a failing source doesn't stop the rest of the batch
//! - orchestrator error isolation and deduplication

use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use venture_watch::collect::{CollectOptions, Collector, FundingEvent, Orchestrator};
use venture_watch::config::SourceConfig;
use venture_watch::error::Result;
use venture_watch::scraping::fetch::Fetch;
use venture_watch::scraping::WebScrapingCollector;

const GOOD_HTML: &str = r#"
    <html><body>
    <article class="post-block">
        <h2 class="post-title">
            <a href="/story/acme">Acme Corp raises $5 million in Series A funding</a>
        </h2>
    </article>
    </body></html>
"#;

/// Fetcher serving canned pages; unknown URLs fail like a dead network.
struct FakeFetch {
    pages: HashMap<String, String>,
}

impl FakeFetch {
    fn with_page(url: &str, html: &str) -> Self {
        let mut pages = HashMap::new();
        pages.insert(url.to_string(), html.to_string());
        Self { pages }
    }
}

#[async_trait]
impl Fetch for FakeFetch {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("connection refused: {}", url))
    }
}

fn source(name: &str, url: &str) -> SourceConfig {
    SourceConfig {
        name: name.to_string(),
        url: url.to_string(),
    }
}

fn http_options() -> CollectOptions {
    CollectOptions {
        use_browser: false,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_collector_stamps_source_provenance() -> Result<()> {
    let feed_url = "https://news.example.com/funding/";
    let collector = WebScrapingCollector::with_fetchers(
        vec![source("Example News", feed_url)],
        Box::new(FakeFetch::with_page(feed_url, GOOD_HTML)),
        Box::new(FakeFetch {
            pages: HashMap::new(),
        }),
    );

    let events = collector.collect(&http_options()).await?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].source, "Example News");
    assert_eq!(events[0].source_url, feed_url);
    // The article-level URL keeps the extractor's resolution
    assert_eq!(
        events[0].article_url.as_deref(),
        Some("https://news.example.com/story/acme")
    );
    Ok(())
}

#[tokio::test]
async fn test_failing_source_does_not_stop_the_batch() -> Result<()> {
    let good_url = "https://news.example.com/funding/";
    let collector = WebScrapingCollector::with_fetchers(
        vec![
            source("Dead Feed", "https://dead.example.com/"),
            source("Example News", good_url),
        ],
        Box::new(FakeFetch::with_page(good_url, GOOD_HTML)),
        Box::new(FakeFetch {
            pages: HashMap::new(),
        }),
    );

    let events = collector.collect(&http_options()).await?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].source, "Example News");
    assert_eq!(events[0].company, "Acme Corp");
    Ok(())
}

#[tokio::test]
async fn test_all_sources_failing_yields_empty_list() -> Result<()> {
    let collector = WebScrapingCollector::with_fetchers(
        vec![
            source("Dead Feed", "https://dead.example.com/"),
            source("Deader Feed", "https://deader.example.com/"),
        ],
        Box::new(FakeFetch {
            pages: HashMap::new(),
        }),
        Box::new(FakeFetch {
            pages: HashMap::new(),
        }),
    );

    let events = collector.collect(&http_options()).await?;
    assert!(events.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_browser_flag_selects_browser_fetcher() -> Result<()> {
    let feed_url = "https://news.example.com/funding/";
    // The "browser" fake serves the page; the "http" fake would fail
    let collector = WebScrapingCollector::with_fetchers(
        vec![source("Example News", feed_url)],
        Box::new(FakeFetch {
            pages: HashMap::new(),
        }),
        Box::new(FakeFetch::with_page(feed_url, GOOD_HTML)),
    );

    let opts = CollectOptions {
        use_browser: true,
        ..Default::default()
    };
    let events = collector.collect(&opts).await?;
    assert_eq!(events.len(), 1);
    Ok(())
}

/// Collector that always errors, for orchestrator isolation tests.
struct BrokenCollector;

#[async_trait]
impl Collector for BrokenCollector {
    fn source_name(&self) -> &str {
        "Broken"
    }

    async fn collect(&self, _opts: &CollectOptions) -> Result<Vec<FundingEvent>> {
        Err(anyhow!("upstream exploded"))
    }
}

#[tokio::test]
async fn test_orchestrator_isolates_failing_collectors() -> Result<()> {
    let feed_url = "https://news.example.com/funding/";
    let scraper = WebScrapingCollector::with_fetchers(
        vec![source("Example News", feed_url)],
        Box::new(FakeFetch::with_page(feed_url, GOOD_HTML)),
        Box::new(FakeFetch {
            pages: HashMap::new(),
        }),
    );

    let mut orchestrator = Orchestrator::new();
    orchestrator.register("broken", Box::new(BrokenCollector));
    orchestrator.register("web_scraping", Box::new(scraper));

    let events = orchestrator.collect_from_all(&http_options()).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].company, "Acme Corp");
    Ok(())
}

#[tokio::test]
async fn test_orchestrator_collect_from_named_source() {
    let mut orchestrator = Orchestrator::new();
    orchestrator.register("broken", Box::new(BrokenCollector));

    // A failing collector yields an empty list, not an error
    let events = orchestrator
        .collect_from_source("broken", &http_options())
        .await;
    assert!(events.is_empty());

    // So does an unknown name
    let events = orchestrator
        .collect_from_source("missing", &http_options())
        .await;
    assert!(events.is_empty());
}
