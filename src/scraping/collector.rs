//! Web scraping collector over a list of configured news feeds.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::collect::{CollectOptions, Collector, FundingEvent};
use crate::config::SourceConfig;
use crate::error::Result;
use crate::scraping::extract::extract_funding_events;
use crate::scraping::fetch::{BrowserFetcher, Fetch, HttpFetcher};

/// Collector that scrapes configured news feeds for funding articles.
///
/// Sources are processed strictly one at a time. A source whose fetch
/// fails is logged and contributes zero events; the remaining sources
/// still run. The collector itself never errors once constructed.
pub struct WebScrapingCollector {
    sources: Vec<SourceConfig>,
    http: Box<dyn Fetch>,
    browser: Box<dyn Fetch>,
}

impl WebScrapingCollector {
    pub fn new(sources: Vec<SourceConfig>) -> Result<Self> {
        Ok(Self {
            sources,
            http: Box::new(HttpFetcher::new()?),
            browser: Box::new(BrowserFetcher),
        })
    }

    /// Build a collector with explicit fetchers. Used by tests to avoid
    /// network and browser dependencies.
    pub fn with_fetchers(
        sources: Vec<SourceConfig>,
        http: Box<dyn Fetch>,
        browser: Box<dyn Fetch>,
    ) -> Self {
        Self {
            sources,
            http,
            browser,
        }
    }
}

#[async_trait]
impl Collector for WebScrapingCollector {
    fn source_name(&self) -> &str {
        "Web Scraping"
    }

    async fn collect(&self, opts: &CollectOptions) -> Result<Vec<FundingEvent>> {
        let cutoff = Utc::now() - Duration::days(30 * i64::from(opts.months_back));
        let mut all = Vec::new();

        for source in &self.sources {
            info!("Scraping source: {} ({})", source.name, source.url);

            let fetcher: &dyn Fetch = if opts.use_browser {
                self.browser.as_ref()
            } else {
                self.http.as_ref()
            };

            let html = match fetcher.fetch(&source.url).await {
                Ok(html) => html,
                Err(err) => {
                    warn!("Error scraping {}: {:#}", source.name, err);
                    continue;
                }
            };

            let mut events = extract_funding_events(&html, &source.name, &source.url, cutoff);

            // Stamp the caller-declared feed label/URL as provenance; the
            // article-level URL stays whatever the extractor resolved.
            for event in &mut events {
                event.source = source.name.clone();
                event.source_url = source.url.clone();
            }

            info!("Found {} funding events from {}", events.len(), source.name);
            all.extend(events);
        }

        Ok(all)
    }
}
