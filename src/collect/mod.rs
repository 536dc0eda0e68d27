//! Collector abstraction shared by all data sources.
//!
//! A collector turns one upstream source (a scraped news feed, an API, ...)
//! into a list of [`FundingEvent`]s. Collectors never fail the whole run:
//! the orchestrator logs a failing collector and moves on.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;

pub mod event;
pub mod orchestrator;

pub use event::{FundingEvent, FundingRound};
pub use orchestrator::Orchestrator;

/// Options shared by all collectors for one collection run.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// How many months to look back for funding news; articles dated
    /// earlier than now - 30 * months_back days are dropped
    pub months_back: u32,
    /// Render pages with a headless browser instead of a plain GET
    pub use_browser: bool,
    /// Source-specific parameters; collectors that don't understand a key
    /// ignore it
    pub extras: HashMap<String, serde_json::Value>,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            months_back: 3,
            use_browser: true,
            extras: HashMap::new(),
        }
    }
}

/// Interface implemented by every data collection method.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Display name of the data source
    fn source_name(&self) -> &str;

    /// Collect funding events from the source.
    ///
    /// Implementations isolate per-source failures internally and return
    /// an empty list rather than erroring when nothing matched.
    async fn collect(&self, opts: &CollectOptions) -> Result<Vec<FundingEvent>>;
}
