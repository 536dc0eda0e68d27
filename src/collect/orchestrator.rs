//! Runs registered collectors in sequence and merges their results.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::collect::{CollectOptions, Collector, FundingEvent};

/// Registry of named collectors, run one at a time in registration order.
///
/// A collector that errors contributes zero events; the remaining
/// collectors still run.
#[derive(Default)]
pub struct Orchestrator {
    collectors: Vec<(String, Box<dyn Collector>)>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, collector: Box<dyn Collector>) {
        let name = name.into();
        info!("Registered collector: {}", name);
        self.collectors.push((name, collector));
    }

    /// Collect from every registered collector and concatenate the results.
    pub async fn collect_from_all(&self, opts: &CollectOptions) -> Vec<FundingEvent> {
        let mut all = Vec::new();

        for (name, collector) in &self.collectors {
            info!("Collecting data from source: {}", name);
            match collector.collect(opts).await {
                Ok(events) => {
                    info!("Collected {} events from {}", events.len(), name);
                    all.extend(events);
                }
                Err(err) => {
                    warn!("Error collecting from {}: {:#}", name, err);
                }
            }
        }

        all
    }

    /// Collect from one registered collector by name.
    ///
    /// An unknown name or a failing collector yields an empty list.
    pub async fn collect_from_source(
        &self,
        name: &str,
        opts: &CollectOptions,
    ) -> Vec<FundingEvent> {
        let Some((_, collector)) = self.collectors.iter().find(|(n, _)| n == name) else {
            warn!("Source not found: {}", name);
            return Vec::new();
        };

        match collector.collect(opts).await {
            Ok(events) => events,
            Err(err) => {
                warn!("Error collecting from {}: {:#}", name, err);
                Vec::new()
            }
        }
    }

    /// Remove duplicate events keyed on the normalized company name,
    /// keeping the record with more populated fields.
    pub fn deduplicate(events: Vec<FundingEvent>) -> Vec<FundingEvent> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut unique: Vec<FundingEvent> = Vec::new();

        for event in events {
            let key = event.company.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }

            match seen.get(&key) {
                None => {
                    seen.insert(key, unique.len());
                    unique.push(event);
                }
                Some(&idx) => {
                    if event.completeness() > unique[idx].completeness() {
                        unique[idx] = event;
                    }
                }
            }
        }

        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::FundingRound;

    fn event(company: &str) -> FundingEvent {
        FundingEvent {
            company: company.to_string(),
            description: String::new(),
            funding_amount: None,
            funding_round: None,
            funding_date: None,
            article_url: None,
            source: "Test Source".to_string(),
            source_url: "https://example.com".to_string(),
        }
    }

    #[test]
    fn test_deduplicate_keeps_more_complete_record() {
        let sparse = event("Acme Corp");
        let mut rich = event("acme corp");
        rich.funding_amount = Some("$1.5 million".to_string());
        rich.funding_round = Some(FundingRound::Seed);

        let unique = Orchestrator::deduplicate(vec![sparse, rich, event("Other Co")]);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].funding_amount.as_deref(), Some("$1.5 million"));
        assert_eq!(unique[1].company, "Other Co");
    }

    #[test]
    fn test_deduplicate_skips_empty_names() {
        let unique = Orchestrator::deduplicate(vec![event(""), event("  "), event("Acme")]);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].company, "Acme");
    }

    #[test]
    fn test_deduplicate_keeps_first_on_tie() {
        let mut first = event("Acme");
        first.funding_amount = Some("$1 million".to_string());
        let mut second = event("Acme");
        second.funding_round = Some(FundingRound::SeriesA);

        let unique = Orchestrator::deduplicate(vec![first, second]);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].funding_amount.as_deref(), Some("$1 million"));
        assert!(unique[0].funding_round.is_none());
    }
}
