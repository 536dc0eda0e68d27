//! Funding event record produced by collectors.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Funding round labels recognized by the extraction heuristics.
///
/// The set is fixed; anything that doesn't match one of these labels is
/// reported as "no round detected" rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingRound {
    Seed,
    PreSeed,
    SeriesA,
    SeriesB,
    SeriesC,
    SeriesD,
    SeriesE,
    SeriesF,
    Growth,
    LateStage,
    Angel,
    Equity,
    ConvertibleNote,
    DebtFinancing,
    Ipo,
}

impl FundingRound {
    pub fn as_str(&self) -> &'static str {
        match self {
            FundingRound::Seed => "Seed",
            FundingRound::PreSeed => "Pre-Seed",
            FundingRound::SeriesA => "Series A",
            FundingRound::SeriesB => "Series B",
            FundingRound::SeriesC => "Series C",
            FundingRound::SeriesD => "Series D",
            FundingRound::SeriesE => "Series E",
            FundingRound::SeriesF => "Series F",
            FundingRound::Growth => "Growth",
            FundingRound::LateStage => "Late Stage",
            FundingRound::Angel => "Angel",
            FundingRound::Equity => "Equity",
            FundingRound::ConvertibleNote => "Convertible Note",
            FundingRound::DebtFinancing => "Debt Financing",
            FundingRound::Ipo => "IPO",
        }
    }
}

impl std::fmt::Display for FundingRound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FundingRound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single detected instance of a company receiving investment, as
/// reported by one news source.
///
/// The record is immutable once produced. Amount, round and date are
/// best-effort: a block that yields a company but no amount still becomes
/// an event with the amount absent. No uniqueness is enforced here;
/// deduplication happens downstream.
#[derive(Debug, Clone, Serialize)]
pub struct FundingEvent {
    /// Company name guessed from the article title
    pub company: String,
    /// Article excerpt or summary, empty when none was found
    pub description: String,
    /// Free-text amount, e.g. "$5 million", currency symbol included
    pub funding_amount: Option<String>,
    pub funding_round: Option<FundingRound>,
    /// Publish date of the article, taken as the funding date
    pub funding_date: Option<DateTime<Utc>>,
    /// URL of the specific article, when resolvable from the markup
    pub article_url: Option<String>,
    /// Display name of the feed this event came from
    pub source: String,
    /// URL of the feed this event came from
    pub source_url: String,
}

impl FundingEvent {
    /// Number of populated optional fields, used to pick the better of two
    /// duplicate records.
    pub fn completeness(&self) -> usize {
        let mut score = 0;
        if !self.description.is_empty() {
            score += 1;
        }
        if self.funding_amount.is_some() {
            score += 1;
        }
        if self.funding_round.is_some() {
            score += 1;
        }
        if self.funding_date.is_some() {
            score += 1;
        }
        if self.article_url.is_some() {
            score += 1;
        }
        score
    }
}
