//! Heuristic funding-article extractor.
//!
//! Given rendered markup from a news feed, finds article-like blocks,
//! keeps the ones whose title mentions funding, and guesses company name,
//! amount, round and date with ordered regex fallback chains evaluated
//! first-match-wins. Everything here is best-effort: a block that defeats
//! one heuristic still produces an event with that field absent.

use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

use crate::collect::{FundingEvent, FundingRound};
use crate::error::Result;

/// A title must contain at least one of these for its block to count as
/// a funding article.
const FUNDING_KEYWORDS: &[&str] = &[
    "raise",
    "raised",
    "funding",
    "investment",
    "seed",
    "series",
    "venture",
    "capital",
];

/// Class-name fragments that mark a block as article-like.
const BLOCK_CLASS_TERMS: &[&str] = &["article", "post", "news", "funding", "startup"];
const TITLE_CLASS_TERMS: &[&str] = &["title", "heading", "headline"];
const DATE_CLASS_TERMS: &[&str] = &["date", "time", "published", "posted"];
const CONTENT_CLASS_TERMS: &[&str] = &["excerpt", "summary", "content", "description"];

/// Calendar formats tried, in order, before relative phrases.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%m/%d/%Y",
];

static BLOCK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article, div, section").expect("valid block selector"));
static DIV_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div").expect("valid div selector"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, h4, a").expect("valid title selector"));
static DATE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("time, span, div, p").expect("valid date selector"));
static CONTENT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p, div").expect("valid content selector"));
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("valid link selector"));

static RELATIVE_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s+(day|days|week|weeks|month|months|year|years)\s+ago")
        .expect("valid relative date regex")
});

/// Company name patterns: "<Company> raises ...", first match wins.
static COMPANY_VERB_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["raises", "secures", "gets", "closes"]
        .iter()
        .map(|verb| {
            Regex::new(&format!(r"(?i)^([^,]+?)\s+{}", verb)).expect("valid company regex")
        })
        .collect()
});

static AMOUNT_SYMBOL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\$|€|£)(\d+(?:\.\d+)?)\s*(million|m|billion|b|k|thousand)?")
        .expect("valid amount regex")
});

static AMOUNT_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(million|m|billion|b|k|thousand)?\s*(dollars|euros|pounds)")
        .expect("valid amount regex")
});

/// Ordered (pattern, label) rules for round detection; first match wins.
static ROUND_RULES: Lazy<Vec<(Regex, FundingRound)>> = Lazy::new(|| {
    [
        (r"seed\s+round", FundingRound::Seed),
        (r"seed\s+funding", FundingRound::Seed),
        (r"pre-seed", FundingRound::PreSeed),
        (r"series\s+a", FundingRound::SeriesA),
        (r"series\s+b", FundingRound::SeriesB),
        (r"series\s+c", FundingRound::SeriesC),
        (r"series\s+d", FundingRound::SeriesD),
        (r"series\s+e", FundingRound::SeriesE),
        (r"series\s+f", FundingRound::SeriesF),
        (r"growth\s+round", FundingRound::Growth),
        (r"late\s+stage", FundingRound::LateStage),
        (r"angel\s+round", FundingRound::Angel),
        (r"equity\s+round", FundingRound::Equity),
        (r"convertible\s+note", FundingRound::ConvertibleNote),
        (r"debt\s+financing", FundingRound::DebtFinancing),
        (r"initial\s+public\s+offering", FundingRound::Ipo),
        (r"ipo", FundingRound::Ipo),
    ]
    .iter()
    .map(|(pattern, round)| {
        (
            Regex::new(&format!("(?i){}", pattern)).expect("valid round regex"),
            *round,
        )
    })
    .collect()
});

/// Extract funding events from rendered feed markup.
///
/// Blocks whose detected publish date is older than `cutoff` are dropped;
/// blocks with no detectable date pass the filter unconditionally. A block
/// that errors during extraction is logged and skipped, never fatal.
pub fn extract_funding_events(
    html: &str,
    source_name: &str,
    feed_url: &str,
    cutoff: DateTime<Utc>,
) -> Vec<FundingEvent> {
    let doc = Html::parse_document(html);
    let mut events = Vec::new();

    for block in candidate_blocks(&doc) {
        match extract_block(&block, source_name, feed_url, cutoff) {
            Ok(Some(event)) => events.push(event),
            Ok(None) => {}
            Err(err) => warn!("Error processing article block from {}: {:#}", source_name, err),
        }
    }

    events
}

/// Find candidate article blocks with a progressively looser search:
/// article-like elements with article-ish class names first, then any div
/// that looks like a container.
fn candidate_blocks<'a>(doc: &'a Html) -> Vec<ElementRef<'a>> {
    let primary: Vec<ElementRef<'a>> = doc
        .select(&BLOCK_SELECTOR)
        .filter(|el| class_contains_any(el, BLOCK_CLASS_TERMS))
        .collect();

    if !primary.is_empty() {
        return primary;
    }

    doc.select(&DIV_SELECTOR)
        .filter(|el| class_contains_any(el, &["container"]))
        .collect()
}

fn extract_block(
    block: &ElementRef,
    source_name: &str,
    feed_url: &str,
    cutoff: DateTime<Utc>,
) -> Result<Option<FundingEvent>> {
    let Some(title_el) = find_title(block) else {
        return Ok(None);
    };
    let title = element_text(&title_el);
    if title.is_empty() {
        return Ok(None);
    }

    let lower_title = title.to_lowercase();
    if !FUNDING_KEYWORDS.iter().any(|kw| lower_title.contains(kw)) {
        return Ok(None);
    }

    let article_date = find_date(block);
    if let Some(date) = article_date {
        if date < cutoff {
            return Ok(None);
        }
    }

    let description = find_description(block);
    let article_url = resolve_article_url(block, &title_el, feed_url)?;

    let haystack = format!("{} {}", title, description);

    Ok(Some(FundingEvent {
        company: extract_company_name(&title),
        funding_amount: extract_funding_amount(&haystack),
        funding_round: extract_funding_round(&haystack),
        funding_date: article_date,
        article_url,
        description,
        source: source_name.to_string(),
        source_url: feed_url.to_string(),
    }))
}

/// Heading-like element with a title-ish class name, falling back to any
/// heading or link in the block.
fn find_title<'a>(block: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    block
        .select(&TITLE_SELECTOR)
        .find(|el| class_contains_any(el, TITLE_CLASS_TERMS))
        .or_else(|| block.select(&TITLE_SELECTOR).next())
}

fn find_date(block: &ElementRef) -> Option<DateTime<Utc>> {
    let date_el = block
        .select(&DATE_SELECTOR)
        .find(|el| class_contains_any(el, DATE_CLASS_TERMS))?;
    parse_date_text(&element_text(&date_el))
}

fn find_description(block: &ElementRef) -> String {
    block
        .select(&CONTENT_SELECTOR)
        .find(|el| class_contains_any(el, CONTENT_CLASS_TERMS))
        .map(|el| element_text(&el))
        .unwrap_or_default()
}

/// Resolve the article's own URL from the title's link (or the first link
/// in the block). Relative paths join against the feed's origin; anything
/// that is neither absolute nor root-relative stays unresolved.
fn resolve_article_url(
    block: &ElementRef,
    title_el: &ElementRef,
    feed_url: &str,
) -> Result<Option<String>> {
    let link_el = if title_el.value().name() == "a" {
        Some(*title_el)
    } else {
        block.select(&LINK_SELECTOR).next()
    };

    let Some(href) = link_el.and_then(|el| el.value().attr("href")) else {
        return Ok(None);
    };

    if href.starts_with('/') {
        let origin = Url::parse(feed_url)
            .with_context(|| format!("invalid feed url: {}", feed_url))?
            .origin()
            .ascii_serialization();
        Ok(Some(format!("{}{}", origin, href)))
    } else if href.starts_with("http") {
        Ok(Some(href.to_string()))
    } else {
        Ok(None)
    }
}

/// Parse a publish date from free text: fixed calendar formats first, then
/// relative phrases ("today", "yesterday", "3 days ago"). Months count as
/// 30 days and years as 365.
pub fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date.and_time(NaiveTime::MIN).and_utc());
        }
    }

    let lower = trimmed.to_lowercase();
    if lower.contains("today") {
        return Some(Utc::now());
    }
    if lower.contains("yesterday") {
        return Some(Utc::now() - Duration::days(1));
    }

    let caps = RELATIVE_DATE_RE.captures(trimmed)?;
    let amount: i64 = caps.get(1)?.as_str().parse().ok()?;
    // Checked arithmetic throughout: an absurd phrase like
    // "99999999999999999 days ago" is unparseable, not a panic
    let delta = match caps.get(2)?.as_str().to_lowercase().as_str() {
        "day" | "days" => Duration::try_days(amount),
        "week" | "weeks" => Duration::try_weeks(amount),
        "month" | "months" => amount.checked_mul(30).and_then(Duration::try_days),
        "year" | "years" => amount.checked_mul(365).and_then(Duration::try_days),
        _ => None,
    }?;
    Utc::now().checked_sub_signed(delta)
}

/// Guess the company name from an article title.
///
/// Ordered fallback chain: "<Company> raises/secures/gets/closes", then
/// text before the first colon, then before the first comma, then the
/// first four words.
pub fn extract_company_name(title: &str) -> String {
    for re in COMPANY_VERB_RES.iter() {
        if let Some(caps) = re.captures(title) {
            if let Some(m) = caps.get(1) {
                return m.as_str().trim().to_string();
            }
        }
    }

    if let Some((head, _)) = title.split_once(':') {
        return head.trim().to_string();
    }

    if let Some((head, _)) = title.split_once(',') {
        return head.trim().to_string();
    }

    let words: Vec<&str> = title.split_whitespace().collect();
    if words.len() > 4 {
        return words[..4].join(" ");
    }

    title.trim().to_string()
}

/// Extract a funding amount as a display string, e.g. "$5 million".
///
/// First pattern: currency symbol, number, optional magnitude suffix
/// normalized to its word form. Second pattern: number-before-currency-word
/// order ("5 million dollars"), mapped back to a symbol.
pub fn extract_funding_amount(text: &str) -> Option<String> {
    if let Some(caps) = AMOUNT_SYMBOL_RE.captures(text) {
        let symbol = caps.get(1)?.as_str();
        let amount = caps.get(2)?.as_str();
        return Some(match normalize_magnitude(caps.get(3).map(|m| m.as_str())) {
            Some(word) => format!("{}{} {}", symbol, amount, word),
            None => format!("{}{}", symbol, amount),
        });
    }

    if let Some(caps) = AMOUNT_WORD_RE.captures(text) {
        let amount = caps.get(1)?.as_str();
        let symbol = match caps.get(3)?.as_str().to_lowercase().as_str() {
            "dollars" => "$",
            "euros" => "€",
            _ => "£",
        };
        return Some(match normalize_magnitude(caps.get(2).map(|m| m.as_str())) {
            Some(word) => format!("{}{} {}", symbol, amount, word),
            None => format!("{}{}", symbol, amount),
        });
    }

    None
}

fn normalize_magnitude(suffix: Option<&str>) -> Option<&'static str> {
    match suffix.map(|s| s.to_lowercase())?.as_str() {
        "million" | "m" => Some("million"),
        "billion" | "b" => Some("billion"),
        "thousand" | "k" => Some("thousand"),
        _ => None,
    }
}

/// Detect the funding round by testing the ordered rule table.
pub fn extract_funding_round(text: &str) -> Option<FundingRound> {
    ROUND_RULES
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, round)| *round)
}

/// Concatenated, whitespace-normalized text content of an element.
fn element_text(el: &ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn class_contains_any(el: &ElementRef, terms: &[&str]) -> bool {
    el.value()
        .attr("class")
        .map(|class| {
            let class = class.to_lowercase();
            terms.iter().any(|term| class.contains(term))
        })
        .unwrap_or(false)
}
