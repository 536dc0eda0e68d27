//! Venture Watch - startup funding news aggregator
//!
//! This library collects startup funding events from configured news feeds,
//! guessing company, amount, round and date from article markup with
//! heuristic keyword/regex matching.

pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod scraping;
