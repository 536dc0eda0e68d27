// Web scraping module for extracting funding events from news sites
// Fetches pages with plain HTTP or headless Chrome, then applies
// heuristic extraction over the rendered markup

pub mod collector;
pub mod extract;
pub mod fetch;

pub use collector::WebScrapingCollector;
