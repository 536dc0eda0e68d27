//! Configuration for Venture Watch.
//!
//! Sources and collection defaults come from a TOML file; without one the
//! built-in feed list is used.
//!
//! ```toml
//! months_back = 3
//! use_browser = true
//!
//! [[sources]]
//! name = "TechCrunch"
//! url = "https://techcrunch.com/category/venture/"
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{CollectError, Result};

/// A named news feed contributing zero or more funding events per scrape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default look-back window in months
    pub months_back: u32,
    /// Render pages with headless Chrome by default
    pub use_browser: bool,
    pub sources: Vec<SourceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            months_back: 3,
            use_browser: true,
            sources: default_sources(),
        }
    }
}

/// Feeds scraped when no config file is given.
pub fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig {
            name: "TechCrunch".to_string(),
            url: "https://techcrunch.com/category/venture/".to_string(),
        },
        SourceConfig {
            name: "VentureBeat".to_string(),
            url: "https://venturebeat.com/category/venture/".to_string(),
        },
    ]
}

impl Config {
    /// Load configuration from a TOML file, or the defaults when no path
    /// is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .map_err(|e| CollectError::Config(format!("{}: {}", path.display(), e)))?;

        if config.sources.is_empty() {
            return Err(CollectError::Config(format!(
                "{}: no sources configured",
                path.display()
            ))
            .into());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.months_back, 3);
        assert!(config.use_browser);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].name, "TechCrunch");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
months_back = 6
use_browser = false

[[sources]]
name = "Example News"
url = "https://news.example.com/funding"
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.months_back, 6);
        assert!(!config.use_browser);
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].url, "https://news.example.com/funding");
    }

    #[test]
    fn test_load_rejects_empty_sources() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "months_back = 1").unwrap();

        // serde(default) would fill in the built-in sources only when the
        // key is absent entirely; an explicit empty list is rejected
        writeln!(file, "sources = []").unwrap();
        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(Config::load(Some(Path::new("/nonexistent/config.toml"))).is_err());
    }
}
