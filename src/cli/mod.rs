use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "venture-watch")]
#[command(version, about = "Startup funding news aggregator")]
#[command(
    long_about = "Scrape configured news feeds for startup funding announcements and extract company, amount, round and date from the articles."
)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Path to a TOML config file with sources and defaults
    #[arg(long = "config", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect funding events from the configured news sources
    Collect {
        /// How many months to look back (overrides the config file)
        #[arg(long, value_name = "N")]
        months_back: Option<u32>,

        /// Fetch with plain HTTP instead of a headless browser
        #[arg(long)]
        no_browser: bool,

        /// Only scrape the source with this name
        #[arg(long, value_name = "NAME")]
        source: Option<String>,

        /// Keep duplicate events instead of merging them by company name
        #[arg(long)]
        no_dedupe: bool,
    },

    /// List the configured news sources
    Sources,
}
