use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

use venture_watch::cli::{Cli, Commands};
use venture_watch::collect::{CollectOptions, FundingEvent, Orchestrator};
use venture_watch::config::Config;
use venture_watch::scraping::WebScrapingCollector;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Collect {
            months_back,
            no_browser,
            source,
            no_dedupe,
        } => {
            handle_collect(
                &config,
                months_back,
                no_browser,
                source.as_deref(),
                no_dedupe,
                cli.json,
            )
            .await
        }

        Commands::Sources => handle_sources(&config, cli.json),
    }
}

async fn handle_collect(
    config: &Config,
    months_back: Option<u32>,
    no_browser: bool,
    source: Option<&str>,
    no_dedupe: bool,
    json: bool,
) -> Result<()> {
    let sources = match source {
        None => config.sources.clone(),
        Some(name) => {
            let matched: Vec<_> = config
                .sources
                .iter()
                .filter(|s| s.name.eq_ignore_ascii_case(name))
                .cloned()
                .collect();
            if matched.is_empty() {
                bail!("no configured source named '{}'", name);
            }
            matched
        }
    };

    let opts = CollectOptions {
        months_back: months_back.unwrap_or(config.months_back),
        use_browser: config.use_browser && !no_browser,
        ..Default::default()
    };

    info!(
        "Collecting from {} source(s), {} months back",
        sources.len(),
        opts.months_back
    );

    let mut orchestrator = Orchestrator::new();
    orchestrator.register("web_scraping", Box::new(WebScrapingCollector::new(sources)?));

    let mut events = orchestrator.collect_from_all(&opts).await;
    if !no_dedupe {
        events = Orchestrator::deduplicate(events);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    print_events(&events);
    Ok(())
}

fn print_events(events: &[FundingEvent]) {
    if events.is_empty() {
        println!("{} No funding events found", "ℹ".blue().bold());
        return;
    }

    #[derive(Tabled)]
    struct EventRow {
        #[tabled(rename = "Company")]
        company: String,
        #[tabled(rename = "Amount")]
        amount: String,
        #[tabled(rename = "Round")]
        round: String,
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Source")]
        source: String,
    }

    let rows: Vec<EventRow> = events
        .iter()
        .map(|event| EventRow {
            company: event.company.clone(),
            amount: event.funding_amount.clone().unwrap_or_default(),
            round: event
                .funding_round
                .map(|r| r.to_string())
                .unwrap_or_default(),
            date: event
                .funding_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            source: event.source.clone(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
    println!(
        "\n{} Found {} funding event(s)",
        "✓".green().bold(),
        events.len().to_string().green()
    );
}

fn handle_sources(config: &Config, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&config.sources)?);
        return Ok(());
    }

    #[derive(Tabled)]
    struct SourceRow {
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "URL")]
        url: String,
    }

    let rows: Vec<SourceRow> = config
        .sources
        .iter()
        .map(|s| SourceRow {
            name: s.name.clone(),
            url: s.url.clone(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
    Ok(())
}
