use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use event_scrape_lib::{extract_from_html, telemetry, EventRecord, EventScraper, ScrapeConfig};

#[derive(Parser, Debug)]
#[command(name = "event-scrape")]
#[command(about = "Scrape event details from an event page URL")]
struct Args {
    /// URL of the event page
    url: String,

    /// Read the page from a saved HTML file instead of fetching it
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// User-Agent header sent with the request
    #[arg(long = "user-agent")]
    user_agent: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout-secs")]
    timeout_secs: Option<u64>,
}

fn run(args: &Args) -> Result<EventRecord> {
    if let Some(path) = &args.html {
        let html = fs::read_to_string(path)
            .with_context(|| format!("unable to read {}", path.display()))?;
        return Ok(extract_from_html(&args.url, &html)?);
    }

    let mut config = ScrapeConfig::from_env();
    if let Some(agent) = &args.user_agent {
        config = config.with_user_agent(agent.clone());
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout_secs(secs);
    }
    let scraper = EventScraper::new(&config)?;
    Ok(scraper.scrape(&args.url)?)
}

fn main() -> ExitCode {
    telemetry::init_tracing();
    let args = Args::parse();

    let output = run(&args).and_then(|record| {
        serde_json::to_string_pretty(&record).context("unable to serialize event")
    });
    match output {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}
