//! # News Scraper
//!
//! Scrapes a news site's homepage for article links, downloads each article,
//! extracts title, body and date with per-site CSS selectors, and writes the
//! result to a dated CSV file.
//!
//! ## Usage
//!
//! ```sh
//! news_scraper elpais -o ./data
//! ```
//!
//! ## Architecture
//!
//! A run is a single sequential pipeline:
//! 1. **Config**: Load site selectors and validate the requested site id
//! 2. **Homepage**: Collect article links from the site's homepage
//! 3. **Articles**: Fetch each article in link order, keeping those with a body
//! 4. **Output**: Write `{site}_{YYYY_MM_DD}_articles.csv`

use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod outputs;
mod runner;
mod scrapers;
mod utils;

use cli::Cli;
use config::NewsSites;
use fetch::HttpFetcher;
use runner::NewsScraper;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let sites = NewsSites::load().inspect_err(|e| error!(error = %e, "Invalid site configuration"))?;

    // Unknown site ids are rejected here, before any request is made.
    let args = Cli::parse_for_sites(&sites.site_ids());
    debug!(?args, "Parsed CLI arguments");

    let site = sites.site(&args.news_site)?;
    info!(site = %args.news_site, host = %site.url, "news_scraper starting up");

    let output_dir = Path::new(&args.output_dir);
    if let Err(e) = ensure_writable_dir(output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_secs))?;
    let scraper = NewsScraper::new(&args.news_site, site, &fetcher);

    let (path, summary) = match scraper.run(output_dir).await {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, source = ?e.source(), "Scrape failed");
            return Err(e.into());
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        path = %path.display(),
        links = summary.links,
        kept = summary.kept,
        discarded = summary.discarded,
        skipped = summary.skipped,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
