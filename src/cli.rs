//! Command-line interface definitions for the news scraper.
//!
//! The accepted site ids come from the loaded configuration, so the
//! positional argument's choice list is attached at runtime rather than in
//! the derive.

use crate::fetch::DEFAULT_TIMEOUT;
use clap::builder::{PossibleValue, PossibleValuesParser};
use clap::{CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;

/// Command-line arguments for the news scraper.
///
/// # Examples
///
/// ```sh
/// # Scrape El País into the current directory
/// news_scraper elpais
///
/// # Write the CSV somewhere else with a longer timeout
/// news_scraper eluniversal -o ./data --timeout-secs 30
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The news site that you want to scrape
    pub news_site: String,

    /// Directory the CSV file is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "NEWS_SCRAPER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

impl Cli {
    /// Parse `args`, accepting only the given site ids for `news_site`.
    pub fn try_parse_for_sites<I, T>(site_ids: &[String], args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let choices = site_ids.iter().map(|id| PossibleValue::new(id.clone()));
        let mut matches = Self::command()
            .mut_arg("news_site", |arg| {
                arg.value_parser(PossibleValuesParser::new(choices))
            })
            .try_get_matches_from(args)?;
        Self::from_arg_matches_mut(&mut matches)
    }

    /// Parse the process arguments; prints usage and exits on error.
    pub fn parse_for_sites(site_ids: &[String]) -> Self {
        Self::try_parse_for_sites(site_ids, std::env::args_os()).unwrap_or_else(|e| e.exit())
    }
}
