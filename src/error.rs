//! Error types for configuration, fetching, output and whole-run failures.
//!
//! Only [`ConfigError`], [`ScrapeError::Homepage`] and [`OutputError`] end a
//! run. A [`FetchError`] on a single article is logged and the article is
//! skipped.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown news site `{0}`")]
    UnknownSite(String),

    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] serde_yaml::Error),

    #[error("config does not define any news sites")]
    Empty,

    #[error("site `{site}` has an invalid url")]
    InvalidUrl {
        site: String,
        #[source]
        source: url::ParseError,
    },

    #[error("site `{site}` has an invalid `{query}` selector: {reason}")]
    InvalidSelector {
        site: String,
        query: &'static str,
        reason: String,
    },
}

/// A page could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("i/o error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode csv")]
    Csv(#[from] csv::Error),
}

/// Fatal errors of a scraping run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to fetch homepage {host}")]
    Homepage {
        host: String,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    Output(#[from] OutputError),
}
