//! Utility functions for link normalization, log formatting, and file system checks.

use crate::error::OutputError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

// https://example.com/hello
static WELL_FORMED_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://.+/.+$").unwrap());
// /some-text
static ROOT_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/.+$").unwrap());

/// Turn a link found on a homepage into an absolute URL.
///
/// # Arguments
///
/// * `host` - The site's homepage URL, without a trailing slash
/// * `link` - The raw link as it appeared in the markup
///
/// # Returns
///
/// * `link` itself when it is already absolute (scheme, host and a path)
/// * `host + link` when it is a root-relative path
/// * `host + "/" + link` otherwise
///
/// # Examples
///
/// ```ignore
/// assert_eq!(build_link("http://test.com", "/a"), "http://test.com/a");
/// assert_eq!(build_link("http://test.com", "c"), "http://test.com/c");
/// ```
pub fn build_link(host: &str, link: &str) -> String {
    if WELL_FORMED_LINK.is_match(link) {
        link.to_string()
    } else if ROOT_PATH.is_match(link) {
        format!("{host}{link}")
    } else {
        format!("{host}/{link}")
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut after `max` characters and get an ellipsis and a
/// byte count of what was dropped.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a probe file.
///
/// # Errors
///
/// Returns [`OutputError::Io`] if the directory cannot be created or written to.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(path).await.map_err(io_err)?;

    let probe_path = path.join("..__probe_write__");
    stdfs::File::create(&probe_path).map_err(io_err)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
