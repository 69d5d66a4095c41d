//! CSV output for a run.
//!
//! One file per site and day, written to the output directory:
//!
//! ```text
//! {site_id}_{YYYY_MM_DD}_articles.csv
//! ```
//!
//! The header is [`Article::FIELDS`]; every row has the same columns in the
//! same order. A missing date is written as an empty field. An existing file
//! with the same name is overwritten.

use crate::error::OutputError;
use crate::models::Article;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument, warn};

/// File name for the articles of `site_id` scraped on `date`.
pub fn output_file_name(site_id: &str, date: NaiveDate) -> String {
    format!("{}_{}_articles.csv", site_id, date.format("%Y_%m_%d"))
}

/// Write `articles` to today's CSV file for `site_id` inside `output_dir`.
///
/// The date is taken when this is called. With no articles the file holds
/// only the header row.
///
/// # Returns
///
/// The path of the written file.
pub async fn write_articles(
    output_dir: &Path,
    site_id: &str,
    articles: &[Article],
) -> Result<PathBuf, OutputError> {
    write_articles_on(output_dir, site_id, Local::now().date_naive(), articles).await
}

#[instrument(level = "info", skip(output_dir, articles), fields(count = articles.len()))]
pub(crate) async fn write_articles_on(
    output_dir: &Path,
    site_id: &str,
    date: NaiveDate,
    articles: &[Article],
) -> Result<PathBuf, OutputError> {
    if articles.is_empty() {
        warn!("No articles to save; writing header only");
    }

    let csv = render_csv(articles)?;
    let path = output_dir.join(output_file_name(site_id, date));

    info!(path = %path.display(), "Writing CSV");
    fs::write(&path, csv).await.map_err(|source| OutputError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "Wrote articles CSV");

    Ok(path)
}

/// Encode the header and one row per article.
pub fn render_csv(articles: &[Article]) -> Result<Vec<u8>, OutputError> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(Article::FIELDS)?;
    for article in articles {
        writer.serialize(article)?;
    }

    writer
        .into_inner()
        .map_err(|e| OutputError::Csv(e.into_error().into()))
}
