//! Article page-object.
//!
//! Downloads one article and pulls title, body and date out of it with the
//! site's `article` selectors. A page where the body selector matches nothing
//! still yields an [`Article`], with an empty body; callers check
//! [`Article::has_body`].

use super::collapsed_text;
use crate::config::{ArticleQueries, SiteConfig};
use crate::error::FetchError;
use crate::fetch::FetchPage;
use crate::models::Article;
use crate::utils::truncate_for_log;
use scraper::{ElementRef, Html};
use tracing::{debug, info, instrument};

/// Fetch a single article.
#[instrument(level = "info", skip(fetcher, site))]
pub async fn fetch_article<F: FetchPage>(
    fetcher: &F,
    site: &SiteConfig,
    url: &str,
) -> Result<Article, FetchError> {
    let html = fetcher.fetch(url).await?;
    let article = parse_article(url, &html, &site.article_queries);

    info!(bytes = article.body.len(), "Parsed article");
    debug!(title = %truncate_for_log(&article.title, 80), date = ?article.date, "Article fields");
    Ok(article)
}

/// Extract an [`Article`] from its HTML.
///
/// * `title` is the text of the first title match
/// * `body` is the text of every body match, one line per match
/// * `date` prefers the `datetime` or `content` attribute of the first date
///   match over its text
pub fn parse_article(url: &str, html: &str, queries: &ArticleQueries) -> Article {
    let document = Html::parse_document(html);

    let title = document
        .select(&queries.title)
        .next()
        .map(collapsed_text)
        .unwrap_or_default();

    let body = document
        .select(&queries.body)
        .map(collapsed_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let date = queries
        .date
        .as_ref()
        .and_then(|selector| document.select(selector).next())
        .map(date_value)
        .filter(|date| !date.is_empty());

    Article {
        url: url.to_string(),
        title,
        body,
        date,
    }
}

fn date_value(element: ElementRef<'_>) -> String {
    ["datetime", "content"]
        .into_iter()
        .find_map(|attr| element.value().attr(attr))
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| collapsed_text(element))
}
