//! Homepage page-object.
//!
//! Fetches a site's homepage and collects the article links found by the
//! site's `homepage.article_links` selector. Links are returned raw; turning
//! them into absolute URLs is the runner's job.

use crate::config::{HomepageQueries, SiteConfig};
use crate::error::FetchError;
use crate::fetch::FetchPage;
use itertools::Itertools;
use scraper::Html;
use tracing::{debug, info, instrument};

/// Fetch the homepage of `site` and extract its article links.
///
/// # Errors
///
/// Any [`FetchError`] is returned as is; there is no partial result for a
/// homepage.
#[instrument(level = "info", skip_all, fields(host = %site.url))]
pub async fn fetch_links<F: FetchPage>(
    fetcher: &F,
    site: &SiteConfig,
) -> Result<Vec<String>, FetchError> {
    let html = fetcher.fetch(&site.url).await?;
    let links = parse_article_links(&html, &site.homepage_queries);

    info!(count = links.len(), "Found links in homepage");
    debug!(?links, "Homepage links");
    Ok(links)
}

/// Extract article links from homepage HTML.
///
/// Elements without the configured attribute are ignored. Repeated links
/// keep only their first occurrence.
pub fn parse_article_links(html: &str, queries: &HomepageQueries) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&queries.article_links)
        .filter_map(|element| element.value().attr(&queries.link_attribute))
        .map(|link| link.trim().to_string())
        .unique()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NewsSites;
    use crate::fetch::testing::FakeWeb;

    const SITES: &str = r#"
news_sites:
  test:
    url: http://test.com
    homepage:
      article_links: "h2.story a"
    article:
      title: "h1"
      body: "p"
  attr:
    url: http://attr.test
    homepage:
      article_links: "li.item"
      link_attribute: "data-url"
    article:
      title: "h1"
      body: "p"
"#;

    const HOMEPAGE: &str = r#"
<html><body>
  <h2 class="story"><a href="/a">A</a></h2>
  <nav><a href="/not-an-article">Menu</a></nav>
  <h2 class="story"><a href="http://test.com/b">B</a></h2>
  <h2 class="story"><a name="anchor">no link</a></h2>
  <h2 class="story"><a href=" c ">C</a></h2>
  <h2 class="story"><a href="/a">A again</a></h2>
</body></html>
"#;

    fn sites() -> NewsSites {
        NewsSites::from_yaml(SITES).unwrap()
    }

    #[test]
    fn test_parse_article_links_in_document_order() {
        let sites = sites();
        let site = sites.site("test").unwrap();

        let links = parse_article_links(HOMEPAGE, &site.homepage_queries);

        assert_eq!(links, vec!["/a", "http://test.com/b", "c"]);
    }

    #[test]
    fn test_parse_article_links_custom_attribute() {
        let sites = sites();
        let site = sites.site("attr").unwrap();
        let html = r#"<ul><li class="item" data-url="/x">X</li><li class="item">none</li></ul>"#;

        assert_eq!(parse_article_links(html, &site.homepage_queries), vec!["/x"]);
    }

    #[test]
    fn test_parse_article_links_no_matches() {
        let sites = sites();
        let site = sites.site("test").unwrap();

        assert!(parse_article_links("<html></html>", &site.homepage_queries).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_links_requests_host() {
        let sites = sites();
        let site = sites.site("test").unwrap();
        let web = FakeWeb::new().page("http://test.com", HOMEPAGE);

        let links = fetch_links(&web, site).await.unwrap();

        assert_eq!(links.len(), 3);
        assert_eq!(web.requested(), vec!["http://test.com"]);
    }

    #[tokio::test]
    async fn test_fetch_links_propagates_failure() {
        let sites = sites();
        let site = sites.site("test").unwrap();
        let web = FakeWeb::new().failing("http://test.com", 500);

        let err = fetch_links(&web, site).await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }
}
