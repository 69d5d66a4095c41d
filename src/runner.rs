//! Scrape run orchestration.
//!
//! A run walks a fixed sequence:
//!
//! 1. **Homepage**: fetch the site's homepage and collect article links.
//!    Failure here aborts the run and nothing is written.
//! 2. **Articles**: for each link, in homepage order, build the absolute URL,
//!    fetch and parse the article. Each link ends up in one of three states:
//!    - `Kept`: fetched with a non-empty body
//!    - `Discarded`: fetched, but no body was found
//!    - `Skipped`: the fetch failed
//! 3. **Save**: write the kept articles to CSV, in the same order.
//!
//! Articles are fetched one at a time; a link's request finishes before the
//! next one starts.

use crate::config::SiteConfig;
use crate::error::ScrapeError;
use crate::fetch::FetchPage;
use crate::models::Article;
use crate::outputs::csv_file;
use crate::scrapers::{article, homepage};
use crate::utils::build_link;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// What happened to one homepage link.
#[derive(Debug)]
pub enum LinkOutcome {
    Kept(Article),
    Discarded,
    Skipped,
}

/// Per-run link counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub links: usize,
    pub kept: usize,
    pub discarded: usize,
    pub skipped: usize,
}

/// Scrapes one configured site.
pub struct NewsScraper<'a, F> {
    site_id: &'a str,
    site: &'a SiteConfig,
    fetcher: &'a F,
}

impl<'a, F: FetchPage> NewsScraper<'a, F> {
    pub fn new(site_id: &'a str, site: &'a SiteConfig, fetcher: &'a F) -> Self {
        Self {
            site_id,
            site,
            fetcher,
        }
    }

    /// Fetch the homepage and every linked article, returning the kept
    /// articles in homepage order.
    ///
    /// # Errors
    ///
    /// Only a homepage failure is an error; article failures are counted in
    /// the summary.
    #[instrument(level = "info", skip(self), fields(site = %self.site_id, host = %self.site.url))]
    pub async fn collect_articles(&self) -> Result<(Vec<Article>, RunSummary), ScrapeError> {
        info!("Beginning scraper for {}", self.site.url);
        info!("Finding links in homepage...");

        let links = homepage::fetch_links(self.fetcher, self.site)
            .await
            .map_err(|source| ScrapeError::Homepage {
                host: self.site.url.clone(),
                source,
            })?;

        let mut summary = RunSummary {
            links: links.len(),
            ..RunSummary::default()
        };
        let mut articles = Vec::new();

        for link in &links {
            match self.fetch_link(link).await {
                LinkOutcome::Kept(article) => {
                    summary.kept += 1;
                    articles.push(article);
                }
                LinkOutcome::Discarded => summary.discarded += 1,
                LinkOutcome::Skipped => summary.skipped += 1,
            }
        }

        info!(
            links = summary.links,
            kept = summary.kept,
            discarded = summary.discarded,
            skipped = summary.skipped,
            "Finished fetching articles"
        );
        Ok((articles, summary))
    }

    /// Resolve, fetch and check a single homepage link.
    pub async fn fetch_link(&self, link: &str) -> LinkOutcome {
        let url = build_link(&self.site.url, link);
        info!(%url, "Start fetching article");

        match article::fetch_article(self.fetcher, self.site, &url).await {
            Ok(article) if article.has_body() => {
                info!(%url, "Article fetched");
                LinkOutcome::Kept(article)
            }
            Ok(_) => {
                warn!(%url, "Invalid article. There is no body");
                LinkOutcome::Discarded
            }
            Err(e) => {
                warn!(%url, error = %e, "Error while fetching the article");
                LinkOutcome::Skipped
            }
        }
    }

    /// Run the whole scrape and write the CSV into `output_dir`.
    ///
    /// # Returns
    ///
    /// The path of the CSV file and the run's link counts.
    pub async fn run(&self, output_dir: &Path) -> Result<(PathBuf, RunSummary), ScrapeError> {
        let (articles, summary) = self.collect_articles().await?;
        let path = csv_file::write_articles(output_dir, self.site_id, &articles).await?;
        info!(path = %path.display(), count = articles.len(), "Saved articles");
        Ok((path, summary))
    }
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
      article_links: "h2 a"
    article:
      title: "h1"
      body: "div.body p"
      date: "time"
"#;

    const HOMEPAGE: &str = r#"
<h2><a href="/a">A</a></h2>
<h2><a href="http://test.com/b">B</a></h2>
<h2><a href="c">C</a></h2>
"#;

    const WITH_BODY: &str =
        r#"<h1>C title</h1><time datetime="2024-03-05">hoy</time><div class="body"><p>C body</p></div>"#;
    const WITHOUT_BODY: &str = r#"<h1>B title</h1><div class="body"></div>"#;

    fn sites() -> NewsSites {
        NewsSites::from_yaml(SITES).unwrap()
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        ::csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap()
            .records()
            .map(|record| record.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[tokio::test]
    async fn test_run_keeps_only_fetched_articles_with_body() {
        let sites = sites();
        let site = sites.site("test").unwrap();
        let web = FakeWeb::new()
            .page("http://test.com", HOMEPAGE)
            .failing("http://test.com/a", 500)
            .page("http://test.com/b", WITHOUT_BODY)
            .page("http://test.com/c", WITH_BODY);
        let tmp = tempfile::tempdir().unwrap();

        let (path, summary) = NewsScraper::new("test", site, &web)
            .run(tmp.path())
            .await
            .unwrap();

        assert_eq!(
            web.requested(),
            vec![
                "http://test.com",
                "http://test.com/a",
                "http://test.com/b",
                "http://test.com/c",
            ]
        );
        assert_eq!(
            summary,
            RunSummary {
                links: 3,
                kept: 1,
                discarded: 1,
                skipped: 1,
            }
        );

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], Article::FIELDS);
        assert_eq!(rows[1], vec!["http://test.com/c", "C title", "C body", "2024-03-05"]);
    }

    #[tokio::test]
    async fn test_articles_keep_homepage_order() {
        let sites = sites();
        let site = sites.site("test").unwrap();
        let web = FakeWeb::new()
            .page("http://test.com", HOMEPAGE)
            .page("http://test.com/a", WITH_BODY)
            .page("http://test.com/b", WITH_BODY)
            .page("http://test.com/c", WITH_BODY);

        let (articles, summary) = NewsScraper::new("test", site, &web)
            .collect_articles()
            .await
            .unwrap();

        let urls: Vec<_> = articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["http://test.com/a", "http://test.com/b", "http://test.com/c"]);
        assert_eq!(summary.kept, 3);
    }

    #[tokio::test]
    async fn test_homepage_failure_aborts_without_output() {
        let sites = sites();
        let site = sites.site("test").unwrap();
        let web = FakeWeb::new().failing("http://test.com", 503);
        let tmp = tempfile::tempdir().unwrap();

        let err = NewsScraper::new("test", site, &web)
            .run(tmp.path())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ScrapeError::Homepage { ref host, .. } if host == "http://test.com"
        ));
        assert_eq!(web.requested(), vec!["http://test.com"]);
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_no_surviving_articles_writes_header_only() {
        let sites = sites();
        let site = sites.site("test").unwrap();
        let web = FakeWeb::new()
            .page("http://test.com", HOMEPAGE)
            .page("http://test.com/b", WITHOUT_BODY);
        let tmp = tempfile::tempdir().unwrap();

        let (path, summary) = NewsScraper::new("test", site, &web)
            .run(tmp.path())
            .await
            .unwrap();

        assert_eq!(summary.kept, 0);
        assert_eq!(summary.skipped, 2);
        assert_eq!(read_rows(&path), vec![Article::FIELDS.to_vec()]);
    }

    #[tokio::test]
    async fn test_fetch_link_outcomes() {
        let sites = sites();
        let site = sites.site("test").unwrap();
        let web = FakeWeb::new()
            .page("http://test.com/b", WITHOUT_BODY)
            .page("http://test.com/c", WITH_BODY);
        let scraper = NewsScraper::new("test", site, &web);

        assert!(matches!(scraper.fetch_link("/a").await, LinkOutcome::Skipped));
        assert!(matches!(scraper.fetch_link("http://test.com/b").await, LinkOutcome::Discarded));
        match scraper.fetch_link("c").await {
            LinkOutcome::Kept(article) => assert_eq!(article.url, "http://test.com/c"),
            other => panic!("expected kept article, got {other:?}"),
        }
    }
}
