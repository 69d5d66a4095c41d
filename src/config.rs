//! Per-site scraping configuration.
//!
//! Sites are described in YAML. The default document (`config.yaml` at the
//! crate root) is embedded into the binary; setting `NEWS_SCRAPER_CONFIG`
//! to a file path loads that file instead.
//!
//! ```yaml
//! news_sites:
//!   elpais:
//!     url: https://elpais.com
//!     homepage:
//!       article_links: "article h2 a"
//!     article:
//!       title: "h1"
//!       body: "div.a_c p"
//!       date: "time"
//! ```
//!
//! Every selector is compiled while loading, so a typo in the config fails
//! the run before any request is made.

use crate::error::ConfigError;
use scraper::Selector;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument};
use url::Url;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "NEWS_SCRAPER_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../config.yaml");

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    news_sites: BTreeMap<String, RawSite>,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    url: String,
    homepage: RawHomepageQueries,
    article: RawArticleQueries,
}

#[derive(Debug, Deserialize)]
struct RawHomepageQueries {
    article_links: String,
    #[serde(default = "default_link_attribute")]
    link_attribute: String,
}

#[derive(Debug, Deserialize)]
struct RawArticleQueries {
    title: String,
    body: String,
    date: Option<String>,
}

fn default_link_attribute() -> String {
    "href".to_string()
}

/// Where article links live on a site's homepage.
#[derive(Debug, Clone)]
pub struct HomepageQueries {
    pub article_links: Selector,
    /// Attribute holding the link on each matched element.
    pub link_attribute: String,
}

/// Where the fields of an article live on its page.
#[derive(Debug, Clone)]
pub struct ArticleQueries {
    pub title: Selector,
    pub body: Selector,
    pub date: Option<Selector>,
}

/// A validated news site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Homepage URL without a trailing slash.
    pub url: String,
    pub homepage_queries: HomepageQueries,
    pub article_queries: ArticleQueries,
}

/// All configured sites, keyed and ordered by site id.
#[derive(Debug, Clone)]
pub struct NewsSites {
    sites: BTreeMap<String, SiteConfig>,
}

impl NewsSites {
    /// Load the sites from `NEWS_SCRAPER_CONFIG` when set, otherwise from the
    /// embedded default.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_path(Path::new(&path)),
            None => {
                debug!("Using embedded site configuration");
                Self::from_yaml(DEFAULT_CONFIG)
            }
        }
    }

    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let sites = Self::from_yaml(&yaml)?;
        info!(count = sites.sites.len(), "Loaded site configuration");
        Ok(sites)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        if raw.news_sites.is_empty() {
            return Err(ConfigError::Empty);
        }

        let sites = raw
            .news_sites
            .into_iter()
            .map(|(id, site)| validate_site(&id, site).map(|site| (id, site)))
            .collect::<Result<BTreeMap<_, _>, ConfigError>>()?;

        Ok(Self { sites })
    }

    /// Site ids in lexical order.
    pub fn site_ids(&self) -> Vec<String> {
        self.sites.keys().cloned().collect()
    }

    pub fn site(&self, site_id: &str) -> Result<&SiteConfig, ConfigError> {
        self.sites
            .get(site_id)
            .ok_or_else(|| ConfigError::UnknownSite(site_id.to_string()))
    }
}

fn validate_site(site_id: &str, raw: RawSite) -> Result<SiteConfig, ConfigError> {
    Url::parse(&raw.url).map_err(|source| ConfigError::InvalidUrl {
        site: site_id.to_string(),
        source,
    })?;

    let homepage_queries = HomepageQueries {
        article_links: compile(site_id, "homepage.article_links", &raw.homepage.article_links)?,
        link_attribute: raw.homepage.link_attribute,
    };
    let article_queries = ArticleQueries {
        title: compile(site_id, "article.title", &raw.article.title)?,
        body: compile(site_id, "article.body", &raw.article.body)?,
        date: raw
            .article
            .date
            .as_deref()
            .map(|query| compile(site_id, "article.date", query))
            .transpose()?,
    };

    Ok(SiteConfig {
        url: raw.url.trim_end_matches('/').to_string(),
        homepage_queries,
        article_queries,
    })
}

fn compile(site_id: &str, query: &'static str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        site: site_id.to_string(),
        query,
        reason: e.to_string(),
    })
}
