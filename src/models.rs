//! Data models for scraped articles.

use serde::Serialize;

/// An article as extracted from its page.
///
/// Field declaration order is the CSV column order; [`Article::FIELDS`] must
/// list the same names in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// The absolute URL the article was fetched from.
    pub url: String,
    /// The headline, or empty when the title selector matched nothing.
    pub title: String,
    /// The article text. Empty means the page had no body and the article
    /// is not kept.
    pub body: String,
    /// The publication date as written on the page, if any.
    pub date: Option<String>,
}

impl Article {
    /// Column names, in declaration order.
    pub const FIELDS: [&'static str; 4] = ["url", "title", "body", "date"];

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}
