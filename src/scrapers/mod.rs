//! Page-objects for the two kinds of pages a run visits.
//!
//! Each page-object follows the same two-step pattern:
//!
//! 1. **Fetch**: GET the page through a [`FetchPage`](crate::fetch::FetchPage)
//! 2. **Parse**: apply the site's configured selectors to the HTML
//!
//! The parse step is a pure function over the HTML so it can be tested
//! without a network.
//!
//! | Page | Module | Produces |
//! |------|--------|----------|
//! | Homepage | [`homepage`] | Raw article links, in document order |
//! | Article | [`article`] | An [`Article`](crate::models::Article) |

pub mod article;
pub mod homepage;

use itertools::Itertools;
use scraper::ElementRef;

/// Text of an element with runs of whitespace collapsed to single spaces.
fn collapsed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().split_whitespace().join(" ")
}
