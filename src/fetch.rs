//! Page retrieval.
//!
//! Page-objects never talk to `reqwest` directly; they go through the
//! [`FetchPage`] trait so a run can be driven from canned pages in tests.
//!
//! There is no retry logic: a failed request is reported once and the
//! caller decides whether it is fatal.

use crate::error::FetchError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait for fetching the HTML of a page.
pub trait FetchPage {
    /// GET `url` and return its body as text.
    ///
    /// Transport failures and non-success status codes are both errors.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`FetchPage`] over a shared `reqwest` client with default headers.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), %status, "Fetched page");
        Ok(body)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new(DEFAULT_TIMEOUT).is_ok());
    }
}
