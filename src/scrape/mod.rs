//! Page fetching and HTML extraction.
//!
//! Two extractors share one HTTP client:
//!
//! - [`listing`]: scans the configured listing page for article links
//! - [`article`]: pulls title/time/first-paragraph metadata from one article
//!
//! Both keep their HTML scanning in a pure function over the fetched body so
//! the parsing rules are testable without a network.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScrapeError;

pub mod article;
pub mod listing;

/// Upper bound for any single page request. A hung server fails the request
/// instead of blocking the whole run.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client shared by every fetch in a run.
pub fn http_client() -> Result<Client, ScrapeError> {
    Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .map_err(ScrapeError::Client)
}

/// Fetch `url` and return the response body as text.
///
/// Non-success statuses become [`ScrapeError::Status`] so callers can tell
/// an HTTP rejection apart from a connection failure.
pub(crate) async fn fetch_page(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ScrapeError::Fetch {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|e| ScrapeError::Fetch {
        url: url.to_string(),
        source: e,
    })
}
