//! Listing-page link extractor.
//!
//! Scans the configured listing page for `article` containers carrying the
//! configured class and takes the first hyperlink out of each one. Class
//! matching is exact set membership against the element's class list, not a
//! CSS selector.
//!
//! Results keep document order and keep duplicates; deduplication happens
//! later when the links are diffed against the previous run's state.

use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::ScrapeError;
use crate::scrape::fetch_page;

static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Fetch `page_url` and extract the ordered article links.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `page_url` - Listing page to scan; also the base for resolving
///   relative hrefs
/// * `container_class` - Class an `article` element must carry to count as
///   an article container
///
/// # Returns
///
/// The absolute link URLs in document order (duplicates retained), or a
/// [`ScrapeError`] when the page cannot be fetched. Zero matching
/// containers is an empty list, not an error.
#[instrument(level = "info", skip_all, fields(url = %page_url))]
pub async fn extract_links(
    client: &Client,
    page_url: &str,
    container_class: &str,
) -> Result<Vec<String>, ScrapeError> {
    let base = Url::parse(page_url).map_err(|e| ScrapeError::BadUrl {
        url: page_url.to_string(),
        source: e,
    })?;

    let html = fetch_page(client, page_url).await?;
    let links = links_from_html(&html, &base, container_class);

    info!(count = links.len(), "Indexed article links");
    debug!(?links, "Extracted listing links");
    Ok(links)
}

/// Scan fetched listing HTML for article links.
///
/// Takes only the first `a` inside each matching container; containers with
/// no anchor, no `href`, or an unresolvable `href` are skipped silently.
fn links_from_html(html: &str, base: &Url, container_class: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for container in document.select(&ARTICLE) {
        if !container.value().classes().any(|c| c == container_class) {
            continue;
        }
        let Some(anchor) = container.select(&ANCHOR).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if let Ok(resolved) = base.join(href) {
            links.push(resolved.to_string());
        }
    }

    links
}
