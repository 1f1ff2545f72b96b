//! Per-article metadata extractor.
//!
//! Pulls the headline, a publication-time label, and the first paragraph out
//! of one article page. The headline is the only hard requirement; a page
//! without an `h1` fails extraction, while missing time or paragraph
//! elements degrade to placeholder strings.

use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::error::ArticleError;
use crate::models::ArticleInfo;
use crate::scrape::fetch_page;
use crate::utils::{collapse_ws, truncate_for_log};

/// Placeholder when the page carries no `time` element.
pub const TIME_FALLBACK: &str = "Time not available";

/// Placeholder when the page carries no paragraph inside an `article`.
pub const PARAGRAPH_FALLBACK: &str = "First paragraph not available";

static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());
static ARTICLE_P: Lazy<Selector> = Lazy::new(|| Selector::parse("article p").unwrap());

/// Fetch `article_url` and extract its summary metadata.
///
/// # Returns
///
/// The extracted [`ArticleInfo`], or an [`ArticleError`] when the page
/// cannot be fetched or has no title heading. Callers log and skip failed
/// articles; the rest of the digest is unaffected.
#[instrument(level = "info", skip_all, fields(url = %article_url))]
pub async fn extract_info(client: &Client, article_url: &str) -> Result<ArticleInfo, ArticleError> {
    let html = fetch_page(client, article_url).await?;
    let info = info_from_html(&html, article_url)?;
    debug!(
        title = %info.title,
        intro = %truncate_for_log(&info.first_paragraph, 80),
        "Extracted article metadata"
    );
    Ok(info)
}

/// Extract metadata from fetched article HTML.
fn info_from_html(html: &str, url: &str) -> Result<ArticleInfo, ArticleError> {
    let document = Html::parse_document(html);

    let title = document
        .select(&H1)
        .next()
        .map(element_text)
        .ok_or_else(|| ArticleError::MissingTitle {
            url: url.to_string(),
        })?;

    let time = document
        .select(&TIME)
        .next()
        .map(element_text)
        .unwrap_or_else(|| TIME_FALLBACK.to_string());

    let first_paragraph = document
        .select(&ARTICLE_P)
        .next()
        .map(element_text)
        .unwrap_or_else(|| PARAGRAPH_FALLBACK.to_string());

    Ok(ArticleInfo {
        title,
        time,
        first_paragraph,
        url: url.to_string(),
    })
}

fn element_text(element: ElementRef) -> String {
    collapse_ws(&element.text().collect::<Vec<_>>().join(" "))
}
