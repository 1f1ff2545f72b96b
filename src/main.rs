//! # News Digest
//!
//! A watcher that scans a news listing page for newly published article
//! links, pulls summary metadata from each new article, and emails a
//! formatted digest to the configured recipients. One invocation is one
//! run; re-running on a schedule is left to cron or a systemd timer.
//!
//! ## Usage
//!
//! ```sh
//! news_digest -c config.json
//! ```
//!
//! ## Pipeline
//!
//! Each run is one linear pass:
//! 1. **Extract**: Collect article links from the configured listing page
//! 2. **Diff**: Compare against the link set persisted by the previous run
//! 3. **Fetch**: Pull title/time/first-paragraph metadata for each new link
//! 4. **Notify**: Compose one digest and send it to every recipient
//! 5. **Persist**: Overwrite the link state with this run's full link list
//!
//! Failures in the listing fetch or the digest delivery exit non-zero;
//! callers can rely on the exit status instead of scanning log output.

use clap::Parser;
use futures::stream::{self, StreamExt};
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod digest;
mod error;
mod mailer;
mod models;
mod scrape;
mod state;
mod utils;

use cli::Cli;
use mailer::Mailer;
use models::ArticleInfo;
use scrape::{article, listing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_digest starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.config, ?args.state_file, dry_run = args.dry_run, "Parsed CLI arguments");

    // ---- Load config ----
    let config = match config::load_config(&args.config).await {
        Ok(config) => config,
        Err(e) => {
            error!(path = %args.config, error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };
    let state_path = args
        .state_file
        .clone()
        .unwrap_or_else(|| config.links_filename.clone());

    // ---- Extract listing links ----
    let client = scrape::http_client()?;
    let extracted = match listing::extract_links(&client, &config.url, &config.tag_class).await {
        Ok(links) => links,
        Err(e) => {
            error!(url = %config.url, error = %e, "Listing fetch failed");
            return Err(e.into());
        }
    };

    if extracted.is_empty() {
        // An empty extraction leaves the state file untouched.
        info!(url = %config.url, "No article links found on the listing page");
        return Ok(());
    }

    // ---- Diff against previous run ----
    let new_links = state::diff_new(&state_path, &extracted).await?;

    if new_links.is_empty() {
        info!("No new articles since the last run");
        if args.dry_run {
            info!("Dry run; state not updated");
        } else {
            state::save(&state_path, &extracted).await?;
        }
        return Ok(());
    }

    // ---- Fetch metadata for each new article ----
    let infos: Vec<ArticleInfo> = stream::iter(new_links.iter())
        .then(|url| {
            let client = client.clone();
            async move {
                match article::extract_info(&client, url).await {
                    Ok(info) => Some(info),
                    Err(e) => {
                        warn!(%url, error = %e, "Skipping article");
                        None
                    }
                }
            }
        })
        .filter_map(|opt| std::future::ready(opt))
        .collect()
        .await;
    info!(
        new = new_links.len(),
        extracted = infos.len(),
        "Fetched metadata for new articles"
    );

    // ---- Compose and send the digest ----
    let digest = digest::compose(&infos, config.escape_html);

    if args.dry_run {
        info!(body = %digest.text, "Composed digest (dry run; not sent, state not updated)");
        return Ok(());
    }

    let mailer = match Mailer::from_config(&config) {
        Ok(mailer) => mailer,
        Err(e) => {
            error!(error = %e, "Failed to set up mail relay");
            return Err(e.into());
        }
    };

    let recipients = config.email_receiver.to_vec();
    let send_result = mailer
        .send_digest(&recipients, &config.email_subject, &digest)
        .await;

    // ---- Persist state ----
    // State is written whether or not delivery succeeded; a failed digest is
    // reported through the exit status, not re-sent on the next run.
    state::save(&state_path, &extracted).await?;

    match send_result {
        Ok(sent) => info!(sent, "Digest delivery complete"),
        Err(e) => {
            error!(error = %e, "Digest delivery failed");
            return Err(e.into());
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Run complete"
    );

    Ok(())
}
