//! Command-line interface definitions.
//!
//! Runtime settings live in the JSON config file; the CLI only locates that
//! file and toggles run behavior.

use clap::Parser;

/// Command-line arguments for the news digest watcher.
///
/// # Examples
///
/// ```sh
/// # Default config.json in the working directory
/// news_digest
///
/// # Explicit config, rehearse without sending
/// news_digest -c /etc/news_digest/config.json --dry-run
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "config.json", env = "NEWS_DIGEST_CONFIG")]
    pub config: String,

    /// Override the link-state file path from the config
    #[arg(long)]
    pub state_file: Option<String>,

    /// Extract and compose but skip the email send and the state update
    #[arg(long)]
    pub dry_run: bool,
}
