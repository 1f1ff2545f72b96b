//! Typed errors for each fallible stage of the pipeline.
//!
//! Every stage reports failure through its own enum so callers and tests can
//! match on the cause instead of inferring it from log text. `main` composes
//! them as `Box<dyn Error>` and maps any failure to a non-zero exit.

use thiserror::Error;

/// Errors raised while loading the JSON configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON or is missing a required key.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while fetching and scanning a web page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The shared HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The page URL is not a valid absolute URL.
    #[error("invalid page URL {url}: {source}")]
    BadUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request failed before a response arrived (connect error, timeout).
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Errors raised while extracting metadata from a single article page.
///
/// A failed article is logged and skipped by the orchestrator; it never
/// aborts the rest of the digest.
#[derive(Debug, Error)]
pub enum ArticleError {
    /// The article page could not be fetched.
    #[error(transparent)]
    Fetch(#[from] ScrapeError),

    /// The page has no `h1` heading. Title is the only hard requirement.
    #[error("no title heading found in {url}")]
    MissingTitle { url: String },
}

/// Errors raised while reading or writing the link-state file.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to read link state {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write link state {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while delivering the digest over SMTP.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The configured sender is not a parseable mailbox.
    #[error("invalid sender address {address:?}: {source}")]
    BadSender {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// A configured recipient is not a parseable mailbox.
    #[error("invalid recipient address {address:?}: {source}")]
    BadRecipient {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// The relay transport could not be constructed.
    #[error("failed to set up relay transport for {host}: {source}")]
    Relay {
        host: String,
        #[source]
        source: lettre::transport::smtp::Error,
    },

    /// The relay permanently rejected the handshake, typically bad
    /// credentials. Fatal for the whole batch; no recipient is attempted.
    #[error("mail relay rejected the login: {0}")]
    Auth(#[source] lettre::transport::smtp::Error),

    /// The relay could not be reached or dropped the connection check.
    #[error("could not reach the mail relay: {0}")]
    Connect(#[source] lettre::transport::smtp::Error),

    /// The relay answered the connection check negatively.
    #[error("mail relay {host} refused the connection check")]
    Refused { host: String },

    /// A message could not be assembled for a recipient.
    #[error("failed to build message for {recipient}: {source}")]
    Build {
        recipient: String,
        #[source]
        source: lettre::error::Error,
    },

    /// Delivery to one recipient failed. Remaining recipients are not
    /// attempted; `sent` records how many messages went out first.
    #[error("delivery to {recipient} failed after {sent} successful sends: {source}")]
    Send {
        recipient: String,
        sent: usize,
        #[source]
        source: lettre::transport::smtp::Error,
    },
}
