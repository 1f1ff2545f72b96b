//! Configuration file loading.
//!
//! Settings come from a flat JSON object read once at startup and held
//! immutable for the run. A missing required key fails deserialization, so
//! a bad config is reported before any network traffic happens.
//!
//! # Example
//!
//! ```json
//! {
//!   "url": "https://news.example/latest",
//!   "tag_class": "teaser",
//!   "links_filename": "links.txt",
//!   "email_sender": "News Digest <digest@example.com>",
//!   "email_login": "AKIAEXAMPLE",
//!   "email_password": "secret",
//!   "email_receiver": ["first@example.com", "second@example.com"],
//!   "email_subject": "New articles"
//! }
//! ```

use serde::Deserialize;
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::error::ConfigError;

/// Relay host used when the config does not name one.
pub const DEFAULT_SMTP_HOST: &str = "email-smtp.eu-central-1.amazonaws.com";

/// Relay port used when the config does not name one (implicit TLS).
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// Run-wide settings, deserialized from the JSON config file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// The listing page to scan for article links.
    pub url: String,
    /// Class that marks the `article` containers holding one link each.
    pub tag_class: String,
    /// Path of the link-state file carried between runs.
    pub links_filename: String,
    /// Sender mailbox, either `addr@example.com` or `Name <addr@example.com>`.
    pub email_sender: String,
    /// Relay login identity.
    pub email_login: String,
    /// Relay password or credential.
    pub email_password: String,
    /// One recipient address or a list of them.
    pub email_receiver: Recipients,
    /// Subject line for the digest message.
    pub email_subject: String,
    /// Mail relay hostname.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// Mail relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Entity-escape article fields in the HTML digest body. Off by default:
    /// scraped content is interpolated verbatim unless the operator opts in.
    #[serde(default)]
    pub escape_html: bool,
}

/// A single recipient address or a list of them.
///
/// The config accepts both shapes so a one-reader setup stays a plain
/// string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Recipients {
    /// Flatten to an ordered list of addresses.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Recipients::One(addr) => vec![addr.clone()],
            Recipients::Many(addrs) => addrs.clone(),
        }
    }
}

fn default_smtp_host() -> String {
    DEFAULT_SMTP_HOST.to_string()
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

/// Load and deserialize the config file at `path`.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn load_config(path: &str) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path).await.map_err(|e| ConfigError::Io {
        path: path.to_string(),
        source: e,
    })?;

    let config: Config = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
        path: path.to_string(),
        source: e,
    })?;

    info!(
        url = %config.url,
        tag_class = %config.tag_class,
        recipients = config.email_receiver.to_vec().len(),
        "Loaded configuration"
    );
    debug!(links_filename = %config.links_filename, smtp_host = %config.smtp_host, "Config detail");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config_json() -> &'static str {
        r#"{
            "url": "https://news.example/latest",
            "tag_class": "teaser",
            "links_filename": "links.txt",
            "email_sender": "News Digest <digest@example.com>",
            "email_login": "AKIAEXAMPLE",
            "email_password": "secret",
            "email_receiver": "reader@example.com",
            "email_subject": "New articles"
        }"#
    }

    #[test]
    fn test_parse_full_config_with_defaults() {
        let config: Config = serde_json::from_str(full_config_json()).unwrap();
        assert_eq!(config.url, "https://news.example/latest");
        assert_eq!(config.tag_class, "teaser");
        assert_eq!(config.smtp_host, DEFAULT_SMTP_HOST);
        assert_eq!(config.smtp_port, DEFAULT_SMTP_PORT);
        assert!(!config.escape_html);
    }

    #[test]
    fn test_single_recipient_string() {
        let config: Config = serde_json::from_str(full_config_json()).unwrap();
        assert_eq!(
            config.email_receiver.to_vec(),
            vec!["reader@example.com".to_string()]
        );
    }

    #[test]
    fn test_recipient_list() {
        let json = full_config_json().replace(
            r#""reader@example.com""#,
            r#"["a@example.com", "b@example.com"]"#,
        );
        let config: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(
            config.email_receiver.to_vec(),
            vec!["a@example.com".to_string(), "b@example.com".to_string()]
        );
    }

    #[test]
    fn test_missing_required_key_fails() {
        let json = full_config_json().replace(r#""url": "https://news.example/latest","#, "");
        let result: Result<Config, _> = serde_json::from_str(&json);
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_relay_overrides() {
        let json = full_config_json().replace(
            r#""email_subject": "New articles""#,
            r#""email_subject": "New articles",
               "smtp_host": "smtp.example.org",
               "smtp_port": 587,
               "escape_html": true"#,
        );
        let config: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config.smtp_host, "smtp.example.org");
        assert_eq!(config.smtp_port, 587);
        assert!(config.escape_html);
    }

    #[tokio::test]
    async fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/config.json").await;
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[tokio::test]
    async fn test_load_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, full_config_json()).unwrap();

        let config = load_config(path.to_str().unwrap()).await.unwrap();
        assert_eq!(config.email_subject, "New articles");
    }
}
