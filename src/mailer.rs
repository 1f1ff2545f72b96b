//! Digest delivery over authenticated SMTP.
//!
//! One run opens one implicit-TLS relay session and sends the digest to each
//! recipient in turn, pausing briefly between sends to stay under relay rate
//! limits. The relay handshake is verified before the first recipient is
//! attempted, so bad credentials fail the whole batch up front. After the
//! first per-recipient failure the remaining recipients are not attempted.

use std::time::Duration;

use lettre::message::{Mailbox, MultiPart, SinglePart, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tokio::time::sleep;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::digest::Digest;
use crate::error::NotifyError;

/// Fixed pause between successive sends.
const SEND_DELAY: Duration = Duration::from_secs(2);

/// Relay connection plus sender identity for one run.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    host: String,
}

impl Mailer {
    /// Build the relay transport and sender mailbox from the run config.
    ///
    /// Nothing connects yet; the handshake happens on the first
    /// [`send_digest`](Self::send_digest) call.
    pub fn from_config(config: &Config) -> Result<Self, NotifyError> {
        let from: Mailbox = config
            .email_sender
            .parse()
            .map_err(|e| NotifyError::BadSender {
                address: config.email_sender.clone(),
                source: e,
            })?;

        let creds = Credentials::new(config.email_login.clone(), config.email_password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| NotifyError::Relay {
                host: config.smtp_host.clone(),
                source: e,
            })?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from,
            host: config.smtp_host.clone(),
        })
    }

    /// Send the digest to every recipient, one message each.
    ///
    /// # Returns
    ///
    /// The number of messages delivered. On failure the returned
    /// [`NotifyError`] distinguishes a rejected login (nothing sent) from a
    /// mid-batch delivery failure (`Send` carries the count that went out
    /// before the batch stopped).
    #[instrument(level = "info", skip_all, fields(recipients = recipients.len()))]
    pub async fn send_digest(
        &self,
        recipients: &[String],
        subject: &str,
        digest: &Digest,
    ) -> Result<usize, NotifyError> {
        if recipients.is_empty() {
            warn!("No recipients configured; nothing to send");
            return Ok(0);
        }

        // Fail the whole batch before the first message if the relay or the
        // credentials are bad.
        match self.transport.test_connection().await {
            Ok(true) => {}
            Ok(false) => {
                return Err(NotifyError::Refused {
                    host: self.host.clone(),
                });
            }
            Err(e) if e.is_permanent() => return Err(NotifyError::Auth(e)),
            Err(e) => return Err(NotifyError::Connect(e)),
        }

        let mut sent = 0usize;
        for (i, recipient) in recipients.iter().enumerate() {
            if i > 0 {
                sleep(SEND_DELAY).await;
            }

            let message = self.build_message(recipient, subject, digest)?;
            self.transport
                .send(message)
                .await
                .map_err(|e| NotifyError::Send {
                    recipient: recipient.clone(),
                    sent,
                    source: e,
                })?;

            sent += 1;
            info!(%recipient, "Digest sent");
        }

        Ok(sent)
    }

    /// Assemble one multipart (plain + HTML) message for `recipient`.
    fn build_message(
        &self,
        recipient: &str,
        subject: &str,
        digest: &Digest,
    ) -> Result<Message, NotifyError> {
        let to: Mailbox = recipient.parse().map_err(|e| NotifyError::BadRecipient {
            address: recipient.to_string(),
            source: e,
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(digest.text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(digest.html.clone()),
                    ),
            )
            .map_err(|e| NotifyError::Build {
                recipient: recipient.to_string(),
                source: e,
            })
    }
}
