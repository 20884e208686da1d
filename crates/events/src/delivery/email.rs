//! Email notification delivery via SMTP.
//!
//! [`EmailDelivery`] sends the plain-text confirmation and alert emails over
//! a `lettre` STARTTLS transport. Without `SMTP_HOST` the server uses
//! [`LogNotifier`] instead.
//!
//! [`LogNotifier`]: crate::notifier::LogNotifier

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::notifier::{Notification, Notifier};

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// A sender or recipient address did not parse.
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

const DEFAULT_SMTP_PORT: u16 = 587;

/// Sender used when `SMTP_FROM` is unset. Also the last fallback for the
/// admin alert recipient.
pub const DEFAULT_FROM_ADDRESS: &str = "noreply@storefront.local";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    /// Display name shown next to `from_address`.
    pub from_name: Option<String>,
    /// Used only when both user and password are present.
    pub credentials: Option<(String, String)>,
}

impl EmailConfig {
    /// Read SMTP settings. `None` when `SMTP_HOST` is unset or blank, which
    /// turns email delivery off.
    ///
    /// | Variable         | Default                    |
    /// |------------------|----------------------------|
    /// | `SMTP_HOST`      | unset (delivery off)       |
    /// | `SMTP_PORT`      | `587`                      |
    /// | `SMTP_FROM`      | `noreply@storefront.local` |
    /// | `SMTP_FROM_NAME` | none                       |
    /// | `SMTP_USER`      | none                       |
    /// | `SMTP_PASSWORD`  | none                       |
    ///
    /// A `SMTP_PORT` that is not a port number is an error.
    pub fn from_env() -> Result<Option<Self>, EmailError> {
        let Some(smtp_host) = non_blank_env("SMTP_HOST") else {
            return Ok(None);
        };
        let credentials = match (non_blank_env("SMTP_USER"), non_blank_env("SMTP_PASSWORD")) {
            (Some(user), Some(password)) => Some((user, password)),
            _ => None,
        };
        Ok(Some(Self {
            smtp_host,
            smtp_port: parse_port(non_blank_env("SMTP_PORT"))?,
            from_address: non_blank_env("SMTP_FROM")
                .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            from_name: non_blank_env("SMTP_FROM_NAME"),
            credentials,
        }))
    }
}

fn parse_port(raw: Option<String>) -> Result<u16, EmailError> {
    match raw {
        None => Ok(DEFAULT_SMTP_PORT),
        Some(raw) => raw.parse().map_err(|_| {
            EmailError::Build(format!("SMTP_PORT must be a port number, got '{raw}'"))
        }),
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// SMTP-backed [`Notifier`]. The transport is built once and reused.
pub struct EmailDelivery {
    sender: Mailbox,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailDelivery {
    /// Validate the sender address and build the STARTTLS transport.
    /// No connection is opened until the first send.
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let sender = Mailbox::new(config.from_name, config.from_address.parse()?);

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);
        if let Some((user, password)) = config.credentials {
            builder = builder.credentials(Credentials::new(user, password));
        }

        Ok(Self {
            sender,
            mailer: builder.build(),
        })
    }

    fn build_message(&self, notification: &Notification) -> Result<Message, EmailError> {
        Message::builder()
            .from(self.sender.clone())
            .to(Mailbox::new(None, notification.to.parse()?))
            .subject(notification.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(|e| EmailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Notifier for EmailDelivery {
    async fn send(&self, notification: &Notification) -> Result<(), EmailError> {
        let email = self.build_message(notification)?;
        self.mailer.send(email).await?;
        tracing::info!(to = %notification.to, subject = %notification.subject, "Notification email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
