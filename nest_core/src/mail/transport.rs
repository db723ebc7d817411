//! Outbound mail delivery over SMTP, or in memory for dry runs and tests

use super::{MailError, OutboundEmail};
use crate::config::MailConfig;
use async_trait::async_trait;
use lettre::{
    transport::smtp::authentication::Credentials, AsyncSmtpTransport, AsyncTransport,
    Tokio1Executor,
};
use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info};

const IMPLICIT_TLS_PORT: u16 = 465;

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

#[derive(Clone)]
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let timeout = Some(Duration::from_secs(config.timeout_seconds));

        let mailer = if config.has_credentials() {
            info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                from = %config.sender_address(),
                "SMTP transport initialized with authentication and TLS"
            );
            let credentials = Credentials::new(config.username.clone(), config.password.clone());
            let relay = if config.smtp_port == IMPLICIT_TLS_PORT {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            };
            let builder = relay.map_err(|e| MailError::Transport(e.to_string()))?;

            builder
                .port(config.smtp_port)
                .credentials(credentials)
                .timeout(timeout)
                .build()
        } else {
            info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection"
            );
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .timeout(timeout)
                .build()
        };

        Ok(Self { mailer })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = email.to_message()?;

        let response = self
            .mailer
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        debug!(to = %email.to, code = %response.code(), "SMTP server accepted message");
        Ok(())
    }
}

/// Dry-run delivery: builds each message so address errors surface as they
/// would over SMTP, logs it, and keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

#[async_trait]
impl MailTransport for LogTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = email.to_message()?;

        info!(
            to = %email.to,
            subject = %email.subject,
            bytes = message.formatted().len(),
            "Dry run: message built, not sent"
        );
        Ok(())
    }
}

/// Records every message in memory instead of sending it, for tests.
///
/// Messages are still built with lettre first, so address errors surface
/// exactly as they would over SMTP. `failing_at` makes the n-th attempt
/// (zero based) fail, which is how callers exercise partial delivery.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    inner: Arc<Mutex<MemoryOutbox>>,
}

#[derive(Default)]
struct MemoryOutbox {
    attempts: Vec<OutboundEmail>,
    delivered: Vec<OutboundEmail>,
    fail_at: Option<usize>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(attempt: usize) -> Self {
        let transport = Self::default();
        transport.inner.lock().fail_at = Some(attempt);
        transport
    }

    /// Every message handed to `send`, delivered or not, in order.
    pub fn attempts(&self) -> Vec<OutboundEmail> {
        self.inner.lock().attempts.clone()
    }

    pub fn delivered(&self) -> Vec<OutboundEmail> {
        self.inner.lock().delivered.clone()
    }
}

#[async_trait]
impl MailTransport for MemoryTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let mut outbox = self.inner.lock();
        let attempt = outbox.attempts.len();
        outbox.attempts.push(email.clone());

        if outbox.fail_at == Some(attempt) {
            return Err(MailError::Transport(format!(
                "simulated delivery failure on attempt {}",
                attempt
            )));
        }

        email.to_message()?;

        debug!(to = %email.to, subject = %email.subject, "Message recorded in memory");
        outbox.delivered.push(email.clone());
        Ok(())
    }
}

pub fn build_transport(config: &MailConfig) -> Result<Arc<dyn MailTransport>, MailError> {
    if config.dry_run {
        info!("Mail dry run enabled, messages will only be logged");
        return Ok(Arc::new(LogTransport));
    }

    Ok(Arc::new(SmtpMailer::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> OutboundEmail {
        OutboundEmail {
            from_name: "Nomadic Nest".to_string(),
            from_address: "nomadicnestkodai@gmail.com".to_string(),
            to: to.to_string(),
            subject: "Hello".to_string(),
            html_body: "<p>Hello</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_memory_transport_records_in_order() {
        let transport = MemoryTransport::new();
        transport.send(&email("first@x.com")).await.unwrap();
        transport.send(&email("second@x.com")).await.unwrap();

        let delivered: Vec<String> = transport.delivered().into_iter().map(|e| e.to).collect();
        assert_eq!(delivered, vec!["first@x.com", "second@x.com"]);
        assert_eq!(transport.attempts().len(), 2);
    }

    #[tokio::test]
    async fn test_memory_transport_fails_on_requested_attempt() {
        let transport = MemoryTransport::failing_at(1);
        assert!(transport.send(&email("first@x.com")).await.is_ok());
        assert!(matches!(
            transport.send(&email("second@x.com")).await,
            Err(MailError::Transport(_))
        ));
        assert_eq!(transport.attempts().len(), 2);
        assert_eq!(transport.delivered().len(), 1);
    }

    #[tokio::test]
    async fn test_memory_transport_validates_addresses() {
        let transport = MemoryTransport::new();
        assert!(matches!(
            transport.send(&email("not an email")).await,
            Err(MailError::Address(_))
        ));
        assert!(transport.delivered().is_empty());
    }

    #[tokio::test]
    async fn test_log_transport_checks_addresses() {
        assert!(LogTransport.send(&email("first@x.com")).await.is_ok());
        assert!(matches!(
            LogTransport.send(&email("not an email")).await,
            Err(MailError::Address(_))
        ));
    }

    #[tokio::test]
    async fn test_build_transport_without_credentials() {
        let config = MailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            ..MailConfig::default()
        };
        assert!(SmtpMailer::new(&config).is_ok());

        let dry = MailConfig {
            dry_run: true,
            ..MailConfig::default()
        };
        assert!(build_transport(&dry).is_ok());
    }
}
