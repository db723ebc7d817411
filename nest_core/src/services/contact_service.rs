use crate::{
    config::MailConfig,
    mail::{self, MailError, MailTransport},
    models::Submission,
};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Which of the two sends failed. The HTTP layer collapses both into one
/// generic failure; the distinction only reaches the logs.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("admin notification not sent: {0}")]
    AdminNotification(#[source] MailError),

    #[error("confirmation not sent after admin notification was delivered: {0}")]
    Confirmation(#[source] MailError),
}

impl RelayError {
    pub fn stage(&self) -> &'static str {
        match self {
            RelayError::AdminNotification(_) => "admin_notification",
            RelayError::Confirmation(_) => "confirmation",
        }
    }

    pub fn admin_notified(&self) -> bool {
        matches!(self, RelayError::Confirmation(_))
    }
}

/// Relays one submission as two emails: the admin notification, then the
/// confirmation to the submitter. The second send is only attempted after
/// the first one succeeded.
#[derive(Clone)]
pub struct ContactService {
    transport: Arc<dyn MailTransport>,
    mail: MailConfig,
}

impl ContactService {
    pub fn new(transport: Arc<dyn MailTransport>, mail: MailConfig) -> Self {
        Self { transport, mail }
    }

    pub async fn relay(&self, submission: &Submission) -> Result<(), RelayError> {
        let admin_email = mail::admin_notification(submission, &self.mail, Utc::now());
        self.transport.send(&admin_email).await.map_err(|e| {
            error!(to = %admin_email.to, "Admin notification failed: {}", e);
            RelayError::AdminNotification(e)
        })?;
        info!(to = %admin_email.to, "Email sent successfully to admin");

        let confirmation = mail::confirmation(submission, &self.mail);
        self.transport.send(&confirmation).await.map_err(|e| {
            error!("Confirmation email failed: {}", e);
            RelayError::Confirmation(e)
        })?;
        info!("Confirmation email sent to submitter");

        Ok(())
    }
}
