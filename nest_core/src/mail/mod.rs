//! Email composition and delivery

pub mod compose;
pub mod transport;

pub use compose::{admin_notification, confirmation, escape_html, OutboundEmail};
pub use transport::{build_transport, LogTransport, MailTransport, MemoryTransport, SmtpMailer};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build email: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Transport(String),
}
