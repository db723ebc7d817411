//! The two emails produced for every accepted submission

use super::MailError;
use crate::{config::MailConfig, models::Submission};
use chrono::{DateTime, Utc};
use lettre::{
    message::{header::ContentType, Mailbox},
    Address, Message,
};

pub const CONFIRMATION_SUBJECT: &str = "Thanks for contacting Nomadic Nest!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from_name: String,
    pub from_address: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl OutboundEmail {
    pub fn to_message(&self) -> Result<Message, MailError> {
        let from_address: Address = self.from_address.parse()?;
        let from = Mailbox::new(Some(self.from_name.clone()), from_address);
        let to: Mailbox = self.to.parse()?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(self.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(self.html_body.clone())?;

        Ok(message)
    }
}

/// Notification for the site owner listing everything the visitor sent.
pub fn admin_notification(
    submission: &Submission,
    mail: &MailConfig,
    received_at: DateTime<Utc>,
) -> OutboundEmail {
    let phone_line = submission
        .phone
        .as_deref()
        .map(|phone| format!("<p><strong>Phone:</strong> {}</p>\n", escape_html(phone)))
        .unwrap_or_default();

    let html_body = format!(
        "<h2>Nomadic Nest Contact Form</h2>\n\
         <p><strong>Name:</strong> {name}</p>\n\
         <p><strong>Email:</strong> {email}</p>\n\
         {phone_line}\
         <p><strong>Booking Type:</strong> {booking_type}</p>\n\
         <p><strong>Message:</strong></p>\n\
         <p>{message}</p>\n\
         <hr>\n\
         <small>This message was sent from your website contact form on {received}.</small>\n",
        name = escape_html(&submission.name),
        email = escape_html(&submission.email),
        phone_line = phone_line,
        booking_type = escape_html(&submission.booking_type),
        message = escape_html(&submission.message),
        received = received_at.format("%Y-%m-%d %H:%M UTC"),
    );

    OutboundEmail {
        from_name: mail.admin_sender_name.clone(),
        from_address: mail.sender_address().to_string(),
        to: mail.admin_address.clone(),
        subject: format!(
            "New Message from {} — {}",
            submission.name, submission.booking_type
        ),
        html_body,
    }
}

/// Thank-you note sent back to the visitor's own address.
pub fn confirmation(submission: &Submission, mail: &MailConfig) -> OutboundEmail {
    let html_body = format!(
        "<h3>Thank you, {name}!</h3>\n\
         <p>We received your message about <strong>{booking_type}</strong> and we will contact you soon.</p>\n\
         <p>Warm regards,<br>{team} Team</p>\n",
        name = escape_html(&submission.name),
        booking_type = escape_html(&submission.booking_type),
        team = escape_html(&mail.confirmation_sender_name),
    );

    OutboundEmail {
        from_name: mail.confirmation_sender_name.clone(),
        from_address: mail.sender_address().to_string(),
        to: submission.email.clone(),
        subject: CONFIRMATION_SUBJECT.to_string(),
        html_body,
    }
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
