//! User-facing copy for status lines, announcements and the popup

use nest_core::Field;

pub const FIX_FIELDS: &str = "Please fix the highlighted fields";
pub const FORM_HAS_ERRORS: &str = "Form has errors. Please fix the highlighted fields.";

pub const SENDING: &str = "Sending...";
pub const SENDING_ANNOUNCEMENT: &str = "Sending your message";

pub const SENT: &str = "Message sent — thank you!";
pub const SENT_ANNOUNCEMENT: &str = "Message sent successfully. We will contact you soon.";
pub const POPUP_TEXT: &str = "We received your message and will contact you soon.";

pub const REJECTED: &str = "Sorry, could not send message.";
pub const REJECTED_ANNOUNCEMENT: &str = "Unable to send your message. Please try again later.";

pub const SERVER_ERROR: &str = "Server error. Try again later.";
pub const SERVER_ERROR_ANNOUNCEMENT: &str = "Server error. Please try again later.";

pub fn field_feedback(field: Field, valid: bool) -> String {
    if valid {
        format!("{} looks good", field)
    } else {
        format!("{} needs attention", field)
    }
}
