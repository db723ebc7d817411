//! Field rules for the contact form

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

pub const NAME_MIN_LENGTH: usize = 3;
pub const MESSAGE_MIN_LENGTH: usize = 5;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[^\s@]+@[^\s@]+\.[^\s@]+$"
    ).unwrap();

    static ref PHONE_REGEX: Regex = Regex::new(
        r"^[0-9+\-\s]{6,20}$"
    ).unwrap();
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < NAME_MIN_LENGTH {
        return Err(rule_error(
            "name_too_short",
            "Name must be at least 3 characters long",
        ));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(rule_error("invalid_email", "Invalid email format"));
    }

    Ok(())
}

/// Phone is optional: blank input passes, anything else must be 6 to 20
/// digits, `+`, `-` or spaces.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Ok(());
    }

    if !PHONE_REGEX.is_match(phone) {
        return Err(rule_error(
            "invalid_phone",
            "Phone must be 6-20 digits, spaces, '+' or '-'",
        ));
    }

    Ok(())
}

pub fn validate_booking_type(booking_type: &str) -> Result<(), ValidationError> {
    if booking_type.trim().is_empty() {
        return Err(rule_error("type_required", "Please choose a booking type"));
    }

    Ok(())
}

pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().chars().count() < MESSAGE_MIN_LENGTH {
        return Err(rule_error(
            "message_too_short",
            "Message must be at least 5 characters long",
        ));
    }

    Ok(())
}
