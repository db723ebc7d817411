//! Contact form values as typed by the user

use super::{fields::Field, rules::*, ValidationResult, Validatable};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Flat key/value snapshot of the form. Serializes to exactly the five keys
/// the endpoint reads, with `phone` left as an empty string when unused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(custom(function = "validate_email"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[serde(rename = "type")]
    #[validate(custom(function = "validate_booking_type"))]
    pub booking_type: String,

    #[validate(custom(function = "validate_message"))]
    pub message: String,
}

impl ContactForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Type => &self.booking_type,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Type => self.booking_type = value,
            Field::Message => self.message = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn check_field(&self, field: Field) -> bool {
        field.is_valid(self.get(field))
    }

    /// Runs every field rule, keeping per-field messages.
    pub fn check_all(&self) -> ValidationResult {
        self.validate_comprehensive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn amy() -> ContactForm {
        ContactForm {
            name: "Amy".to_string(),
            email: "amy@x.com".to_string(),
            phone: String::new(),
            booking_type: "Tour".to_string(),
            message: "Hello there".to_string(),
        }
    }

    #[test]
    fn test_serializes_flat_with_type_key() {
        let body = serde_json::to_value(amy()).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Amy",
                "email": "amy@x.com",
                "phone": "",
                "type": "Tour",
                "message": "Hello there"
            })
        );
    }

    #[test]
    fn test_valid_form_passes_every_rule() {
        let result = amy().check_all();
        assert!(result.is_valid);
        assert!(result.invalid_fields().is_empty());
    }

    #[test]
    fn test_invalid_fields_are_reported_by_name() {
        let mut form = amy();
        form.set(Field::Name, "Jo");
        form.set(Field::Type, "");

        let result = form.check_all();
        assert!(!result.is_valid);
        assert_eq!(result.invalid_fields(), vec![Field::Name, Field::Type]);
        assert!(!form.check_field(Field::Name));
        assert!(form.check_field(Field::Email));
    }

    #[test]
    fn test_set_get_and_clear() {
        let mut form = ContactForm::default();
        form.set(Field::Phone, "+1 234-5678");
        assert_eq!(form.get(Field::Phone), "+1 234-5678");

        form.clear();
        assert_eq!(form, ContactForm::default());
    }
}
