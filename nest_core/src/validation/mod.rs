//! Contact form validation: per-field rules and aggregated results

pub mod fields;
pub mod form;
pub mod rules;

pub use fields::{Field, FieldRule};
pub use form::ContactForm;
pub use rules::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: HashMap<String, Vec<String>>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: HashMap::new(),
        }
    }

    pub fn from_validation_errors(errors: ValidationErrors) -> Self {
        let mut result = Self::success();

        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                match &error.message {
                    Some(message) => result.add_error(field.as_ref(), message),
                    None => result.add_error(
                        field.as_ref(),
                        &format!("Validation failed for field '{}'", field),
                    ),
                }
            }
        }

        result
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    /// Failing form fields in display order.
    pub fn invalid_fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = self
            .errors
            .keys()
            .filter_map(|key| key.parse().ok())
            .collect();
        fields.sort();
        fields.dedup();
        fields
    }
}

pub trait Validatable {
    fn validate_comprehensive(&self) -> ValidationResult;
}

impl<T> Validatable for T
where
    T: Validate,
{
    fn validate_comprehensive(&self) -> ValidationResult {
        match self.validate() {
            Ok(_) => ValidationResult::success(),
            Err(errors) => ValidationResult::from_validation_errors(errors),
        }
    }
}
