//! Form fields keyed by name, each bound to one pure rule

use super::rules::{
    validate_booking_type, validate_email, validate_message, validate_name, validate_phone,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use validator::ValidationError;

pub type FieldRule = fn(&str) -> Result<(), ValidationError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Type,
    Message,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Type,
        Field::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Type => "type",
            Field::Message => "message",
        }
    }

    pub fn rule(&self) -> FieldRule {
        match self {
            Field::Name => validate_name,
            Field::Email => validate_email,
            Field::Phone => validate_phone,
            Field::Type => validate_booking_type,
            Field::Message => validate_message,
        }
    }

    pub fn check(&self, value: &str) -> Result<(), ValidationError> {
        (self.rule())(value)
    }

    pub fn is_valid(&self, value: &str) -> bool {
        self.check(value).is_ok()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "email" => Ok(Field::Email),
            "phone" => Ok(Field::Phone),
            // validator reports the struct field name
            "type" | "booking_type" => Ok(Field::Type),
            "message" => Ok(Field::Message),
            other => Err(format!("Unknown form field: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_names() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
        assert_eq!("booking_type".parse::<Field>().unwrap(), Field::Type);
        assert!("address".parse::<Field>().is_err());
    }

    #[test]
    fn test_rules_are_bound_per_field() {
        assert!(!Field::Name.is_valid("Jo"));
        assert!(Field::Name.is_valid("Joe"));
        assert!(Field::Email.is_valid("a@b.co"));
        assert!(Field::Phone.is_valid(""));
        assert!(!Field::Type.is_valid(" "));
        assert!(!Field::Message.is_valid("hi!"));
    }
}
