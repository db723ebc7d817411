//! Contact form submission as received on the wire and after the presence check

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Raw JSON body of `POST /send-message`. Every field may be missing or
/// `null`; the presence check happens in [`Submission::try_from`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, rename = "type")]
    pub booking_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A submission whose required fields are all present and non-empty.
///
/// Only presence is checked here. Format rules live in
/// [`crate::validation`] and are applied by the form controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub booking_type: String,
    pub message: String,
}

impl TryFrom<SubmissionPayload> for Submission {
    type Error = AppError;

    fn try_from(payload: SubmissionPayload) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();

        let name = required(payload.name, "name", &mut missing);
        let email = required(payload.email, "email", &mut missing);
        let booking_type = required(payload.booking_type, "type", &mut missing);
        let message = required(payload.message, "message", &mut missing);

        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        Ok(Self {
            name,
            email,
            phone: payload.phone.filter(|phone| !phone.is_empty()),
            booking_type,
            message,
        })
    }
}

fn required(value: Option<String>, field: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => {
            missing.push(field);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> SubmissionPayload {
        SubmissionPayload {
            name: Some("Amy".to_string()),
            email: Some("amy@x.com".to_string()),
            phone: None,
            booking_type: Some("Tour".to_string()),
            message: Some("Hello there".to_string()),
        }
    }

    #[test]
    fn test_complete_payload_is_accepted() {
        let submission = Submission::try_from(payload()).unwrap();
        assert_eq!(submission.name, "Amy");
        assert_eq!(submission.booking_type, "Tour");
        assert_eq!(submission.phone, None);
    }

    #[test]
    fn test_each_required_field_is_enforced() {
        let cases: [(&str, fn(&mut SubmissionPayload)); 4] = [
            ("name", |p| p.name = None),
            ("email", |p| p.email = Some(String::new())),
            ("type", |p| p.booking_type = None),
            ("message", |p| p.message = Some(String::new())),
        ];

        for (field, clear) in cases {
            let mut p = payload();
            clear(&mut p);
            match Submission::try_from(p) {
                Err(AppError::MissingFields(fields)) => assert_eq!(fields, vec![field]),
                other => panic!("expected missing {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_all_missing_fields_are_reported() {
        match Submission::try_from(SubmissionPayload::default()) {
            Err(AppError::MissingFields(fields)) => {
                assert_eq!(fields, vec!["name", "email", "type", "message"])
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_presence_check_ignores_format() {
        let mut p = payload();
        p.email = Some("not an email".to_string());
        p.name = Some(" ".to_string());
        assert!(Submission::try_from(p).is_ok());
    }

    #[test]
    fn test_empty_phone_is_treated_as_absent() {
        let mut p = payload();
        p.phone = Some(String::new());
        assert_eq!(Submission::try_from(p).unwrap().phone, None);

        let mut p = payload();
        p.phone = Some("+1 234-5678".to_string());
        assert_eq!(
            Submission::try_from(p).unwrap().phone.as_deref(),
            Some("+1 234-5678")
        );
    }

    #[test]
    fn test_type_key_on_the_wire() {
        let parsed: SubmissionPayload = serde_json::from_str(
            r#"{"name":"Amy","email":"amy@x.com","type":"Tour","message":"Hello there","phone":null}"#,
        )
        .unwrap();
        assert_eq!(parsed.booking_type.as_deref(), Some("Tour"));
        assert_eq!(parsed.phone, None);
    }
}
