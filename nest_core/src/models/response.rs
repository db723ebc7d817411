//! Response body shared by the endpoint and its clients

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContactResponse {
    pub fn success() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_body_has_no_error_key() {
        let body = serde_json::to_value(ContactResponse::success()).unwrap();
        assert_eq!(body, json!({ "success": true }));
    }

    #[test]
    fn test_failure_body() {
        let body = serde_json::to_value(ContactResponse::failure("Missing required fields")).unwrap();
        assert_eq!(body, json!({ "success": false, "error": "Missing required fields" }));
    }

    #[test]
    fn test_decodes_without_error_key() {
        let parsed: ContactResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error, None);
    }
}
