//! Application error types and handling

use crate::{models::ContactResponse, services::RelayError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
pub const SEND_FAILED_MESSAGE: &str = "Failed to send email";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const ORIGIN_REJECTED_MESSAGE: &str = "Origin not allowed";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Origin not allowed: {0}")]
    OriginNotAllowed(String),

    #[error("Email delivery failed: {0}")]
    Delivery(#[from] RelayError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_)
            | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::OriginNotAllowed(_) => StatusCode::FORBIDDEN,
            AppError::Delivery(_) | AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match self {
            AppError::MissingFields(fields) => {
                tracing::debug!(?fields, "Rejected submission with missing fields");
                MISSING_FIELDS_MESSAGE.to_string()
            }
            AppError::InvalidBody(msg) => {
                tracing::debug!("Rejected undecodable body: {}", msg);
                INVALID_BODY_MESSAGE.to_string()
            }
            AppError::OriginNotAllowed(origin) => {
                tracing::warn!(origin = %origin, "Rejected cross-origin request");
                ORIGIN_REJECTED_MESSAGE.to_string()
            }
            AppError::Delivery(err) => {
                tracing::error!(stage = err.stage(), "Email send error: {}", err);
                SEND_FAILED_MESSAGE.to_string()
            }
            AppError::Other(err) => {
                tracing::error!("Unexpected error: {:?}", err);
                "Internal server error".to_string()
            }
        };

        (status, Json(ContactResponse::failure(error_message))).into_response()
    }
}
