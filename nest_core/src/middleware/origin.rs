//! Server-side enforcement of the origin allow-list

use crate::{config::CorsConfig, error::AppError};
use axum::{
    extract::{Request, State},
    http::{header::ORIGIN, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AllowedOrigins(Arc<Vec<HeaderValue>>);

impl AllowedOrigins {
    pub fn from_config(config: &CorsConfig) -> Self {
        let origins = config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        Self(Arc::new(origins))
    }

    pub fn allows(&self, origin: &HeaderValue) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }
}

/// Rejects requests whose `Origin` header is not on the allow-list before
/// they reach a handler. Requests without an `Origin` header pass through.
pub async fn origin_guard(
    State(allowed): State<AllowedOrigins>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(ORIGIN) {
        if !allowed.allows(origin) {
            let origin = origin.to_str().unwrap_or("<non-ascii origin>").to_string();
            return AppError::OriginNotAllowed(origin).into_response();
        }
    }

    next.run(request).await
}
