//! HTTP client for the submission endpoint

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use nest_core::{handlers::routes::SEND_MESSAGE_PATH, ContactForm, ContactResponse};
use reqwest::Url;
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://nomadic-nest.onrender.com";

/// Delivers a serialized form to the relay and returns its verdict.
///
/// Any decodable JSON body counts as a verdict, whatever the HTTP status:
/// a `500` carrying `{success:false}` is the server saying no, not a
/// transport failure.
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    async fn send_message(&self, form: &ContactForm) -> Result<ContactResponse>;
}

#[async_trait]
impl<T: SubmissionApi + ?Sized> SubmissionApi for Arc<T> {
    async fn send_message(&self, form: &ContactForm) -> Result<ContactResponse> {
        (**self).send_message(form).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpSubmissionApi {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSubmissionApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), SEND_MESSAGE_PATH);
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", endpoint, e)))?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionApi for HttpSubmissionApi {
    async fn send_message(&self, form: &ContactForm) -> Result<ContactResponse> {
        debug!(endpoint = %self.endpoint, "POST contact form");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        let value: Value = serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            status: status.as_u16(),
            source,
        })?;

        Ok(verdict(&value))
    }
}

/// Reads the relay's verdict out of any JSON body. Anything short of an
/// explicit `success: true` is a refusal, whatever else the body holds.
fn verdict(value: &Value) -> ContactResponse {
    let success = value
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let error = value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string);

    ContactResponse { success, error }
}
