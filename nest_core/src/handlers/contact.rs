//! Contact form relay handlers

use crate::{
    error::Result,
    extractors::LenientJson,
    models::{ContactResponse, Submission, SubmissionPayload},
    AppState,
};
use axum::{extract::State, response::IntoResponse, Json};
use tracing::{info, instrument};
use uuid::Uuid;

pub const LIVENESS_MESSAGE: &str = "Nomadic Nest backend is live and running!";

pub async fn handle_root() -> &'static str {
    LIVENESS_MESSAGE
}

#[instrument(skip_all, fields(submission_id = %Uuid::new_v4()))]
pub async fn handle_send_message(
    State(state): State<AppState>,
    LenientJson(payload): LenientJson<SubmissionPayload>,
) -> Result<impl IntoResponse> {
    let submission = Submission::try_from(payload)?;

    info!(
        name = %submission.name,
        booking_type = %submission.booking_type,
        has_phone = submission.phone.is_some(),
        "POST /send-message - relaying submission"
    );

    state.contact_service.relay(&submission).await?;

    Ok(Json(ContactResponse::success()))
}
