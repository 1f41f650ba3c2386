use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::messaging_dto::{ScheduleInterviewPayload, SendMessagesPayload},
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/schedule",
    request_body = ScheduleInterviewPayload,
    responses(
        (status = 200, description = "Interview scheduled, stage heuristic applied"),
        (status = 400, description = "Missing required fields"),
        (status = 404, description = "Unknown candidate")
    )
)]
#[axum::debug_handler]
pub async fn schedule_interview(
    State(state): State<AppState>,
    Json(payload): Json<ScheduleInterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let event = state
        .store
        .schedule_interview(payload)
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
    Ok(Json(json!({ "event": event })))
}

#[utoipa::path(
    post,
    path = "/api/send",
    request_body = SendMessagesPayload,
    responses(
        (status = 200, description = "One message generated per channel"),
        (status = 400, description = "Missing candidateId or empty channels"),
        (status = 404, description = "Unknown candidate")
    )
)]
#[axum::debug_handler]
pub async fn send_messages(
    State(state): State<AppState>,
    Json(payload): Json<SendMessagesPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let messages = state
        .store
        .send_messages(payload)
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
    // Prototype: external providers are assumed to have succeeded.
    Ok(Json(json!({ "messages": messages })))
}
