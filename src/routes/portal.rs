use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::candidate_dto::{
        CandidateAuthPayload, PrivacyActionPayload, ProfileQuery, ProfileUpdatePayload,
    },
    dto::messaging_dto::ReplyPayload,
    error::{Error, Result},
    models::candidate::Candidate,
    AppState,
};

/// Internal recruiter notes never leave the admin surface.
fn portal_view(mut candidate: Candidate) -> Candidate {
    candidate.notes = None;
    candidate
}

#[utoipa::path(
    post,
    path = "/api/candidate/auth",
    request_body = CandidateAuthPayload,
    responses(
        (status = 200, description = "Candidate id for the portal session"),
        (status = 404, description = "No candidate with this email")
    )
)]
#[axum::debug_handler]
pub async fn candidate_auth(
    State(state): State<AppState>,
    Json(payload): Json<CandidateAuthPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let id = state
        .store
        .authenticate_candidate(&payload.email, payload.code.as_deref())
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
    Ok(Json(json!({ "id": id })))
}

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<impl IntoResponse> {
    let candidate = state
        .store
        .get_candidate(&query.id)
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
    Ok(Json(portal_view(candidate)))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
    Json(payload): Json<ProfileUpdatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state
        .store
        .update_profile(&query.id, payload)
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
    Ok(Json(portal_view(candidate)))
}

#[utoipa::path(
    post,
    path = "/api/candidate/{id}/reply",
    params(("id" = String, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Reply recorded and scored"),
        (status = 404, description = "Unknown candidate")
    )
)]
#[axum::debug_handler]
pub async fn reply(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ReplyPayload>,
) -> Result<impl IntoResponse> {
    let analysis = state
        .store
        .record_reply(&id, &payload.content)
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
    Ok(Json(json!({ "ok": true, "sentiment": analysis })))
}

#[utoipa::path(
    post,
    path = "/api/candidate/privacy",
    request_body = PrivacyActionPayload,
    responses(
        (status = 200, description = "Privacy action applied"),
        (status = 400, description = "Unknown action"),
        (status = 404, description = "Unknown candidate")
    )
)]
#[axum::debug_handler]
pub async fn privacy_action(
    State(state): State<AppState>,
    Json(payload): Json<PrivacyActionPayload>,
) -> Result<impl IntoResponse> {
    if payload.candidate_id.is_empty() {
        return Err(Error::BadRequest("Candidate ID is required".to_string()));
    }
    let not_found = || Error::NotFound("Candidate not found".to_string());
    if state.store.get_candidate(&payload.candidate_id).is_none() {
        return Err(not_found());
    }

    match payload.action.as_str() {
        "download_data" => {
            let data = state
                .store
                .export_candidate_data(&payload.candidate_id)
                .ok_or_else(not_found)?;
            Ok(Json(json!({
                "message": "Data export prepared",
                "data": data,
                "export_date": crate::utils::time::to_rfc3339(crate::utils::time::now()),
            })))
        }
        "update_consent" => {
            let (gdpr, retention) = state
                .store
                .update_consent(
                    &payload.candidate_id,
                    payload.gdpr_consent,
                    payload.data_retention_consent,
                )
                .ok_or_else(not_found)?;
            Ok(Json(json!({
                "message": "Consent preferences updated",
                "gdpr_consent": gdpr,
                "data_retention_consent": retention,
            })))
        }
        "request_deletion" => {
            if !state.store.soft_delete_candidate(&payload.candidate_id) {
                return Err(not_found());
            }
            Ok(Json(json!({
                "message": "Data deletion request processed. Your data has been marked for deletion and will be permanently removed within 30 days."
            })))
        }
        _ => Err(Error::BadRequest("Invalid action".to_string())),
    }
}
