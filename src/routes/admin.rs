use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::auth_dto::AdminLoginPayload,
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = AdminLoginPayload,
    responses(
        (status = 200, description = "Opaque session token"),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let token = state
        .store
        .admin_login(&payload.email, &payload.password)
        .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;
    Ok(Json(json!({ "token": token, "email": payload.email })))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses((status = 200, description = "Most recent 200 audit entries, newest first"))
)]
#[axum::debug_handler]
pub async fn get_logs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(json!({ "logs": state.store.get_audits() })))
}
