use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::Validate;

use crate::{dto::template_dto::UpsertTemplatePayload, error::Result, AppState};

#[utoipa::path(
    get,
    path = "/api/templates",
    responses((status = 200, description = "Templates sorted by name"))
)]
#[axum::debug_handler]
pub async fn list_templates(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(json!({ "templates": state.store.list_templates() })))
}

#[utoipa::path(
    post,
    path = "/api/templates",
    request_body = UpsertTemplatePayload,
    responses(
        (status = 200, description = "Template created or replaced"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn upsert_template(
    State(state): State<AppState>,
    Json(payload): Json<UpsertTemplatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let template = state.store.upsert_template(payload);
    Ok(Json(json!({ "template": template })))
}
