/*
 * Responsibility
 * - GET /health (疎通用、認証なし)
 * - どの identity backend で起動しているかを返す
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "identity_backend": state.identity.backend_name(),
        })),
    )
}
