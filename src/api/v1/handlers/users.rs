/*
 * Responsibility
 * - GET /tenants/{tenant_id}/users/{user_id}
 * - tenant scope の検証は middleware 済み。ここでは同じ tenant の user を読むだけ
 */
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{api::v1::dto::users::UserResponse, error::AppError, state::AppState};

pub async fn get_user(
    State(state): State<AppState>,
    Path((tenant_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .identity
        .read_user(tenant_id, user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(UserResponse::from(user)))
}
