/*
 * Responsibility
 * - GET /tenants/{tenant_id}/whoami
 * - middleware が通した主体 (AuthCtx) をそのまま返す
 */
use axum::Json;

use crate::api::v1::dto::principal::WhoamiResponse;
use crate::api::v1::extractors::AuthCtxExtractor;

pub async fn whoami(AuthCtxExtractor(auth): AuthCtxExtractor) -> Json<WhoamiResponse> {
    Json(WhoamiResponse::from(&auth))
}
