use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

use super::AuthCtx;

/// Handler で AuthCtx を受け取るための extractor
///
/// access middleware が許可済みのリクエストにだけ AuthCtx を insert する。
/// 見つからない場合は route に middleware が掛かっていないので 401 (fail closed)
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthCtx>() {
            Some(ctx) => Ok(AuthCtxExtractor(ctx.clone())),
            None => {
                tracing::error!(uri = %parts.uri, "AuthCtx missing; access middleware not applied");
                Err(AppError::Unauthorized)
            }
        }
    }
}
