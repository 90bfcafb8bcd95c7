//! bearer token + tenant scope 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <token>` と path の `{tenant_id}` から RequestContext を作る
//! - AuthChain (authenticate → authorize) を必ず両方評価する
//! - 通過条件は `Success` かつ `Permitted`。それ以外は 401 / 403

use std::net::SocketAddr;

use axum::{
    Router,
    body::Body,
    extract::{ConnectInfo, RawPathParams, State},
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};
use uuid::Uuid;

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::middleware::http::REQUEST_ID_HEADER;
use crate::services::auth::{AuthenticationOutcome, AuthorizationOutcome, RequestContext};
use crate::state::AppState;

const TENANT_PATH_PARAM: &str = "tenant_id";

/// tenant scoped な route に認証/認可を掛ける。
///
/// path params を読むため `layer` ではなく `route_layer` で適用する。
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    params: RawPathParams,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let mut ctx = build_request_context(req.headers(), &params).with_source(
        req.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr),
    );

    // lookup の失敗 (backend 障害) は 500。NotFound 扱いにはしない
    state.auth.evaluate(&mut ctx).await?;

    if ctx.authentication.outcome != AuthenticationOutcome::Success {
        return Err(AppError::Unauthorized);
    }
    if ctx.authorization.outcome != AuthorizationOutcome::Permitted {
        return Err(AppError::Forbidden);
    }

    let auth_ctx = AuthCtx::from_request_context(&ctx).ok_or(AppError::Unauthorized)?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}

fn build_request_context(headers: &HeaderMap, params: &RawPathParams) -> RequestContext {
    let bearer_token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    // 不正な tenant_id は未指定と同じ扱い → 認可で Denied になる
    let requested_tenant_id = params
        .iter()
        .find(|(key, _)| *key == TENANT_PATH_PARAM)
        .and_then(|(_, value)| Uuid::parse_str(value).ok());

    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    RequestContext::new(bearer_token, requested_tenant_id).with_request_id(request_id)
}
