/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /tenants/{tenant_id}/... は全て access middleware (認証 → 認可) を通す
 */
use axum::{Router, routing::get};

use crate::middleware::auth::access;
use crate::state::AppState;

use crate::api::v1::handlers::{users::get_user, whoami::whoami};

pub fn routes(state: AppState) -> Router<AppState> {
    let tenant_scoped = Router::new()
        .route("/tenants/{tenant_id}/whoami", get(whoami))
        .route("/tenants/{tenant_id}/users/{user_id}", get(get_user));

    access::apply(tenant_scoped, state)
}
