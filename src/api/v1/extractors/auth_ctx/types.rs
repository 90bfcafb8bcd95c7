/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が RequestContext を評価し、許可された場合のみ extensions に格納する
 *
 * Notes
 * - 認証/認可の判定ロジックは services::auth の責務
 * - ここは「型（契約）」として固定化する
 */

use uuid::Uuid;

use crate::services::auth::RequestContext;

/// 認証済み主体
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// admin bearer token。tenant scope の制約を受けない
    Admin,
    User {
        credential_id: Uuid,
        tenant_id: Uuid,
        user_id: Uuid,
    },
}

/// 認証・認可を通過したリクエストに付与されるコンテキスト
///
/// - `tenant_scope` はリクエストが対象とする tenant (path の `{tenant_id}`)
/// - `request_id` は監査/相関用
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub principal: Principal,
    pub tenant_scope: Option<Uuid>,
    pub request_id: Option<String>,
}

impl AuthCtx {
    /// 評価済みの RequestContext から組み立てる。通過していなければ None
    pub fn from_request_context(ctx: &RequestContext) -> Option<Self> {
        if !ctx.is_allowed() {
            return None;
        }

        let state = &ctx.authentication;
        let principal = if state.is_admin {
            Principal::Admin
        } else {
            Principal::User {
                credential_id: state.credential_id?,
                tenant_id: state.tenant_id?,
                user_id: state.user_id?,
            }
        };

        Some(Self {
            principal,
            tenant_scope: ctx.requested_tenant_id,
            request_id: ctx.request_id.clone(),
        })
    }
}
