/*
 * Responsibility
 * - GET /tenants/{tenant_id}/whoami の response DTO
 */
use serde::Serialize;
use uuid::Uuid;

use crate::api::v1::extractors::{AuthCtx, Principal};

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    Admin,
    User,
}

#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub kind: PrincipalKind,
    pub tenant_scope: Option<Uuid>,
    pub credential_id: Option<Uuid>,
    pub tenant_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub request_id: Option<String>,
}

impl From<&AuthCtx> for WhoamiResponse {
    fn from(auth: &AuthCtx) -> Self {
        match auth.principal {
            Principal::Admin => Self {
                kind: PrincipalKind::Admin,
                tenant_scope: auth.tenant_scope,
                credential_id: None,
                tenant_id: None,
                user_id: None,
                request_id: auth.request_id.clone(),
            },
            Principal::User {
                credential_id,
                tenant_id,
                user_id,
            } => Self {
                kind: PrincipalKind::User,
                tenant_scope: auth.tenant_scope,
                credential_id: Some(credential_id),
                tenant_id: Some(tenant_id),
                user_id: Some(user_id),
                request_id: auth.request_id.clone(),
            },
        }
    }
}
