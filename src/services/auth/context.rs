/*
 * Responsibility
 * - 1 リクエスト分の認証/認可の作業領域 (RequestContext)
 * - Authenticator / Authorizer がこれを &mut で順に書き換える
 *
 * Notes
 * - リクエストごとに新規作成し、使い回さない (スレッド間で共有しない)
 * - outcome は enum。Unevaluated はチェーン完了後に観測されてはならない
 */
use std::net::SocketAddr;

use serde::Serialize;
use uuid::Uuid;

use crate::repos::{Credential, Tenant, User};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationOutcome {
    #[default]
    Unevaluated,
    Success,
    NotFound,
    Inactive,
}

impl AuthenticationOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Unevaluated)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationOutcome {
    #[default]
    Unevaluated,
    Permitted,
    Denied,
}

impl AuthorizationOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Unevaluated)
    }
}

/// Populated only by the authenticator.
///
/// Entity snapshots are attached as they are fetched and stay attached when a
/// later step fails, so an audit can see how far resolution got.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthenticationState {
    #[serde(skip_serializing)]
    pub bearer_token: Option<String>,
    pub is_admin: bool,
    pub outcome: AuthenticationOutcome,
    pub credential_id: Option<Uuid>,
    pub tenant_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub credential: Option<Credential>,
    pub tenant: Option<Tenant>,
    pub user: Option<User>,
}

impl AuthenticationState {
    pub fn new(bearer_token: Option<String>) -> Self {
        Self {
            bearer_token,
            ..Self::default()
        }
    }

    // The attach_* helpers keep `*_id == entity.guid`.
    pub(crate) fn attach_credential(&mut self, credential: Credential) {
        self.credential_id = Some(credential.guid);
        self.credential = Some(credential);
    }

    pub(crate) fn attach_tenant(&mut self, tenant: Tenant) {
        self.tenant_id = Some(tenant.guid);
        self.tenant = Some(tenant);
    }

    pub(crate) fn attach_user(&mut self, user: User) {
        self.user_id = Some(user.guid);
        self.user = Some(user);
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthorizationState {
    pub outcome: AuthorizationOutcome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestContext {
    pub requested_tenant_id: Option<Uuid>,
    // diagnostics only
    pub source: Option<SocketAddr>,
    pub request_id: Option<String>,
    pub authentication: AuthenticationState,
    pub authorization: AuthorizationState,
}

impl RequestContext {
    pub fn new(bearer_token: Option<String>, requested_tenant_id: Option<Uuid>) -> Self {
        Self {
            requested_tenant_id,
            authentication: AuthenticationState::new(bearer_token),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: Option<SocketAddr>) -> Self {
        self.source = source;
        self
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn outcomes(&self) -> (AuthenticationOutcome, AuthorizationOutcome) {
        (self.authentication.outcome, self.authorization.outcome)
    }

    pub fn is_fully_evaluated(&self) -> bool {
        self.authentication.outcome.is_terminal() && self.authorization.outcome.is_terminal()
    }

    /// Downstream gate: both stages must have succeeded.
    pub fn is_allowed(&self) -> bool {
        self.outcomes()
            == (
                AuthenticationOutcome::Success,
                AuthorizationOutcome::Permitted,
            )
    }
}
