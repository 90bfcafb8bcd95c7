//! Bearer credential -> principal resolution.
//!
//! Order (short-circuits at the first unmet condition):
//! 1. no token                  -> NotFound
//! 2. token == admin token      -> Success (admin, no lookups)
//! 3. credential lookup         -> NotFound / attach
//! 4. credential inactive       -> Inactive
//! 5. tenant lookup             -> NotFound / attach
//! 6. tenant inactive           -> Inactive
//! 7. user lookup (tenant,user) -> NotFound / attach
//! 8. user inactive             -> Inactive
//! 9.                           -> Success

use std::sync::Arc;

use tracing::{info, warn};

use crate::repos::IdentityRepo;
use crate::repos::error::RepoResult;
use crate::services::auth::context::{AuthenticationOutcome, RequestContext};

#[derive(Clone)]
pub struct Authenticator {
    repo: Arc<dyn IdentityRepo>,
    admin_bearer_token: String,
}

impl Authenticator {
    pub fn new(repo: Arc<dyn IdentityRepo>, admin_bearer_token: impl Into<String>) -> Self {
        Self {
            repo,
            admin_bearer_token: admin_bearer_token.into(),
        }
    }

    /// Resolve `ctx.authentication` in place.
    ///
    /// Expected failures (unknown token, disabled tenant, ...) are reported
    /// through the outcome. `Err` only means the backend could not answer, in
    /// which case the outcome is left `Unevaluated` and the context must be
    /// discarded.
    pub async fn authenticate(&self, ctx: &mut RequestContext) -> RepoResult<()> {
        let outcome = self.resolve(ctx).await?;
        ctx.authentication.outcome = outcome;
        Ok(())
    }

    async fn resolve(&self, ctx: &mut RequestContext) -> RepoResult<AuthenticationOutcome> {
        let source = ctx.source;
        let request_id = ctx.request_id.as_deref();
        let state = &mut ctx.authentication;

        let token = match state.bearer_token.as_deref() {
            Some(token) if !token.is_empty() => token.to_owned(),
            _ => {
                warn!(?source, ?request_id, "no bearer token supplied");
                return Ok(AuthenticationOutcome::NotFound);
            }
        };

        if token == self.admin_bearer_token {
            info!(?source, ?request_id, "admin bearer token presented");
            state.is_admin = true;
            return Ok(AuthenticationOutcome::Success);
        }

        let Some(credential) = self.repo.read_credential_by_bearer_token(&token).await? else {
            warn!(
                ?source,
                ?request_id,
                backend = self.repo.backend_name(),
                "credential not found for bearer token"
            );
            return Ok(AuthenticationOutcome::NotFound);
        };
        let credential_id = credential.guid;
        let tenant_guid = credential.tenant_guid;
        let user_guid = credential.user_guid;
        let credential_active = credential.active;
        state.attach_credential(credential);

        if !credential_active {
            warn!(%credential_id, ?source, ?request_id, "credential is inactive");
            return Ok(AuthenticationOutcome::Inactive);
        }

        let Some(tenant) = self.repo.read_tenant(tenant_guid).await? else {
            warn!(
                %credential_id,
                tenant_id = %tenant_guid,
                ?source,
                ?request_id,
                "tenant referenced by credential not found"
            );
            return Ok(AuthenticationOutcome::NotFound);
        };
        let tenant_active = tenant.active;
        state.attach_tenant(tenant);

        if !tenant_active {
            warn!(
                %credential_id,
                tenant_id = %tenant_guid,
                ?source,
                ?request_id,
                "tenant is inactive"
            );
            return Ok(AuthenticationOutcome::Inactive);
        }

        let Some(user) = self.repo.read_user(tenant_guid, user_guid).await? else {
            warn!(
                %credential_id,
                tenant_id = %tenant_guid,
                user_id = %user_guid,
                ?source,
                ?request_id,
                "user referenced by credential not found"
            );
            return Ok(AuthenticationOutcome::NotFound);
        };
        let user_active = user.active;
        state.attach_user(user);

        if !user_active {
            warn!(
                %credential_id,
                tenant_id = %tenant_guid,
                user_id = %user_guid,
                ?source,
                ?request_id,
                "user is inactive"
            );
            return Ok(AuthenticationOutcome::Inactive);
        }

        info!(
            %credential_id,
            tenant_id = %tenant_guid,
            user_id = %user_guid,
            ?source,
            ?request_id,
            "bearer token authenticated"
        );
        Ok(AuthenticationOutcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::memory_identity_repo::LookupCounts;
    use crate::test_support::*;

    async fn authenticate(token: Option<&str>) -> (RequestContext, LookupCounts) {
        let repo = seeded_repo();
        let authenticator = Authenticator::new(repo.clone(), ADMIN_TOKEN);

        let mut ctx = RequestContext::new(token.map(str::to_string), Some(T1));
        authenticator.authenticate(&mut ctx).await.unwrap();
        (ctx, repo.lookups())
    }

    #[tokio::test]
    async fn missing_token_is_not_found_without_lookups() {
        let (ctx, lookups) = authenticate(None).await;

        assert_eq!(ctx.authentication.outcome, AuthenticationOutcome::NotFound);
        assert!(!ctx.authentication.is_admin);
        assert_eq!(lookups.total(), 0);
    }

    #[tokio::test]
    async fn empty_token_is_treated_as_missing() {
        let (ctx, lookups) = authenticate(Some("")).await;

        assert_eq!(ctx.authentication.outcome, AuthenticationOutcome::NotFound);
        assert_eq!(lookups.total(), 0);
    }

    #[tokio::test]
    async fn admin_token_short_circuits() {
        let (ctx, lookups) = authenticate(Some(ADMIN_TOKEN)).await;
        let state = &ctx.authentication;

        assert_eq!(state.outcome, AuthenticationOutcome::Success);
        assert!(state.is_admin);
        assert_eq!(lookups.total(), 0);
        assert!(state.credential_id.is_none() && state.credential.is_none());
        assert!(state.tenant_id.is_none() && state.tenant.is_none());
        assert!(state.user_id.is_none() && state.user.is_none());
    }

    #[tokio::test]
    async fn admin_match_is_exact() {
        let (ctx, lookups) = authenticate(Some("admin-token ")).await;

        assert_eq!(ctx.authentication.outcome, AuthenticationOutcome::NotFound);
        assert!(!ctx.authentication.is_admin);
        assert_eq!(lookups.credential, 1);
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let (ctx, lookups) = authenticate(Some("nope")).await;
        let state = &ctx.authentication;

        assert_eq!(state.outcome, AuthenticationOutcome::NotFound);
        assert!(state.credential_id.is_none());
        assert_eq!(
            lookups,
            LookupCounts {
                credential: 1,
                tenant: 0,
                user: 0
            }
        );
    }

    #[tokio::test]
    async fn inactive_credential_stops_before_tenant_lookup() {
        let (ctx, lookups) = authenticate(Some(TOKEN_INACTIVE_CREDENTIAL)).await;
        let state = &ctx.authentication;

        assert_eq!(state.outcome, AuthenticationOutcome::Inactive);
        assert_eq!(state.credential_id, Some(C_INACTIVE));
        assert!(state.tenant_id.is_none());
        assert_eq!(lookups.tenant + lookups.user, 0);
    }

    #[tokio::test]
    async fn missing_tenant_keeps_credential_attached() {
        let (ctx, lookups) = authenticate(Some(TOKEN_MISSING_TENANT)).await;
        let state = &ctx.authentication;

        assert_eq!(state.outcome, AuthenticationOutcome::NotFound);
        assert_eq!(state.credential_id, Some(C_MISSING_TENANT));
        assert!(state.credential.is_some());
        assert!(state.tenant_id.is_none() && state.tenant.is_none());
        assert_eq!(lookups.user, 0);
    }

    #[tokio::test]
    async fn inactive_tenant_populates_tenant_but_not_user() {
        let (ctx, lookups) = authenticate(Some(TOKEN_INACTIVE_TENANT)).await;
        let state = &ctx.authentication;

        assert_eq!(state.outcome, AuthenticationOutcome::Inactive);
        assert_eq!(state.credential_id, Some(C_INACTIVE_TENANT));
        assert_eq!(state.tenant_id, Some(T_INACTIVE));
        assert!(state.user_id.is_none() && state.user.is_none());
        assert_eq!(lookups.user, 0);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let (ctx, _) = authenticate(Some(TOKEN_MISSING_USER)).await;
        let state = &ctx.authentication;

        assert_eq!(state.outcome, AuthenticationOutcome::NotFound);
        assert_eq!(state.tenant_id, Some(T1));
        assert!(state.user_id.is_none());
    }

    #[tokio::test]
    async fn inactive_user_populates_user() {
        let (ctx, _) = authenticate(Some(TOKEN_INACTIVE_USER)).await;
        let state = &ctx.authentication;

        assert_eq!(state.outcome, AuthenticationOutcome::Inactive);
        assert_eq!(state.tenant_id, Some(T1));
        assert_eq!(state.user_id, Some(U_INACTIVE));
        assert!(state.user.is_some());
    }

    #[tokio::test]
    async fn active_chain_succeeds_with_consistent_ids() {
        let (ctx, lookups) = authenticate(Some(TOKEN_ACTIVE)).await;
        let state = &ctx.authentication;

        assert_eq!(state.outcome, AuthenticationOutcome::Success);
        assert!(!state.is_admin);
        assert_eq!(state.credential_id, Some(C1));
        assert_eq!(state.tenant_id, Some(T1));
        assert_eq!(state.user_id, Some(U1));
        assert_eq!(state.credential.as_ref().map(|c| c.guid), state.credential_id);
        assert_eq!(state.tenant.as_ref().map(|t| t.guid), state.tenant_id);
        assert_eq!(state.user.as_ref().map(|u| u.guid), state.user_id);
        assert_eq!(
            lookups,
            LookupCounts {
                credential: 1,
                tenant: 1,
                user: 1
            }
        );
    }
}
