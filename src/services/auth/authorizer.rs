//! Tenant-scope authorization.
//!
//! Runs after the authenticator regardless of its outcome. A non-admin
//! principal may only act inside the tenant its credential belongs to; an
//! unresolved tenant never matches, so failed authentication yields `Denied`.

use tracing::{info, warn};

use crate::services::auth::context::{AuthorizationOutcome, RequestContext};

#[derive(Debug, Clone, Copy, Default)]
pub struct Authorizer;

impl Authorizer {
    pub fn new() -> Self {
        Self
    }

    pub fn authorize(&self, ctx: &mut RequestContext) {
        let outcome = decide(ctx);

        match outcome {
            AuthorizationOutcome::Permitted => info!(
                requested_tenant_id = ?ctx.requested_tenant_id,
                is_admin = ctx.authentication.is_admin,
                request_id = ?ctx.request_id,
                "tenant scope permitted"
            ),
            _ => warn!(
                requested_tenant_id = ?ctx.requested_tenant_id,
                tenant_id = ?ctx.authentication.tenant_id,
                source = ?ctx.source,
                request_id = ?ctx.request_id,
                "tenant scope denied"
            ),
        }

        ctx.authorization.outcome = outcome;
    }
}

fn decide(ctx: &RequestContext) -> AuthorizationOutcome {
    if ctx.authentication.is_admin {
        return AuthorizationOutcome::Permitted;
    }

    match (ctx.requested_tenant_id, ctx.authentication.tenant_id) {
        (Some(requested), Some(resolved)) if requested == resolved => {
            AuthorizationOutcome::Permitted
        }
        _ => AuthorizationOutcome::Denied,
    }
}
