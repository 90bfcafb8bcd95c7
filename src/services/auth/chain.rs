//! Orchestration: authenticate, then authorize.
//!
//! Authorization is evaluated even when authentication failed so both
//! outcomes are always terminal when `evaluate` returns `Ok`.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::AuthConfig;
use crate::repos::IdentityRepo;
use crate::repos::error::RepoResult;
use crate::services::auth::authenticator::Authenticator;
use crate::services::auth::authorizer::Authorizer;
use crate::services::auth::context::RequestContext;

#[derive(Clone)]
pub struct AuthChain {
    authenticator: Authenticator,
    authorizer: Authorizer,
    debug_request_context: bool,
}

impl AuthChain {
    pub fn new(repo: Arc<dyn IdentityRepo>, config: &AuthConfig) -> Self {
        Self {
            authenticator: Authenticator::new(repo, config.admin_bearer_token.clone()),
            authorizer: Authorizer::new(),
            debug_request_context: config.debug_request_context,
        }
    }

    pub async fn evaluate(&self, ctx: &mut RequestContext) -> RepoResult<()> {
        self.dump("before", ctx);

        self.authenticator.authenticate(ctx).await?;
        self.authorizer.authorize(ctx);

        self.dump("after", ctx);

        debug_assert!(
            ctx.is_fully_evaluated(),
            "auth chain left a non-terminal outcome: {:?}",
            ctx.outcomes()
        );
        Ok(())
    }

    fn dump(&self, stage: &'static str, ctx: &RequestContext) {
        if !self.debug_request_context {
            return;
        }

        match serde_json::to_string(ctx) {
            Ok(json) => debug!(stage, context = %json, "request context"),
            Err(err) => warn!(stage, error = %err, "request context serialization failed"),
        }
    }
}
