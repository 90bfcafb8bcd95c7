pub mod authenticator;
pub mod authorizer;
pub mod chain;
pub mod context;
pub mod factory;

pub use chain::AuthChain;
pub use context::{AuthenticationOutcome, AuthorizationOutcome, RequestContext};
pub use factory::{build_auth_chain, build_identity_repo};
