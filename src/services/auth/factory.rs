/// Factory: build the identity backend and `AuthChain` from application `Config`.
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::config::{Config, IdentityBackend};
use crate::error::AppError;
use crate::repos::{IdentityRepo, MemoryIdentityRepo, PgIdentityRepo};
use crate::services::auth::AuthChain;

pub async fn build_identity_repo(config: &Config) -> Result<Arc<dyn IdentityRepo>, AppError> {
    let repo: Arc<dyn IdentityRepo> = match &config.identity {
        IdentityBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(database_url)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "failed to connect to identity database");
                    AppError::Internal
                })?;
            Arc::new(PgIdentityRepo::new(pool))
        }
        IdentityBackend::Memory { seed_path } => {
            let repo = MemoryIdentityRepo::from_seed_file(seed_path).map_err(|e| {
                tracing::error!(error = %e, "failed to load identity seed");
                AppError::Internal
            })?;
            tracing::warn!(seed = %seed_path.display(), "using in-memory identity backend");
            Arc::new(repo)
        }
    };

    Ok(repo)
}

pub fn build_auth_chain(config: &Config, repo: Arc<dyn IdentityRepo>) -> Arc<AuthChain> {
    Arc::new(AuthChain::new(repo, &config.auth))
}
