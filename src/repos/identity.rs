/*
 * Responsibility
 * - 認証チェーンが参照する identity エンティティ (Tenant / User / Credential)
 * - storage backend を差し替えるための IdentityRepo trait
 *
 * Notes
 * - このサービスからは read-only。書き込みは別システムの責務
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub guid: Uuid,
    pub name: String,
    pub active: bool,
    #[serde(default = "Utc::now")]
    pub created_utc: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub guid: Uuid,
    pub tenant_guid: Uuid,
    pub email: String,
    pub active: bool,
    #[serde(default = "Utc::now")]
    pub created_utc: DateTime<Utc>,
}

/// A bearer credential issued to a user of a tenant.
///
/// The token value is accepted from seeds but never serialized back out, so
/// request-context dumps can carry the snapshot safely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Credential {
    pub guid: Uuid,
    pub tenant_guid: Uuid,
    pub user_guid: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing)]
    pub bearer_token: String,
    pub active: bool,
    #[serde(default = "Utc::now")]
    pub created_utc: DateTime<Utc>,
}

/// Lookups consumed by the authenticator.
///
/// Implementations must be safe for concurrent reads; the chain never writes.
/// A missing entity is `Ok(None)`, `Err(_)` is reserved for backend failures.
#[async_trait]
pub trait IdentityRepo: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn read_credential_by_bearer_token(
        &self,
        bearer_token: &str,
    ) -> RepoResult<Option<Credential>>;

    async fn read_tenant(&self, tenant_guid: Uuid) -> RepoResult<Option<Tenant>>;

    // Users are scoped: a user GUID only resolves inside its own tenant.
    async fn read_user(&self, tenant_guid: Uuid, user_guid: Uuid) -> RepoResult<Option<User>>;
}
