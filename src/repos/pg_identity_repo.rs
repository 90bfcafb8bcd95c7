/*
 * Responsibility
 * - tenants / users / credentials テーブル向け SQLx 操作
 * - PgPool を受け取り IdentityRepo の 3 つの lookup を提供
 */
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::repos::identity::{Credential, IdentityRepo, Tenant, User};

#[derive(Clone, Debug)]
pub struct PgIdentityRepo {
    pool: PgPool,
}

impl PgIdentityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityRepo for PgIdentityRepo {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn read_credential_by_bearer_token(
        &self,
        bearer_token: &str,
    ) -> RepoResult<Option<Credential>> {
        let row = sqlx::query_as::<_, Credential>(
            r#"
            SELECT guid, tenant_guid, user_guid, name, bearer_token, active, created_utc
            FROM credentials
            WHERE bearer_token = $1
            "#,
        )
        .bind(bearer_token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn read_tenant(&self, tenant_guid: Uuid) -> RepoResult<Option<Tenant>> {
        let row = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT guid, name, active, created_utc
            FROM tenants
            WHERE guid = $1
            "#,
        )
        .bind(tenant_guid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn read_user(&self, tenant_guid: Uuid, user_guid: Uuid) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT guid, tenant_guid, email, active, created_utc
            FROM users
            WHERE tenant_guid = $1 AND guid = $2
            "#,
        )
        .bind(tenant_guid)
        .bind(user_guid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
