//! Shared fixtures for unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::memory_identity_repo::{IdentitySeed, MemoryIdentityRepo};
use crate::repos::{Credential, IdentityRepo, Tenant, User};

pub const ADMIN_TOKEN: &str = "admin-token";

// Happy path: token "abc" -> credential c1 -> tenant t1 / user u1, all active.
pub const TOKEN_ACTIVE: &str = "abc";
pub const TOKEN_INACTIVE_CREDENTIAL: &str = "inactive-credential";
pub const TOKEN_INACTIVE_TENANT: &str = "inactive-tenant";
pub const TOKEN_MISSING_TENANT: &str = "missing-tenant";
pub const TOKEN_INACTIVE_USER: &str = "inactive-user";
pub const TOKEN_MISSING_USER: &str = "missing-user";

pub const C1: Uuid = Uuid::from_u128(0xc1);
pub const T1: Uuid = Uuid::from_u128(0x71);
pub const T2: Uuid = Uuid::from_u128(0x72);
pub const U1: Uuid = Uuid::from_u128(0x01);
pub const U2: Uuid = Uuid::from_u128(0x02);

pub const C_INACTIVE: Uuid = Uuid::from_u128(0xc2);
pub const C_INACTIVE_TENANT: Uuid = Uuid::from_u128(0xc3);
pub const C_MISSING_TENANT: Uuid = Uuid::from_u128(0xc4);
pub const C_INACTIVE_USER: Uuid = Uuid::from_u128(0xc5);
pub const C_MISSING_USER: Uuid = Uuid::from_u128(0xc6);

pub const T_INACTIVE: Uuid = Uuid::from_u128(0x7a);
pub const T_MISSING: Uuid = Uuid::from_u128(0x7f);
pub const U_INACTIVE: Uuid = Uuid::from_u128(0x0a);
pub const U_IN_INACTIVE_TENANT: Uuid = Uuid::from_u128(0x0b);
pub const U_MISSING: Uuid = Uuid::from_u128(0x0f);

fn tenant(guid: Uuid, active: bool) -> Tenant {
    Tenant {
        guid,
        name: format!("tenant-{guid}"),
        active,
        created_utc: Utc::now(),
    }
}

fn user(guid: Uuid, tenant_guid: Uuid, active: bool) -> User {
    User {
        guid,
        tenant_guid,
        email: format!("{guid}@example.test"),
        active,
        created_utc: Utc::now(),
    }
}

fn credential(
    guid: Uuid,
    token: &str,
    tenant_guid: Uuid,
    user_guid: Uuid,
    active: bool,
) -> Credential {
    Credential {
        guid,
        tenant_guid,
        user_guid,
        name: format!("credential-{guid}"),
        bearer_token: token.to_string(),
        active,
        created_utc: Utc::now(),
    }
}

pub fn seeded_repo() -> Arc<MemoryIdentityRepo> {
    let seed = IdentitySeed {
        tenants: vec![tenant(T1, true), tenant(T2, true), tenant(T_INACTIVE, false)],
        users: vec![
            user(U1, T1, true),
            user(U2, T1, true),
            user(U_INACTIVE, T1, false),
            user(U_IN_INACTIVE_TENANT, T_INACTIVE, true),
        ],
        credentials: vec![
            credential(C1, TOKEN_ACTIVE, T1, U1, true),
            credential(C_INACTIVE, TOKEN_INACTIVE_CREDENTIAL, T1, U1, false),
            credential(
                C_INACTIVE_TENANT,
                TOKEN_INACTIVE_TENANT,
                T_INACTIVE,
                U_IN_INACTIVE_TENANT,
                true,
            ),
            credential(C_MISSING_TENANT, TOKEN_MISSING_TENANT, T_MISSING, U1, true),
            credential(C_INACTIVE_USER, TOKEN_INACTIVE_USER, T1, U_INACTIVE, true),
            credential(C_MISSING_USER, TOKEN_MISSING_USER, T1, U_MISSING, true),
        ],
    };

    Arc::new(MemoryIdentityRepo::new(seed).expect("fixture seed is valid"))
}

/// Backend that cannot answer: every lookup fails.
#[derive(Debug, Default)]
pub struct UnavailableIdentityRepo;

#[async_trait]
impl IdentityRepo for UnavailableIdentityRepo {
    fn backend_name(&self) -> &'static str {
        "unavailable"
    }

    async fn read_credential_by_bearer_token(&self, _: &str) -> RepoResult<Option<Credential>> {
        Err(RepoError::Seed("identity backend unavailable".into()))
    }

    async fn read_tenant(&self, _: Uuid) -> RepoResult<Option<Tenant>> {
        Err(RepoError::Seed("identity backend unavailable".into()))
    }

    async fn read_user(&self, _: Uuid, _: Uuid) -> RepoResult<Option<User>> {
        Err(RepoError::Seed("identity backend unavailable".into()))
    }
}
