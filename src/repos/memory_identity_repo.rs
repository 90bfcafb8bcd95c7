//! In-memory identity backend.
//!
//! Used for local development (seeded from a JSON file) and by tests. The maps
//! are immutable after construction, so concurrent reads need no locking.
//! Lookup counters are exposed to tests to observe which lookups a request caused.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::identity::{Credential, IdentityRepo, Tenant, User};

/// Seed document: `{ "tenants": [...], "users": [...], "credentials": [...] }`
#[derive(Debug, Default, Deserialize)]
pub struct IdentitySeed {
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub credentials: Vec<Credential>,
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupCounts {
    pub credential: usize,
    pub tenant: usize,
    pub user: usize,
}

#[cfg(test)]
impl LookupCounts {
    pub fn total(&self) -> usize {
        self.credential + self.tenant + self.user
    }
}

#[derive(Debug, Default)]
pub struct MemoryIdentityRepo {
    credentials: HashMap<String, Credential>,
    tenants: HashMap<Uuid, Tenant>,
    users: HashMap<(Uuid, Uuid), User>,
    credential_lookups: AtomicUsize,
    tenant_lookups: AtomicUsize,
    user_lookups: AtomicUsize,
}

impl MemoryIdentityRepo {
    pub fn new(seed: IdentitySeed) -> RepoResult<Self> {
        let mut credentials: HashMap<String, Credential> =
            HashMap::with_capacity(seed.credentials.len());
        for credential in seed.credentials {
            if credential.bearer_token.is_empty() {
                return Err(RepoError::Seed(format!(
                    "credential {} has an empty bearer token",
                    credential.guid
                )));
            }
            if let Some(existing) = credentials.get(&credential.bearer_token) {
                return Err(RepoError::Seed(format!(
                    "credentials {} and {} share a bearer token",
                    existing.guid, credential.guid
                )));
            }
            credentials.insert(credential.bearer_token.clone(), credential);
        }

        let tenants = seed.tenants.into_iter().map(|t| (t.guid, t)).collect();
        let users = seed
            .users
            .into_iter()
            .map(|u| ((u.tenant_guid, u.guid), u))
            .collect();

        Ok(Self {
            credentials,
            tenants,
            users,
            ..Self::default()
        })
    }

    pub fn from_json(json: &str) -> RepoResult<Self> {
        let seed: IdentitySeed =
            serde_json::from_str(json).map_err(|e| RepoError::Seed(e.to_string()))?;
        Self::new(seed)
    }

    pub fn from_seed_file(path: &Path) -> RepoResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| RepoError::Seed(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    #[cfg(test)]
    pub fn lookups(&self) -> LookupCounts {
        LookupCounts {
            credential: self.credential_lookups.load(Ordering::Relaxed),
            tenant: self.tenant_lookups.load(Ordering::Relaxed),
            user: self.user_lookups.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl IdentityRepo for MemoryIdentityRepo {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn read_credential_by_bearer_token(
        &self,
        bearer_token: &str,
    ) -> RepoResult<Option<Credential>> {
        self.credential_lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.credentials.get(bearer_token).cloned())
    }

    async fn read_tenant(&self, tenant_guid: Uuid) -> RepoResult<Option<Tenant>> {
        self.tenant_lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.tenants.get(&tenant_guid).cloned())
    }

    async fn read_user(&self, tenant_guid: Uuid, user_guid: Uuid) -> RepoResult<Option<User>> {
        self.user_lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.users.get(&(tenant_guid, user_guid)).cloned())
    }
}
