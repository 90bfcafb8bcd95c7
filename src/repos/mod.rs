/*
 * Responsibility
 * - identity storage の公開インターフェース (re-export)
 */
pub mod error;
pub mod identity;
pub mod memory_identity_repo;
pub mod pg_identity_repo;

pub use identity::{Credential, IdentityRepo, Tenant, User};
pub use memory_identity_repo::MemoryIdentityRepo;
pub use pg_identity_repo::PgIdentityRepo;
