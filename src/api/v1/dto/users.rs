/*
 * Responsibility
 * - Users の response DTO (read-only)
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::repos::User;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub email: String,
    pub active: bool,
    pub created_utc: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.guid,
            tenant_id: u.tenant_guid,
            email: u.email,
            active: u.active,
            created_utc: u.created_utc,
        }
    }
}
