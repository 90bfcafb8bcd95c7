/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: 認証/認可チェーン, identity: tenant scoped な read 用 repo
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::IdentityRepo;
use crate::services::auth::AuthChain;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthChain>,
    pub identity: Arc<dyn IdentityRepo>,
}

impl AppState {
    pub fn new(auth: Arc<AuthChain>, identity: Arc<dyn IdentityRepo>) -> Self {
        Self { auth, identity }
    }
}
