/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth: bearer 認証 + tenant scope 認可, http: request-id / trace / limit / timeout
 */
pub mod auth;
pub mod http;
