/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - 「見つからない」はエラーではなく Ok(None) で返す (認証チェーンの outcome になる)
 */
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("seed error: {0}")]
    Seed(String),
}
