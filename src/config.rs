/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, ADMIN_BEARER_TOKEN など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - 認証チェーンへ渡す AuthConfig はここで確定し、以降は immutable
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Process-wide settings consumed by the auth chain.
#[derive(Clone)]
pub struct AuthConfig {
    pub admin_bearer_token: String,
    // Log the serialized RequestContext before/after evaluation.
    pub debug_request_context: bool,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_bearer_token", &"<redacted>")
            .field("debug_request_context", &self.debug_request_context)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory {
        seed_path: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub identity: IdentityBackend,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Split out from `from_env` so parsing can be exercised without touching
    // the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = lookup("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        let identity = match lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(database_url) => {
                let max_connections = match lookup("DB_MAX_CONNECTIONS") {
                    Some(v) => v
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or(ConfigError::Invalid("DB_MAX_CONNECTIONS"))?,
                    None => 5,
                };
                IdentityBackend::Postgres {
                    database_url,
                    max_connections,
                }
            }
            // The in-memory backend is a development convenience only.
            None if app_env.is_production() => return Err(ConfigError::Missing("DATABASE_URL")),
            None => {
                let seed_path = lookup("IDENTITY_SEED_PATH")
                    .filter(|v| !v.trim().is_empty())
                    .ok_or(ConfigError::Missing("IDENTITY_SEED_PATH"))?;
                IdentityBackend::Memory {
                    seed_path: PathBuf::from(seed_path),
                }
            }
        };

        let admin_bearer_token = lookup("ADMIN_BEARER_TOKEN")
            .ok_or(ConfigError::Missing("ADMIN_BEARER_TOKEN"))?;
        if admin_bearer_token.is_empty() {
            return Err(ConfigError::Invalid("ADMIN_BEARER_TOKEN"));
        }

        let debug_request_context = match lookup("DEBUG_REQUEST_CONTEXT") {
            Some(v) => parse_flag(&v).ok_or(ConfigError::Invalid("DEBUG_REQUEST_CONTEXT"))?,
            None => false,
        };

        Ok(Self {
            addr,
            app_env,
            identity,
            auth: AuthConfig {
                admin_bearer_token,
                debug_request_context,
            },
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn postgres_backend_with_defaults() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/identity"),
            ("ADMIN_BEARER_TOKEN", "root"),
        ])
        .unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(
            config.identity,
            IdentityBackend::Postgres {
                database_url: "postgres://localhost/identity".into(),
                max_connections: 5,
            }
        );
        assert_eq!(config.auth.admin_bearer_token, "root");
        assert!(!config.auth.debug_request_context);
    }

    #[test]
    fn memory_backend_requires_seed_path() {
        let err = load(&[("ADMIN_BEARER_TOKEN", "root")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("IDENTITY_SEED_PATH")));

        let config = load(&[
            ("ADMIN_BEARER_TOKEN", "root"),
            ("IDENTITY_SEED_PATH", "seed/identity.json"),
            ("DEBUG_REQUEST_CONTEXT", "on"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(
            config.identity,
            IdentityBackend::Memory {
                seed_path: PathBuf::from("seed/identity.json"),
            }
        );
        assert!(config.auth.debug_request_context);
        assert_eq!(config.addr.port(), 8080);
    }

    #[test]
    fn production_requires_database() {
        let err = load(&[
            ("APP_ENV", "prod"),
            ("ADMIN_BEARER_TOKEN", "root"),
            ("IDENTITY_SEED_PATH", "seed/identity.json"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn admin_token_is_required_and_non_empty() {
        let err = load(&[("DATABASE_URL", "postgres://localhost/identity")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("ADMIN_BEARER_TOKEN")));

        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/identity"),
            ("ADMIN_BEARER_TOKEN", ""),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("ADMIN_BEARER_TOKEN")));
    }

    #[test]
    fn rejects_malformed_values() {
        let base = [
            ("DATABASE_URL", "postgres://localhost/identity"),
            ("ADMIN_BEARER_TOKEN", "root"),
        ];

        let err = load(&[base[0], base[1], ("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("PORT")));

        let err = load(&[base[0], base[1], ("DEBUG_REQUEST_CONTEXT", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("DEBUG_REQUEST_CONTEXT")));

        let err = load(&[base[0], base[1], ("DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("DB_MAX_CONNECTIONS")));
    }

    #[test]
    fn debug_output_redacts_admin_token() {
        let auth = AuthConfig {
            admin_bearer_token: "root-secret".into(),
            debug_request_context: true,
        };
        let rendered = format!("{auth:?}");
        assert!(!rendered.contains("root-secret"));
    }
}
