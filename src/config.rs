use serde::Deserialize;
use thiserror::Error;

/// Startup configuration failures. Any of these aborts the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 15;

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: required("JWT_SECRET")?,
            ttl_minutes: parsed("JWT_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?,
        };
        if jwt.ttl_minutes <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_TTL_MINUTES",
                reason: "must be positive".into(),
            });
        }

        Ok(Self {
            database_url,
            db_max_connections: parsed("DB_MAX_CONNECTIONS", 10)?,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parsed("APP_PORT", 8080)?,
            jwt,
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn parsed<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(v) => v.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
