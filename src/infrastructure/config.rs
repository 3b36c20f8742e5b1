use std::env;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_JWT_SECRET: &str = "your-strong-secret-key-here";
pub const DEFAULT_JWT_EXPIRE_HOURS: i64 = 24;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expire_hours: i64,
    /// Enables development-only routes such as `/sitemap`.
    pub debug: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let jwt_expire_hours = match lookup("JWT_EXPIRE_HOURS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: "JWT_EXPIRE_HOURS",
                value: raw,
            })?,
            None => DEFAULT_JWT_EXPIRE_HOURS,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            jwt_secret: lookup("JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
            jwt_expire_hours,
            debug: lookup("APP_DEBUG").as_deref() == Some("1"),
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}
