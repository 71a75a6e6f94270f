//! Central module for application-wide configuration settings.
//!
//! This module loads the process configuration (signing secret, store location,
//! listen address) from the environment once at startup. The resulting `Config`
//! is immutable and shared through the application state.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://restosys.db";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set")]
    MissingSecret,

    #[error("JWT_SECRET must not be empty")]
    EmptySecret,

    #[error("unsupported DATABASE_URL '{0}' (expected sqlite://<path> or memory://)")]
    UnsupportedDatabaseUrl(String),

    #[error("invalid {name} value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Where account documents live.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Memory,
    Sqlite(PathBuf),
}

impl StoreBackend {
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        if url == "memory://" {
            return Ok(Self::Memory);
        }
        match url.strip_prefix("sqlite://") {
            Some(path) if !path.is_empty() => Ok(Self::Sqlite(PathBuf::from(path))),
            _ => Err(ConfigError::UnsupportedDatabaseUrl(url.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub store: StoreBackend,
    pub jwt_secret: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("store", &self.store)
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Config with defaults and the given secret. Used by tests and as the base
    /// for `from_env`.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            store: StoreBackend::Memory,
            jwt_secret: jwt_secret.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").ok_or(ConfigError::MissingSecret)?;
        if secret.trim().is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let mut config = Self::new(secret).with_store(StoreBackend::parse(&database_url)?);

        if let Some(host) = lookup("HOST") {
            config.host = host.parse().map_err(|_| ConfigError::Invalid {
                name: "HOST",
                value: host.clone(),
            })?;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        Ok(config)
    }

    pub fn with_store(mut self, store: StoreBackend) -> Self {
        self.store = store;
        self
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
