//! Service configuration from environment variables (and `.env` when present).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/student_management";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub database_url: String,
    pub storage: StorageKind,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
}

impl ServiceConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let storage = match lookup("STORAGE") {
            None => StorageKind::Postgres,
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "postgres" | "postgresql" => StorageKind::Postgres,
                "memory" => StorageKind::Memory,
                _ => return Err(ConfigError::Invalid { var: "STORAGE", value: v }),
            },
        };

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| ConfigError::Invalid { var: "BIND_ADDR", value: bind_raw.clone() })?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(v) => match v.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::Invalid { var: "DB_MAX_CONNECTIONS", value: v }),
            },
        };

        Ok(ServiceConfig {
            database_url,
            storage,
            bind_addr,
            max_connections,
        })
    }
}
