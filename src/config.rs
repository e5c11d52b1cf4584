//! Server configuration from environment variables.

use crate::error::ConfigError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// PostgreSQL URL. `None` runs against the in-memory store.
    pub database_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub max_connections: u32,
    pub body_limit: usize,
    /// Directory holding `people.json` / `planets.json` seed files.
    pub seed_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            database_url: None,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            body_limit: DEFAULT_BODY_LIMIT,
            seed_path: None,
        }
    }
}

impl ServerConfig {
    /// Read `DATABASE_URL`, `HOST`, `PORT`, `DATABASE_MAX_CONNECTIONS`,
    /// `REQUEST_BODY_LIMIT` and `SEED_PATH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        Ok(ServerConfig {
            database_url: non_empty("DATABASE_URL"),
            host: parse_var("HOST", non_empty("HOST"), defaults.host)?,
            port: parse_var("PORT", non_empty("PORT"), defaults.port)?,
            max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                non_empty("DATABASE_MAX_CONNECTIONS"),
                defaults.max_connections,
            )?,
            body_limit: parse_var(
                "REQUEST_BODY_LIMIT",
                non_empty("REQUEST_BODY_LIMIT"),
                defaults.body_limit,
            )?,
            seed_path: non_empty("SEED_PATH").map(PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
