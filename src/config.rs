//! Process configuration from environment variables.

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/cricket";
pub const DEFAULT_PORT: u16 = 6001;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub port: u16,
    pub max_connections: u32,
    pub store: StoreKind,
    pub body_limit_bytes: usize,
}

impl ServiceConfig {
    /// Read from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(ServiceConfig {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse(&lookup, "PORT", DEFAULT_PORT)?,
            max_connections: parse(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            store: parse(&lookup, "PLAYER_STORE", StoreKind::Postgres)?,
            body_limit_bytes: parse(&lookup, "BODY_LIMIT_BYTES", 1024 * 1024)?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServiceConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let c = config(&[]).unwrap();
        assert_eq!(c.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(c.port, 6001);
        assert_eq!(c.max_connections, 5);
        assert_eq!(c.store, StoreKind::Postgres);
        assert_eq!(c.listen_addr(), "0.0.0.0:6001");
    }

    #[test]
    fn reads_overrides() {
        let c = config(&[("PORT", "8080"), ("PLAYER_STORE", "Memory"), ("BIND_ADDR", "127.0.0.1")]).unwrap();
        assert_eq!(c.port, 8080);
        assert_eq!(c.store, StoreKind::Memory);
        assert_eq!(c.listen_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn rejects_bad_numbers_and_kinds() {
        match config(&[("PORT", "http")]) {
            Err(ConfigError::Invalid { key, value }) => {
                assert_eq!(key, "PORT");
                assert_eq!(value, "http");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(config(&[("PLAYER_STORE", "mongo")]).is_err());
    }
}
