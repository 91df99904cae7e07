//! Runtime settings from environment variables. Every value has a default so a bare
//! `patient-server` starts against a local database.

use crate::error::ConfigError;
use crate::sql::TableRef;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/patients";
pub const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 3000);
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_TABLE: &str = "patientrecord";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Schema and table holding patient rows.
    pub table: TableRef,
    pub body_limit_bytes: usize,
}

impl Settings {
    /// Read from the process environment (`DATABASE_URL`, `BIND_ADDR`, `DB_MAX_CONNECTIONS`,
    /// `PATIENT_SCHEMA`, `PATIENT_TABLE`, `BODY_LIMIT_BYTES`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Ok(Settings {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_addr: parse_or(get("BIND_ADDR"), "BIND_ADDR", || SocketAddr::from(DEFAULT_BIND_ADDR))?,
            max_connections: parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", || {
                DEFAULT_MAX_CONNECTIONS
            })?,
            table: TableRef::new(
                get("PATIENT_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into()),
                get("PATIENT_TABLE").unwrap_or_else(|| DEFAULT_TABLE.into()),
            ),
            body_limit_bytes: parse_or(get("BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES", || {
                DEFAULT_BODY_LIMIT_BYTES
            })?,
        })
    }
}

fn parse_or<T, D>(raw: Option<String>, key: &'static str, default: D) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    D: FnOnce() -> T,
{
    match raw {
        None => Ok(default()),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}
