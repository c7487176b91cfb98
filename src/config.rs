//! Server configuration from environment variables

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::event_store::EventStoreConfig;

pub const DATA_FILE_VAR: &str = "SCAN_DATA_FILE";
pub const BIND_ADDR_VAR: &str = "SCAN_BIND_ADDR";
pub const PORT_VAR: &str = "PORT";
pub const WRITE_RETRIES_VAR: &str = "SCAN_WRITE_RETRIES";
pub const WRITE_BACKOFF_VAR: &str = "SCAN_WRITE_BACKOFF_MS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Runtime settings for the scan server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub store: EventStoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            store: EventStoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_lookup(&current_dir, |var| env::var(var).ok())
    }

    /// Read settings through `lookup`, resolving relative paths against `base_dir`
    pub fn from_lookup<F>(base_dir: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_file = match lookup(DATA_FILE_VAR) {
            Some(path) if Path::new(&path).is_absolute() => PathBuf::from(path),
            Some(path) => base_dir.join(path),
            None => base_dir.join(&defaults.store.data_file),
        };

        let ip = match lookup(BIND_ADDR_VAR) {
            Some(raw) => parse(BIND_ADDR_VAR, raw, "IP address")?,
            None => defaults.addr.ip(),
        };
        let port = match lookup(PORT_VAR) {
            Some(raw) => parse(PORT_VAR, raw, "port")?,
            None => defaults.addr.port(),
        };

        let attempts: u32 = match lookup(WRITE_RETRIES_VAR) {
            Some(raw) => parse(WRITE_RETRIES_VAR, raw, "attempt count")?,
            None => defaults.store.write_attempts,
        };
        let backoff = match lookup(WRITE_BACKOFF_VAR) {
            Some(raw) => Duration::from_millis(parse(WRITE_BACKOFF_VAR, raw, "millisecond count")?),
            None => defaults.store.write_backoff,
        };

        Ok(Self {
            addr: SocketAddr::new(ip, port),
            store: EventStoreConfig::new(data_file).with_retry(attempts.max(1), backoff),
        })
    }
}

fn parse<T: std::str::FromStr>(
    var: &'static str,
    raw: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let parsed = raw.trim().parse();
    parsed.map_err(|_| ConfigError::Invalid { var, value: raw, expected })
}
