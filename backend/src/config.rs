//! Server configuration read from the environment.
//!
//! A `.env` file in the working directory is honoured. Command-line flags
//! take precedence over anything read here.
//!
//! | Variable                    | Default    |
//! |-----------------------------|------------|
//! | `CSVTIDY_HOST`              | `0.0.0.0`  |
//! | `CSVTIDY_PORT`              | `3000`     |
//! | `CSVTIDY_MAX_UPLOAD_BYTES`  | 50 MiB     |
//! | `CSVTIDY_MAX_SESSIONS`      | `256`      |

use std::env;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::ConfigError;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default upload limit (50 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Default number of sessions kept in memory.
pub const DEFAULT_MAX_SESSIONS: usize = 256;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl ServerConfig {
    /// Build a config from `CSVTIDY_*` variables, loading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            host: read(&lookup, "CSVTIDY_HOST")?.unwrap_or(defaults.host),
            port: read(&lookup, "CSVTIDY_PORT")?.unwrap_or(defaults.port),
            max_upload_bytes: read(&lookup, "CSVTIDY_MAX_UPLOAD_BYTES")?
                .unwrap_or(defaults.max_upload_bytes),
            max_sessions: read(&lookup, "CSVTIDY_MAX_SESSIONS")?.unwrap_or(defaults.max_sessions),
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }
}

fn read<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| ConfigError {
            key: key.to_string(),
            value: raw.clone(),
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("CSVTIDY_HOST", "127.0.0.1"),
            ("CSVTIDY_PORT", "8080"),
            ("CSVTIDY_MAX_UPLOAD_BYTES", "1024"),
            ("CSVTIDY_MAX_SESSIONS", " 4 "),
        ]))
        .unwrap();

        assert_eq!(config.host, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.max_sessions, 4);
    }

    #[test]
    fn test_blank_value_uses_default() {
        let config = ServerConfig::from_lookup(lookup(&[("CSVTIDY_PORT", "")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_invalid_value() {
        let err = ServerConfig::from_lookup(lookup(&[("CSVTIDY_PORT", "http")])).unwrap_err();
        assert_eq!(err.key, "CSVTIDY_PORT");
        assert_eq!(err.value, "http");
    }

    #[test]
    fn test_builder_overrides() {
        let config = ServerConfig::default()
            .with_port(9000)
            .with_host(IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.port, 9000);
        assert_eq!(config.host.to_string(), "127.0.0.1");
    }
}
