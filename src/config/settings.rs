//! Process settings read from the environment.

use crate::error::ConfigError;
use std::net::IpAddr;
use std::str::FromStr;

/// Env var holding the connection descriptor (URL or `key=value;` form).
pub const CONNECTION_ENV: &str = "DbConn";
pub const PORT_ENV: &str = "PORT";
pub const HOST_ENV: &str = "HOST";
pub const MAX_CONNECTIONS_ENV: &str = "DB_MAX_CONNECTIONS";

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct Settings {
    /// Raw descriptor; resolved to a URL by the bootstrapper.
    pub connection_string: String,
    pub host: IpAddr,
    pub port: u16,
    pub pool: PoolSettings,
}

#[derive(Clone, Debug)]
pub struct PoolSettings {
    pub max_connections: u32,
}

impl Default for PoolSettings {
    fn default() -> Self {
        PoolSettings {
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Settings {
    /// Read settings from process env. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection_string = lookup(CONNECTION_ENV)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingConnectionString)?;
        let host = parse_or(&lookup, HOST_ENV, IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or(&lookup, PORT_ENV, DEFAULT_PORT)?;
        let max_connections = parse_or(&lookup, MAX_CONNECTIONS_ENV, DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidSetting {
                name: MAX_CONNECTIONS_ENV,
                value: "0".into(),
            });
        }
        Ok(Settings {
            connection_string,
            host,
            port,
            pool: PoolSettings { max_connections },
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(v) if v.trim().is_empty() => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidSetting { name, value: v }),
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
    fn missing_connection_string_is_an_error() {
        let err = Settings::from_lookup(lookup(&[("PORT", "9000")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingConnectionString));
        let err = Settings::from_lookup(lookup(&[("DbConn", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingConnectionString));
    }

    #[test]
    fn defaults_apply() {
        let s = Settings::from_lookup(lookup(&[("DbConn", "postgres://localhost/clients")])).unwrap();
        assert_eq!(s.port, 8000);
        assert_eq!(s.host.to_string(), "127.0.0.1");
        assert_eq!(s.pool.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn overrides_are_parsed() {
        let s = Settings::from_lookup(lookup(&[
            ("DbConn", "host=h;username=u;database=d"),
            ("PORT", "9100"),
            ("HOST", "0.0.0.0"),
            ("DB_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();
        assert_eq!(s.connection_string, "host=h;username=u;database=d");
        assert_eq!(s.port, 9100);
        assert_eq!(s.host.to_string(), "0.0.0.0");
        assert_eq!(s.pool.max_connections, 12);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = Settings::from_lookup(lookup(&[("DbConn", "x"), ("PORT", "eighty")])).unwrap_err();
        match err {
            ConfigError::InvalidSetting { name, value } => {
                assert_eq!(name, "PORT");
                assert_eq!(value, "eighty");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let err = Settings::from_lookup(lookup(&[("DbConn", "x"), ("DB_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { .. }));
    }
}
