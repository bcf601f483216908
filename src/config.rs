use std::collections::HashMap;
use std::env;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 10000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a valid number, got '{0}'")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Postgres connection string. Without one the service keeps orders in
    /// memory only.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Read configuration from the process environment. Call
    /// `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| vars.get(key).filter(|v| !v.trim().is_empty()).cloned();

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url: non_empty("DATABASE_URL"),
            host: non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = AppConfig::from_vars(HashMap::new()).unwrap();
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.host, DEFAULT_HOST);
        assert_eq!(cfg.port, DEFAULT_PORT);
    }

    #[test]
    fn values_are_read_from_vars() {
        let cfg = AppConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://po:po@localhost/po"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(cfg.database_url.as_deref(), Some("postgres://po:po@localhost/po"));
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn blank_database_url_counts_as_unset() {
        let cfg = AppConfig::from_vars(vars(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(cfg.database_url, None);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = AppConfig::from_vars(vars(&[("PORT", "ten")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("ten".to_string()));
    }
}
