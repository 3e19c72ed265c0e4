//! Server configuration from environment variables.
//!
//! # Responsibility
//! - Read `AUPOSTCODE_*` settings (after an optional `.env` file).
//! - Resolve defaults for bind address, logging and store timeout.
//!
//! # Invariants
//! - Exactly one postcode source is configured; SQLite wins when both are set.
//! - Parsing is pure over a lookup function so it can be tested without env mutation.

use aupostcode_core::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_DB_PATH: &str = "AUPOSTCODE_DB_PATH";
pub const ENV_JSON_PATH: &str = "AUPOSTCODE_JSON_PATH";
pub const ENV_BIND: &str = "AUPOSTCODE_BIND";
pub const ENV_LOG_LEVEL: &str = "AUPOSTCODE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "AUPOSTCODE_LOG_DIR";
pub const ENV_DB_TIMEOUT_SECS: &str = "AUPOSTCODE_DB_TIMEOUT_SECS";

const DEFAULT_BIND: &str = "0.0.0.0:5000";
const DEFAULT_DB_TIMEOUT_SECS: u64 = 5;

#[derive(Debug)]
pub enum ConfigError {
    MissingSource,
    InvalidValue {
        key: &'static str,
        value: String,
        message: String,
    },
    CurrentDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSource => write!(
                f,
                "no postcode source configured; set {ENV_DB_PATH} or {ENV_JSON_PATH}"
            ),
            Self::InvalidValue {
                key,
                value,
                message,
            } => write!(f, "invalid {key}=`{value}`: {message}"),
            Self::CurrentDir(err) => write!(f, "cannot resolve working directory: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CurrentDir(err) => Some(err),
            _ => None,
        }
    }
}

/// Backing store the pool loads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Sqlite(PathBuf),
    JsonFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub source: SourceConfig,
    pub bind: SocketAddr,
    pub log_level: String,
    pub log_dir: PathBuf,
    /// Upper bound for a blocked SQLite read during load.
    pub db_timeout: Duration,
}

impl ServerConfig {
    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Self::from_lookup(|key| std::env::var(key).ok(), &cwd)
    }

    /// Builds config from `lookup`; relative paths resolve against `base_dir`.
    pub fn from_lookup<F>(lookup: F, base_dir: &Path) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let source = match (read(ENV_DB_PATH), read(ENV_JSON_PATH)) {
            (Some(db_path), _) => SourceConfig::Sqlite(base_dir.join(db_path)),
            (None, Some(json_path)) => SourceConfig::JsonFile(base_dir.join(json_path)),
            (None, None) => return Err(ConfigError::MissingSource),
        };

        let bind_text = read(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_text
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidValue {
                key: ENV_BIND,
                value: bind_text.clone(),
                message: err.to_string(),
            })?;

        let db_timeout = match read(ENV_DB_TIMEOUT_SECS) {
            Some(text) => {
                let secs = text.parse::<u64>().map_err(|err| ConfigError::InvalidValue {
                    key: ENV_DB_TIMEOUT_SECS,
                    value: text.clone(),
                    message: err.to_string(),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_DB_TIMEOUT_SECS),
        };

        let log_dir = read(ENV_LOG_DIR)
            .map(|dir| base_dir.join(dir))
            .unwrap_or_else(|| base_dir.join("logs"));

        Ok(Self {
            source,
            bind,
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir,
            db_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ServerConfig, SourceConfig, ENV_BIND, ENV_DB_PATH, ENV_JSON_PATH};
    use std::collections::HashMap;
    use std::path::Path;
    use std::time::Duration;

    fn parse(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned(), Path::new("/srv/postcode"))
    }

    #[test]
    fn defaults_apply_when_only_db_path_is_set() {
        let config = parse(&[(ENV_DB_PATH, "data/postcodes.sqlite3")]).unwrap();

        assert_eq!(
            config.source,
            SourceConfig::Sqlite("/srv/postcode/data/postcodes.sqlite3".into())
        );
        assert_eq!(config.bind.to_string(), "0.0.0.0:5000");
        assert_eq!(config.log_dir, Path::new("/srv/postcode/logs"));
        assert_eq!(config.db_timeout, Duration::from_secs(5));
    }

    #[test]
    fn absolute_json_path_is_kept() {
        let config = parse(&[(ENV_JSON_PATH, "/data/feed.json")]).unwrap();
        assert_eq!(config.source, SourceConfig::JsonFile("/data/feed.json".into()));
    }

    #[test]
    fn sqlite_source_wins_over_json() {
        let config = parse(&[(ENV_DB_PATH, "a.sqlite3"), (ENV_JSON_PATH, "b.json")]).unwrap();
        assert!(matches!(config.source, SourceConfig::Sqlite(_)));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let err = parse(&[(ENV_DB_PATH, "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSource));
    }

    #[test]
    fn invalid_bind_address_names_the_key() {
        let err = parse(&[(ENV_DB_PATH, "a.sqlite3"), (ENV_BIND, "localhost")]).unwrap_err();
        assert!(err.to_string().contains(ENV_BIND));
    }
}
