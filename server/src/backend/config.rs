//! Configuration for the ledger server.
//!
//! Loaded from a YAML file where every field is optional, then overridden by
//! `LEDGER_*` environment variables and finally by command-line flags.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const HOST_VAR: &str = "LEDGER_HOST";
pub const PORT_VAR: &str = "LEDGER_PORT";
pub const DATABASE_URL_VAR: &str = "LEDGER_DATABASE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path prefix all account routes are mounted under
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Allowed CORS origin; any origin when absent
    #[serde(default)]
    pub cors_origin: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    2345
}

fn default_base_path() -> String {
    "/accounts".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_path: default_base_path(),
            cors_origin: None,
        }
    }
}

/// Which storage backend serves the accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Memory,
    #[default]
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Delete all accounts and acts at startup
    #[serde(default)]
    pub clear_on_start: bool,
}

fn default_database_url() -> String {
    "sqlite:accounts.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            database_url: default_database_url(),
            clear_on_start: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl LedgerConfig {
    /// Load configuration from a YAML file; a missing file yields the defaults
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let display = path.display().to_string();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Io { path: display, source }),
        };
        // An empty file deserializes to `null`, which serde_yaml rejects for a struct
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml { path: display, source })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `LEDGER_HOST`, `LEDGER_PORT` and `LEDGER_DATABASE_URL`
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(host) = lookup(HOST_VAR) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: PORT_VAR.to_string(),
                reason: format!("`{}` is not a port number", port),
            })?;
        }
        if let Some(url) = lookup(DATABASE_URL_VAR) {
            self.storage.database_url = url;
        }
        self.validate()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.server.base_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "server.base_path".to_string(),
                reason: format!("`{}` must start with /", self.server.base_path),
            });
        }
        if self.storage.backend == Backend::Sqlite && self.storage.database_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.database_url".to_string(),
                reason: "must not be empty for the sqlite backend".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn write(dir: &TempDir, yaml: &str) -> std::path::PathBuf {
        let path = dir.path().join("ledger.yaml");
        std::fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = LedgerConfig::load(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.server.port, 2345);
        assert_eq!(config.server.base_path, "/accounts");
        assert_eq!(config.storage.backend, Backend::Sqlite);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "server:\n  port: 8080\nstorage:\n  backend: memory\n");
        let config = LedgerConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.backend, Backend::Memory);
        assert_eq!(config.storage.database_url, "sqlite:accounts.db");
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "\n");
        assert_eq!(LedgerConfig::load(&path).unwrap(), LedgerConfig::default());
    }

    #[test]
    fn test_bad_yaml_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "server: [oops\n");
        assert!(matches!(LedgerConfig::load(&path), Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn test_bad_base_path_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "server:\n  base_path: accounts\n");
        assert!(matches!(LedgerConfig::load(&path), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [(PORT_VAR, "9000"), (DATABASE_URL_VAR, "sqlite::memory:")].into();
        let mut config = LedgerConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.database_url, "sqlite::memory:");

        let mut config = LedgerConfig::default();
        let err = config.apply_overrides(|name| (name == PORT_VAR).then(|| "http".to_string()));
        assert!(err.is_err());
    }
}
