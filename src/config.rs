// src/config.rs
// =============================================================================
// Optional configuration file.
//
// Location: <config dir>/commit-log/config.toml (e.g. ~/.config/commit-log/
// on Linux), or whatever --config points at. Every key is optional:
//
//   api_base = "https://api.github.com"
//   default_repo = "https://github.com/s-mahali/Echoletter"
//   data_dir = "/home/me/.local/share/commit-log"
//   request_timeout_secs = 30
//
// Precedence: command-line flags > config file > built-in defaults.
// A missing default file is fine; a missing --config file is an error.
// =============================================================================

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::github::DEFAULT_API_BASE;

const APP_DIR: &str = "commit-log";
const CONFIG_FILE: &str = "config.toml";
const VISITOR_FILE: &str = "visitors.json";

pub const DEFAULT_REPO: &str = "https://github.com/s-mahali/Echoletter";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid API base URL '{value}': {source}")]
    InvalidApiBase {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

// What the TOML file may contain
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    api_base: Option<String>,
    default_repo: Option<String>,
    data_dir: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
}

/// Resolved settings
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: Url,
    pub default_repo: String,
    pub data_dir: PathBuf,
    /// None leaves reqwest's default in place
    pub request_timeout: Option<Duration>,
}

impl Config {
    // Built-in defaults, no file involved
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::from_file(FileConfig::default())
    }

    fn from_file(file: FileConfig) -> Result<Self, ConfigError> {
        let api_base = parse_api_base(file.api_base.as_deref().unwrap_or(DEFAULT_API_BASE))?;

        let data_dir = file.data_dir.unwrap_or_else(default_data_dir);

        Ok(Self {
            api_base,
            default_repo: file.default_repo.unwrap_or_else(|| DEFAULT_REPO.to_string()),
            data_dir,
            request_timeout: file.request_timeout_secs.map(Duration::from_secs),
        })
    }

    /// Applies a --api-base override
    pub fn with_api_base(mut self, api_base: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(value) = api_base {
            self.api_base = parse_api_base(value)?;
        }
        Ok(self)
    }

    /// Durable visitor-counter file
    pub fn visitor_store_path(&self) -> PathBuf {
        self.data_dir.join(VISITOR_FILE)
    }
}

// Loads the configuration
//
// Parameters:
//   explicit: path given with --config, if any
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (Some(path.to_path_buf()), true),
        None => (default_config_path(), false),
    };

    let Some(path) = path else {
        return Config::defaults();
    };

    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            return Config::defaults();
        }
        Err(source) => return Err(ConfigError::Io { path, source }),
    };

    let file: FileConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;

    debug!(path = %path.display(), "loaded config file");
    Config::from_file(file)
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR))
}

fn parse_api_base(value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidApiBase {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_defaults() {
        let config = Config::defaults().unwrap();
        assert_eq!(config.api_base.as_str(), "https://api.github.com/");
        assert_eq!(config.default_repo, DEFAULT_REPO);
        assert!(config.request_timeout.is_none());
        assert!(config.visitor_store_path().ends_with("commit-log/visitors.json"));
    }

    #[test]
    fn test_load_file() {
        let (_dir, path) = write_config(
            r#"
            api_base = "http://localhost:8080"
            default_repo = "tokio-rs/tokio"
            data_dir = "/tmp/commit-log-test"
            request_timeout_secs = 7
            "#,
        );

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.api_base.as_str(), "http://localhost:8080/");
        assert_eq!(config.default_repo, "tokio-rs/tokio");
        assert_eq!(
            config.visitor_store_path(),
            PathBuf::from("/tmp/commit-log-test/visitors.json")
        );
        assert_eq!(config.request_timeout, Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let (_dir, path) = write_config("default_repo = \"a/b\"\n");
        let config = load(Some(&path)).unwrap();
        assert_eq!(config.default_repo, "a/b");
        assert_eq!(config.api_base.as_str(), "https://api.github.com/");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let (_dir, path) = write_config("token = \"secret\"\n");
        let err = load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_api_base() {
        let (_dir, path) = write_config("api_base = \"not a url\"\n");
        let err = load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiBase { .. }));
    }

    #[test]
    fn test_cli_override() {
        let config = Config::defaults()
            .unwrap()
            .with_api_base(Some("http://127.0.0.1:9999"))
            .unwrap();
        assert_eq!(config.api_base.as_str(), "http://127.0.0.1:9999/");

        let unchanged = Config::defaults().unwrap().with_api_base(None).unwrap();
        assert_eq!(unchanged.api_base.as_str(), "https://api.github.com/");
    }
}
