//! glasstock configuration (`glasstock.toml`).
//!
//! Defines the typed configuration: which worksheet store to use, which
//! worksheet holds the inventory, read caching, and the optional shared
//! password that gates the application.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "glasstock.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level glasstock configuration.
///
/// Parsed from `glasstock.toml`. Missing fields use sensible defaults.
/// Missing file → all defaults (no error).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GlasstockConfig {
    /// Worksheet store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Access gate settings.
    #[serde(default)]
    pub access: AccessConfig,
}

// ---------------------------------------------------------------------------
// StoreConfig
// ---------------------------------------------------------------------------

/// Where the inventory worksheet lives.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Which backend to use.
    #[serde(default)]
    pub backend: BackendKind,

    /// Directory for the `csv-dir` backend (default: `"data"`). Relative
    /// paths resolve against the config file's directory.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Worksheet holding the inventory (default: `"Blad1"`).
    #[serde(default = "default_worksheet")]
    pub worksheet: String,

    /// How long a cached read stays valid, in seconds. `0` keeps cached
    /// reads until the next write.
    #[serde(default)]
    pub cache_ttl_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            path: default_store_path(),
            worksheet: default_worksheet(),
            cache_ttl_seconds: 0,
        }
    }
}

impl StoreConfig {
    /// Cache lifetime, or `None` to cache until the next write.
    #[must_use]
    pub const fn cache_ttl(&self) -> Option<Duration> {
        if self.cache_ttl_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.cache_ttl_seconds))
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data")
}

fn default_worksheet() -> String {
    "Blad1".to_owned()
}

/// The worksheet store backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// One CSV file per worksheet in a directory.
    #[default]
    CsvDir,
    /// In-process only; contents are lost on exit. For demos and tests.
    Memory,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CsvDir => write!(f, "csv-dir"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

// ---------------------------------------------------------------------------
// AccessConfig
// ---------------------------------------------------------------------------

/// Shared-password gate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    /// The shared password. Absent → no gate.
    #[serde(default)]
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Error loading a glasstock configuration file.
#[derive(Debug)]
pub struct ConfigError {
    /// The path that was being loaded (if available).
    pub path: Option<PathBuf>,
    /// Human-readable message with line-level detail when possible.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(p) = &self.path {
            write!(f, "{}: {}", p.display(), self.message)
        } else {
            write!(f, "config error: {}", self.message)
        }
    }
}

impl std::error::Error for ConfigError {}

impl GlasstockConfig {
    /// Load configuration from a TOML file.
    ///
    /// - If the file does not exist, returns all defaults (not an error).
    /// - If the file exists but contains invalid TOML or unknown fields,
    ///   returns a [`ConfigError`] with line-level detail.
    /// - A relative `store.path` is resolved against the file's directory.
    ///
    /// # Errors
    /// Returns `ConfigError` on I/O errors (other than not-found) or parse errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError {
                    path: Some(path.to_owned()),
                    message: format!("could not read file: {e}"),
                });
            }
        };
        let mut config = Self::parse(&contents).map_err(|mut e| {
            e.path = Some(path.to_owned());
            e
        })?;
        if config.store.path.is_relative()
            && let Some(dir) = path.parent()
        {
            config.store.path = dir.join(&config.store.path);
        }
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ConfigError` on invalid TOML or unknown fields.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| {
            let mut message = e.message().to_owned();
            if let Some(span) = e.span() {
                // Calculate line number from byte offset.
                let line = toml_str[..span.start]
                    .chars()
                    .filter(|&c| c == '\n')
                    .count()
                    + 1;
                message = format!("line {line}: {message}");
            }
            ConfigError {
                path: None,
                message,
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_all_fields() {
        let cfg = GlasstockConfig::default();
        assert_eq!(cfg.store.backend, BackendKind::CsvDir);
        assert_eq!(cfg.store.path, PathBuf::from("data"));
        assert_eq!(cfg.store.worksheet, "Blad1");
        assert_eq!(cfg.store.cache_ttl(), None);
        assert_eq!(cfg.access.password, None);
    }

    #[test]
    fn parse_empty_string() {
        let cfg = GlasstockConfig::parse("").unwrap();
        assert_eq!(cfg, GlasstockConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[store]
backend = "memory"
path = "/srv/stock"
worksheet = "Voorraad"
cache_ttl_seconds = 30

[access]
password = "glas"
"#;
        let cfg = GlasstockConfig::parse(toml).unwrap();
        assert_eq!(cfg.store.backend, BackendKind::Memory);
        assert_eq!(cfg.store.path, PathBuf::from("/srv/stock"));
        assert_eq!(cfg.store.worksheet, "Voorraad");
        assert_eq!(cfg.store.cache_ttl(), Some(Duration::from_secs(30)));
        assert_eq!(cfg.access.password.as_deref(), Some("glas"));
    }

    #[test]
    fn parse_partial_store_keeps_defaults() {
        let cfg = GlasstockConfig::parse("[store]\nworksheet = \"Blad2\"\n").unwrap();
        assert_eq!(cfg.store.worksheet, "Blad2");
        assert_eq!(cfg.store.backend, BackendKind::CsvDir);
        assert_eq!(cfg.store.path, PathBuf::from("data"));
    }

    #[test]
    fn parse_unknown_field_is_error() {
        let err = GlasstockConfig::parse("[store]\nsheet = \"x\"\n").unwrap_err();
        assert!(err.message.contains("sheet"), "got: {}", err.message);
    }

    #[test]
    fn parse_unknown_backend_is_error() {
        assert!(GlasstockConfig::parse("[store]\nbackend = \"gsheets\"\n").is_err());
    }

    #[test]
    fn parse_includes_line_number_on_error() {
        let err = GlasstockConfig::parse("[store]\n\nworksheet = 12\n").unwrap_err();
        assert!(
            err.message.contains("line 3"),
            "error should include line number: {}",
            err.message
        );
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = GlasstockConfig::load(&dir.path().join("glasstock.toml")).unwrap();
        assert_eq!(cfg, GlasstockConfig::default());
    }

    #[test]
    fn load_resolves_relative_store_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glasstock.toml");
        std::fs::write(&path, "[store]\npath = \"stock\"\n").unwrap();
        let cfg = GlasstockConfig::load(&path).unwrap();
        assert_eq!(cfg.store.path, dir.path().join("stock"));
    }

    #[test]
    fn load_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glasstock.toml");
        std::fs::write(&path, "[store\n").unwrap();
        let err = GlasstockConfig::load(&path).unwrap_err();
        assert_eq!(err.path.as_deref(), Some(path.as_path()));
        assert!(err.to_string().contains("glasstock.toml"));
    }

    #[test]
    fn backend_display() {
        assert_eq!(BackendKind::CsvDir.to_string(), "csv-dir");
        assert_eq!(BackendKind::Memory.to_string(), "memory");
    }
}
