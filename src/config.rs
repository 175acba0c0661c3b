//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.
//!
//! The config types themselves are plain serde structs shared with the WASM
//! frontend; file and environment loading needs the `native` feature.

use serde::Deserialize;
#[cfg(feature = "native")]
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dev: DevConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Development flags
///
/// Fixtures replace the backend only when both flags are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DevConfig {
    #[serde(default)]
    pub is_development: bool,

    #[serde(default)]
    pub use_mocking: bool,
}

impl DevConfig {
    pub fn new(is_development: bool, use_mocking: bool) -> Self {
        Self {
            is_development,
            use_mocking,
        }
    }

    /// Whether the in-process mock API should serve requests
    pub fn mocking_enabled(&self) -> bool {
        self.is_development && self.use_mocking
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "fire_dashboard=info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Parse a boolean flag as written in environment variables
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(feature = "native")]
impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let loaded = Self::load_default_reporting();
        loaded.log();
        loaded.config
    }

    /// Load from default locations, keeping failures for the caller to report
    ///
    /// Nothing is logged, so this works before a subscriber is installed.
    pub fn load_default_reporting() -> ConfigLoad {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("fire-dashboard").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first of `paths` that exists and parses
    ///
    /// Absent files are skipped. Files that exist but fail to load are
    /// recorded and the search moves on; with no usable file the result is
    /// the defaults with environment overrides.
    pub fn load_first(paths: &[PathBuf]) -> ConfigLoad {
        let mut errors = Vec::new();

        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::load_with_env(path) {
                Ok(config) => {
                    return ConfigLoad {
                        config,
                        source: Some(path.clone()),
                        errors,
                    };
                }
                Err(e) => errors.push(e),
            }
        }

        ConfigLoad {
            config: Self::from_env(),
            source: None,
            errors,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("FIRE_DASHBOARD_API_URL") {
            self.api.base_url = url;
        }

        if let Ok(flag) = std::env::var("FIRE_DASHBOARD_DEV") {
            match parse_flag(&flag) {
                Some(value) => self.dev.is_development = value,
                None => tracing::warn!("Ignoring FIRE_DASHBOARD_DEV={:?}", flag),
            }
        }
        if let Ok(flag) = std::env::var("FIRE_DASHBOARD_USE_MOCKING") {
            match parse_flag(&flag) {
                Some(value) => self.dev.use_mocking = value,
                None => tracing::warn!("Ignoring FIRE_DASHBOARD_USE_MOCKING={:?}", flag),
            }
        }

        if let Ok(level) = std::env::var("FIRE_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("FIRE_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Outcome of a search over candidate config files
#[cfg(feature = "native")]
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    /// File the config came from; `None` means defaults
    pub source: Option<PathBuf>,
    /// Files that existed but could not be loaded
    pub errors: Vec<ConfigError>,
}

#[cfg(feature = "native")]
impl ConfigLoad {
    /// Report the search through the installed subscriber
    pub fn log(&self) {
        for e in &self.errors {
            tracing::warn!("{}", e);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[cfg(feature = "native")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# FIRE Dashboard Configuration
#
# Environment variables override these settings:
# - FIRE_DASHBOARD_API_URL
# - FIRE_DASHBOARD_DEV
# - FIRE_DASHBOARD_USE_MOCKING
# - FIRE_DASHBOARD_LOG_LEVEL
# - FIRE_DASHBOARD_LOG_FORMAT

[api]
# Backend serving /api/<section>/summary and /api/<section>/graphs
base_url = "http://localhost:5000"

[dev]
# Development build
is_development = false

# Serve built-in fixtures instead of calling the backend.
# Only honored when is_development is also true.
use_mocking = false

[logging]
# Log filter directive (RUST_LOG takes precedence)
level = "fire_dashboard=info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert!(!config.dev.mocking_enabled());
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, default_base_url());
        assert_eq!(config.dev, DevConfig::default());
        assert_eq!(config.logging.level, default_log_level());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://finance.local:8000\"\n\n[dev]\nis_development = true").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://finance.local:8000");
        assert!(config.dev.is_development);
        assert!(!config.dev.use_mocking);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[api\nbase_url = 3").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_broken_default_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[dev\nuse_mocking = ").unwrap();
        let absent = dir.path().join("absent.toml");

        let loaded = Config::load_first(&[absent.clone(), broken.clone()]);
        assert!(loaded.source.is_none());
        assert_eq!(loaded.errors.len(), 1);
        assert!(matches!(&loaded.errors[0], ConfigError::Parse { path, .. } if path == &broken));
        assert!(loaded.errors[0].to_string().contains("broken.toml"));

        let valid = dir.path().join("valid.toml");
        std::fs::write(&valid, "[api]\nbase_url = \"http://finance.local:8000\"\n").unwrap();

        let loaded = Config::load_first(&[broken, absent, valid.clone()]);
        assert_eq!(loaded.source, Some(valid));
        assert_eq!(loaded.errors.len(), 1);
    }

    #[test]
    fn test_mocking_needs_both_flags() {
        assert!(!DevConfig::new(true, false).mocking_enabled());
        assert!(!DevConfig::new(false, true).mocking_enabled());
        assert!(DevConfig::new(true, true).mocking_enabled());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
