//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::chart::ChartResult;
use crate::data::{DATA_BASE_PATH, MONTHLY_DATA_FILE};
use crate::palette::{ChartColorPalette, DEFAULT_COLORS};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub charts: ChartsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Built front end, served for every path not matched by a route
    #[serde(default = "default_static_root")]
    pub static_root: String,

    /// Directory holding the data files, served under the data base path
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8084
}

fn default_static_root() -> String {
    "./tessera-ui/dist".to_string()
}

fn default_data_dir() -> String {
    "./public/data".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_root: default_static_root(),
            data_dir: default_data_dir(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Data file locations as seen by clients
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// URL prefix the data files are served under
    #[serde(default = "default_base_path")]
    pub base_path: String,

    #[serde(default = "default_monthly_file")]
    pub monthly_file: String,
}

fn default_base_path() -> String {
    DATA_BASE_PATH.to_string()
}

fn default_monthly_file() -> String {
    MONTHLY_DATA_FILE.to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            monthly_file: default_monthly_file(),
        }
    }
}

/// Chart appearance
#[derive(Debug, Clone, Deserialize)]
pub struct ChartsConfig {
    /// Series colors in order; must not be empty
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

fn default_palette() -> Vec<String> {
    DEFAULT_COLORS.iter().map(|c| c.to_string()).collect()
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
        }
    }
}

impl ChartsConfig {
    /// Build the configured palette
    pub fn palette(&self) -> ChartResult<ChartColorPalette> {
        ChartColorPalette::new(self.palette.iter())
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
    "info".to_string()
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

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        let config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
        if config.charts.palette.is_empty() {
            return Err("charts.palette must contain at least one color".to_string());
        }
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
        let config_paths = [
            Some(PathBuf::from("./config.toml")),
            dirs::config_dir().map(|p| p.join("tessera").join("config.toml")),
            Some(PathBuf::from("/etc/tessera/config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        // Server overrides
        if let Some(host) = lookup("TESSERA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TESSERA_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid TESSERA_PORT {:?}", port),
            }
        }
        if let Some(root) = lookup("TESSERA_STATIC_ROOT") {
            self.server.static_root = root;
        }
        if let Some(dir) = lookup("TESSERA_DATA_DIR") {
            self.server.data_dir = dir;
        }

        // Logging overrides
        if let Some(level) = lookup("TESSERA_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("TESSERA_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r##"# Tessera Configuration
#
# Environment variables override these settings:
# - TESSERA_HOST
# - TESSERA_PORT
# - TESSERA_STATIC_ROOT
# - TESSERA_DATA_DIR
# - TESSERA_LOG_LEVEL
# - TESSERA_LOG_FORMAT

[server]
# Dashboard server host
host = "127.0.0.1"

# Dashboard server port
port = 8084

# Built front end (output of `trunk build`)
static_root = "./tessera-ui/dist"

# Directory holding monthly_data.json, written by the data pipeline
data_dir = "./public/data"

# Allowed CORS origins (empty allows any origin)
cors_origins = []

[data]
# URL prefix the data files are served under
base_path = "/data"

# Monthly data file name
monthly_file = "monthly_data.json"

[charts]
# Series colors, assigned by series index and reused past the end
palette = ["#2563EB", "#16A34A", "#F59E0B", "#9333EA", "#E11D48"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_generated_config_matches_defaults() {
        let parsed = Config::parse(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(parsed.server.addr(), defaults.server.addr());
        assert_eq!(parsed.server.static_root, defaults.server.static_root);
        assert_eq!(parsed.server.data_dir, defaults.server.data_dir);
        assert_eq!(parsed.data.base_path, DATA_BASE_PATH);
        assert_eq!(parsed.data.monthly_file, MONTHLY_DATA_FILE);
        assert_eq!(parsed.charts.palette, defaults.charts.palette);
        assert_eq!(parsed.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.charts.palette.len(), DEFAULT_COLORS.len());
    }

    #[test]
    fn test_empty_palette_rejected() {
        let err = Config::parse("[charts]\npalette = []\n").unwrap_err();
        assert!(err.contains("palette"));
    }

    #[test]
    fn test_charts_palette() {
        let config = Config::parse("[charts]\npalette = [\"#000000\", \"#FFFFFF\"]\n").unwrap();
        let palette = config.charts.palette().unwrap();
        assert_eq!(palette.color_at(3), "#FFFFFF");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("TESSERA_HOST", "0.0.0.0"),
            ("TESSERA_PORT", "9090"),
            ("TESSERA_DATA_DIR", "/srv/data"),
            ("TESSERA_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.addr(), "0.0.0.0:9090");
        assert_eq!(config.server.data_dir, "/srv/data");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "TESSERA_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 8084);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[server\nport = ").unwrap();
        let err = Config::load(&broken).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
