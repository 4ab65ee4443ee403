// Configuration loading and parsing (config/skidraft.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the configuration file inside `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "skidraft.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// skidraft.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// SQLite database path. When omitted the platform data directory is
    /// used (see [`Config::db_path`]).
    #[serde(default)]
    pub db_path: Option<String>,
    /// Key of the durable slot holding the roster.
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Fixed name of the export file.
    pub file_name: String,
    /// Directory export files are written to.
    #[serde(default = "default_export_dir")]
    pub directory: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Directory for the log file, relative to the working directory.
    pub directory: String,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            directory: "logs".into(),
            filter: "skidraft=info,warn".into(),
        }
    }
}

fn default_export_dir() -> String {
    ".".into()
}

impl Config {
    /// Resolved database path: the configured path if set, otherwise
    /// `skidraft.db` inside the platform data directory, otherwise
    /// `skidraft.db` in the working directory.
    pub fn db_path(&self) -> PathBuf {
        if let Some(path) = &self.storage.db_path {
            return PathBuf::from(path);
        }
        directories::ProjectDirs::from("", "", "skidraft")
            .map(|dirs| dirs.data_dir().join("skidraft.db"))
            .unwrap_or_else(|| PathBuf::from("skidraft.db"))
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/skidraft.toml` relative to
/// `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    parse_config(&text, &path)
}

/// Parse and validate configuration text. `path` is only used in errors.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Copy `defaults/skidraft.toml` to `config/skidraft.toml` if the latter is
/// missing. Returns the path written, or `None` when a config already exists.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if target.exists() {
        return Ok(None);
    }
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither config/{CONFIG_FILE} nor defaults/{CONFIG_FILE} found in {}; \
                 run from the project root or ensure defaults/ is present",
                base_dir.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", source.display()),
    })?;
    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Copies the default config into place before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.storage.key.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "storage.key".into(),
            message: "must not be empty".into(),
        });
    }

    if config.storage.db_path.as_deref().is_some_and(|p| p.trim().is_empty()) {
        return Err(ConfigError::ValidationError {
            field: "storage.db_path".into(),
            message: "must not be empty when set".into(),
        });
    }

    let file_name = &config.export.file_name;
    if file_name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "export.file_name".into(),
            message: "must not be empty".into(),
        });
    }
    if file_name.contains('/') || file_name.contains('\\') {
        return Err(ConfigError::ValidationError {
            field: "export.file_name".into(),
            message: format!("must be a bare file name, got {file_name}"),
        });
    }
    if !file_name.ends_with(".json") {
        return Err(ConfigError::ValidationError {
            field: "export.file_name".into(),
            message: format!("must end in .json, got {file_name}"),
        });
    }

    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.filter".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
