//! Configuration for the taskdeck client.
//!
//! Layered priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attributes)
//! 3. TOML config file (`~/.config/taskdeck/config.toml`)
//! 4. Compiled defaults
//!
//! A missing default config file is not an error. An explicit `--config`
//! path that does not exist is.

use std::path::PathBuf;
use std::time::Duration;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiFileConfig,
    ui: UiFileConfig,
}

/// `[api]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ApiFileConfig {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    date_format: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Default base URL of the task API.
const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Default per-request transport timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default chrono format string for rendering due dates.
const DEFAULT_DATE_FORMAT: &str = "%d %b";

/// Resolved client configuration with all fields populated.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the task API, e.g. `http://localhost:8000/api`.
    pub base_url: String,
    /// Transport-level timeout applied to each request.
    pub request_timeout: Duration,
    /// chrono format string for rendering due dates.
    pub date_format: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration by merging CLI arguments, the config file, and
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicitly given config file cannot be
    /// read, or if the file is not valid TOML.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Merges CLI arguments over file values over defaults.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            base_url: cli
                .api_url
                .clone()
                .or_else(|| file.api.base_url.clone())
                .unwrap_or(defaults.base_url),
            request_timeout: cli
                .timeout_secs
                .or(file.api.timeout_secs)
                .map_or(defaults.request_timeout, Duration::from_secs),
            date_format: cli
                .date_format
                .clone()
                .or_else(|| file.ui.date_format.clone())
                .unwrap_or(defaults.date_format),
        }
    }
}

/// Shared CLI arguments parsed by clap, flattened into the binary's own
/// argument struct.
#[derive(clap::Args, Debug, Default)]
pub struct CliArgs {
    /// Base URL of the task API.
    #[arg(long, env = "TASKDECK_API_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "TASKDECK_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Path to config file (default: `~/.config/taskdeck/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Date display format (chrono format string).
    #[arg(long)]
    pub date_format: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", env = "TASKDECK_LOG")]
    pub log_level: String,
}

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and a missing
/// file is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            // No config dir available; use defaults.
            return Ok(ConfigFile::default());
        };
        config_dir.join("taskdeck").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
