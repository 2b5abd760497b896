//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.routepick/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RoutePickConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Terminals narrower than this get the compact (mobile) navbar.
    pub compact_width: Option<u16>,
    pub mouse: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_wait_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_COMPACT_WIDTH: u16 = 80;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_WAIT_SECS: u64 = 600;

/// Smallest poll interval accepted, so a typo can't hammer the backend.
const MIN_POLL_INTERVAL_MS: u64 = 250;

pub const BACKEND_URL_ENV: &str = "ROUTEPICK_BACKEND_URL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub compact_width: u16,
    pub mouse: bool,
    pub backend_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub max_wait: Duration,
}

/// Values given on the command line (None / false = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub backend_url: Option<String>,
    pub compact_width: Option<u16>,
    pub no_mouse: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.routepick/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".routepick").join("config.toml"))
}

/// Load config from `~/.routepick/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `RoutePickConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<RoutePickConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(RoutePickConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(RoutePickConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<RoutePickConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: RoutePickConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# RoutePick Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# compact_width = 80                 # Below this many columns the navbar collapses into a menu
# mouse = true                       # Capture mouse clicks and wheel

# [backend]
# base_url = "http://localhost:5000" # Or set ROUTEPICK_BACKEND_URL
# poll_interval_ms = 2000            # How often to ask whether a course is ready
# request_timeout_secs = 30
# max_wait_secs = 600                # Give up on a course after this long
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &RoutePickConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &RoutePickConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Backend URL: CLI → env → config → default
    let backend_url = cli
        .backend_url
        .clone()
        .or_else(|| env(BACKEND_URL_ENV))
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

    let compact_width = cli
        .compact_width
        .or(config.general.compact_width)
        .unwrap_or(DEFAULT_COMPACT_WIDTH);

    // --no-mouse can only turn capture off
    let mouse = !cli.no_mouse && config.general.mouse.unwrap_or(true);

    let poll_ms = config
        .backend
        .poll_interval_ms
        .unwrap_or(DEFAULT_POLL_INTERVAL_MS);
    if poll_ms < MIN_POLL_INTERVAL_MS {
        warn!(
            "poll_interval_ms = {} is too small, using {}",
            poll_ms, MIN_POLL_INTERVAL_MS
        );
    }

    ResolvedConfig {
        compact_width,
        mouse,
        backend_url,
        poll_interval: Duration::from_millis(poll_ms.max(MIN_POLL_INTERVAL_MS)),
        request_timeout: Duration::from_secs(
            config
                .backend
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        max_wait: Duration::from_secs(
            config.backend.max_wait_secs.unwrap_or(DEFAULT_MAX_WAIT_SECS),
        ),
    }
}
