//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.marquee/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::tmdb::DEFAULT_TMDB_BASE_URL;
use crate::catalog::types::DEFAULT_IMAGE_BASE_URL;
use crate::core::query::DEFAULT_QUERY;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MarqueeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Query shown on startup. An empty string starts with no search.
    pub default_query: Option<String>,
    /// Seconds a fetched page counts as fresh before revisiting refetches it.
    pub stale_time_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TmdbConfig {
    pub access_token: Option<String>,
    pub base_url: Option<String>,
    pub image_base_url: Option<String>,
    pub language: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options except the secret)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub initial_query: String,
    pub stale_time: Duration,
    pub tmdb_access_token: Option<String>,
    pub tmdb_base_url: String,
    pub image_base_url: String,
    pub language: Option<String>,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides<'a> {
    pub query: Option<&'a str>,
    pub language: Option<&'a str>,
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

/// Returns the path to `~/.marquee/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".marquee").join("config.toml"))
}

/// Load config from `~/.marquee/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MarqueeConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MarqueeConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MarqueeConfig::default());
        }
    };
    load_config_from(&path)
}

fn load_config_from(path: &Path) -> Result<MarqueeConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(MarqueeConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MarqueeConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", redacted(&config));
    Ok(config)
}

/// Debug view of the config with the access token masked.
fn redacted(config: &MarqueeConfig) -> String {
    let token = config.tmdb.access_token.as_ref().map(|_| "***");
    format!(
        "general={:?}, tmdb.base_url={:?}, tmdb.language={:?}, tmdb.access_token={:?}",
        config.general, config.tmdb.base_url, config.tmdb.language, token
    )
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Marquee Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_query = "popular"          # Empty string starts without a search
# stale_time_secs = 0                # 0 = always refresh a page when revisiting it

# [tmdb]
# access_token = "eyJhbGciOi..."     # Or set TMDB_TOKEN env var
# base_url = "https://api.themoviedb.org/3"
# image_base_url = "https://image.tmdb.org/t/p"
# language = "en-US"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MarqueeConfig, cli: CliOverrides<'_>) -> ResolvedConfig {
    resolve_with_env(config, cli, |name| std::env::var(name).ok())
}

fn resolve_with_env(
    config: &MarqueeConfig,
    cli: CliOverrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Query: CLI → env → config → default
    let initial_query = cli
        .query
        .map(|s| s.to_string())
        .or_else(|| env("MARQUEE_QUERY"))
        .or_else(|| config.general.default_query.clone())
        .unwrap_or_else(|| DEFAULT_QUERY.to_string());

    // Language: CLI → env → config → unset (TMDB default)
    let language = cli
        .language
        .map(|s| s.to_string())
        .or_else(|| env("TMDB_LANGUAGE"))
        .or_else(|| config.tmdb.language.clone())
        .filter(|s| !s.trim().is_empty());

    // Access token: env → config
    let tmdb_access_token = env("TMDB_TOKEN")
        .or_else(|| config.tmdb.access_token.clone())
        .filter(|s| !s.trim().is_empty());

    // Base URL: env → config → default
    let tmdb_base_url = env("TMDB_BASE_URL")
        .or_else(|| config.tmdb.base_url.clone())
        .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string());

    let image_base_url = config
        .tmdb
        .image_base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string());

    ResolvedConfig {
        initial_query,
        stale_time: Duration::from_secs(config.general.stale_time_secs.unwrap_or(0)),
        tmdb_access_token,
        tmdb_base_url,
        image_base_url,
        language,
    }
}
