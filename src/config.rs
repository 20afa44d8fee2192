//! Engine configuration
//!
//! Resolution priority: command-line path, then the `LABMETRICS_CONFIG`
//! environment variable, then a TOML file in the platform config
//! directory, then compiled defaults. Unknown TOML keys are ignored;
//! unreadable or invalid TOML is a hard error rather than a silent
//! fallback.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable naming an explicit config file path.
pub const CONFIG_ENV_VAR: &str = "LABMETRICS_CONFIG";

const DEFAULT_PORTAL_BASE_URL: &str = "https://portal.core.edu.au/conf-ranks";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = "labmetrics/0.1 (research activity indicators)";

/// Settings the engine and its CLI run with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the online conference ranking portal; the conference
    /// identifier is appended as the last path segment.
    pub portal_base_url: String,
    /// Per-request timeout for portal fetches.
    pub http_timeout_secs: u64,
    /// User agent sent with portal fetches.
    pub user_agent: String,
    /// Where the CLI persists the indicator cache record.
    pub cache_file: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            portal_base_url: DEFAULT_PORTAL_BASE_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_file: None,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML config file. Missing keys fall back to defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&text)
            .map_err(|e| Error::Config(format!("invalid config {}: {e}", path.display())))
    }
}

/// Resolve the effective configuration.
///
/// 1. Explicit path from the command line
/// 2. Path named by `LABMETRICS_CONFIG`
/// 3. `<platform config dir>/labmetrics/config.toml`, when present
/// 4. Compiled defaults
pub fn resolve_config(cli_path: Option<&Path>) -> Result<EngineConfig> {
    if let Some(path) = cli_path {
        return EngineConfig::from_toml_file(path);
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return EngineConfig::from_toml_file(Path::new(&path));
    }

    if let Some(dir) = dirs::config_dir() {
        let path = dir.join("labmetrics").join("config.toml");
        if path.exists() {
            return EngineConfig::from_toml_file(&path);
        }
    }

    Ok(EngineConfig::default())
}
