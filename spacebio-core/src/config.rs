//! Configuration system for spacebio.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment -> CLI args.
//! Configuration is loaded from `~/.config/spacebio/config.toml` and/or `.spacebio/config.toml`
//! in the working directory.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::types::Persona;

/// Default number of chunks requested per search.
pub const DEFAULT_TOP_K: usize = 25;

/// Default lifetime of the cached database stats.
pub const DEFAULT_STATS_TTL_SECS: u64 = 300;

/// Top-level configuration for the spacebio client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub cache: CacheConfig,
}

/// Research backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix.
    pub base_url: String,
    /// Page size for searches.
    pub top_k: usize,
    /// Per-request timeout. Unset means requests never time out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            top_k: DEFAULT_TOP_K,
            request_timeout_secs: None,
            user_agent: format!("spacebio/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Validate the API settings, returning a list of problems.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            problems.push(format!(
                "api.base_url must start with http:// or https:// (got '{}')",
                self.base_url
            ));
        }
        if self.top_k == 0 {
            problems.push("api.top_k must be at least 1".to_string());
        }
        if self.request_timeout_secs == Some(0) {
            problems.push("api.request_timeout_secs must be positive when set".to_string());
        }
        problems
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color theme name.
    pub theme: String,
    /// Persona to skip the landing screen with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_persona: Option<Persona>,
    /// Whether the first-run quick start dialog may be shown.
    pub show_quick_start: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            default_persona: None,
            show_quick_start: true,
        }
    }
}

/// In-memory cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of the cached database stats in seconds.
    pub stats_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stats_ttl_secs: DEFAULT_STATS_TTL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn stats_ttl(&self) -> Duration {
        Duration::from_secs(self.stats_ttl_secs)
    }
}

/// Platform directories for config, logs, and state.
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "spacebio", "spacebio")
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `SPACEBIO_`)
/// 3. Workspace-local config (`.spacebio/config.toml`)
/// 4. User config (`~/.config/spacebio/config.toml`) or the explicit `config_file`
/// 5. Built-in defaults
///
/// An explicit `config_file` must exist; the implicit locations are optional.
pub fn load_config(
    workspace: Option<&Path>,
    config_file: Option<&Path>,
    overrides: Option<&ClientConfig>,
) -> Result<ClientConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(ClientConfig::default()));

    match config_file {
        Some(path) => {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            figment = figment.merge(Toml::file_exact(path));
        }
        None => {
            if let Some(dirs) = project_dirs() {
                let user_config = dirs.config_dir().join("config.toml");
                if user_config.exists() {
                    figment = figment.merge(Toml::file(&user_config));
                }
            }
        }
    }

    if let Some(ws) = workspace {
        let ws_config = workspace_config_path(ws);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // SPACEBIO_API__BASE_URL, SPACEBIO_CACHE__STATS_TTL_SECS, etc.
    figment = figment.merge(Env::prefixed("SPACEBIO_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    figment.extract().map_err(|e| ConfigError::ParseError {
        message: e.to_string(),
    })
}

/// Path of the workspace-local config file.
pub fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(".spacebio").join("config.toml")
}

/// Write the default configuration to `.spacebio/config.toml` in `workspace`.
///
/// Returns `Ok(None)` when a config file already exists and was left untouched.
pub fn init_workspace_config(workspace: &Path) -> anyhow::Result<Option<PathBuf>> {
    let config_path = workspace_config_path(workspace);
    if config_path.exists() {
        return Ok(None);
    }
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(&ClientConfig::default())?;
    std::fs::write(&config_path, toml_str)?;
    Ok(Some(config_path))
}
