use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/rowpost/config.toml`.
///
/// Supplies defaults for the request shape and status cadence; command-line
/// flags override every field per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowpostConfig {
    /// Default HTTP request method.
    pub http_method: String,
    /// Default `Accept` header value; empty disables the header.
    pub http_accept_type: String,
    /// Default `Content-Type` header value; empty disables the header.
    #[serde(default)]
    pub http_content_type: String,
    /// Default rows between periodic status lines.
    pub tick: i64,
    /// Default whole-request timeout in seconds (0 = no timeout).
    #[serde(default)]
    pub timeout_secs: u64,
}

impl Default for RowpostConfig {
    fn default() -> Self {
        Self {
            http_method: "POST".to_string(),
            http_accept_type: "*/*".to_string(),
            http_content_type: String::new(),
            tick: 1000,
            timeout_secs: 0,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rowpost")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RowpostConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RowpostConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: RowpostConfig = toml::from_str(&data)?;
    Ok(cfg)
}
