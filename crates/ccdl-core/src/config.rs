use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::download::DEFAULT_LOCALE;
use crate::resolver::DEFAULT_MAX_WORKERS;

pub const DEFAULT_BASE_URL: &str = "https://customerconnect.vmware.com";

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/ccdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CcdlConfig {
    /// Root of the vendor portal; API paths are appended to it.
    pub base_url: String,
    /// Upper bound on concurrent catalog reads while building an index.
    pub max_parallel_fetches: usize,
    pub connect_timeout_secs: u64,
    /// Whole-request timeout for catalog calls (not file transfers).
    pub timeout_secs: u64,
    /// Locale sent with download payloads.
    pub locale: String,
    /// Netscape-format cookie jar of an established portal session.
    #[serde(default)]
    pub cookie_file: Option<PathBuf>,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for CcdlConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_parallel_fetches: DEFAULT_MAX_WORKERS,
            connect_timeout_secs: 15,
            timeout_secs: 60,
            locale: DEFAULT_LOCALE.to_string(),
            cookie_file: None,
            retry: None,
        }
    }
}

impl CcdlConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ccdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CcdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CcdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CcdlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
