//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file
//! (`config.toml` in the platform config dir, or an explicit path), then
//! environment variables (a `.env` file is honoured through `dotenvy`). CLI
//! flags are applied last by the caller.
//!
//! ```toml
//! api_key = "sk-..."
//! endpoint = "https://api.openai.com/v1/chat/completions"
//! model = "gpt-3.5-turbo"
//! max_tokens = 500
//! temperature = 0.7
//! request_timeout_ms = 30000
//! fallback_delay_ms = 2000
//! highlight_color = "#90EE90"
//! highlight_bold = true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::model::types::{CellStyle, DEFAULT_HIGHLIGHT};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_FALLBACK_DELAY_MS: u64 = 2_000;

/// Settings for the completion client, the fallback source and write-back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credential for the completion endpoint. Absent means the fallback source.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub request_timeout_ms: u64,
    /// Simulated latency of the fallback source.
    pub fallback_delay_ms: u64,
    pub highlight_color: String,
    pub highlight_bold: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            fallback_delay_ms: DEFAULT_FALLBACK_DELAY_MS,
            highlight_color: DEFAULT_HIGHLIGHT.to_string(),
            highlight_bold: true,
        }
    }
}

impl Config {
    /// Defaults, the config file (explicit path or the platform default if it
    /// exists), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.is_file() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        cfg.apply_env();
        Ok(cfg)
    }

    /// Parse a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(cfg)
    }

    /// Overlay environment variables onto the current values.
    pub fn apply_env(&mut self) {
        if let Some(key) = env_value("COMPANY_SEARCH_API_KEY") {
            self.api_key = Some(key);
        } else if self.credential().is_none()
            && let Some(key) = env_value("OPENAI_API_KEY")
        {
            self.api_key = Some(key);
        }

        if let Some(url) = env_value("COMPANY_SEARCH_ENDPOINT") {
            self.endpoint = url;
        }

        if let Some(model) = env_value("COMPANY_SEARCH_MODEL") {
            self.model = model;
        }

        if let Some(val) = env_value("COMPANY_SEARCH_MAX_TOKENS")
            && let Ok(n) = val.trim().parse::<u32>()
        {
            self.max_tokens = n;
        }

        if let Some(val) = env_value("COMPANY_SEARCH_TEMPERATURE")
            && let Ok(t) = val.trim().parse::<f32>()
        {
            self.temperature = t;
        }

        if let Some(val) = env_value("COMPANY_SEARCH_TIMEOUT_MS")
            && let Ok(ms) = val.trim().parse::<u64>()
        {
            self.request_timeout_ms = ms;
        }

        if let Some(val) = env_value("COMPANY_SEARCH_FALLBACK_DELAY_MS")
            && let Ok(ms) = val.trim().parse::<u64>()
        {
            self.fallback_delay_ms = ms;
        }

        if let Some(color) = env_value("COMPANY_SEARCH_HIGHLIGHT") {
            self.highlight_color = color;
        }
    }

    /// The credential if one is set and not blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }

    pub fn highlight_style(&self) -> CellStyle {
        CellStyle {
            fill_color: self.highlight_color.clone(),
            bold: self.highlight_bold,
        }
    }
}

/// A variable's value, unless it is unset or blank.
fn env_value(key: &str) -> Option<String> {
    dotenvy::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// `<config dir>/company-search/config.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "company-search", "company-search")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
