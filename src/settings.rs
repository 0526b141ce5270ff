use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

const APP_SENTINEL: &str = "reels";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/videos";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "_app")]
    pub app: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// "dark" or "light"; detected from the terminal when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_page_skips: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefetch_distance: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preload_ahead: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_dwell_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_threshold: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: APP_SENTINEL.to_string(),
            endpoint: None,
            theme: None,
            max_page_skips: None,
            prefetch_distance: None,
            preload_ahead: None,
            min_dwell_ms: None,
            visible_threshold: None,
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize settings")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.app != APP_SENTINEL {
            bail!(
                "Settings file appears to belong to another application (expected _app = '{}', found '{}')",
                APP_SENTINEL,
                self.app
            );
        }
        if let Some(threshold) = self.visible_threshold
            && !(threshold > 0.0 && threshold <= 1.0)
        {
            bail!("visible_threshold must be in (0, 1], found {threshold}");
        }
        if let Some(theme) = &self.theme
            && theme != "dark"
            && theme != "light"
        {
            bail!("theme must be 'dark' or 'light', found '{theme}'");
        }
        if self.request_timeout_secs == Some(0) {
            bail!("request_timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// Resolve the runtime feed configuration. `endpoint` overrides the file.
    pub fn feed_config(&self, endpoint: Option<&str>) -> FeedConfig {
        let defaults = FeedConfig::default();
        FeedConfig {
            endpoint: endpoint
                .map(str::to_string)
                .or_else(|| self.endpoint.clone())
                .unwrap_or(defaults.endpoint),
            max_page_skips: self.max_page_skips.unwrap_or(defaults.max_page_skips),
            prefetch_distance: self
                .prefetch_distance
                .unwrap_or(defaults.prefetch_distance)
                .max(1),
            preload_ahead: self.preload_ahead.unwrap_or(defaults.preload_ahead),
            min_dwell: self
                .min_dwell_ms
                .map_or(defaults.min_dwell, Duration::from_millis),
            visible_threshold: self
                .visible_threshold
                .unwrap_or(defaults.visible_threshold),
            request_timeout: self
                .request_timeout_secs
                .map_or(defaults.request_timeout, Duration::from_secs),
        }
    }
}

/// Effective feed behaviour after merging defaults, settings and flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedConfig {
    pub endpoint: String,
    /// All-duplicate pages skipped per load before giving up.
    pub max_page_skips: u32,
    /// Load more once the current reel is this close to the end.
    pub prefetch_distance: usize,
    /// Reels after the current one whose media is probed early.
    pub preload_ahead: usize,
    #[serde(with = "millis")]
    pub min_dwell: Duration,
    pub visible_threshold: f32,
    #[serde(with = "millis")]
    pub request_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_page_skips: 8,
            prefetch_distance: 1,
            preload_ahead: 1,
            min_dwell: Duration::from_millis(300),
            visible_threshold: 0.5,
            request_timeout: Duration::from_secs(10),
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }
}

pub fn config_dir(custom: Option<&PathBuf>) -> Option<PathBuf> {
    custom
        .cloned()
        .or_else(|| dirs::home_dir().map(|p| p.join(".config").join("reels")))
}

pub fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join("settings.toml")
}

pub fn log_path(config_dir: &Path) -> PathBuf {
    config_dir.join("reels.log")
}
