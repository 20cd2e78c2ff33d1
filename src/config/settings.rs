//! Application configuration

use aether_bar_types::{parse_layout, BarLayout, IconTheme, KeyAdapter};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::defaults::{default_glyphs, default_slots};
use crate::transport::TransportMode;
use aether_bar_core::{DEFAULT_ENVELOPE_FIELD, DEFAULT_REQUEST_INTERVAL};

/// Application-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Version of the config format
    pub version: u32,
    /// Slot layout, kept as raw JSON so entry order and unknown fields survive a save
    pub slots: Value,
    pub transport: TransportConfig,
    /// Extra wire-name aliases for metric keys
    pub metric_keys: KeyAdapter,
    pub theme: IconTheme,
    /// Icon and symbol name to text glyph, used by the text renderer
    pub glyphs: HashMap<String, String>,
}

impl AppConfig {
    /// Load configuration from the platform config directory.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to the platform config directory
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "aether", "aether-bar")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// The slot layout in configuration order
    pub fn layout(&self) -> BarLayout {
        parse_layout(&self.slots)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            slots: default_slots(),
            transport: TransportConfig::default(),
            metric_keys: KeyAdapter::default(),
            theme: IconTheme::default(),
            glyphs: default_glyphs(),
        }
    }
}

/// Connection to the metrics collector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// `host:port` of the collector
    pub address: String,
    pub mode: TransportMode,
    /// Delay between a processed update and the next request in poll mode
    pub request_interval_ms: u64,
    /// Field an update payload may be nested under
    pub envelope: String,
}

impl TransportConfig {
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3001".to_string(),
            mode: TransportMode::Poll,
            request_interval_ms: DEFAULT_REQUEST_INTERVAL.as_millis() as u64,
            envelope: DEFAULT_ENVELOPE_FIELD.to_string(),
        }
    }
}
