//! Application configuration

use crate::prefs::{ImagePosition, DEFAULT_THUMBNAIL_SIZE};
use crate::AppError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub viewer: ViewerConfig,
    pub filer: FilerConfig,
    pub monitor: MonitorConfig,
    pub keybindings: HashMap<String, Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            viewer: ViewerConfig::default(),
            filer: FilerConfig::default(),
            monitor: MonitorConfig::default(),
            keybindings: default_keybindings(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Reopen the last directory on start
    pub restore_last_directory: bool,
    /// Days to keep rotated log files
    pub log_retention_days: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            restore_last_directory: true,
            log_retention_days: 7,
        }
    }
}

/// Defaults used until the user changes them (stored values win)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub thumbnail_size: u32,
    pub image_position: ImagePosition,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            image_position: ImagePosition::Center,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilerConfig {
    /// Digit runs in names compare numerically
    pub natural_sort: bool,
    /// Persist the sort order alongside the display preferences
    pub remember_sort: bool,
    pub confirm_delete: bool,
    pub use_recycle_bin: bool,
}

impl Default for FilerConfig {
    fn default() -> Self {
        Self {
            natural_sort: false,
            remember_sort: false,
            confirm_delete: true,
            use_recycle_bin: true,
        }
    }
}

/// USD/JPY monitor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub endpoint: String,
    /// Seconds between polls (raised to the minimum when lower)
    pub interval_secs: u64,
    /// Yen change that counts as sudden
    pub threshold: f64,
    pub request_timeout_secs: u64,
    pub history_limit: usize,
    pub chart_limit: usize,
    pub beep: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://open.er-api.com/v6/latest/USD".to_string(),
            interval_secs: 60,
            threshold: 0.5,
            request_timeout_secs: 10,
            history_limit: 100,
            chart_limit: 20,
            beep: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the platform location
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `config_path`, defaults when absent
    pub fn load_from(config_path: &Path) -> Result<Self, AppError> {
        if !config_path.exists() {
            tracing::info!("Using default configuration");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", config_path.display(), e)))?;
        tracing::info!("Configuration loaded from {:?}", config_path);
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "PixShelf", "PixShelf")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

fn default_keybindings() -> HashMap<String, Vec<String>> {
    let mut kb = HashMap::new();

    // Full-size view
    kb.insert("nav.next_item".into(), vec!["ArrowRight".into()]);
    kb.insert("nav.prev_item".into(), vec!["ArrowLeft".into()]);
    kb.insert("view.close".into(), vec!["Escape".into()]);

    // Thumbnail crop anchor
    kb.insert("view.position:top".into(), vec!["Meta+t".into()]);
    kb.insert("view.position:center".into(), vec!["Meta+c".into()]);
    kb.insert("view.position:bottom".into(), vec!["Meta+b".into()]);

    kb
}
