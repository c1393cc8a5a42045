use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DoormanError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Fill colour behind every screen, as `#rrggbb`.
    #[serde(default = "default_background")]
    pub background: String,
    /// Colour for links and icons, as `#rrggbb`.
    #[serde(default = "default_accent")]
    pub accent: String,
    /// Used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_background() -> String {
    "#312e38".to_string()
}

fn default_accent() -> String {
    "#ff9000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background: default_background(),
            accent: default_accent(),
            log_level: default_log_level(),
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("doorman")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn log_dir() -> PathBuf {
    config_dir().join("logs")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Missing or unreadable files fall back to defaults; missing keys fall back
/// per field.
pub fn load_settings_from(path: &Path) -> Settings {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path())
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| DoormanError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
