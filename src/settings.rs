use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{OtpError, Result};
use crate::group::OtpConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_cells")]
    pub cells: usize,
    #[serde(default = "default_empty_char")]
    pub empty_char: char,
    /// Restore-only mode: no programmatic `set`. The empty char still
    /// applies in this mode.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub mask: bool,
}

fn default_cells() -> usize {
    6
}

fn default_empty_char() -> char {
    ' '
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cells: default_cells(),
            empty_char: default_empty_char(),
            strict: false,
            mask: false,
        }
    }
}

impl Settings {
    pub fn otp_config(&self) -> OtpConfig {
        let base = if self.strict {
            OtpConfig::strict()
        } else {
            OtpConfig::default()
        };
        OtpConfig {
            empty_char: self.empty_char,
            ..base
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("otpbox")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

fn load_settings_from(path: &std::path::Path) -> Settings {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable settings at {}: {e}", path.display());
            Settings::default()
        })
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    std::fs::create_dir_all(config_dir())?;
    save_settings_to(&settings_path(), settings)
}

fn save_settings_to(path: &std::path::Path, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| OtpError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
