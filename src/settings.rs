use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::theme::ThemePreset;

const DEFAULT_THEME: &str = "dark";
const MIN_SIDEBAR_WIDTH: u16 = 16;
const MAX_SIDEBAR_WIDTH: u16 = 60;
const DEFAULT_SIDEBAR_WIDTH: u16 = 24;

/// Defaults read from `settings.toml`. Runtime toggles (theme flag, sidebar
/// visibility) persist to the key-value store, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: String,
    pub sidebar_width: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("taskdeck");
        path.push("settings.toml");
        Some(path)
    }

    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        Self::load_from_path(&path)
    }

    fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(mut settings) => {
                    settings.validate();
                    settings
                }
                Err(error) => {
                    warn!(
                        "failed to parse settings config '{}': {}",
                        path.display(),
                        error
                    );
                    Self::default()
                }
            },
            Err(error) => {
                warn!(
                    "failed to read settings config '{}': {}",
                    path.display(),
                    error
                );
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path().ok_or_else(|| anyhow!("unable to determine config path"))?;
        self.save_to_path(&path)
    }

    fn save_to_path(&self, path: &Path) -> anyhow::Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow!("invalid settings config path"))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory '{}'", parent.display()))?;

        let mut validated = self.clone();
        validated.validate();
        let contents =
            toml::to_string_pretty(&validated).context("failed to serialize settings to TOML")?;

        let file_name = path
            .file_name()
            .ok_or_else(|| anyhow!("invalid settings config file name"))?
            .to_string_lossy()
            .to_string();
        let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

        fs::write(&tmp_path, contents).with_context(|| {
            format!(
                "failed to write temporary settings file '{}'",
                tmp_path.display()
            )
        })?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "failed to atomically rename settings file '{}' to '{}'",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }

    pub fn theme_preset(&self) -> ThemePreset {
        ThemePreset::from_str(&self.theme).unwrap_or_default()
    }

    /// Applies `delta` to the sidebar width, clamped to the valid range.
    pub fn adjust_sidebar_width(&mut self, delta: i16) {
        self.sidebar_width = self.sidebar_width.saturating_add_signed(delta);
        self.validate();
    }

    fn validate(&mut self) {
        self.sidebar_width = self
            .sidebar_width
            .clamp(MIN_SIDEBAR_WIDTH, MAX_SIDEBAR_WIDTH);

        self.theme = match ThemePreset::from_str(&self.theme) {
            Ok(preset) => preset.as_str().to_string(),
            Err(()) => {
                warn!(
                    "invalid theme '{}' in settings config; falling back to {}",
                    self.theme, DEFAULT_THEME
                );
                DEFAULT_THEME.to_string()
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_file_path(temp_dir: &TempDir) -> PathBuf {
        temp_dir.path().join("taskdeck").join("settings.toml")
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.sidebar_width, 24);
        assert_eq!(settings.theme_preset(), ThemePreset::Dark);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = settings_file_path(&temp_dir);
        let settings = Settings::load_from_path(&path);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_malformed_toml() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = settings_file_path(&temp_dir);
        fs::create_dir_all(path.parent().expect("settings path should have parent"))
            .expect("failed to create config dir");
        fs::write(&path, "theme = \"light\"\nsidebar_width = [invalid")
            .expect("failed to write malformed settings");

        let settings = Settings::load_from_path(&path);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_partial_toml() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = settings_file_path(&temp_dir);
        fs::create_dir_all(path.parent().expect("settings path should have parent"))
            .expect("failed to create config dir");
        fs::write(&path, "theme = \"light\"").expect("failed to write partial settings");

        let settings = Settings::load_from_path(&path);
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.sidebar_width, DEFAULT_SIDEBAR_WIDTH);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = settings_file_path(&temp_dir);
        let mut expected = Settings {
            theme: "light".to_string(),
            sidebar_width: 30,
        };
        expected.validate();

        expected
            .save_to_path(&path)
            .expect("failed to save settings for roundtrip test");
        let loaded = Settings::load_from_path(&path);

        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_adjust_sidebar_width_clamps_both_ends() {
        let mut settings = Settings::default();

        settings.adjust_sidebar_width(2);
        assert_eq!(settings.sidebar_width, DEFAULT_SIDEBAR_WIDTH + 2);

        settings.adjust_sidebar_width(500);
        assert_eq!(settings.sidebar_width, MAX_SIDEBAR_WIDTH);

        settings.adjust_sidebar_width(-500);
        assert_eq!(settings.sidebar_width, MIN_SIDEBAR_WIDTH);
    }

    #[test]
    fn test_adjusted_width_survives_save_and_load() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = settings_file_path(&temp_dir);

        let mut settings = Settings::default();
        settings.adjust_sidebar_width(6);
        settings
            .save_to_path(&path)
            .expect("failed to save adjusted settings");

        let loaded = Settings::load_from_path(&path);
        assert_eq!(loaded.sidebar_width, DEFAULT_SIDEBAR_WIDTH + 6);
    }

    #[test]
    fn test_validate_clamps_sidebar_width() {
        let mut settings = Settings {
            theme: "dark".to_string(),
            sidebar_width: 999,
        };
        settings.validate();
        assert_eq!(settings.sidebar_width, MAX_SIDEBAR_WIDTH);

        settings.sidebar_width = 1;
        settings.validate();
        assert_eq!(settings.sidebar_width, MIN_SIDEBAR_WIDTH);
    }

    #[test]
    fn test_validate_invalid_theme_falls_back() {
        let mut settings = Settings {
            theme: "retro-wave".to_string(),
            ..Settings::default()
        };
        settings.validate();
        assert_eq!(settings.theme, "dark");
    }

    #[test]
    fn test_validate_day_alias() {
        let mut settings = Settings {
            theme: "day".to_string(),
            ..Settings::default()
        };
        settings.validate();
        assert_eq!(settings.theme, "light");
    }

    #[test]
    fn test_atomic_write_creates_dirs() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = settings_file_path(&temp_dir);

        let settings = Settings {
            theme: "light".to_string(),
            ..Settings::default()
        };
        settings
            .save_to_path(&path)
            .expect("failed to save settings to nested path");

        assert!(path.exists());
    }
}
