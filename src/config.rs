//! Configuration file support for the floor-plan annotator.
//!
//! Editor settings (log level, history limit, auto-save timing, keybindings
//! and the opacity policy) can be exported to and imported from JSON, and
//! are persisted to the user's config directory on native targets or to
//! localStorage in the browser.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_HISTORY_LIMIT;
use crate::editor::style::OpacityPolicy;
use crate::error::ConfigError;
use crate::keybindings::KeyBindings;

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Log level setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Auto-save timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoSavePreferences {
    pub enabled: bool,
    /// Quiet time after the latest edit before saving
    pub debounce_secs: u64,
    /// Minimum time between saves
    pub interval_secs: u64,
}

impl Default for AutoSavePreferences {
    fn default() -> Self {
        Self {
            enabled: false,
            debounce_secs: 2,
            interval_secs: 30,
        }
    }
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Number of undoable edits kept; older ones are dropped
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default)]
    pub auto_save: AutoSavePreferences,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            history_limit: default_history_limit(),
            auto_save: AutoSavePreferences::default(),
        }
    }
}

/// Editor configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Version of the configuration file format
    pub version: u32,

    #[serde(default)]
    pub preferences: EditorPreferences,

    #[serde(default)]
    pub keybindings: KeyBindings,

    /// Mask fill opacity per emphasis class
    #[serde(default)]
    pub opacity: OpacityPolicy,
}

impl EditorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: EditorPreferences::default(),
            keybindings: KeyBindings::default(),
            opacity: OpacityPolicy::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Set the global log level from the preferences.
    pub fn apply_log_level(&self) {
        let level = self.preferences.log_level;
        log::set_max_level(level.to_level_filter());
        log::debug!("Log level set to {}", level.name());
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "config.json"
    }

    /// Get the default config file path for auto-load/save.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        let base =
            dirs::config_dir().or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;
        Some(base.join("floorplan-annotator").join(Self::default_filename()))
    }

    /// Load configuration from a file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save configuration to a file, creating parent directories.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        Self::load_if_present(&Self::default_path()?)
    }

    /// Load configuration from `path`, logging instead of failing.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_if_present(path: &std::path::Path) -> Option<Self> {
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_path(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {:?}", path);
                Some(config)
            }
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        self.save_to_path(&Self::default_path_or_err()?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn default_path_or_err() -> Result<std::path::PathBuf, ConfigError> {
        Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })
    }

    /// LocalStorage key for WASM config persistence.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "floorplan-annotator-config";

    /// Try to load configuration from localStorage (WASM only).
    /// Returns None if not found or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No config found in localStorage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }

    /// Save configuration to localStorage (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn save_to_local_storage(&self) -> Result<(), ConfigError> {
        let window = web_sys::window()
            .ok_or_else(|| ConfigError::StorageError("No window object available".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| ConfigError::StorageError(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| ConfigError::StorageError("localStorage not available".to_string()))?;

        storage
            .set_item(Self::LOCALSTORAGE_KEY, &self.to_json()?)
            .map_err(|e| {
                ConfigError::StorageError(format!("Failed to save to localStorage: {:?}", e))
            })?;

        log::info!("Saved configuration to localStorage");
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::{KeyCode, KeyCombo, Shortcut};

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.preferences.history_limit, DEFAULT_HISTORY_LIMIT);
        assert!(!config.preferences.auto_save.enabled);
        assert_eq!(config.preferences.log_level, LogLevel::Info);
    }

    #[test]
    fn test_json_roundtrip_with_custom_values() {
        let mut config = EditorConfig::new();
        config.preferences.history_limit = 5;
        config.preferences.log_level = LogLevel::Debug;
        config.opacity.focused = 1.0;
        config
            .keybindings
            .set_binding(Shortcut::Save, KeyCombo::key(KeyCode::F));

        let json = config.to_json().expect("serialize");
        assert!(json.contains("\"debug\""));
        let parsed = EditorConfig::from_json(&json).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{"version": 1, "preferences": {"history_limit": 3}}"#;
        let parsed = EditorConfig::from_json(json).expect("parse partial config");
        assert_eq!(parsed.preferences.history_limit, 3);
        assert_eq!(parsed.keybindings, KeyBindings::default());
        assert_eq!(parsed.opacity, OpacityPolicy::default());
    }

    #[test]
    fn test_version_too_new() {
        let json = format!(r#"{{"version": {}}}"#, CONFIG_VERSION + 1);
        assert!(matches!(
            EditorConfig::from_json(&json),
            Err(ConfigError::VersionTooNew { .. })
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            EditorConfig::from_json("{not json"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_apply_log_level() {
        let previous = log::max_level();
        let mut config = EditorConfig::new();
        config.preferences.log_level = LogLevel::Trace;
        config.apply_log_level();
        let applied = log::max_level();
        log::set_max_level(previous);
        assert_eq!(applied, log::LevelFilter::Trace);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_and_load_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("sub").join("config.json");
        let mut config = EditorConfig::new();
        config.preferences.auto_save.enabled = true;

        config.save_to_path(&path).expect("save");
        let loaded = EditorConfig::load_from_path(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_default_path_ends_with_app_dir() {
        if let Some(path) = EditorConfig::default_path() {
            assert!(path.ends_with("floorplan-annotator/config.json"));
            let resolved = EditorConfig::default_path_or_err().expect("config dir known");
            assert_eq!(resolved, path);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_if_present() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("floorplan-annotator").join("config.json");
        assert_eq!(EditorConfig::load_if_present(&path), None);

        let mut config = EditorConfig::new();
        config.preferences.history_limit = 7;
        config.save_to_path(&path).expect("save");
        assert_eq!(EditorConfig::load_if_present(&path), Some(config));

        std::fs::write(&path, "{broken").expect("overwrite");
        assert_eq!(EditorConfig::load_if_present(&path), None);
    }
}
