//! Settings persistence
//!
//! Saves and loads [`ClientSettings`] to/from a JSON file.
//!
//! # File Location
//!
//! Settings live in `settings.json` in the user's configuration directory,
//! e.g. `~/.config/chess-capture/settings.json` on Linux. When no config
//! directory can be resolved, `./settings.json` is used instead.
//!
//! # Error Handling
//!
//! [`load_settings`] never fails: read or parse errors are logged and the
//! defaults are used. The explicit-path variants [`load_settings_from`] and
//! [`save_settings_to`] return [`CoreResult`] for callers that care.

use crate::core::error::CoreResult;
use crate::core::settings::ClientSettings;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Resolve the default settings file path
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "chess-capture", "ChessCapture") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Read and parse settings from `path`
pub fn load_settings_from(path: &Path) -> CoreResult<ClientSettings> {
    let contents = fs::read_to_string(path)?;
    let settings = serde_json::from_str::<ClientSettings>(&contents)?;
    settings.validate()?;
    Ok(settings)
}

/// Write settings to `path`, creating parent directories as needed
pub fn save_settings_to(settings: &ClientSettings, path: &Path) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load settings from `path` (or the default location), falling back to defaults
pub fn load_settings(path: Option<&Path>) -> ClientSettings {
    let settings_path = path.map(Path::to_path_buf).unwrap_or_else(settings_path);

    if !settings_path.exists() {
        info!(
            "[SETTINGS] No settings file found at {:?}. Using defaults.",
            settings_path
        );
        return ClientSettings::default();
    }

    match load_settings_from(&settings_path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", settings_path);
            settings
        }
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                settings_path, e
            );
            ClientSettings::default()
        }
    }
}

/// Save settings to `path` (or the default location), logging the result
pub fn save_settings(settings: &ClientSettings, path: Option<&Path>) -> bool {
    let settings_path = path.map(Path::to_path_buf).unwrap_or_else(settings_path);
    match save_settings_to(settings, &settings_path) {
        Ok(()) => {
            info!("[SETTINGS] Saved settings to {:?}", settings_path);
            true
        }
        Err(e) => {
            error!(
                "[SETTINGS] Failed to save settings to {:?}: {}",
                settings_path, e
            );
            false
        }
    }
}
