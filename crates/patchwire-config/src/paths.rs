//! Platform-specific settings locations.
//!
//! - Linux: `~/.config/patchwire/settings.toml`
//! - macOS: `~/Library/Application Support/patchwire/settings.toml`
//! - Windows: `%APPDATA%\patchwire\settings.toml`

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "patchwire";

/// File name of the settings file inside [`user_config_dir`].
pub const SETTINGS_FILE: &str = "settings.toml";

/// Returns the user-specific configuration directory.
///
/// Falls back to the current directory if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the default settings file.
pub fn default_settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}
