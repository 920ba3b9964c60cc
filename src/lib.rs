use std::sync::OnceLock;

use models::settings::Settings;
use utils::errors::SettingsError;

pub mod game;
pub mod models;
pub mod tcp;
pub mod utils;

pub static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Stores the process-wide settings. Can only be done once.
pub fn init_settings(settings: Settings) -> Result<&'static Settings, SettingsError> {
    SETTINGS
        .set(settings)
        .map_err(|_| SettingsError::AlreadyInitialized)?;
    SETTINGS.get().ok_or(SettingsError::AlreadyInitialized)
}
