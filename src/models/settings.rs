use config::{Config, Environment, File, Source};
use serde::Deserialize;

use crate::utils::errors::SettingsError;
use crate::utils::logger::LogLevel;

/// How `CreatureTakesDamageEvent` changes a card's health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum DamagePolicy {
    /// Subtract exactly one health point, whatever the event carries.
    #[default]
    FixedDecrement,
    /// Subtract the damage amount carried by the event.
    CarriedAmount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_address: String,
    pub hand_size: usize,
    pub board_size: usize,
    pub log_level: LogLevel,
    pub damage_policy: DamagePolicy,
}

impl Settings {
    /// Loads settings from the defaults, an optional `Settings.toml` and `CCG_*` environment variables,
    /// each overriding the previous one.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(
            File::with_name("Settings").required(false),
            Environment::with_prefix("CCG").try_parsing(true),
        )
    }

    fn load_from<S>(file: S, environment: Environment) -> Result<Self, SettingsError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("server_address", "127.0.0.1:9001")?
            .set_default("hand_size", 10)?
            .set_default("board_size", 12)?
            .set_default("log_level", "INFO")?
            .set_default("damage_policy", "FixedDecrement")?
            .add_source(file)
            .add_source(environment)
            .build()?;

        Ok(settings.try_deserialize::<Settings>()?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1:9001".to_string(),
            hand_size: 10,
            board_size: 12,
            log_level: LogLevel::Info,
            damage_policy: DamagePolicy::FixedDecrement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.hand_size, 10);
        assert_eq!(settings.board_size, 12);
        assert_eq!(settings.damage_policy, DamagePolicy::FixedDecrement);
    }

    #[test]
    fn test_deserialize_settings_document() {
        let raw = r#"{
            "server_address": "10.0.0.2:9001",
            "hand_size": 8,
            "board_size": 6,
            "log_level": "DEBUG",
            "damage_policy": "CarriedAmount"
        }"#;
        let settings: Settings = serde_json::from_str(raw).unwrap();
        assert_eq!(settings.server_address, "10.0.0.2:9001");
        assert_eq!(settings.hand_size, 8);
        assert_eq!(settings.board_size, 6);
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert_eq!(settings.damage_policy, DamagePolicy::CarriedAmount);
    }

    #[test]
    fn test_load_layers_file_then_environment() {
        let file = File::from_str(
            "hand_size = 8\nboard_size = 6\nlog_level = \"DEBUG\"",
            config::FileFormat::Toml,
        );
        let environment = Environment::with_prefix("CCG")
            .try_parsing(true)
            .source(Some(config::Map::from([
                ("CCG_BOARD_SIZE".to_string(), "4".to_string()),
                ("CCG_DAMAGE_POLICY".to_string(), "CarriedAmount".to_string()),
            ])));

        let settings = Settings::load_from(file, environment).unwrap();

        assert_eq!(settings.server_address, "127.0.0.1:9001");
        assert_eq!(settings.hand_size, 8);
        assert_eq!(settings.board_size, 4);
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert_eq!(settings.damage_policy, DamagePolicy::CarriedAmount);
    }

    #[test]
    fn test_load_with_nothing_configured_gives_defaults() {
        let file = File::from_str("", config::FileFormat::Toml);
        let environment = Environment::with_prefix("CCG").source(Some(config::Map::new()));

        let settings = Settings::load_from(file, environment).unwrap();

        assert_eq!(settings.server_address, Settings::default().server_address);
        assert_eq!(settings.hand_size, 10);
        assert_eq!(settings.board_size, 12);
        assert_eq!(settings.log_level, LogLevel::Info);
        assert_eq!(settings.damage_policy, DamagePolicy::FixedDecrement);
    }
}
