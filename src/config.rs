use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;
use serde_aux::prelude::deserialize_number_from_string;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub game: GameSettings,
    pub storage: StorageSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GameSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub turn_duration_seconds: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub tick_interval_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub next_turn_delay_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub minimum_players: usize,
    #[serde(default)]
    pub words_file: Option<String>,
}

impl GameSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_milliseconds)
    }

    pub fn next_turn_delay(&self) -> Duration {
        Duration::from_millis(self.next_turn_delay_milliseconds)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            turn_duration_seconds: 60,
            tick_interval_milliseconds: 1000,
            next_turn_delay_milliseconds: 100,
            minimum_players: 2,
            words_file: None,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct StorageSettings {
    pub directory: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub history_limit: usize,
}

impl Config {
    pub fn get() -> Result<Config, ConfigError> {
        let base_path = std::env::current_dir().map_err(|error| {
            ConfigError::Message(format!(
                "Failed to determine the current directory. Error: '{error}'."
            ))
        })?;
        let configuration_directory = base_path.join("config");

        let environment: Environment = std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| DEV.to_string())
            .try_into()
            .map_err(ConfigError::Message)?;

        let environment_filename = format!("{}.yaml", environment.as_str());

        let config = config::Config::builder()
            .add_source(config::File::from(
                configuration_directory.join("base.yaml"),
            ))
            .add_source(config::File::from(
                configuration_directory.join(environment_filename),
            ))
            // E.g. `APP__GAME__TURN_DURATION_SECONDS=30` sets `game.turn_duration_seconds`
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize::<Config>()
    }
}

#[derive(Debug, PartialEq)]
enum Environment {
    Dev,
    Prod,
}

const DEV: &str = "dev";
const PROD: &str = "prod";

impl Environment {
    fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => DEV,
            Environment::Prod => PROD,
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(string: String) -> Result<Self, Self::Error> {
        match string.to_lowercase().as_str() {
            DEV => Ok(Self::Dev),
            PROD => Ok(Self::Prod),
            other => Err(format!(
                "{other} is not a supported environment. Use either `{DEV}` or `{PROD}`.",
            )),
        }
    }
}
