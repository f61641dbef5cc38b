use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::config::{DatabaseConfig, LogConfig, MigrationsConfig};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logs: LogConfig,

    #[serde(default)]
    pub migrations: MigrationsConfig,
}

fn get_env_file_name() -> String {
    if let Ok(env_file) = std::env::var("RUNG_ENV_FILE") {
        return env_file;
    }
    match std::env::var("RUNG_ENV")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "dev" => ".env.dev".to_string(),
        "test" => ".env.test".to_string(),
        _ => ".env".to_string(),
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::from_filename(get_env_file_name()).ok();

        let settings = Config::builder()
            // RUNG__DATABASE__URL -> database.url
            .add_source(
                Environment::with_prefix("RUNG")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }
}
