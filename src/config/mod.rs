use config::{Config, ConfigError};
use once_cell::sync::Lazy;
use rocket::serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct DbConfig {
    pub location: String,
}

/// config properties for where uploads land and how they're addressed publicly
#[derive(Deserialize, Clone)]
pub struct StorageConfig {
    pub location: String,
    #[serde(rename = "publicurl")]
    pub public_url: String,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone)]
pub struct MoodboardConfig {
    pub database: DbConfig,
    pub storage: StorageConfig,
}

/// Parses the config file located at ./MoodboardServer.toml, if it exists.
/// If this fails to parse the file, the application will panic
pub fn parse_config() -> MoodboardConfig {
    let builder = Config::builder()
        .add_source(config::File::with_name("./MoodboardServer.toml"))
        .build();
    // some errors are fine, such as not found
    if let Err(ConfigError::Foreign(e)) = builder {
        let message = e.to_string();
        if message.contains("not found") {
            log::warn!("No config file found. Continuing startup...");
            return MB_CONFIG_DEFAULT.clone();
        }
        panic!("Failed to parse config file. Exception is {e}");
        // basically everything else is unrecoverable, though
    } else if let Err(e) = builder {
        log::error!("Failed to parse config file. Exception is {e}");
        panic!("Failed to parse config file. Exception is {e}");
    }
    let settings = builder.unwrap();
    settings
        .try_deserialize()
        .unwrap_or(MB_CONFIG_DEFAULT.clone())
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static MOODBOARD_CONFIG: Lazy<MoodboardConfig> = Lazy::new(parse_config);
static MB_CONFIG_DEFAULT: Lazy<MoodboardConfig> = Lazy::new(|| MoodboardConfig {
    database: DbConfig {
        location: "./db.sqlite".to_string(),
    },
    storage: StorageConfig {
        location: "./uploads".to_string(),
        public_url: "http://localhost:8000/uploads".to_string(),
    },
});
