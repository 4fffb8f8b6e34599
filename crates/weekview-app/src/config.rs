//! Application settings.

use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub source: SourceConfig,
    pub logging: LoggingConfig,
}

/// Where the raw ICS text comes from. The core has no opinion on the
/// origin; this binary supplies it from a local file.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional
    /// `config.toml`. Environment variables take precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it
    /// fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("source.path", "calendar.ics")?
            .set_default("logging.level", "info")?
            .add_source(
                config::Environment::with_prefix("WEEKVIEW")
                    .separator("__")
                    .ignore_empty(true),
            )
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
