use anyhow::Result;
use cadence_rfc::rfc::recurrence::timezone::resolve_tzid;
use chrono_tz::Tz;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[cfg(test)]
mod tests;

/// Prefix for environment overrides, e.g. `CADENCE__EVENT__TIMEZONE`.
pub const ENV_PREFIX: &str = "CADENCE";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub event: EventConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Event the recurrence lines belong to.
#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    /// IANA zone the event was authored in.
    pub timezone: String,
    pub all_day: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Sanitize lines for UTC-reinterpreting calendar providers.
    Export,
    /// Re-emit lines in canonical form in the event's zone.
    Normalize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub mode: OutputMode,
}

impl Settings {
    /// Builder preloaded with every default.
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default("event.timezone", "UTC")?
            .set_default("event.all_day", false)?
            .set_default("output.mode", "export")?)
    }

    /// ## Summary
    /// Loads configuration from `config.toml` and environment variables into a `Settings`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::defaults()?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Builds `Settings` from TOML text layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the text is not valid TOML or does not deserialize.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Resolves the configured event timezone.
    ///
    /// Accepts the same names as a TZID parameter: IANA zones, vendor-prefixed
    /// zones and common Windows zone names.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the name resolves to no known zone.
    pub fn event_timezone(&self) -> CoreResult<Tz> {
        resolve_tzid(&self.event.timezone).map_err(|e| {
            CoreError::ConfigError(format!("event timezone: {e}"))
        })
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(
        mode = ?settings.output.mode,
        timezone = %settings.event.timezone,
        "Loaded settings"
    );

    Ok(settings)
}
