use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{DEFAULT_CONFLICT_HORIZON_WEEKS, DEFAULT_PAGE_LIMIT};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub schedule: ScheduleConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Weeks after `dtstart` checked for conflicts when a recurring class has no `until`.
    pub conflict_horizon_weeks: u32,
    /// Page size used by listings when nothing matched and no limit was given.
    pub default_page_limit: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            conflict_horizon_weeks: DEFAULT_CONFLICT_HORIZON_WEEKS,
            default_page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `CLASSBOOK_`-prefixed environment variables and an
    /// optional `config.toml` into a `Settings`. File values take precedence.
    ///
    /// Nested keys use a double underscore, e.g.
    /// `CLASSBOOK_SCHEDULE__CONFLICT_HORIZON_WEEKS=12`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::load_from(environment())
    }

    /// Loads configuration with `env` as the environment source.
    fn load_from(env: config::Environment) -> Result<Self> {
        Ok(Config::builder()
            .set_default(
                "schedule.conflict_horizon_weeks",
                i64::from(DEFAULT_CONFLICT_HORIZON_WEEKS),
            )?
            .set_default(
                "schedule.default_page_limit",
                u64::try_from(DEFAULT_PAGE_LIMIT)?,
            )?
            .set_default("logging.level", "info")?
            // Env file
            .add_source(env)
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// `CLASSBOOK_`-prefixed environment variables, `__` between nested keys.
fn environment() -> config::Environment {
    config::Environment::with_prefix("CLASSBOOK")
        .prefix_separator("_")
        .convert_case(config::Case::Snake)
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
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
