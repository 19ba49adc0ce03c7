//! Application configuration management.

use serde::Deserialize;

use crate::error::AppResult;
use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Cash and bank book configuration.
    #[serde(default)]
    pub books: BooksConfig,
    /// TDS computation configuration.
    #[serde(default)]
    pub tds: TdsConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Cash and bank book configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BooksConfig {
    /// Functional currency of the books.
    #[serde(default)]
    pub currency: Currency,
}

/// TDS computation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TdsConfig {
    /// Decimal places the withheld amount is rounded to.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

fn default_decimal_places() -> u32 {
    2
}

impl Default for TdsConfig {
    fn default() -> Self {
        Self {
            decimal_places: default_decimal_places(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "tripbooks=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AppError::Configuration`] if a source cannot be read
    /// or a value has the wrong type.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TRIPBOOKS").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
