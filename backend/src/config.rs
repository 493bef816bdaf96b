//! Configuration management for the planting advisor
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with PLANTING_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::Language;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather and geocoding provider configuration
    pub weather: WeatherConfig,

    /// Reference catalog configuration
    pub catalog: CatalogConfig,

    /// Advice request defaults
    pub advice: AdviceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Daily forecast API endpoint
    pub api_endpoint: String,

    /// Geocoding API endpoint
    pub geocoding_endpoint: String,

    /// Provider API key
    pub api_key: String,

    /// Language for weather descriptions
    pub language: Language,

    /// Per-request timeout
    pub timeout_seconds: u64,

    /// How long provider responses are reused
    pub cache_ttl_seconds: u64,

    /// Maximum entries held by each response cache
    pub cache_capacity: u64,

    /// Decimal places coordinates are rounded to for cache keys
    pub coordinate_precision: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Path to the vegetable reference table (CSV)
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdviceConfig {
    /// Forecast length when a request does not specify one
    pub default_days: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("PLANTING_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.geocoding_endpoint", "https://api.openweathermap.org/geo/1.0")?
            .set_default("weather.api_key", "")?
            .set_default("weather.language", "japanese")?
            .set_default("weather.timeout_seconds", 10)?
            .set_default("weather.cache_ttl_seconds", 3600)?
            .set_default("weather.cache_capacity", 10_000)?
            .set_default("weather.coordinate_precision", 2)?
            .set_default("catalog.path", "data/vegetables.csv")?
            .set_default("advice.default_days", 7)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PLANTING_ prefix)
            .add_source(
                Environment::with_prefix("PLANTING")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
impl WeatherConfig {
    /// Provider settings pointing both endpoints at one local server
    pub(crate) fn for_endpoint(endpoint: &str) -> Self {
        Self {
            api_endpoint: endpoint.to_string(),
            geocoding_endpoint: endpoint.to_string(),
            api_key: "test-key".to_string(),
            language: Language::Japanese,
            timeout_seconds: 2,
            cache_ttl_seconds: 60,
            cache_capacity: 100,
            coordinate_precision: 2,
        }
    }
}
