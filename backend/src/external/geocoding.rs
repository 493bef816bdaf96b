//! Geocoding API client
//!
//! Resolves free-text place names through the OpenWeatherMap geocoding API.
//! Only the first provider-ranked match is used.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{GpsCoordinates, Language, Location};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Geocoding API client
#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    api_key: String,
    base_url: String,
    language: Language,
}

/// One entry of the geocoding response array
#[derive(Debug, Deserialize)]
struct OWMGeoResult {
    name: String,
    #[serde(default)]
    local_names: HashMap<String, String>,
    lat: f64,
    lon: f64,
    country: Option<String>,
    state: Option<String>,
}

impl GeocodingClient {
    /// Create a new GeocodingClient from configuration
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        Self::with_base_url(config, config.geocoding_endpoint.clone())
    }

    /// Create a new GeocodingClient with custom base URL (for testing)
    pub fn with_base_url(config: &WeatherConfig, base_url: String) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url,
            language: config.language,
        })
    }

    /// Resolve a place name to coordinates
    pub async fn geocode(&self, place: &str) -> AppResult<Location> {
        let url = format!("{}/direct", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", place), ("limit", "1"), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::GeocodingService(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Geocoding API error: {} - {}", status, body);
            return Err(AppError::GeocodingService(format!("HTTP {}", status.as_u16())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::GeocodingService(format!("failed to read response: {}", e)))?;

        parse_geocoding_response(&body, place, self.language)
    }
}

fn parse_geocoding_response(body: &str, place: &str, language: Language) -> AppResult<Location> {
    let results: Vec<OWMGeoResult> = serde_json::from_str(body)
        .map_err(|e| AppError::GeocodingService(format!("failed to parse response: {}", e)))?;

    let first = results
        .into_iter()
        .next()
        .ok_or_else(|| AppError::LocationNotFound(place.to_string()))?;

    let name = first
        .local_names
        .get(language.code())
        .cloned()
        .unwrap_or(first.name);
    let resolved_name = [Some(name), first.state, first.country]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");

    Ok(Location {
        coordinates: GpsCoordinates::new(to_coordinate(first.lat), to_coordinate(first.lon)),
        resolved_name,
    })
}

fn to_coordinate(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or_default().round_dp(6)
}
