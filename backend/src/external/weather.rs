//! Weather API client for fetching daily forecasts
//!
//! Integrates with the OpenWeatherMap daily forecast API

use std::time::Duration;

use chrono::DateTime;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{ForecastDay, Language, Location};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    language: Language,
}

/// OpenWeatherMap API response for the daily forecast
#[derive(Debug, Deserialize)]
struct OWMDailyResponse {
    #[serde(default)]
    city: Option<OWMCity>,
    list: Vec<OWMDailyItem>,
}

#[derive(Debug, Deserialize)]
struct OWMCity {
    /// UTC offset in seconds
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OWMDailyItem {
    dt: i64,
    temp: OWMTemp,
    #[serde(default)]
    weather: Vec<OWMWeather>,
    /// Omitted by the provider on dry days
    rain: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OWMTemp {
    min: f64,
    max: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        Self::with_base_url(config, config.api_endpoint.clone())
    }

    /// Create a new WeatherClient with custom base URL (for testing)
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

    /// Fetch up to `days` days of daily forecast for a location
    pub async fn get_daily_forecast(
        &self,
        location: &Location,
        days: u32,
    ) -> AppResult<Vec<ForecastDay>> {
        let url = format!("{}/forecast/daily", self.base_url);
        let coords = location.coordinates;

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("cnt", days.to_string()),
                ("units", "metric".to_string()),
                ("lang", self.language.code().to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Weather API request failed: {}", e);
                AppError::ForecastUnavailable {
                    status_code: e.status().map(|s| s.as_u16()),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Weather API error: {} - {}", status, body);
            return Err(AppError::ForecastUnavailable {
                status_code: Some(status.as_u16()),
            });
        }

        let body = response.text().await.map_err(|e| {
            tracing::warn!("Failed to read forecast response: {}", e);
            AppError::ForecastUnavailable { status_code: None }
        })?;

        parse_daily_forecast(&body, days)
    }
}

/// Convert a daily forecast body into at most `days` chronological days
fn parse_daily_forecast(body: &str, days: u32) -> AppResult<Vec<ForecastDay>> {
    let data: OWMDailyResponse = serde_json::from_str(body).map_err(|e| {
        tracing::warn!("Failed to parse forecast response: {}", e);
        AppError::ForecastUnavailable { status_code: None }
    })?;

    let offset = data.city.map(|c| c.timezone as i64).unwrap_or(0);

    let mut forecast: Vec<ForecastDay> = data
        .list
        .into_iter()
        .filter_map(|item| {
            let date = DateTime::from_timestamp(item.dt + offset, 0)?.date_naive();
            Some(ForecastDay {
                date,
                min_temp: to_decimal(item.temp.min),
                max_temp: to_decimal(item.temp.max),
                precipitation: item.rain.map(to_decimal).unwrap_or(Decimal::ZERO),
                description: item.weather.into_iter().next().map(|w| w.description),
            })
        })
        .collect();

    forecast.sort_by_key(|d| d.date);
    forecast.truncate(days as usize);
    Ok(forecast)
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or_default().round_dp(2)
}
