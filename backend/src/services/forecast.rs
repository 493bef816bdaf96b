//! Forecast acquisition service
//!
//! Wraps the geocoding and forecast clients with time-bounded memoization
//! so repeated lookups for the same place do not hit the provider.

use std::time::Duration;

use moka::future::Cache;
use shared::{
    validate_chronological, validate_forecast_day, validate_forecast_days, ForecastDay,
    GpsCoordinates, Location,
};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};
use crate::external::{GeocodingClient, WeatherClient};

/// Geocoding and forecast lookups with response caching
#[derive(Clone)]
pub struct ForecastService {
    geocoder: GeocodingClient,
    weather: WeatherClient,
    precision: u32,
    places: Cache<String, Location>,
    forecasts: Cache<GpsCoordinates, Vec<ForecastDay>>,
}

impl ForecastService {
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        Ok(Self::with_clients(
            GeocodingClient::new(config)?,
            WeatherClient::new(config)?,
            config,
        ))
    }

    /// Build the service around already-configured provider clients
    pub fn with_clients(
        geocoder: GeocodingClient,
        weather: WeatherClient,
        config: &WeatherConfig,
    ) -> Self {
        let ttl = Duration::from_secs(config.cache_ttl_seconds);
        Self {
            geocoder,
            weather,
            precision: config.coordinate_precision,
            places: Cache::builder()
                .max_capacity(config.cache_capacity)
                .time_to_live(ttl)
                .build(),
            forecasts: Cache::builder()
                .max_capacity(config.cache_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Resolve a free-text place name, memoized by normalized name
    pub async fn geocode(&self, place: &str) -> AppResult<Location> {
        let key = normalize_place(place);

        if let Some(location) = self.places.get(&key).await {
            tracing::debug!("Geocoding cache hit for '{}'", key);
            return Ok(location);
        }
        tracing::debug!("Geocoding cache miss for '{}'", key);

        let location = self.geocoder.geocode(place.trim()).await?;
        self.places.insert(key, location.clone()).await;
        Ok(location)
    }

    /// Fetch `days` days of forecast for a resolved location
    pub async fn fetch_forecast(&self, location: &Location, days: u32) -> AppResult<Vec<ForecastDay>> {
        validate_forecast_days(days).map_err(|msg| AppError::validation("days", msg))?;
        let key = location.coordinates.rounded(self.precision);

        if let Some(cached) = self.forecasts.get(&key).await {
            if let Some(hit) = serve_from_cache(cached, days) {
                tracing::debug!("Forecast cache hit for {:?}", key);
                return Ok(hit);
            }
        }
        tracing::debug!("Forecast cache miss for {:?}", key);

        let forecast = self.weather.get_daily_forecast(location, days).await?;
        if forecast.is_empty() {
            tracing::warn!("Provider returned no forecast days for {}", location.resolved_name);
            return Err(AppError::ForecastUnavailable { status_code: None });
        }
        forecast
            .iter()
            .try_for_each(validate_forecast_day)
            .and_then(|_| validate_chronological(&forecast))
            .map_err(|msg| {
                tracing::warn!("Provider forecast rejected: {}", msg);
                AppError::ForecastUnavailable { status_code: None }
            })?;

        self.forecasts.insert(key, forecast.clone()).await;
        Ok(forecast)
    }
}

/// Cache key for a place name: trimmed, whitespace-collapsed, lowercased
fn normalize_place(place: &str) -> String {
    place
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A cached forecast serves a request only if it covers every requested day
fn serve_from_cache(mut cached: Vec<ForecastDay>, days: u32) -> Option<Vec<ForecastDay>> {
    if cached.len() < days as usize {
        return None;
    }
    cached.truncate(days as usize);
    Some(cached)
}
