//! Validation utilities for the planting advisor
//!
//! The evaluator itself never validates its inputs; these checks run at the
//! edges where catalog rows and provider data enter the system.

use rust_decimal::Decimal;

use crate::models::{ForecastDay, VegetableProfile};

/// Largest day count the daily forecast provider serves
pub const MAX_FORECAST_DAYS: u32 = 16;

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate a vegetable profile's sowing band
pub fn validate_profile(profile: &VegetableProfile) -> Result<(), &'static str> {
    if profile.name.trim().is_empty() {
        return Err("Vegetable name cannot be empty");
    }
    if profile.min_sow_temp > profile.max_sow_temp {
        return Err("Minimum sowing temperature must not exceed the maximum");
    }
    Ok(())
}

// ============================================================================
// Forecast Validations
// ============================================================================

/// Validate a forecast day from the provider
pub fn validate_forecast_day(day: &ForecastDay) -> Result<(), &'static str> {
    if day.min_temp > day.max_temp {
        return Err("Forecast minimum temperature exceeds the maximum");
    }
    if day.precipitation < Decimal::ZERO {
        return Err("Precipitation cannot be negative");
    }
    Ok(())
}

/// Validate that a forecast is in strictly increasing date order
pub fn validate_chronological(days: &[ForecastDay]) -> Result<(), &'static str> {
    if days.windows(2).any(|pair| pair[0].date >= pair[1].date) {
        return Err("Forecast days must be in chronological order");
    }
    Ok(())
}

/// Validate the number of requested forecast days
pub fn validate_forecast_days(days: u32) -> Result<(), &'static str> {
    if days == 0 {
        return Err("At least one forecast day is required");
    }
    if days > MAX_FORECAST_DAYS {
        return Err("The forecast provider serves at most 16 days");
    }
    Ok(())
}

// ============================================================================
// Request Validations
// ============================================================================

/// Validate a free-text place name
pub fn validate_place_name(place: &str) -> Result<(), &'static str> {
    let trimmed = place.trim();
    if trimmed.is_empty() {
        return Err("Location cannot be empty");
    }
    if trimmed.chars().count() > 100 {
        return Err("Location must be at most 100 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RainPreference;
    use chrono::NaiveDate;

    fn profile(name: &str, min: i64, max: i64) -> VegetableProfile {
        VegetableProfile {
            name: name.to_string(),
            min_sow_temp: Decimal::from(min),
            max_sow_temp: Decimal::from(max),
            rain_preference: RainPreference::Neutral,
            days_to_transplant: 0,
            harvest_basis_label: None,
            days_to_harvest: None,
        }
    }

    fn day(d: u32, min: i64, max: i64, rain: i64) -> ForecastDay {
        ForecastDay {
            date: NaiveDate::from_ymd_opt(2024, 5, d).unwrap(),
            min_temp: Decimal::from(min),
            max_temp: Decimal::from(max),
            precipitation: Decimal::from(rain),
            description: None,
        }
    }

    #[test]
    fn test_validate_profile() {
        assert!(validate_profile(&profile("レタス", 15, 20)).is_ok());
        assert!(validate_profile(&profile("レタス", 20, 20)).is_ok());
        assert!(validate_profile(&profile("レタス", 21, 20)).is_err());
        assert!(validate_profile(&profile("  ", 15, 20)).is_err());
    }

    #[test]
    fn test_validate_forecast_day() {
        assert!(validate_forecast_day(&day(1, 10, 20, 0)).is_ok());
        assert!(validate_forecast_day(&day(1, 21, 20, 0)).is_err());
        assert!(validate_forecast_day(&day(1, 10, 20, -1)).is_err());
    }

    #[test]
    fn test_validate_chronological() {
        assert!(validate_chronological(&[day(1, 10, 20, 0), day(2, 10, 20, 0)]).is_ok());
        assert!(validate_chronological(&[day(2, 10, 20, 0), day(1, 10, 20, 0)]).is_err());
        assert!(validate_chronological(&[day(1, 10, 20, 0), day(1, 10, 20, 0)]).is_err());
        assert!(validate_chronological(&[]).is_ok());
    }

    #[test]
    fn test_validate_forecast_days() {
        assert!(validate_forecast_days(0).is_err());
        assert!(validate_forecast_days(1).is_ok());
        assert!(validate_forecast_days(7).is_ok());
        assert!(validate_forecast_days(14).is_ok());
        assert!(validate_forecast_days(16).is_ok());
        assert!(validate_forecast_days(17).is_err());
    }

    #[test]
    fn test_validate_place_name() {
        assert!(validate_place_name("東京都新宿区").is_ok());
        assert!(validate_place_name("   ").is_err());
        assert!(validate_place_name(&"a".repeat(101)).is_err());
    }
}
