//! Common types used across the advisor

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Round both axes to `dp` decimal places.
    ///
    /// Forecast providers resolve coordinates to a fixed precision, so two
    /// lookups that agree to that precision refer to the same grid point.
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            latitude: self.latitude.round_dp(dp),
            longitude: self.longitude.round_dp(dp),
        }
    }
}

/// A geocoded place
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub coordinates: GpsCoordinates,
    /// Canonical name reported by the geocoding provider
    pub resolved_name: String,
}

/// Supported languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Japanese,
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Japanese => "ja",
            Language::English => "en",
        }
    }
}
