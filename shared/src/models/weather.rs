//! Weather data models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One day of a daily forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub min_temp: Decimal,
    pub max_temp: Decimal,
    /// Precipitation in mm
    pub precipitation: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ForecastDay {
    pub fn glyph(&self) -> WeatherGlyph {
        self.description
            .as_deref()
            .map(WeatherGlyph::from_description)
            .unwrap_or(WeatherGlyph::Mixed)
    }
}

/// Display glyph picked from a free-text weather description
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherGlyph {
    Rain,
    Cloudy,
    Clear,
    Snow,
    Mixed,
}

impl WeatherGlyph {
    /// Keyword match, first hit wins: rain, cloud, clear, snow.
    pub fn from_description(description: &str) -> Self {
        let lower = description.to_lowercase();
        if description.contains('雨') || lower.contains("rain") || lower.contains("drizzle") {
            WeatherGlyph::Rain
        } else if description.contains('曇') || lower.contains("cloud") {
            WeatherGlyph::Cloudy
        } else if description.contains('晴') || lower.contains("clear") || lower.contains("sun") {
            WeatherGlyph::Clear
        } else if description.contains('雪') || lower.contains("snow") {
            WeatherGlyph::Snow
        } else {
            WeatherGlyph::Mixed
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            WeatherGlyph::Rain => "🌧️",
            WeatherGlyph::Cloudy => "☁️",
            WeatherGlyph::Clear => "☀️",
            WeatherGlyph::Snow => "❄️",
            WeatherGlyph::Mixed => "🌤️",
        }
    }
}

impl std::fmt::Display for WeatherGlyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.emoji())
    }
}

/// Parallel series for temperature and precipitation charts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChartSeries {
    pub dates: Vec<NaiveDate>,
    pub min_temps: Vec<Decimal>,
    pub max_temps: Vec<Decimal>,
    pub precipitation: Vec<Decimal>,
}

impl ChartSeries {
    pub fn from_days(days: &[ForecastDay]) -> Self {
        let mut series = ChartSeries::default();
        for day in days {
            series.dates.push(day.date);
            series.min_temps.push(day.min_temp);
            series.max_temps.push(day.max_temp);
            series.precipitation.push(day.precipitation);
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_from_japanese_descriptions() {
        assert_eq!(WeatherGlyph::from_description("小雨"), WeatherGlyph::Rain);
        assert_eq!(WeatherGlyph::from_description("曇りがち"), WeatherGlyph::Cloudy);
        assert_eq!(WeatherGlyph::from_description("晴天"), WeatherGlyph::Clear);
        assert_eq!(WeatherGlyph::from_description("雪"), WeatherGlyph::Snow);
        assert_eq!(WeatherGlyph::from_description("霧"), WeatherGlyph::Mixed);
    }

    #[test]
    fn test_glyph_from_english_descriptions() {
        assert_eq!(WeatherGlyph::from_description("light rain"), WeatherGlyph::Rain);
        assert_eq!(WeatherGlyph::from_description("overcast clouds"), WeatherGlyph::Cloudy);
        assert_eq!(WeatherGlyph::from_description("clear sky"), WeatherGlyph::Clear);
        assert_eq!(WeatherGlyph::from_description("Snow"), WeatherGlyph::Snow);
    }

    #[test]
    fn test_rain_wins_over_later_keywords() {
        // "雨時々曇" mentions both; rain is checked first
        assert_eq!(WeatherGlyph::from_description("雨時々曇"), WeatherGlyph::Rain);
        assert_eq!(WeatherGlyph::from_description("rain and snow"), WeatherGlyph::Rain);
    }

    #[test]
    fn test_day_without_description_is_mixed() {
        let day = ForecastDay {
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            min_temp: Decimal::from(10),
            max_temp: Decimal::from(20),
            precipitation: Decimal::ZERO,
            description: None,
        };
        assert_eq!(day.glyph(), WeatherGlyph::Mixed);
        assert_eq!(day.glyph().emoji(), "🌤️");
    }
}
