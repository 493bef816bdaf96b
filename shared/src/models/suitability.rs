//! Sowing suitability evaluation
//!
//! Every surface (7 or 14 days, one vegetable or many) is a call pattern over
//! `evaluate_day`; nothing here performs I/O.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ForecastDay, RainPreference, VegetableProfile, WeatherGlyph};

/// Minimum daily rain (mm) for a rain-loving vegetable
pub const DAILY_RAIN_LIKED_MM: Decimal = Decimal::ONE;

/// Minimum total rain (mm) over the period for a rain-loving vegetable
pub const TOTAL_RAIN_LIKED_MM: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Maximum total rain (mm) over the period for a rain-averse vegetable
pub const TOTAL_RAIN_DISLIKED_MM: Decimal = Decimal::TWO;

/// Pass/fail for a single forecast day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuitabilityResult {
    pub date: NaiveDate,
    pub temperature_ok: bool,
    pub rain_ok: bool,
    pub overall_ok: bool,
}

impl SuitabilityResult {
    pub fn mark(&self) -> &'static str {
        if self.overall_ok {
            "🟢✅"
        } else {
            "🔴❌"
        }
    }
}

/// Counts over a run of daily results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Summary {
    pub temperature_ok_count: usize,
    pub rain_ok_count: usize,
    pub both_ok_count: usize,
    /// Days passing both checks, chronological
    pub recommended_dates: Vec<NaiveDate>,
}

/// Whole-period judgement for one vegetable
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateVerdict {
    pub average_temp: Decimal,
    pub total_rain: Decimal,
    pub temperature_ok: bool,
    pub rain_ok: bool,
    pub suitable: bool,
    pub reasons: Vec<String>,
    pub reasons_ja: Vec<String>,
}

/// Evaluate one forecast day for a vegetable.
///
/// The whole day's range must sit inside the sowing band: a minimum below
/// `min_sow_temp` or a maximum above `max_sow_temp` fails, even when the two
/// ranges overlap.
pub fn evaluate_day(profile: &VegetableProfile, day: &ForecastDay) -> SuitabilityResult {
    let temperature_ok =
        profile.min_sow_temp <= day.min_temp && day.max_temp <= profile.max_sow_temp;
    let rain_ok = match profile.rain_preference {
        RainPreference::Likes => day.precipitation >= DAILY_RAIN_LIKED_MM,
        RainPreference::Neutral => true,
        // strict: any measurable rain fails
        RainPreference::Dislikes => day.precipitation == Decimal::ZERO,
    };

    SuitabilityResult {
        date: day.date,
        temperature_ok,
        rain_ok,
        overall_ok: temperature_ok && rain_ok,
    }
}

/// Evaluate every day, preserving order.
pub fn evaluate_range(profile: &VegetableProfile, days: &[ForecastDay]) -> Vec<SuitabilityResult> {
    days.iter().map(|day| evaluate_day(profile, day)).collect()
}

/// Count passing days per check and collect the recommended dates.
pub fn summarize(results: &[SuitabilityResult]) -> Summary {
    let mut summary = Summary::default();
    for result in results {
        if result.temperature_ok {
            summary.temperature_ok_count += 1;
        }
        if result.rain_ok {
            summary.rain_ok_count += 1;
        }
        if result.overall_ok {
            summary.both_ok_count += 1;
            summary.recommended_dates.push(result.date);
        }
    }
    summary.recommended_dates.sort();
    summary
}

/// Representative temperature for a forecast period.
///
/// This is `mean(min) + mean(max) / 2`, not the mean of daily midpoints.
/// Returns `None` for an empty forecast.
pub fn blended_average_temp(days: &[ForecastDay]) -> Option<Decimal> {
    if days.is_empty() {
        return None;
    }
    let count = Decimal::from(days.len());
    let mean_min = days.iter().map(|d| d.min_temp).sum::<Decimal>() / count;
    let mean_max = days.iter().map(|d| d.max_temp).sum::<Decimal>() / count;
    Some(mean_min + mean_max / Decimal::TWO)
}

/// Judge the whole forecast period at once.
///
/// Returns `None` when there are no days to judge.
pub fn aggregate_suitability(
    profile: &VegetableProfile,
    days: &[ForecastDay],
) -> Option<AggregateVerdict> {
    let average_temp = blended_average_temp(days)?;
    let total_rain: Decimal = days.iter().map(|d| d.precipitation).sum();

    let temperature_ok =
        profile.min_sow_temp <= average_temp && average_temp <= profile.max_sow_temp;
    let rain_ok = match profile.rain_preference {
        RainPreference::Likes => total_rain >= TOTAL_RAIN_LIKED_MM,
        RainPreference::Neutral => true,
        RainPreference::Dislikes => total_rain <= TOTAL_RAIN_DISLIKED_MM,
    };

    let mut reasons = Vec::new();
    let mut reasons_ja = Vec::new();

    if temperature_ok {
        reasons.push(format!(
            "Average temperature {}°C is within the sowing range {}–{}°C",
            average_temp.round_dp(1),
            profile.min_sow_temp,
            profile.max_sow_temp
        ));
        reasons_ja.push(format!(
            "平均気温{}℃は種まき適温({}〜{}℃)の範囲内です",
            average_temp.round_dp(1),
            profile.min_sow_temp,
            profile.max_sow_temp
        ));
    } else {
        reasons.push(format!(
            "Average temperature {}°C is outside the sowing range {}–{}°C",
            average_temp.round_dp(1),
            profile.min_sow_temp,
            profile.max_sow_temp
        ));
        reasons_ja.push(format!(
            "平均気温{}℃が種まき適温({}〜{}℃)の範囲外です",
            average_temp.round_dp(1),
            profile.min_sow_temp,
            profile.max_sow_temp
        ));
    }

    match (profile.rain_preference, rain_ok) {
        (RainPreference::Neutral, _) => {
            reasons.push("Rain does not matter for this vegetable".to_string());
            reasons_ja.push("雨の影響を受けにくい野菜です".to_string());
        }
        (RainPreference::Likes, true) => {
            reasons.push(format!("Expected rain {}mm suits a rain-loving vegetable", total_rain));
            reasons_ja.push(format!("予想降水量{}mmで雨を好む野菜に適しています", total_rain));
        }
        (RainPreference::Likes, false) => {
            reasons.push(format!(
                "Expected rain {}mm is below the {}mm this vegetable prefers",
                total_rain, TOTAL_RAIN_LIKED_MM
            ));
            reasons_ja.push(format!(
                "予想降水量{}mmは好ましい{}mmに届きません",
                total_rain, TOTAL_RAIN_LIKED_MM
            ));
        }
        (RainPreference::Dislikes, true) => {
            reasons.push(format!("Expected rain {}mm is low enough", total_rain));
            reasons_ja.push(format!("予想降水量{}mmで雨が少なく適しています", total_rain));
        }
        (RainPreference::Dislikes, false) => {
            reasons.push(format!(
                "Expected rain {}mm exceeds the {}mm this vegetable tolerates",
                total_rain, TOTAL_RAIN_DISLIKED_MM
            ));
            reasons_ja.push(format!(
                "予想降水量{}mmが許容量{}mmを超えています",
                total_rain, TOTAL_RAIN_DISLIKED_MM
            ));
        }
    }

    Some(AggregateVerdict {
        average_temp,
        total_rain,
        temperature_ok,
        rain_ok,
        suitable: temperature_ok && rain_ok,
        reasons,
        reasons_ja,
    })
}

/// One calendar cell for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub glyph: WeatherGlyph,
    pub emoji: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub min_temp: Decimal,
    pub max_temp: Decimal,
    pub precipitation: Decimal,
    pub suitable: bool,
    pub mark: String,
}

/// Pair each day with its result for rendering.
pub fn build_calendar(profile: &VegetableProfile, days: &[ForecastDay]) -> Vec<CalendarCell> {
    days.iter()
        .map(|day| {
            let result = evaluate_day(profile, day);
            let glyph = day.glyph();
            CalendarCell {
                date: day.date,
                glyph,
                emoji: glyph.emoji().to_string(),
                description: day.description.clone(),
                min_temp: day.min_temp,
                max_temp: day.max_temp,
                precipitation: day.precipitation,
                suitable: result.overall_ok,
                mark: result.mark().to_string(),
            }
        })
        .collect()
}

/// Results for one vegetable within a comparison
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VegetableRow {
    pub vegetable: String,
    pub results: Vec<SuitabilityResult>,
    pub summary: Summary,
}

/// Date-indexed, vegetable-keyed table of pass/fail marks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SuitabilityMatrix {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<VegetableRow>,
}

impl SuitabilityMatrix {
    /// Evaluate each profile independently against the same forecast.
    pub fn build(profiles: &[&VegetableProfile], days: &[ForecastDay]) -> Self {
        let rows = profiles
            .iter()
            .map(|profile| {
                let results = evaluate_range(profile, days);
                let summary = summarize(&results);
                VegetableRow {
                    vegetable: profile.name.clone(),
                    results,
                    summary,
                }
            })
            .collect();

        Self {
            dates: days.iter().map(|d| d.date).collect(),
            rows,
        }
    }

    /// Pass/fail for a vegetable on a date, if both are present.
    pub fn mark(&self, date: NaiveDate, vegetable: &str) -> Option<bool> {
        self.rows
            .iter()
            .find(|row| row.vegetable == vegetable)?
            .results
            .iter()
            .find(|r| r.date == date)
            .map(|r| r.overall_ok)
    }

    /// Vegetables that pass on a given date.
    pub fn suitable_on(&self, date: NaiveDate) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.results.iter().any(|r| r.date == date && r.overall_ok))
            .map(|row| row.vegetable.as_str())
            .collect()
    }
}
