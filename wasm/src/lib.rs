//! WebAssembly module for the planting advisor
//!
//! Provides client-side computation for:
//! - Per-day sowing suitability
//! - Whole-period suitability verdicts
//! - Growing progress and transplant timing
//! - Weather glyph selection

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("planting advisor module loaded"));
}

/// Evaluate one forecast day for a vegetable; both arguments and the result are JSON
#[wasm_bindgen]
pub fn evaluate_day(profile_json: &str, day_json: &str) -> Result<String, JsValue> {
    evaluate_day_json(profile_json, day_json).map_err(|e| JsValue::from_str(&e))
}

/// Judge a whole forecast period; returns `null` for an empty forecast
#[wasm_bindgen]
pub fn aggregate_suitability(profile_json: &str, days_json: &str) -> Result<String, JsValue> {
    aggregate_json(profile_json, days_json).map_err(|e| JsValue::from_str(&e))
}

/// Fraction of `target_days` elapsed since `start_date` (YYYY-MM-DD).
///
/// `today` defaults to the browser's local date.
#[wasm_bindgen]
pub fn compute_progress_fraction(
    start_date: &str,
    target_days: i32,
    today: Option<String>,
) -> Result<f64, JsValue> {
    let today = match today {
        Some(today) => today,
        None => browser_today(),
    };
    progress_fraction(start_date, target_days, &today).map_err(|e| JsValue::from_str(&e))
}

/// Transplant duration after applying a speed (`fast`, `normal` or `slow`)
#[wasm_bindgen]
pub fn adjust_transplant_duration(base_days: i32, speed: &str) -> Result<i32, JsValue> {
    transplant_duration(base_days, speed).map_err(|e| JsValue::from_str(&e))
}

/// Emoji for a free-text weather description
#[wasm_bindgen]
pub fn weather_glyph(description: &str) -> String {
    WeatherGlyph::from_description(description).emoji().to_string()
}

fn evaluate_day_json(profile_json: &str, day_json: &str) -> Result<String, String> {
    let profile: VegetableProfile = serde_json::from_str(profile_json)
        .map_err(|e| format!("Invalid profile JSON: {}", e))?;
    let day: ForecastDay =
        serde_json::from_str(day_json).map_err(|e| format!("Invalid forecast day JSON: {}", e))?;

    let result = shared::evaluate_day(&profile, &day);
    serde_json::to_string(&result).map_err(|e| e.to_string())
}

fn aggregate_json(profile_json: &str, days_json: &str) -> Result<String, String> {
    let profile: VegetableProfile = serde_json::from_str(profile_json)
        .map_err(|e| format!("Invalid profile JSON: {}", e))?;
    let days: Vec<ForecastDay> =
        serde_json::from_str(days_json).map_err(|e| format!("Invalid forecast JSON: {}", e))?;

    let verdict = shared::aggregate_suitability(&profile, &days);
    serde_json::to_string(&verdict).map_err(|e| e.to_string())
}

fn progress_fraction(start_date: &str, target_days: i32, today: &str) -> Result<f64, String> {
    let start = parse_date(start_date)?;
    let today = parse_date(today)?;
    compute_progress(start, target_days as i64, today)
        .map(|progress| progress.fraction)
        .ok_or_else(|| "Completion date is out of range".to_string())
}

fn transplant_duration(base_days: i32, speed: &str) -> Result<i32, String> {
    let speed = match speed.trim().to_lowercase().as_str() {
        "fast" => SpeedModifier::Fast,
        "normal" => SpeedModifier::Normal,
        "slow" => SpeedModifier::Slow,
        other => return Err(format!("Unknown speed '{}'", other)),
    };
    Ok(adjust_duration(base_days as i64, speed.offset_days()) as i32)
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

fn browser_today() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}
