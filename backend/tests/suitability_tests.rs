//! Sowing suitability integration tests
//!
//! Tests for the evaluator including:
//! - Per-day temperature and rain rules
//! - Multi-day summaries and recommended dates
//! - Whole-period verdicts
//! - Multi-vegetable comparison

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::*;
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
}

fn profile(name: &str, min: &str, max: &str, rain_preference: RainPreference) -> VegetableProfile {
    VegetableProfile {
        name: name.to_string(),
        min_sow_temp: dec(min),
        max_sow_temp: dec(max),
        rain_preference,
        days_to_transplant: 30,
        harvest_basis_label: None,
        days_to_harvest: None,
    }
}

fn day(offset: i64, min: &str, max: &str, rain: &str) -> ForecastDay {
    ForecastDay {
        date: start() + Duration::days(offset),
        min_temp: dec(min),
        max_temp: dec(max),
        precipitation: dec(rain),
        description: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod evaluate_day_tests {
    use super::*;

    #[test]
    fn test_day_inside_band_with_rain_passes_for_rain_lover() {
        let veg = profile("ほうれん草", "15", "25", RainPreference::Likes);
        let result = evaluate_day(&veg, &day(0, "16", "24", "2"));
        assert!(result.temperature_ok);
        assert!(result.rain_ok);
        assert!(result.overall_ok);
        assert_eq!(result.date, start());
    }

    #[test]
    fn test_cold_minimum_fails_temperature() {
        let veg = profile("ほうれん草", "15", "25", RainPreference::Likes);
        let result = evaluate_day(&veg, &day(0, "14", "24", "2"));
        assert!(!result.temperature_ok);
        assert!(result.rain_ok);
        assert!(!result.overall_ok);
    }

    #[test]
    fn test_overlapping_but_wider_range_fails() {
        // the day overlaps the band but does not sit inside it
        let veg = profile("キャベツ", "15", "25", RainPreference::Neutral);
        assert!(!evaluate_day(&veg, &day(0, "16", "26", "0")).temperature_ok);
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        let veg = profile("キャベツ", "15", "25", RainPreference::Neutral);
        assert!(evaluate_day(&veg, &day(0, "15", "25", "0")).temperature_ok);
    }

    #[test]
    fn test_rain_lover_needs_one_millimetre() {
        let veg = profile("ナス", "0", "40", RainPreference::Likes);
        assert!(evaluate_day(&veg, &day(0, "20", "25", "1")).rain_ok);
        assert!(!evaluate_day(&veg, &day(0, "20", "25", "0.99")).rain_ok);
    }

    #[test]
    fn test_neutral_accepts_any_precipitation() {
        let veg = profile("キャベツ", "0", "40", RainPreference::Neutral);
        for rain in ["0", "0.5", "80", "-1"] {
            assert!(evaluate_day(&veg, &day(0, "20", "25", rain)).rain_ok, "rain {}", rain);
        }
    }

    #[test]
    fn test_dislikes_is_strict_about_any_rain() {
        let veg = profile("トマト", "0", "40", RainPreference::Dislikes);
        assert!(evaluate_day(&veg, &day(0, "20", "25", "0.0")).rain_ok);
        assert!(!evaluate_day(&veg, &day(0, "20", "25", "0.0001")).rain_ok);
    }

    #[test]
    fn test_results_keep_forecast_order() {
        let veg = profile("キャベツ", "15", "25", RainPreference::Neutral);
        let days = vec![day(0, "16", "20", "0"), day(1, "10", "20", "0"), day(2, "16", "20", "0")];
        let results = evaluate_range(&veg, &days);
        let dates: Vec<_> = results.iter().map(|r| r.date).collect();
        assert_eq!(dates, days.iter().map(|d| d.date).collect::<Vec<_>>());
        assert_eq!(
            results.iter().map(|r| r.overall_ok).collect::<Vec<_>>(),
            vec![true, false, true]
        );
    }
}

#[cfg(test)]
mod summary_tests {
    use super::*;

    #[test]
    fn test_fourteen_days_with_three_passing() {
        let veg = profile("レタス", "15", "20", RainPreference::Neutral);
        let days: Vec<ForecastDay> = (0..14)
            .map(|i| {
                if i == 2 || i == 7 || i == 11 {
                    day(i, "16", "19", "0")
                } else {
                    day(i, "10", "19", "0")
                }
            })
            .collect();

        let summary = summarize(&evaluate_range(&veg, &days));
        assert_eq!(summary.both_ok_count, 3);
        assert_eq!(summary.temperature_ok_count, 3);
        assert_eq!(summary.rain_ok_count, 14);
        assert_eq!(
            summary.recommended_dates,
            vec![
                start() + Duration::days(2),
                start() + Duration::days(7),
                start() + Duration::days(11)
            ]
        );
    }

    #[test]
    fn test_empty_results_summarize_to_zero() {
        assert_eq!(summarize(&[]), Summary::default());
    }
}

#[cfg(test)]
mod aggregate_tests {
    use super::*;

    #[test]
    fn test_blended_average_formula() {
        let days = vec![day(0, "10", "20", "0"), day(1, "12", "22", "0")];
        assert_eq!(blended_average_temp(&days), Some(dec("21.5")));
    }

    #[test]
    fn test_aggregate_uses_blended_average() {
        let veg = profile("キャベツ", "15", "25", RainPreference::Neutral);
        let days = vec![day(0, "10", "20", "0"), day(1, "12", "22", "0")];
        let verdict = aggregate_suitability(&veg, &days).unwrap();
        assert_eq!(verdict.average_temp, dec("21.5"));
        assert!(verdict.temperature_ok);
        assert!(verdict.suitable);
    }

    #[test]
    fn test_empty_forecast_has_no_verdict() {
        let veg = profile("キャベツ", "15", "25", RainPreference::Neutral);
        assert!(aggregate_suitability(&veg, &[]).is_none());
    }

    #[test]
    fn test_rain_lover_needs_five_millimetres_in_total() {
        let veg = profile("ナス", "0", "40", RainPreference::Likes);
        let wet = vec![day(0, "10", "20", "2.5"), day(1, "10", "20", "2.5")];
        let dry = vec![day(0, "10", "20", "2.5"), day(1, "10", "20", "2.4")];
        assert!(aggregate_suitability(&veg, &wet).unwrap().rain_ok);
        assert!(!aggregate_suitability(&veg, &dry).unwrap().rain_ok);
    }

    #[test]
    fn test_rain_hater_tolerates_two_millimetres_in_total() {
        let veg = profile("トマト", "0", "40", RainPreference::Dislikes);
        let light = vec![day(0, "10", "20", "1"), day(1, "10", "20", "1")];
        let heavy = vec![day(0, "10", "20", "1"), day(1, "10", "20", "1.1")];
        assert!(aggregate_suitability(&veg, &light).unwrap().rain_ok);
        assert!(!aggregate_suitability(&veg, &heavy).unwrap().rain_ok);
    }

    #[test]
    fn test_each_failed_condition_gets_a_reason() {
        let veg = profile("トマト", "25", "30", RainPreference::Dislikes);
        let days = vec![day(0, "10", "20", "5")];
        let verdict = aggregate_suitability(&veg, &days).unwrap();
        assert!(!verdict.temperature_ok);
        assert!(!verdict.rain_ok);
        assert!(!verdict.suitable);
        assert_eq!(verdict.reasons.len(), 2);
        assert_eq!(verdict.reasons_ja.len(), 2);
        assert!(verdict.reasons[0].contains("outside"));
        assert!(verdict.reasons[1].contains("exceeds"));
    }
}

#[cfg(test)]
mod comparison_tests {
    use super::*;

    #[test]
    fn test_matrix_evaluates_each_vegetable_independently() {
        let tomato = profile("トマト", "20", "30", RainPreference::Dislikes);
        let spinach = profile("ほうれん草", "15", "20", RainPreference::Likes);
        let days = vec![day(0, "21", "28", "0"), day(1, "16", "19", "4")];

        let matrix = SuitabilityMatrix::build(&[&tomato, &spinach], &days);
        assert_eq!(matrix.dates.len(), 2);
        assert_eq!(matrix.mark(start(), "トマト"), Some(true));
        assert_eq!(matrix.mark(start(), "ほうれん草"), Some(false));
        assert_eq!(matrix.suitable_on(start() + Duration::days(1)), vec!["ほうれん草"]);
        assert_eq!(matrix.mark(start(), "ナス"), None);
    }

    #[test]
    fn test_calendar_pairs_days_with_marks_and_glyphs() {
        let tomato = profile("トマト", "20", "30", RainPreference::Dislikes);
        let mut rainy = day(1, "21", "28", "3");
        rainy.description = Some("小雨".to_string());
        let days = vec![day(0, "21", "28", "0"), rainy];

        let calendar = build_calendar(&tomato, &days);
        assert_eq!(calendar[0].mark, "🟢✅");
        assert_eq!(calendar[1].mark, "🔴❌");
        assert_eq!(calendar[1].glyph, WeatherGlyph::Rain);
        assert_eq!(calendar[0].glyph, WeatherGlyph::Mixed);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

fn temperature_strategy() -> impl Strategy<Value = Decimal> {
    (-100i64..=400i64).prop_map(|n| Decimal::new(n, 1))
}

fn precipitation_strategy() -> impl Strategy<Value = Decimal> {
    (-50i64..=500i64).prop_map(|n| Decimal::new(n, 1))
}

fn preference_strategy() -> impl Strategy<Value = RainPreference> {
    prop_oneof![
        Just(RainPreference::Likes),
        Just(RainPreference::Neutral),
        Just(RainPreference::Dislikes),
    ]
}

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A day passes overall only when both checks pass
        #[test]
        fn prop_overall_implies_both(
            band_low in temperature_strategy(),
            width in 0i64..=200i64,
            low in temperature_strategy(),
            spread in 0i64..=200i64,
            rain in precipitation_strategy(),
            pref in preference_strategy()
        ) {
            let mut veg = profile("x", "0", "0", pref);
            veg.min_sow_temp = band_low;
            veg.max_sow_temp = band_low + Decimal::new(width, 1);
            let d = ForecastDay {
                date: start(),
                min_temp: low,
                max_temp: low + Decimal::new(spread, 1),
                precipitation: rain,
                description: None,
            };

            let first = evaluate_day(&veg, &d);
            prop_assert_eq!(first.overall_ok, first.temperature_ok && first.rain_ok);
            // deterministic
            prop_assert_eq!(evaluate_day(&veg, &d), first);
        }

        /// Neutral vegetables never fail on rain
        #[test]
        fn prop_neutral_rain_always_ok(rain in precipitation_strategy()) {
            let veg = profile("x", "0", "40", RainPreference::Neutral);
            let d = ForecastDay { date: start(), min_temp: dec("10"), max_temp: dec("20"), precipitation: rain, description: None };
            prop_assert!(evaluate_day(&veg, &d).rain_ok);
        }

        /// The summary count matches the recommended dates
        #[test]
        fn prop_summary_counts_match_dates(
            temps in proptest::collection::vec(temperature_strategy(), 1..=16),
            pref in preference_strategy()
        ) {
            let veg = profile("x", "10", "25", pref);
            let days: Vec<ForecastDay> = temps
                .iter()
                .enumerate()
                .map(|(i, t)| ForecastDay {
                    date: start() + Duration::days(i as i64),
                    min_temp: *t,
                    max_temp: *t + Decimal::new(50, 1),
                    precipitation: Decimal::ZERO,
                    description: None,
                })
                .collect();

            let summary = summarize(&evaluate_range(&veg, &days));
            prop_assert_eq!(summary.both_ok_count, summary.recommended_dates.len());
            prop_assert!(summary.both_ok_count <= summary.temperature_ok_count);
            prop_assert!(summary.both_ok_count <= summary.rain_ok_count);
            prop_assert!(summary.recommended_dates.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
