//! Planting advice orchestration
//!
//! One advice pass: validate the request, resolve the vegetables, geocode the
//! place, fetch the forecast, then evaluate every vegetable against it.

use std::sync::Arc;

use serde::Serialize;
use shared::{
    aggregate_suitability, build_calendar, evaluate_range, summarize, validate_forecast_days,
    validate_place_name, AggregateVerdict, CalendarCell, ChartSeries, ForecastDay, Location,
    SuitabilityMatrix, SuitabilityResult, Summary, VegetableProfile,
};

use crate::error::{AppError, AppResult};
use crate::services::catalog::Catalog;
use crate::services::forecast::ForecastService;

/// Everything evaluated for one vegetable
#[derive(Debug, Clone, Serialize)]
pub struct VegetableOutcome {
    pub vegetable: VegetableProfile,
    pub calendar: Vec<CalendarCell>,
    pub results: Vec<SuitabilityResult>,
    pub summary: Summary,
    pub aggregate: Option<AggregateVerdict>,
}

/// A requested vegetable that could not be evaluated
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FailedVegetable {
    pub name: String,
    pub reason: String,
}

/// Result of one advice pass
#[derive(Debug, Clone, Serialize)]
pub struct AdviceReport {
    pub location: Location,
    pub days: u32,
    pub forecast: Vec<ForecastDay>,
    pub chart: ChartSeries,
    pub vegetables: Vec<VegetableOutcome>,
    pub matrix: SuitabilityMatrix,
    pub failed: Vec<FailedVegetable>,
}

/// Advice service tying the catalog to forecast acquisition
#[derive(Clone)]
pub struct AdvisorService {
    catalog: Arc<Catalog>,
    forecast: ForecastService,
}

impl AdvisorService {
    pub fn new(catalog: Arc<Catalog>, forecast: ForecastService) -> Self {
        Self { catalog, forecast }
    }

    /// Run a full advice pass for a place and one or more vegetables
    pub async fn advise(&self, place: &str, names: &[String], days: u32) -> AppResult<AdviceReport> {
        validate_place_name(place).map_err(|msg| AppError::validation("location", msg))?;
        validate_forecast_days(days).map_err(|msg| AppError::validation("days", msg))?;

        // Resolve vegetables before any provider call
        let (profiles, failed) = resolve_profiles(&self.catalog, names)?;

        let location = self.forecast.geocode(place).await?;
        tracing::info!(
            "Evaluating {} vegetable(s) for {} over {} day(s)",
            profiles.len(),
            location.resolved_name,
            days
        );
        let forecast = self.forecast.fetch_forecast(&location, days).await?;

        Ok(build_report(location, days, forecast, &profiles, failed))
    }
}

/// Split requested names into known profiles and failed entries.
///
/// A single unknown vegetable, or a batch with no known vegetable at all,
/// is an error. Otherwise unknown names become failed entries.
pub fn resolve_profiles<'a>(
    catalog: &'a Catalog,
    names: &[String],
) -> AppResult<(Vec<&'a VegetableProfile>, Vec<FailedVegetable>)> {
    let mut requested: Vec<&str> = Vec::new();
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if !requested.contains(&name) {
            requested.push(name);
        }
    }

    if requested.is_empty() {
        return Err(AppError::validation(
            "vegetables",
            "At least one vegetable is required",
        ));
    }

    let mut profiles = Vec::with_capacity(requested.len());
    let mut failed = Vec::new();
    for name in &requested {
        match catalog.lookup(name) {
            Ok(profile) => profiles.push(profile),
            Err(AppError::UnknownVegetable(unknown)) if requested.len() > 1 => {
                tracing::warn!("Skipping unknown vegetable '{}'", unknown);
                failed.push(FailedVegetable {
                    name: unknown,
                    reason: "unknown vegetable".to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    if profiles.is_empty() {
        return Err(AppError::UnknownVegetable(requested.join(", ")));
    }

    Ok((profiles, failed))
}

/// Evaluate every profile against an already-acquired forecast
pub fn build_report(
    location: Location,
    days: u32,
    forecast: Vec<ForecastDay>,
    profiles: &[&VegetableProfile],
    failed: Vec<FailedVegetable>,
) -> AdviceReport {
    let vegetables = profiles
        .iter()
        .map(|profile| {
            let results = evaluate_range(profile, &forecast);
            let summary = summarize(&results);
            VegetableOutcome {
                vegetable: (*profile).clone(),
                calendar: build_calendar(profile, &forecast),
                results,
                summary,
                aggregate: aggregate_suitability(profile, &forecast),
            }
        })
        .collect();

    AdviceReport {
        chart: ChartSeries::from_days(&forecast),
        matrix: SuitabilityMatrix::build(profiles, &forecast),
        location,
        days,
        forecast,
        vegetables,
        failed,
    }
}
