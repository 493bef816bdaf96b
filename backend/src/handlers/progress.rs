//! HTTP handlers for growing progress

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use shared::{CultivationMethod, SpeedModifier};
use validator::Validate;

use crate::error::AppResult;
use crate::services::progress::ProgressReport;
use crate::AppState;

/// Query parameters for progress tracking
#[derive(Debug, Deserialize, Validate)]
pub struct ProgressQuery {
    #[validate(length(min = 1, max = 100, message = "Vegetable name must be 1-100 characters"))]
    pub vegetable: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub method: CultivationMethod,
    #[serde(default)]
    pub speed: SpeedModifier,
    /// Defaults to the server's local date
    pub today: Option<NaiveDate>,
}

/// Track transplant and harvest progress for a vegetable
pub async fn get_progress(
    State(state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> AppResult<Json<ProgressReport>> {
    query.validate()?;
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    let report = state.progress.track(
        &query.vegetable,
        query.method,
        query.speed,
        query.start_date,
        today,
    )?;
    Ok(Json(report))
}
