//! HTTP handlers for planting advice

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::services::advisor::AdviceReport;
use crate::AppState;

/// Query parameters for an advice pass
#[derive(Debug, Deserialize, Validate)]
pub struct AdviceQuery {
    #[validate(length(min = 1, max = 100, message = "Location must be 1-100 characters"))]
    pub location: String,
    /// Comma-separated vegetable names
    #[validate(length(min = 1, message = "At least one vegetable is required"))]
    pub vegetables: String,
    #[validate(range(min = 1, max = 16, message = "Days must be between 1 and 16"))]
    pub days: Option<u32>,
}

impl AdviceQuery {
    pub fn vegetable_names(&self) -> Vec<String> {
        self.vegetables
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Evaluate sowing suitability for a place and one or more vegetables
pub async fn get_advice(
    State(state): State<AppState>,
    Query(query): Query<AdviceQuery>,
) -> AppResult<Json<AdviceReport>> {
    query.validate()?;
    let days = query.days.unwrap_or(state.config.advice.default_days);
    let report = state
        .advisor
        .advise(&query.location, &query.vegetable_names(), days)
        .await?;
    Ok(Json(report))
}
