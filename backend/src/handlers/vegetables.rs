//! HTTP handlers for the vegetable catalog

use axum::{
    extract::{Path, State},
    Json,
};
use shared::VegetableProfile;

use crate::error::AppResult;
use crate::AppState;

/// List every vegetable in the catalog
pub async fn list_vegetables(State(state): State<AppState>) -> Json<Vec<VegetableProfile>> {
    Json(state.catalog.profiles().to_vec())
}

/// List vegetable names in catalog order
pub async fn list_vegetable_names(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.names().into_iter().map(String::from).collect())
}

/// Get one vegetable profile by name
pub async fn get_vegetable(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<VegetableProfile>> {
    let profile = state.catalog.lookup(&name)?;
    Ok(Json(profile.clone()))
}
