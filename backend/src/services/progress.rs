//! Growing progress service

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use shared::{plan_milestones, CultivationMethod, Milestone, SpeedModifier};

use crate::error::{AppError, AppResult};
use crate::services::catalog::Catalog;

/// Milestone progress for one vegetable
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub vegetable: String,
    pub method: CultivationMethod,
    pub speed: SpeedModifier,
    pub start_date: NaiveDate,
    pub today: NaiveDate,
    pub milestones: Vec<Milestone>,
}

#[derive(Clone)]
pub struct ProgressService {
    catalog: Arc<Catalog>,
}

impl ProgressService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Track a vegetable's milestones as of `today`
    pub fn track(
        &self,
        vegetable: &str,
        method: CultivationMethod,
        speed: SpeedModifier,
        start_date: NaiveDate,
        today: NaiveDate,
    ) -> AppResult<ProgressReport> {
        let profile = self.catalog.lookup(vegetable)?;
        let milestones = plan_milestones(profile, method, speed, start_date, today)
            .ok_or_else(|| {
                AppError::validation("start_date", "Start date is too far in the future")
            })?;
        tracing::debug!(
            "Tracked {} milestone(s) for {} started {}",
            milestones.len(),
            profile.name,
            start_date
        );

        Ok(ProgressReport {
            vegetable: profile.name.clone(),
            method,
            speed,
            start_date,
            today,
            milestones,
        })
    }
}
