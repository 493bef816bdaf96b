//! Growing progress tracking
//!
//! Pure date arithmetic. Callers pass `today` in so results are
//! deterministic in tests.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::VegetableProfile;

/// Elapsed time toward a milestone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressState {
    pub start_date: NaiveDate,
    pub target_duration_days: i64,
    /// Raw `today - start_date`; negative when the start is in the future
    pub elapsed_days: i64,
    /// `elapsed / target`, clamped to [0, 1]
    pub fraction: f64,
    pub projected_completion_date: NaiveDate,
}

impl ProgressState {
    pub fn is_complete(&self) -> bool {
        self.fraction >= 1.0
    }

    pub fn percent(&self) -> u8 {
        (self.fraction * 100.0).round() as u8
    }
}

/// Apply a speed offset to a base duration, flooring at zero.
pub fn adjust_duration(base_days: i64, offset_days: i64) -> i64 {
    (base_days + offset_days).max(0)
}

/// Compute progress for a milestone `target_duration_days` after `start_date`.
///
/// A negative duration is floored to zero. With a zero duration the milestone
/// falls on the start date itself, so the fraction is 1.0 once that date is
/// reached and 0.0 before it.
///
/// Returns `None` when the completion date falls outside the calendar range.
pub fn compute_progress(
    start_date: NaiveDate,
    target_duration_days: i64,
    today: NaiveDate,
) -> Option<ProgressState> {
    let target = target_duration_days.max(0);
    let elapsed_days = (today - start_date).num_days();

    let fraction = if target == 0 {
        if elapsed_days >= 0 {
            1.0
        } else {
            0.0
        }
    } else {
        (elapsed_days as f64 / target as f64).clamp(0.0, 1.0)
    };

    let projected_completion_date = start_date.checked_add_days(Days::new(target as u64))?;

    Some(ProgressState {
        start_date,
        target_duration_days: target,
        elapsed_days,
        fraction,
        projected_completion_date,
    })
}

/// How the vegetable is started
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CultivationMethod {
    /// Raised as seedlings, then transplanted
    #[default]
    Seedling,
    /// Sown straight into the bed
    DirectSowing,
}

/// Growth speed adjustment chosen by the grower
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpeedModifier {
    Fast,
    #[default]
    Normal,
    Slow,
}

impl SpeedModifier {
    pub fn offset_days(&self) -> i64 {
        match self {
            SpeedModifier::Fast => -7,
            SpeedModifier::Normal => 0,
            SpeedModifier::Slow => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    Transplant,
    Harvest,
}

impl std::fmt::Display for MilestoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MilestoneKind::Transplant => write!(f, "transplant"),
            MilestoneKind::Harvest => write!(f, "harvest"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    pub kind: MilestoneKind,
    pub progress: ProgressState,
}

/// Plan the transplant and harvest milestones for a vegetable sown on `start_date`.
///
/// The speed offset only shortens or lengthens the transplant step. Harvest
/// counts from the projected transplant date when the profile says so and
/// the vegetable is raised as seedlings; otherwise from `start_date`.
/// Returns `None` when any milestone date falls outside the calendar range.
pub fn plan_milestones(
    profile: &VegetableProfile,
    method: CultivationMethod,
    speed: SpeedModifier,
    start_date: NaiveDate,
    today: NaiveDate,
) -> Option<Vec<Milestone>> {
    let mut milestones = Vec::with_capacity(2);
    let mut harvest_start = start_date;

    if method == CultivationMethod::Seedling {
        let duration = adjust_duration(profile.days_to_transplant as i64, speed.offset_days());
        let progress = compute_progress(start_date, duration, today)?;
        if profile.harvest_counts_from_transplant() {
            harvest_start = progress.projected_completion_date;
        }
        milestones.push(Milestone {
            kind: MilestoneKind::Transplant,
            progress,
        });
    }

    if let Some(days_to_harvest) = profile.days_to_harvest {
        milestones.push(Milestone {
            kind: MilestoneKind::Harvest,
            progress: compute_progress(harvest_start, days_to_harvest as i64, today)?,
        });
    }

    Some(milestones)
}
