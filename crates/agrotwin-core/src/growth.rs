//! Growth-stage timing derived from planting and expected harvest dates.
//!
//! Day counts are calendar-day differences of the UTC dates; progress is the
//! linear share of elapsed days, clamped to `0..=100` percent.

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use agrotwin_types::{CropContext, RecommendationKind};

/// Derived growth stage label. Never stored; recomputed from the dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Seedling,
    Vegetative,
    Flowering,
    Fruiting,
    HarvestReady,
}

impl GrowthStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Seedling => "seedling",
            GrowthStage::Vegetative => "vegetative",
            GrowthStage::Flowering => "flowering",
            GrowthStage::Fruiting => "fruiting",
            GrowthStage::HarvestReady => "harvest_ready",
        }
    }
}

/// Timing of a crop between planting and expected harvest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthProgress {
    pub days_since_planting: i64,
    /// Negative once the expected harvest date has passed.
    pub days_to_harvest: i64,
    pub total_days: i64,
    /// Percent of the growing period elapsed, `0.0..=100.0`.
    pub progress: f64,
}

fn calendar_days(from: OffsetDateTime, to: OffsetDateTime) -> i64 {
    let from = from.to_offset(UtcOffset::UTC).date();
    let to = to.to_offset(UtcOffset::UTC).date();
    (to - from).whole_days()
}

impl GrowthProgress {
    /// Compute timing at `now`.
    ///
    /// A growing period of zero or negative length counts as fully elapsed.
    pub fn compute(planting: OffsetDateTime, harvest: OffsetDateTime, now: OffsetDateTime) -> Self {
        let days_since_planting = calendar_days(planting, now);
        let days_to_harvest = calendar_days(now, harvest);
        let total_days = calendar_days(planting, harvest);

        let progress = if total_days > 0 {
            (days_since_planting as f64 / total_days as f64 * 100.0).clamp(0.0, 100.0)
        } else {
            100.0
        };

        Self {
            days_since_planting,
            days_to_harvest,
            total_days,
            progress,
        }
    }

    /// Timing for a crop, if both dates are present.
    pub fn from_crop(crop: &CropContext, now: OffsetDateTime) -> Option<Self> {
        match (crop.planting_date, crop.expected_harvest_date) {
            (Some(planting), Some(harvest)) => Some(Self::compute(planting, harvest, now)),
            _ => None,
        }
    }

    pub fn stage(&self) -> GrowthStage {
        if self.days_to_harvest <= 0 || self.progress >= 100.0 {
            GrowthStage::HarvestReady
        } else if self.progress < 25.0 {
            GrowthStage::Seedling
        } else if self.progress < 50.0 {
            GrowthStage::Vegetative
        } else if self.progress < 75.0 {
            GrowthStage::Flowering
        } else {
            GrowthStage::Fruiting
        }
    }

    /// Growth-stage recommendations, in emission order.
    ///
    /// The four checks are independent; each is evaluated regardless of the
    /// others.
    pub fn recommendation_kinds(
        &self,
        harvest_soon_days: i64,
        harvest_ready_window_days: i64,
    ) -> Vec<RecommendationKind> {
        let mut kinds = Vec::new();
        let dth = self.days_to_harvest;

        if dth > 0 && dth <= harvest_soon_days {
            kinds.push(RecommendationKind::HarvestSoon {
                days_to_harvest: dth,
            });
        }
        if dth <= 0 && dth > -harvest_ready_window_days {
            kinds.push(RecommendationKind::HarvestReady { days_overdue: -dth });
        }
        if self.progress < 25.0 {
            kinds.push(RecommendationKind::SeedlingStage);
        }
        if (50.0..75.0).contains(&self.progress) {
            kinds.push(RecommendationKind::FloweringStage);
        }
        kinds
    }
}
