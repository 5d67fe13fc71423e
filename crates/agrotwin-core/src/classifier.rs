//! Reading classification against crop thresholds.
//!
//! A reading is first routed to a metric family by its free-text type (see
//! [`Metric::from_sensor_type`]), then its value is placed in a [`Bucket`]
//! using the first matching rule:
//!
//! 1. `value <= critical_low` → [`Bucket::CriticalLow`]
//! 2. `value <= warning_low` → [`Bucket::WarningLow`]
//! 3. `value >= critical_high` → [`Bucket::CriticalHigh`]
//! 4. `optimal_min <= value <= optimal_max` → [`Bucket::Optimal`]
//!
//! Anything else (including NaN) is not actionable and yields `None`.

use serde::{Deserialize, Serialize};
use tracing::trace;

use agrotwin_types::{Metric, RecommendationKind, SensorReading};

use crate::thresholds::{MetricBounds, ThresholdSet};

/// Severity bucket of a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// At or below `critical_low`.
    CriticalLow,
    /// Above `critical_low`, at or below `warning_low`.
    WarningLow,
    /// Within `optimal_min..=optimal_max`.
    Optimal,
    /// At or above `critical_high`.
    CriticalHigh,
}

impl Bucket {
    /// Human-readable label.
    pub fn description(&self) -> &'static str {
        match self {
            Bucket::CriticalLow => "critical low",
            Bucket::WarningLow => "warning low",
            Bucket::Optimal => "optimal",
            Bucket::CriticalHigh => "critical high",
        }
    }
}

/// Result of classifying one reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Metric family the reading was routed to.
    pub metric: Metric,
    /// Bucket the value fell into.
    pub bucket: Bucket,
    /// Bounds the value was compared against.
    pub bounds: MetricBounds,
}

impl Classification {
    /// Recommendation raised for this classification, if the metric has one.
    pub fn recommendation_kind(&self) -> Option<RecommendationKind> {
        recommendation_kind(self.metric, self.bucket)
    }
}

/// Place a value in a bucket.
pub fn classify_value(value: f64, bounds: &MetricBounds) -> Option<Bucket> {
    if value <= bounds.critical_low {
        Some(Bucket::CriticalLow)
    } else if value <= bounds.warning_low {
        Some(Bucket::WarningLow)
    } else if value >= bounds.critical_high {
        Some(Bucket::CriticalHigh)
    } else if bounds.is_optimal(value) {
        Some(Bucket::Optimal)
    } else {
        None
    }
}

/// Classify a reading against a crop's threshold set.
///
/// Returns `None` when the reading's type routes to no known metric or the
/// value falls outside every bucket.
pub fn classify(reading: &SensorReading, thresholds: &ThresholdSet) -> Option<Classification> {
    let metric = reading.metric()?;
    let bounds = *thresholds.bounds(metric);
    let bucket = classify_value(reading.value, &bounds)?;

    trace!(
        sensor = %reading.sensor_id,
        %metric,
        value = reading.value,
        bucket = bucket.description(),
        "classified reading"
    );

    Some(Classification {
        metric,
        bucket,
        bounds,
    })
}

/// The (metric × bucket) recommendation table.
///
/// Humidity has no optimal or warning rows and temperature has no optimal
/// row; those combinations produce no recommendation.
pub fn recommendation_kind(metric: Metric, bucket: Bucket) -> Option<RecommendationKind> {
    use RecommendationKind as K;

    match (metric, bucket) {
        (Metric::Moisture, Bucket::CriticalLow) => Some(K::MoistureCriticalLow),
        (Metric::Moisture, Bucket::WarningLow) => Some(K::MoistureLow),
        (Metric::Moisture, Bucket::CriticalHigh) => Some(K::MoistureCriticalHigh),
        (Metric::Moisture, Bucket::Optimal) => Some(K::MoistureOptimal),
        (Metric::Temperature, Bucket::CriticalLow) => Some(K::TemperatureCriticalLow),
        (Metric::Temperature, Bucket::WarningLow) => Some(K::TemperatureLow),
        (Metric::Temperature, Bucket::CriticalHigh) => Some(K::TemperatureCriticalHigh),
        (Metric::Humidity, Bucket::CriticalLow) => Some(K::HumidityCriticalLow),
        (Metric::Humidity, Bucket::CriticalHigh) => Some(K::HumidityCriticalHigh),
        (Metric::Temperature, Bucket::Optimal)
        | (Metric::Humidity, Bucket::WarningLow)
        | (Metric::Humidity, Bucket::Optimal) => None,
    }
}
