//! Per-crop threshold tables.
//!
//! Every crop type has a [`ThresholdSet`] holding six ordered bounds for each
//! metric (moisture, temperature, humidity). Lookups are case-insensitive
//! exact matches on the crop name and fall back to the built-in `default`
//! set when the name is unknown.
//!
//! # Example
//!
//! ```
//! use agrotwin_core::{ThresholdTable, Metric};
//!
//! let table = ThresholdTable::default();
//!
//! let tomato = table.lookup("Tomato");
//! assert!(tomato.bounds(Metric::Moisture).critical_low >= 15.0);
//!
//! // Unknown crops use the default set
//! assert_eq!(table.lookup("dragonfruit"), table.default_set());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use agrotwin_types::{Metric, OptimalRange};

use crate::error::{Error, Result};

/// Name under which the fallback set is registered.
pub const DEFAULT_CROP: &str = "default";

/// Six ordered bounds for one metric.
///
/// Valid bounds are finite and strictly increasing:
/// `critical_low < warning_low < optimal_min < optimal_max < warning_high < critical_high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricBounds {
    pub critical_low: f64,
    pub warning_low: f64,
    pub optimal_min: f64,
    pub optimal_max: f64,
    pub warning_high: f64,
    pub critical_high: f64,
}

impl MetricBounds {
    /// Create bounds in ascending order. Use [`MetricBounds::validate`] to check them.
    pub const fn new(
        critical_low: f64,
        warning_low: f64,
        optimal_min: f64,
        optimal_max: f64,
        warning_high: f64,
        critical_high: f64,
    ) -> Self {
        Self {
            critical_low,
            warning_low,
            optimal_min,
            optimal_max,
            warning_high,
            critical_high,
        }
    }

    /// Bounds as an array, lowest first.
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.critical_low,
            self.warning_low,
            self.optimal_min,
            self.optimal_max,
            self.warning_high,
            self.critical_high,
        ]
    }

    /// Check that all bounds are finite and strictly increasing.
    ///
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        const NAMES: [&str; 6] = [
            "critical_low",
            "warning_low",
            "optimal_min",
            "optimal_max",
            "warning_high",
            "critical_high",
        ];

        let values = self.as_array();
        for (name, value) in NAMES.iter().zip(values) {
            if !value.is_finite() {
                return Err(format!("{} must be finite, got {}", name, value));
            }
        }
        for i in 1..values.len() {
            if values[i] <= values[i - 1] {
                return Err(format!(
                    "{} ({}) must be greater than {} ({})",
                    NAMES[i],
                    values[i],
                    NAMES[i - 1],
                    values[i - 1]
                ));
            }
        }
        Ok(())
    }

    /// The inclusive optimal range.
    pub fn optimal_range(&self) -> OptimalRange {
        OptimalRange {
            min: self.optimal_min,
            max: self.optimal_max,
        }
    }

    /// Whether `value` lies in the inclusive optimal range.
    pub fn is_optimal(&self, value: f64) -> bool {
        value >= self.optimal_min && value <= self.optimal_max
    }
}

/// Threshold bounds for all metrics of one crop type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    pub moisture: MetricBounds,
    pub temperature: MetricBounds,
    pub humidity: MetricBounds,
}

impl ThresholdSet {
    /// Bounds for a metric.
    pub fn bounds(&self, metric: Metric) -> &MetricBounds {
        match metric {
            Metric::Moisture => &self.moisture,
            Metric::Temperature => &self.temperature,
            Metric::Humidity => &self.humidity,
        }
    }

    /// Validate every metric's bounds, naming `crop` in the error.
    pub fn validate(&self, crop: &str) -> Result<()> {
        for metric in Metric::ALL {
            self.bounds(metric)
                .validate()
                .map_err(|reason| Error::InvalidThresholds {
                    crop: crop.to_string(),
                    metric,
                    reason,
                })?;
        }
        Ok(())
    }
}

const fn set(moisture: [f64; 6], temperature: [f64; 6], humidity: [f64; 6]) -> ThresholdSet {
    const fn b(v: [f64; 6]) -> MetricBounds {
        MetricBounds::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
    ThresholdSet {
        moisture: b(moisture),
        temperature: b(temperature),
        humidity: b(humidity),
    }
}

/// Fallback set for crops without their own table.
pub const DEFAULT_THRESHOLDS: ThresholdSet = set(
    [20.0, 30.0, 40.0, 70.0, 80.0, 90.0],
    [5.0, 10.0, 18.0, 28.0, 32.0, 38.0],
    [20.0, 30.0, 40.0, 70.0, 80.0, 90.0],
);

const BUILTIN_CROPS: [(&str, ThresholdSet); 6] = [
    (
        "tomato",
        set(
            [20.0, 30.0, 40.0, 70.0, 80.0, 90.0],
            [5.0, 10.0, 18.0, 27.0, 32.0, 35.0],
            [30.0, 40.0, 50.0, 70.0, 80.0, 90.0],
        ),
    ),
    (
        "lettuce",
        set(
            [25.0, 35.0, 45.0, 75.0, 85.0, 92.0],
            [2.0, 7.0, 15.0, 22.0, 26.0, 30.0],
            [30.0, 40.0, 50.0, 70.0, 80.0, 90.0],
        ),
    ),
    (
        "pepper",
        set(
            [20.0, 30.0, 40.0, 70.0, 80.0, 90.0],
            [8.0, 13.0, 20.0, 30.0, 33.0, 38.0],
            [30.0, 40.0, 50.0, 70.0, 80.0, 90.0],
        ),
    ),
    (
        "cucumber",
        set(
            [25.0, 35.0, 50.0, 80.0, 85.0, 95.0],
            [8.0, 12.0, 20.0, 30.0, 33.0, 38.0],
            [40.0, 50.0, 60.0, 85.0, 90.0, 95.0],
        ),
    ),
    (
        "strawberry",
        set(
            [25.0, 35.0, 45.0, 75.0, 85.0, 92.0],
            [2.0, 7.0, 15.0, 26.0, 30.0, 35.0],
            [35.0, 45.0, 60.0, 75.0, 85.0, 92.0],
        ),
    ),
    (
        "rice",
        set(
            [40.0, 55.0, 70.0, 95.0, 98.0, 100.0],
            [10.0, 15.0, 22.0, 32.0, 35.0, 40.0],
            [40.0, 50.0, 60.0, 85.0, 90.0, 95.0],
        ),
    ),
];

/// Threshold sets keyed by lowercase crop-type name.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable {
    default: ThresholdSet,
    crops: BTreeMap<String, ThresholdSet>,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThresholdTable {
    /// Table with only the default set.
    pub fn empty() -> Self {
        Self {
            default: DEFAULT_THRESHOLDS,
            crops: BTreeMap::new(),
        }
    }

    /// Table with the built-in crop sets.
    pub fn builtin() -> Self {
        let crops = BUILTIN_CROPS
            .iter()
            .map(|(name, set)| (name.to_string(), *set))
            .collect();
        Self {
            default: DEFAULT_THRESHOLDS,
            crops,
        }
    }

    /// Resolve the set for a crop name (case-insensitive), falling back to the default set.
    pub fn lookup(&self, crop_name: &str) -> &ThresholdSet {
        self.get(crop_name).unwrap_or(&self.default)
    }

    /// Resolve the set for a crop name without falling back.
    pub fn get(&self, crop_name: &str) -> Option<&ThresholdSet> {
        let key = crop_name.to_lowercase();
        if key == DEFAULT_CROP {
            return Some(&self.default);
        }
        self.crops.get(&key)
    }

    /// The fallback set.
    pub fn default_set(&self) -> &ThresholdSet {
        &self.default
    }

    /// Register or replace a crop's set after validating it.
    ///
    /// Registering under `"default"` replaces the fallback set.
    pub fn insert(&mut self, crop_name: &str, set: ThresholdSet) -> Result<()> {
        let key = crop_name.to_lowercase();
        set.validate(&key)?;

        if key == DEFAULT_CROP {
            self.default = set;
        } else {
            self.crops.insert(key, set);
        }
        Ok(())
    }

    /// Apply a batch of custom sets, failing on the first invalid one.
    pub fn with_overrides<I, S>(mut self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ThresholdSet)>,
        S: AsRef<str>,
    {
        for (name, set) in overrides {
            self.insert(name.as_ref(), set)?;
        }
        Ok(self)
    }

    /// Known crop names (lowercase, sorted), excluding `default`.
    pub fn crops(&self) -> impl Iterator<Item = &str> {
        self.crops.keys().map(String::as_str)
    }
}
