//! Recommendation synthesis and the caller-owned recommendation set.
//!
//! [`RecommendationEngine`] turns one evaluation input (sensor readings, crop
//! context, optional devices and weather) into a ranked list of
//! [`Recommendation`]s. Evaluation is pure: no I/O, no shared state. The
//! resulting list is typically stored in a [`RecommendationSet`] owned by
//! the caller, which provides dismiss/execute bookkeeping and the derived
//! views (active, critical, counts).
//!
//! # Example
//!
//! ```
//! use agrotwin_core::{Evaluation, RecommendationEngine, RecommendationSet};
//! use agrotwin_types::{CropContext, Priority, SensorReading, WeatherSnapshot};
//!
//! let engine = RecommendationEngine::default();
//! let crop = CropContext::named("tomato");
//! let sensors = vec![SensorReading::new("s-1", "soilMoisture", 15.0)];
//! let weather = WeatherSnapshot { temperature: Some(2.0), ..Default::default() };
//!
//! let mut set = RecommendationSet::new();
//! set.replace(engine.generate(&Evaluation::new(&sensors, &crop).with_weather(&weather)));
//!
//! assert_eq!(set.critical().count(), 2);
//! assert!(set.all().iter().all(|r| r.priority == Priority::Critical));
//! ```

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use tracing::debug;
use uuid::Uuid;

use agrotwin_types::{
    CropContext, DeviceRef, Metric, Priority, Recommendation, RecommendationKind,
    RecommendationMetadata, SensorReading, WeatherSnapshot,
};

use crate::classifier::classify;
use crate::error::{Error, Result};
use crate::growth::GrowthProgress;
use crate::thresholds::ThresholdTable;

/// Longest accepted recommendation lifetime (one year).
pub const MAX_EXPIRY_MINUTES: u32 = 365 * 24 * 60;

/// Tunable constants of the synthesizer.
///
/// Defaults reproduce the standard rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lifetime of a recommendation in minutes (default 240 = 4 hours).
    pub expiry_minutes: u32,
    /// Moisture below which a rain forecast suggests skipping watering.
    pub rain_skip_moisture: f64,
    /// Outside temperature below which a frost warning is raised.
    pub frost_temperature: f64,
    /// Outside temperature above which a heat warning is raised.
    pub heat_temperature: f64,
    /// Days before the expected harvest date that trigger "harvest soon".
    pub harvest_soon_days: i64,
    /// Days after the expected harvest date that still count as "harvest ready".
    pub harvest_ready_window_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            expiry_minutes: 240,
            rain_skip_moisture: 50.0,
            frost_temperature: 5.0,
            heat_temperature: 35.0,
            harvest_soon_days: 7,
            harvest_ready_window_days: 7,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.expiry_minutes == 0 {
            return Err(Error::InvalidConfig(
                "expiry_minutes must be greater than 0".to_string(),
            ));
        }
        if self.expiry_minutes > MAX_EXPIRY_MINUTES {
            return Err(Error::InvalidConfig(format!(
                "expiry_minutes must be at most {} (one year), got {}",
                MAX_EXPIRY_MINUTES, self.expiry_minutes
            )));
        }
        if self.harvest_soon_days < 0 || self.harvest_ready_window_days < 0 {
            return Err(Error::InvalidConfig(
                "harvest day windows must not be negative".to_string(),
            ));
        }
        for (name, value) in [
            ("rain_skip_moisture", self.rain_skip_moisture),
            ("frost_temperature", self.frost_temperature),
            ("heat_temperature", self.heat_temperature),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("{} must be finite", name)));
            }
        }
        if self.frost_temperature >= self.heat_temperature {
            return Err(Error::InvalidConfig(format!(
                "frost_temperature ({}) must be below heat_temperature ({})",
                self.frost_temperature, self.heat_temperature
            )));
        }
        Ok(())
    }

    pub fn expiry(&self) -> Duration {
        Duration::minutes(i64::from(self.expiry_minutes))
    }
}

/// Inputs of one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation<'a> {
    pub sensors: &'a [SensorReading],
    pub crop: &'a CropContext,
    /// Known devices; only used to name devices in metadata.
    pub devices: &'a [DeviceRef],
    pub weather: Option<&'a WeatherSnapshot>,
}

impl<'a> Evaluation<'a> {
    pub fn new(sensors: &'a [SensorReading], crop: &'a CropContext) -> Self {
        Self {
            sensors,
            crop,
            devices: &[],
            weather: None,
        }
    }

    pub fn with_devices(mut self, devices: &'a [DeviceRef]) -> Self {
        self.devices = devices;
        self
    }

    pub fn with_weather(mut self, weather: &'a WeatherSnapshot) -> Self {
        self.weather = Some(weather);
        self
    }

    fn device_name(&self, device_id: Option<&str>) -> Option<String> {
        let id = device_id?;
        self.devices
            .iter()
            .find(|d| d.id == id)
            .and_then(|d| d.name.clone())
    }
}

/// Rule-based recommendation synthesizer.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    table: ThresholdTable,
    config: EngineConfig,
}

impl RecommendationEngine {
    /// Create an engine, validating the configuration.
    pub fn new(table: ThresholdTable, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { table, config })
    }

    pub fn table(&self) -> &ThresholdTable {
        &self.table
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate at the current UTC time.
    pub fn generate(&self, input: &Evaluation<'_>) -> Vec<Recommendation> {
        self.generate_at(OffsetDateTime::now_utc(), input)
    }

    /// Evaluate at a fixed instant.
    ///
    /// Recommendations are emitted for readings in input order, then growth
    /// stage, then weather, and finally stable-sorted by priority rank.
    pub fn generate_at(&self, now: OffsetDateTime, input: &Evaluation<'_>) -> Vec<Recommendation> {
        let crop_name = input.crop.crop_name.as_str();
        let thresholds = self.table.lookup(crop_name);
        // Saturate instead of overflowing past the end of year 9999
        let expires_at = now
            .checked_add(self.config.expiry())
            .unwrap_or_else(|| PrimitiveDateTime::MAX.assume_utc());
        let base_metadata = RecommendationMetadata {
            crop_name: crop_name.to_string(),
            ..Default::default()
        };
        let make = |kind: RecommendationKind, metadata: RecommendationMetadata| {
            Recommendation::new(kind, metadata, now, expires_at)
        };

        let mut out = Vec::new();

        for reading in input.sensors {
            let Some(classification) = classify(reading, thresholds) else {
                debug!(
                    sensor = %reading.sensor_id,
                    sensor_type = %reading.sensor_type,
                    value = reading.value,
                    "reading not actionable"
                );
                continue;
            };
            let Some(kind) = classification.recommendation_kind() else {
                continue;
            };

            let unit = if reading.unit.is_empty() {
                classification.metric.default_unit().to_string()
            } else {
                reading.unit.clone()
            };
            let metadata = RecommendationMetadata {
                sensor_id: Some(reading.sensor_id.clone()),
                sensor_type: Some(reading.sensor_type.clone()),
                current_value: Some(reading.value),
                optimal_range: Some(classification.bounds.optimal_range()),
                unit: Some(unit),
                device_name: input.device_name(reading.device_id.as_deref()),
                ..base_metadata.clone()
            };
            let mut rec = make(kind, metadata);
            rec.device_id = reading.device_id.clone();
            out.push(rec);
        }

        if let Some(progress) = GrowthProgress::from_crop(input.crop, now) {
            for kind in progress.recommendation_kinds(
                self.config.harvest_soon_days,
                self.config.harvest_ready_window_days,
            ) {
                out.push(make(kind, base_metadata.clone()));
            }
        }

        if let Some(weather) = input.weather {
            for kind in self.weather_kinds(weather, input.sensors) {
                let metadata = RecommendationMetadata {
                    weather_factor: true,
                    ..base_metadata.clone()
                };
                out.push(make(kind, metadata));
            }
        }

        out.sort_by_key(|r| r.priority.rank());

        debug!(
            crop = crop_name,
            readings = input.sensors.len(),
            recommendations = out.len(),
            "generated recommendations"
        );
        out
    }

    fn weather_kinds(
        &self,
        weather: &WeatherSnapshot,
        sensors: &[SensorReading],
    ) -> Vec<RecommendationKind> {
        let mut kinds = Vec::new();

        let dry_enough = sensors.iter().any(|r| {
            r.metric() == Some(Metric::Moisture) && r.value < self.config.rain_skip_moisture
        });
        if weather.mentions("rain") && dry_enough {
            kinds.push(RecommendationKind::RainSkipWatering);
        }

        let cold = weather
            .temperature
            .is_some_and(|t| t < self.config.frost_temperature);
        if cold || weather.mentions("frost") {
            kinds.push(RecommendationKind::FrostWarning);
        }

        if weather
            .temperature
            .is_some_and(|t| t > self.config.heat_temperature)
        {
            kinds.push(RecommendationKind::HeatWarning);
        }
        kinds
    }
}

/// Counts over the active recommendations of a set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub total: usize,
    pub active: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// The current recommendation set of one session or dashboard.
#[derive(Debug, Clone, Default)]
pub struct RecommendationSet {
    items: Vec<Recommendation>,
}

impl RecommendationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set with a fresh evaluation result.
    pub fn replace(&mut self, recommendations: Vec<Recommendation>) -> &[Recommendation] {
        self.items = recommendations;
        &self.items
    }

    pub fn all(&self) -> &[Recommendation] {
        &self.items
    }

    pub fn get(&self, id: Uuid) -> Option<&Recommendation> {
        self.items.iter().find(|r| r.id == id)
    }

    /// Mark a recommendation dismissed. Unknown ids are ignored.
    ///
    /// Returns whether a record was found.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        self.update(id, |r| r.dismissed = true)
    }

    /// Mark a recommendation executed. Unknown ids are ignored.
    ///
    /// Returns whether a record was found.
    pub fn mark_executed(&mut self, id: Uuid) -> bool {
        self.update(id, |r| r.executed = true)
    }

    fn update(&mut self, id: Uuid, f: impl FnOnce(&mut Recommendation)) -> bool {
        match self.items.iter_mut().find(|r| r.id == id) {
            Some(rec) => {
                f(rec);
                true
            }
            None => {
                debug!(%id, "no recommendation with this id");
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drop records whose expiry has passed. Returns how many were removed.
    pub fn prune_expired(&mut self, now: OffsetDateTime) -> usize {
        let before = self.items.len();
        self.items.retain(|r| !r.is_expired(now));
        before - self.items.len()
    }

    /// Recommendations neither dismissed nor executed.
    pub fn active(&self) -> impl Iterator<Item = &Recommendation> {
        self.items.iter().filter(|r| r.is_active())
    }

    /// Active recommendations with critical priority.
    pub fn critical(&self) -> impl Iterator<Item = &Recommendation> {
        self.active().filter(|r| r.priority == Priority::Critical)
    }

    /// Number of active recommendations.
    pub fn count(&self) -> usize {
        self.active().count()
    }

    /// Number of records held, including dismissed and executed ones.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summary(&self) -> RecommendationSummary {
        let mut summary = RecommendationSummary {
            total: self.items.len(),
            ..Default::default()
        };
        for rec in self.active() {
            summary.active += 1;
            match rec.priority {
                Priority::Critical => summary.critical += 1,
                Priority::High => summary.high += 1,
                Priority::Medium => summary.medium += 1,
                Priority::Low => summary.low += 1,
            }
        }
        summary
    }
}
