//! Rule engine and digital twin for smart-farm monitoring.
//!
//! This crate turns raw farm telemetry into actionable advice and keeps a
//! model of actuator state. It performs no I/O: callers fetch readings,
//! crop records, weather and action logs from wherever they live and hand
//! them in as plain values from [`agrotwin_types`].
//!
//! # Features
//!
//! - **Crop thresholds**: Built-in per-crop bounds for soil moisture, air
//!   temperature and humidity, with case-insensitive lookup and a default
//!   fallback
//! - **Classification**: Bucket a reading as critical low, warning low,
//!   optimal or critical high
//! - **Recommendations**: Sensor, growth-stage and weather rules producing
//!   ranked, expiring [`Recommendation`]s
//! - **Recommendation sets**: Dismiss/execute bookkeeping, active and
//!   critical views, summaries
//! - **Digital twin**: Infer fan, roof, light and humidifier state from the
//!   device action log
//!
//! # Quick Start
//!
//! ```
//! use agrotwin_core::{Evaluation, RecommendationEngine};
//! use agrotwin_types::{Category, CropContext, Priority, SensorReading};
//!
//! let engine = RecommendationEngine::default();
//! let crop = CropContext::named("Tomato");
//! let sensors = vec![SensorReading::new("s-1", "soilMoisture", 15.0)];
//!
//! let recs = engine.generate(&Evaluation::new(&sensors, &crop));
//! assert_eq!(recs.len(), 1);
//! assert_eq!(recs[0].category, Category::Irrigation);
//! assert_eq!(recs[0].priority, Priority::Critical);
//! ```
//!
//! Thresholds can be inspected or overridden per crop:
//!
//! ```
//! use agrotwin_core::{Metric, ThresholdTable};
//!
//! let table = ThresholdTable::builtin();
//! let tomato = table.lookup("TOMATO");
//! assert_eq!(tomato.bounds(Metric::Temperature).critical_high, 35.0);
//! // Unknown crops fall back to the default set
//! assert_eq!(table.lookup("kohlrabi"), table.default_set());
//! ```

pub mod classifier;
pub mod error;
pub mod growth;
pub mod recommendations;
pub mod thresholds;
pub mod twin;

// Core exports
pub use classifier::{Bucket, Classification, classify, classify_value};
pub use error::{Error, Result};
pub use growth::{GrowthProgress, GrowthStage};
pub use recommendations::{
    EngineConfig, Evaluation, RecommendationEngine, RecommendationSet, RecommendationSummary,
};
pub use thresholds::{DEFAULT_CROP, MetricBounds, ThresholdSet, ThresholdTable};
pub use twin::{ActuatorChange, DigitalTwin, parse_action, resolve_actuator_states};

// Re-export from agrotwin-types
pub use agrotwin_types::{
    ActionLogEntry, ActionType, ActuatorState, ActuatorType, Category, CropContext, DeviceRef,
    Metric, Priority, Recommendation, RecommendationKind, RecommendationMetadata, SensorReading,
    WeatherSnapshot,
};
