//! Core types for farm sensor data, crop context, recommendations and actuators.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ParseError;

/// Metric family a sensor reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Metric {
    /// Soil moisture, usually in percent.
    Moisture,
    /// Air or soil temperature in °C.
    Temperature,
    /// Relative air humidity in percent.
    Humidity,
}

impl Metric {
    /// All metric families, in routing order.
    pub const ALL: [Metric; 3] = [Metric::Moisture, Metric::Temperature, Metric::Humidity];

    /// Route a free-text sensor type to a metric family.
    ///
    /// Matching is a case-insensitive substring test, checked in this order:
    /// `moisture`/`soil`, then `temp`, then `humid`. Types matching none of
    /// these yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use agrotwin_types::Metric;
    ///
    /// assert_eq!(Metric::from_sensor_type("soilMoisture"), Some(Metric::Moisture));
    /// assert_eq!(Metric::from_sensor_type("Air Temp"), Some(Metric::Temperature));
    /// assert_eq!(Metric::from_sensor_type("HUMIDITY"), Some(Metric::Humidity));
    /// assert_eq!(Metric::from_sensor_type("light"), None);
    /// ```
    #[must_use]
    pub fn from_sensor_type(sensor_type: &str) -> Option<Self> {
        let lower = sensor_type.to_lowercase();

        if lower.contains("moisture") || lower.contains("soil") {
            Some(Metric::Moisture)
        } else if lower.contains("temp") {
            Some(Metric::Temperature)
        } else if lower.contains("humid") {
            Some(Metric::Humidity)
        } else {
            None
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Moisture => "moisture",
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
        }
    }

    /// Default display unit for the metric.
    pub fn default_unit(&self) -> &'static str {
        match self {
            Metric::Moisture | Metric::Humidity => "%",
            Metric::Temperature => "°C",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "moisture" => Ok(Metric::Moisture),
            "temperature" => Ok(Metric::Temperature),
            "humidity" => Ok(Metric::Humidity),
            _ => Err(ParseError::unknown("metric", s)),
        }
    }
}

/// A single sensor reading as delivered by the backend API.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct SensorReading {
    /// Sensor identifier.
    pub sensor_id: String,
    /// Device the sensor is mounted on, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub device_id: Option<String>,
    /// Free-text sensor type such as `"soilMoisture"` or `"temperature"`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub sensor_type: String,
    /// Measured value.
    pub value: f64,
    /// Unit string as reported by the sensor.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: String,
    /// When the value was measured.
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub timestamp: OffsetDateTime,
}

impl SensorReading {
    /// Create a reading timestamped at the Unix epoch, with no device or unit.
    ///
    /// Mostly useful in tests and examples.
    pub fn new(sensor_id: impl Into<String>, sensor_type: impl Into<String>, value: f64) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            device_id: None,
            sensor_type: sensor_type.into(),
            value,
            unit: String::new(),
            timestamp: OffsetDateTime::UNIX_EPOCH,
        }
    }

    /// Metric family this reading routes to, if any.
    pub fn metric(&self) -> Option<Metric> {
        Metric::from_sensor_type(&self.sensor_type)
    }
}

/// Crop record fields the evaluator reads.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CropContext {
    /// Crop record identifier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub crop_id: Option<String>,
    /// Crop type name, used to pick the threshold table (e.g. `"tomato"`).
    pub crop_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub variety: Option<String>,
    /// Lifecycle status as stored by crop management (e.g. `"growing"`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "time::serde::rfc3339::option")
    )]
    pub planting_date: Option<OffsetDateTime>,
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "time::serde::rfc3339::option")
    )]
    pub expected_harvest_date: Option<OffsetDateTime>,
}

impl CropContext {
    /// Create a context with just a crop name.
    pub fn named(crop_name: impl Into<String>) -> Self {
        Self {
            crop_name: crop_name.into(),
            ..Self::default()
        }
    }
}

/// Optional weather snapshot accompanying an evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct WeatherSnapshot {
    /// Current outside temperature in °C.
    #[cfg_attr(feature = "serde", serde(default))]
    pub temperature: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub humidity: Option<f64>,
    /// Forecast text, e.g. `"Light rain this afternoon"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub forecast: Option<String>,
    /// Current condition text, e.g. `"Cloudy"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<String>,
}

impl WeatherSnapshot {
    /// Whether the forecast or condition text mentions `word` (case-insensitive).
    pub fn mentions(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        [self.forecast.as_deref(), self.condition.as_deref()]
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(&word))
    }
}

/// A device known to the farm, passed through into recommendation metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct DeviceRef {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub device_type: Option<String>,
}

/// Recommendation priority, ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// All priorities in rank order.
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    /// Sort rank: critical = 0, high = 1, medium = 2, low = 3.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Suggested display color (hex).
    pub fn color(&self) -> &'static str {
        match self {
            Priority::Critical => "#f44336",
            Priority::High => "#ff9800",
            Priority::Medium => "#ffc107",
            Priority::Low => "#4caf50",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(ParseError::unknown("priority", s)),
        }
    }
}

/// Recommendation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Category {
    Irrigation,
    Fertilizer,
    Harvest,
    Protection,
    Monitoring,
    Optimization,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Irrigation => "irrigation",
            Category::Fertilizer => "fertilizer",
            Category::Harvest => "harvest",
            Category::Protection => "protection",
            Category::Monitoring => "monitoring",
            Category::Optimization => "optimization",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "irrigation" => Ok(Category::Irrigation),
            "fertilizer" => Ok(Category::Fertilizer),
            "harvest" => Ok(Category::Harvest),
            "protection" => Ok(Category::Protection),
            "monitoring" => Ok(Category::Monitoring),
            "optimization" => Ok(Category::Optimization),
            _ => Err(ParseError::unknown("category", s)),
        }
    }
}

/// Action a recommendation suggests to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ActionType {
    Irrigate,
    ScheduleIrrigation,
    StopIrrigation,
    SkipIrrigation,
    ActivateHeating,
    ActivateVentilation,
    ActivateHumidifier,
    MonitorTemperature,
    ApplyFertilizer,
    PlanHarvest,
    HarvestNow,
    ProtectFromFrost,
    ProvideShade,
    ViewDetails,
}

impl ActionType {
    /// Machine-readable action identifier (e.g. `"activate_ventilation"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Irrigate => "irrigate",
            ActionType::ScheduleIrrigation => "schedule_irrigation",
            ActionType::StopIrrigation => "stop_irrigation",
            ActionType::SkipIrrigation => "skip_irrigation",
            ActionType::ActivateHeating => "activate_heating",
            ActionType::ActivateVentilation => "activate_ventilation",
            ActionType::ActivateHumidifier => "activate_humidifier",
            ActionType::MonitorTemperature => "monitor_temperature",
            ActionType::ApplyFertilizer => "apply_fertilizer",
            ActionType::PlanHarvest => "plan_harvest",
            ActionType::HarvestNow => "harvest_now",
            ActionType::ProtectFromFrost => "protect_from_frost",
            ActionType::ProvideShade => "provide_shade",
            ActionType::ViewDetails => "view_details",
        }
    }

    /// Short button label.
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::Irrigate => "Irrigate now",
            ActionType::ScheduleIrrigation => "Schedule irrigation",
            ActionType::StopIrrigation => "Stop irrigation",
            ActionType::SkipIrrigation => "Skip watering",
            ActionType::ActivateHeating => "Activate heating",
            ActionType::ActivateVentilation => "Activate ventilation",
            ActionType::ActivateHumidifier => "Turn on humidifier",
            ActionType::MonitorTemperature => "Monitor temperature",
            ActionType::ApplyFertilizer => "Apply fertilizer",
            ActionType::PlanHarvest => "Plan harvest",
            ActionType::HarvestNow => "Harvest now",
            ActionType::ProtectFromFrost => "Protect crops",
            ActionType::ProvideShade => "Provide shade",
            ActionType::ViewDetails => "View details",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The condition a recommendation was raised for.
///
/// Each variant carries a fixed category, priority, action and icon. UI
/// layers may localise from the variant instead of the default English copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RecommendationKind {
    MoistureCriticalLow,
    MoistureLow,
    MoistureCriticalHigh,
    MoistureOptimal,
    TemperatureCriticalLow,
    TemperatureCriticalHigh,
    TemperatureLow,
    HumidityCriticalHigh,
    HumidityCriticalLow,
    /// Harvest due within the next week.
    HarvestSoon { days_to_harvest: i64 },
    /// Harvest date reached or passed by less than a week.
    HarvestReady { days_overdue: i64 },
    SeedlingStage,
    FloweringStage,
    RainSkipWatering,
    FrostWarning,
    HeatWarning,
}

impl RecommendationKind {
    pub fn category(&self) -> Category {
        use RecommendationKind::*;
        match self {
            MoistureCriticalLow | MoistureLow | MoistureCriticalHigh | RainSkipWatering => {
                Category::Irrigation
            }
            MoistureOptimal | SeedlingStage => Category::Monitoring,
            TemperatureCriticalLow | TemperatureCriticalHigh | TemperatureLow
            | HumidityCriticalHigh | FrostWarning | HeatWarning => Category::Protection,
            HumidityCriticalLow => Category::Optimization,
            HarvestSoon { .. } | HarvestReady { .. } => Category::Harvest,
            FloweringStage => Category::Fertilizer,
        }
    }

    pub fn priority(&self) -> Priority {
        use RecommendationKind::*;
        match self {
            MoistureCriticalLow
            | TemperatureCriticalLow
            | TemperatureCriticalHigh
            | HarvestReady { .. }
            | FrostWarning => Priority::Critical,
            MoistureLow | MoistureCriticalHigh | HumidityCriticalHigh | HarvestSoon { .. }
            | HeatWarning => Priority::High,
            TemperatureLow | HumidityCriticalLow | FloweringStage | RainSkipWatering => {
                Priority::Medium
            }
            MoistureOptimal | SeedlingStage => Priority::Low,
        }
    }

    pub fn action(&self) -> ActionType {
        use RecommendationKind::*;
        match self {
            MoistureCriticalLow => ActionType::Irrigate,
            MoistureLow => ActionType::ScheduleIrrigation,
            MoistureCriticalHigh => ActionType::StopIrrigation,
            MoistureOptimal | SeedlingStage => ActionType::ViewDetails,
            TemperatureCriticalLow => ActionType::ActivateHeating,
            TemperatureCriticalHigh | HumidityCriticalHigh => ActionType::ActivateVentilation,
            TemperatureLow => ActionType::MonitorTemperature,
            HumidityCriticalLow => ActionType::ActivateHumidifier,
            HarvestSoon { .. } => ActionType::PlanHarvest,
            HarvestReady { .. } => ActionType::HarvestNow,
            FloweringStage => ActionType::ApplyFertilizer,
            RainSkipWatering => ActionType::SkipIrrigation,
            FrostWarning => ActionType::ProtectFromFrost,
            HeatWarning => ActionType::ProvideShade,
        }
    }

    /// Material icon name hint.
    pub fn icon(&self) -> &'static str {
        use RecommendationKind::*;
        match self {
            MoistureCriticalLow | MoistureLow => "water_drop",
            MoistureCriticalHigh => "waves",
            MoistureOptimal => "check_circle",
            TemperatureCriticalLow => "ac_unit",
            TemperatureCriticalHigh => "thermostat",
            TemperatureLow => "device_thermostat",
            HumidityCriticalHigh => "air",
            HumidityCriticalLow => "water",
            HarvestSoon { .. } => "event_available",
            HarvestReady { .. } => "agriculture",
            SeedlingStage => "spa",
            FloweringStage => "local_florist",
            RainSkipWatering => "umbrella",
            FrostWarning => "severe_cold",
            HeatWarning => "wb_sunny",
        }
    }

    /// Default English title.
    pub fn title(&self) -> &'static str {
        use RecommendationKind::*;
        match self {
            MoistureCriticalLow => "Critical: soil too dry",
            MoistureLow => "Soil moisture is low",
            MoistureCriticalHigh => "Soil is waterlogged",
            MoistureOptimal => "Soil moisture is optimal",
            TemperatureCriticalLow => "Critical: temperature too low",
            TemperatureCriticalHigh => "Critical: temperature too high",
            TemperatureLow => "Temperature below optimal",
            HumidityCriticalHigh => "Humidity too high",
            HumidityCriticalLow => "Humidity too low",
            HarvestSoon { .. } => "Harvest approaching",
            HarvestReady { .. } => "Ready to harvest",
            SeedlingStage => "Seedling stage",
            FloweringStage => "Flowering stage",
            RainSkipWatering => "Rain expected: skip watering",
            FrostWarning => "Frost warning",
            HeatWarning => "Heat warning",
        }
    }

    /// Default English description.
    pub fn description(&self) -> String {
        use RecommendationKind::*;
        match self {
            MoistureCriticalLow => "Soil moisture is far below the safe range. Irrigate immediately.".into(),
            MoistureLow => "Soil moisture is below the warning level. Plan an irrigation cycle.".into(),
            MoistureCriticalHigh => "Soil moisture is above the safe range. Pause irrigation and check drainage.".into(),
            MoistureOptimal => "Soil moisture is within the optimal range.".into(),
            TemperatureCriticalLow => "Temperature is dangerously low for this crop. Turn on heating.".into(),
            TemperatureCriticalHigh => "Temperature is dangerously high for this crop. Ventilate now.".into(),
            TemperatureLow => "Temperature is below the warning level. Keep an eye on it.".into(),
            HumidityCriticalHigh => "Air humidity is very high, which favours fungal disease. Increase ventilation.".into(),
            HumidityCriticalLow => "Air humidity is very low. Consider running the humidifier.".into(),
            HarvestSoon { days_to_harvest } => {
                format!("Expected harvest in {} day(s). Prepare labour and storage.", days_to_harvest)
            }
            HarvestReady { days_overdue } if *days_overdue > 0 => {
                format!("Expected harvest date passed {} day(s) ago. Harvest now.", days_overdue)
            }
            HarvestReady { .. } => "Expected harvest date is today. Harvest now.".into(),
            SeedlingStage => "Crop is in the seedling stage. Monitor closely.".into(),
            FloweringStage => "Crop is flowering. Apply fertilizer to support fruit set.".into(),
            RainSkipWatering => "Rain is forecast and soil moisture is moderate. Skip the next watering.".into(),
            FrostWarning => "Frost risk detected. Cover crops or activate heating.".into(),
            HeatWarning => "Extreme heat expected. Provide shade and water early.".into(),
        }
    }

    /// Why the recommendation was raised.
    pub fn reason(&self) -> &'static str {
        use RecommendationKind::*;
        match self {
            MoistureCriticalLow | MoistureLow => "Soil moisture reading below threshold",
            MoistureCriticalHigh => "Soil moisture reading above threshold",
            MoistureOptimal => "Soil moisture reading within optimal range",
            TemperatureCriticalLow | TemperatureLow => "Temperature reading below threshold",
            TemperatureCriticalHigh => "Temperature reading above threshold",
            HumidityCriticalHigh => "Humidity reading above threshold",
            HumidityCriticalLow => "Humidity reading below threshold",
            HarvestSoon { .. } | HarvestReady { .. } => "Expected harvest date",
            SeedlingStage | FloweringStage => "Growth stage timing",
            RainSkipWatering => "Rain in forecast",
            FrostWarning => "Low outside temperature or frost forecast",
            HeatWarning => "High outside temperature",
        }
    }

    /// Expected impact of following the recommendation.
    pub fn impact(&self) -> &'static str {
        use RecommendationKind::*;
        match self {
            MoistureCriticalLow | MoistureLow => "Prevents drought stress and yield loss",
            MoistureCriticalHigh => "Prevents root rot",
            MoistureOptimal | SeedlingStage => "Keeps growth on track",
            TemperatureCriticalLow | FrostWarning => "Prevents cold damage",
            TemperatureCriticalHigh | HeatWarning => "Prevents heat stress",
            TemperatureLow => "Avoids slowed growth",
            HumidityCriticalHigh => "Reduces disease risk",
            HumidityCriticalLow => "Reduces transpiration stress",
            HarvestSoon { .. } | HarvestReady { .. } => "Harvest at peak quality",
            FloweringStage => "Improves fruit set",
            RainSkipWatering => "Saves water",
        }
    }

    /// Whether the condition was derived from weather data.
    pub fn is_weather_driven(&self) -> bool {
        matches!(
            self,
            RecommendationKind::RainSkipWatering
                | RecommendationKind::FrostWarning
                | RecommendationKind::HeatWarning
        )
    }
}

/// Inclusive optimal range attached to sensor-driven recommendations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimalRange {
    pub min: f64,
    pub max: f64,
}

/// Context attached to a recommendation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct RecommendationMetadata {
    pub crop_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sensor_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sensor_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_value: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub optimal_range: Option<OptimalRange>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub device_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weather_factor: bool,
}

/// A single advisory record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Recommendation {
    pub id: Uuid,
    pub kind: RecommendationKind,
    pub category: Category,
    pub priority: Priority,
    pub action: ActionType,
    pub icon: String,
    pub color: String,
    /// Device the recommendation concerns, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub device_id: Option<String>,
    pub metadata: RecommendationMetadata,
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub created_at: OffsetDateTime,
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub expires_at: OffsetDateTime,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dismissed: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub executed: bool,
}

impl Recommendation {
    /// Build a fresh record for `kind` with a new id.
    ///
    /// Category, priority, action, icon and color are taken from the kind.
    pub fn new(
        kind: RecommendationKind,
        metadata: RecommendationMetadata,
        created_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> Self {
        let priority = kind.priority();
        Self {
            id: Uuid::new_v4(),
            kind,
            category: kind.category(),
            priority,
            action: kind.action(),
            icon: kind.icon().to_string(),
            color: priority.color().to_string(),
            device_id: None,
            metadata,
            created_at,
            expires_at,
            dismissed: false,
            executed: false,
        }
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn description(&self) -> String {
        self.kind.description()
    }

    pub fn action_label(&self) -> &'static str {
        self.action.label()
    }

    /// Not dismissed and not executed.
    pub fn is_active(&self) -> bool {
        !self.dismissed && !self.executed
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}

/// Controllable farm actuator class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ActuatorType {
    Fan,
    Roof,
    Light,
    Humidifier,
}

impl ActuatorType {
    pub const ALL: [ActuatorType; 4] = [
        ActuatorType::Fan,
        ActuatorType::Roof,
        ActuatorType::Light,
        ActuatorType::Humidifier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActuatorType::Fan => "fan",
            ActuatorType::Roof => "roof",
            ActuatorType::Light => "light",
            ActuatorType::Humidifier => "humidifier",
        }
    }

    /// Human-readable name for the on/off state (a roof is open/closed).
    pub fn state_label(&self, on: bool) -> &'static str {
        match (self, on) {
            (ActuatorType::Roof, true) => "open",
            (ActuatorType::Roof, false) => "closed",
            (_, true) => "on",
            (_, false) => "off",
        }
    }
}

impl fmt::Display for ActuatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActuatorType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fan" | "ventilator" => Ok(ActuatorType::Fan),
            "roof" => Ok(ActuatorType::Roof),
            "light" | "lights" => Ok(ActuatorType::Light),
            "humidifier" => Ok(ActuatorType::Humidifier),
            _ => Err(ParseError::unknown("actuator", s)),
        }
    }
}

/// Last known state of one actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ActuatorState {
    pub actuator: ActuatorType,
    pub on: bool,
    /// Timestamp of the log entry that set this state; `None` while unknown.
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "time::serde::rfc3339::option")
    )]
    pub updated_at: Option<OffsetDateTime>,
}

impl ActuatorState {
    /// Initial off/unknown state.
    pub fn unknown(actuator: ActuatorType) -> Self {
        Self {
            actuator,
            on: false,
            updated_at: None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.updated_at.is_some()
    }

    pub fn label(&self) -> &'static str {
        if self.is_known() {
            self.actuator.state_label(self.on)
        } else {
            "unknown"
        }
    }
}

/// One entry of a device's action log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ActionLogEntry {
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub timestamp: OffsetDateTime,
    /// Action path such as `"farm/greenhouse-1/ventilator_off"`.
    pub action: String,
    /// Delivery status, e.g. `"sent"` or `"ack"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: String,
}

impl ActionLogEntry {
    pub fn new(
        timestamp: OffsetDateTime,
        action: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            action: action.into(),
            status: status.into(),
        }
    }

    /// Whether the device acknowledged the action.
    pub fn is_ack(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("ack")
    }
}
