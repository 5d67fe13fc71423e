//! Platform-agnostic types for smart-farm monitoring.
//!
//! This crate provides the shared data types consumed and produced by
//! `agrotwin-core`: sensor readings and crop context coming in from the farm
//! backend, recommendation records going out to dashboards, and the action
//! log entries and actuator states used by the digital twin.
//!
//! # Features
//!
//! - `serde` (default): JSON-compatible (camelCase) serialization for every type
//!
//! # Example
//!
//! ```
//! use agrotwin_types::{Metric, Priority, SensorReading};
//!
//! let reading = SensorReading::new("s-1", "soilMoisture", 42.0);
//! assert_eq!(reading.metric(), Some(Metric::Moisture));
//! assert!(Priority::Critical < Priority::Low);
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{
    ActionLogEntry, ActionType, ActuatorState, ActuatorType, Category, CropContext, DeviceRef,
    Metric, OptimalRange, Priority, Recommendation, RecommendationKind, RecommendationMetadata,
    SensorReading, WeatherSnapshot,
};

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    // --- Metric routing tests ---

    #[test]
    fn test_metric_routing_moisture_variants() {
        assert_eq!(Metric::from_sensor_type("moisture"), Some(Metric::Moisture));
        assert_eq!(Metric::from_sensor_type("soilMoisture"), Some(Metric::Moisture));
        assert_eq!(Metric::from_sensor_type("SOIL"), Some(Metric::Moisture));
        assert_eq!(Metric::from_sensor_type("Soil Moisture %"), Some(Metric::Moisture));
    }

    #[test]
    fn test_metric_routing_temperature_and_humidity() {
        assert_eq!(Metric::from_sensor_type("temperature"), Some(Metric::Temperature));
        assert_eq!(Metric::from_sensor_type("airTemp"), Some(Metric::Temperature));
        assert_eq!(Metric::from_sensor_type("humidity"), Some(Metric::Humidity));
        assert_eq!(Metric::from_sensor_type("relHumid"), Some(Metric::Humidity));
    }

    #[test]
    fn test_metric_routing_prefers_moisture() {
        // "soil" wins over "temp" because moisture is checked first
        assert_eq!(Metric::from_sensor_type("soilTemperature"), Some(Metric::Moisture));
    }

    #[test]
    fn test_metric_routing_unknown() {
        assert_eq!(Metric::from_sensor_type("light"), None);
        assert_eq!(Metric::from_sensor_type("co2"), None);
        assert_eq!(Metric::from_sensor_type(""), None);
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("Humidity".parse::<Metric>(), Ok(Metric::Humidity));
        assert!("soil".parse::<Metric>().is_err());
    }

    // --- Priority tests ---

    #[test]
    fn test_priority_rank_order() {
        let ranks: Vec<u8> = Priority::ALL.iter().map(|p| p.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert!(Priority::Critical < Priority::High);
        assert!(Priority::Medium < Priority::Low);
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("CRITICAL".parse::<Priority>(), Ok(Priority::Critical));
        assert_eq!(" low ".parse::<Priority>(), Ok(Priority::Low));

        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown priority: 'urgent'");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("irrigation".parse::<Category>(), Ok(Category::Irrigation));
        assert_eq!("Optimization".parse::<Category>(), Ok(Category::Optimization));
        assert!("weeding".parse::<Category>().is_err());
    }

    // --- RecommendationKind mapping tests ---

    #[test]
    fn test_moisture_critical_low_mapping() {
        let kind = RecommendationKind::MoistureCriticalLow;
        assert_eq!(kind.category(), Category::Irrigation);
        assert_eq!(kind.priority(), Priority::Critical);
        assert_eq!(kind.action(), ActionType::Irrigate);
    }

    #[test]
    fn test_moisture_optimal_mapping() {
        let kind = RecommendationKind::MoistureOptimal;
        assert_eq!(kind.category(), Category::Monitoring);
        assert_eq!(kind.priority(), Priority::Low);
        assert_eq!(kind.action().as_str(), "view_details");
    }

    #[test]
    fn test_temperature_critical_high_mapping() {
        let kind = RecommendationKind::TemperatureCriticalHigh;
        assert_eq!(kind.category(), Category::Protection);
        assert_eq!(kind.priority(), Priority::Critical);
        assert_eq!(kind.action().as_str(), "activate_ventilation");
    }

    #[test]
    fn test_weather_driven_kinds() {
        assert!(RecommendationKind::FrostWarning.is_weather_driven());
        assert!(RecommendationKind::RainSkipWatering.is_weather_driven());
        assert!(!RecommendationKind::MoistureLow.is_weather_driven());
    }

    #[test]
    fn test_harvest_descriptions_include_days() {
        let soon = RecommendationKind::HarvestSoon { days_to_harvest: 3 };
        assert!(soon.description().contains("3 day"));

        let overdue = RecommendationKind::HarvestReady { days_overdue: 2 };
        assert!(overdue.description().contains("2 day"));

        let today = RecommendationKind::HarvestReady { days_overdue: 0 };
        assert!(today.description().contains("today"));
    }

    #[test]
    fn test_recommendation_new_copies_kind_hints() {
        let now = datetime!(2024-06-01 12:00 UTC);
        let rec = Recommendation::new(
            RecommendationKind::HeatWarning,
            RecommendationMetadata::default(),
            now,
            now + time::Duration::hours(4),
        );

        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.category, Category::Protection);
        assert_eq!(rec.icon, "wb_sunny");
        assert_eq!(rec.color, Priority::High.color());
        assert!(rec.is_active());
        assert!(!rec.is_expired(now));
        assert!(rec.is_expired(now + time::Duration::hours(4)));
    }

    // --- Actuator tests ---

    #[test]
    fn test_actuator_from_str_synonyms() {
        assert_eq!("ventilator".parse::<ActuatorType>(), Ok(ActuatorType::Fan));
        assert_eq!("Lights".parse::<ActuatorType>(), Ok(ActuatorType::Light));
        assert!("pump".parse::<ActuatorType>().is_err());
    }

    #[test]
    fn test_actuator_state_labels() {
        let roof = ActuatorState {
            actuator: ActuatorType::Roof,
            on: true,
            updated_at: Some(datetime!(2024-06-01 12:00 UTC)),
        };
        assert_eq!(roof.label(), "open");
        assert_eq!(ActuatorState::unknown(ActuatorType::Fan).label(), "unknown");
        assert_eq!(ActuatorType::Light.state_label(false), "off");
    }

    #[test]
    fn test_action_log_entry_ack() {
        let t = datetime!(2024-06-01 12:00 UTC);
        assert!(ActionLogEntry::new(t, "a/b/fan_on", "ack").is_ack());
        assert!(ActionLogEntry::new(t, "a/b/fan_on", " ACK ").is_ack());
        assert!(!ActionLogEntry::new(t, "a/b/fan_on", "sent").is_ack());
    }

    #[test]
    fn test_weather_mentions() {
        let weather = WeatherSnapshot {
            temperature: Some(12.0),
            forecast: Some("Heavy RAIN overnight".into()),
            condition: Some("Cloudy".into()),
            ..Default::default()
        };
        assert!(weather.mentions("rain"));
        assert!(weather.mentions("cloudy"));
        assert!(!weather.mentions("frost"));
        assert!(!WeatherSnapshot::default().mentions("rain"));
    }

    // --- Serialization tests ---

    #[test]
    fn test_sensor_reading_deserialization() {
        let json = r#"{"sensorId":"s-7","type":"soilMoisture","value":15,"unit":"%","timestamp":"2024-06-01T10:00:00Z"}"#;

        let reading: SensorReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.sensor_id, "s-7");
        assert_eq!(reading.sensor_type, "soilMoisture");
        assert!((reading.value - 15.0).abs() < f64::EPSILON);
        assert!(reading.device_id.is_none());
        assert_eq!(reading.timestamp, datetime!(2024-06-01 10:00 UTC));
    }

    #[test]
    fn test_crop_context_optional_dates() {
        let json = r#"{"cropName":"tomato","plantingDate":"2024-03-01T00:00:00Z"}"#;

        let crop: CropContext = serde_json::from_str(json).unwrap();
        assert_eq!(crop.crop_name, "tomato");
        assert_eq!(crop.planting_date, Some(datetime!(2024-03-01 0:00 UTC)));
        assert!(crop.expected_harvest_date.is_none());
    }

    #[test]
    fn test_recommendation_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&RecommendationKind::FrostWarning).unwrap(),
            "\"frost_warning\""
        );
        assert_eq!(
            serde_json::to_string(&RecommendationKind::HarvestSoon { days_to_harvest: 4 })
                .unwrap(),
            r#"{"harvest_soon":{"days_to_harvest":4}}"#
        );
    }

    #[test]
    fn test_priority_colors() {
        assert_eq!(Priority::Critical.color(), "#f44336");
        assert_eq!(Priority::High.color(), "#ff9800");
        assert_eq!(Priority::Medium.color(), "#ffc107");
        assert_eq!(Priority::Low.color(), "#4caf50");
    }

    #[test]
    fn test_priority_serialization() {
        assert_eq!(serde_json::to_string(&Priority::Critical).unwrap(), "\"critical\"");
        assert_eq!(
            serde_json::to_string(&ActionType::ActivateVentilation).unwrap(),
            "\"activate_ventilation\""
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::Unknown {
            kind: "metric",
            value: "co2".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown metric: 'co2'");
    }
}
