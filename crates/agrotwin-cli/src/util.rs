//! Utility functions for CLI operations.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use agrotwin_types::{ActionLogEntry, CropContext, DeviceRef, SensorReading, WeatherSnapshot};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// One evaluation input as exported by the farm backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub crop: CropContext,
    #[serde(default)]
    pub sensors: Vec<SensorReading>,
    #[serde(default)]
    pub devices: Vec<DeviceRef>,
    #[serde(default)]
    pub weather: Option<WeatherSnapshot>,
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    read_json(path)
}

pub fn load_action_log(path: &Path) -> Result<Vec<ActionLogEntry>> {
    read_json(path)
}

/// Parse an RFC 3339 timestamp given on the command line.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime> {
    OffsetDateTime::parse(value.trim(), &Rfc3339)
        .with_context(|| format!("Invalid RFC 3339 timestamp: '{}'", value))
}

/// Write content to stdout.
pub fn write_output(content: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(
            parse_timestamp("2024-06-01T12:00:00Z").unwrap(),
            datetime!(2024-06-01 12:00 UTC)
        );
        assert_eq!(
            parse_timestamp(" 2024-06-01T14:00:00+02:00 ").unwrap(),
            datetime!(2024-06-01 12:00 UTC)
        );
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_snapshot_minimal() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"crop": {"cropName": "tomato"}}"#).unwrap();
        assert_eq!(snapshot.crop.crop_name, "tomato");
        assert!(snapshot.sensors.is_empty());
        assert!(snapshot.weather.is_none());
    }

    #[test]
    fn test_snapshot_full() {
        let json = r#"{
            "crop": {
                "cropId": "c-1",
                "cropName": "Tomato",
                "plantingDate": "2024-03-01T00:00:00Z",
                "expectedHarvestDate": "2024-06-05T00:00:00Z"
            },
            "sensors": [
                {"sensorId": "s-1", "deviceId": "d-1", "type": "soilMoisture",
                 "value": 15, "unit": "%", "timestamp": "2024-06-01T11:55:00Z"}
            ],
            "devices": [{"id": "d-1", "name": "North bed"}],
            "weather": {"temperature": 2.0, "forecast": "Frost overnight"}
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.sensors[0].value, 15.0);
        assert_eq!(snapshot.devices[0].name.as_deref(), Some("North bed"));
        assert!(snapshot.crop.planting_date.is_some());
        assert!(snapshot.weather.unwrap().mentions("frost"));
    }

    #[test]
    fn test_read_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let err = load_snapshot(&path).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
