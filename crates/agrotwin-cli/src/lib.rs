//! Command-line interface for smart-farm recommendations and actuator state.
//!
//! The `agrotwin` binary evaluates farm snapshots exported by a backend API
//! and replays device action logs, printing the results for operators or
//! scripts.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `recommend` | Ranked recommendations for one snapshot |
//! | `twin` | Resolved fan, roof, light and humidifier states from an action log |
//! | `thresholds` | Built-in and configured per-crop thresholds |
//! | `watch` | Re-evaluate a snapshot and action log on an interval |
//! | `config` | Show, locate or initialise the configuration file |
//! | `completions` | Generate shell completions |
//!
//! # Input Files
//!
//! A snapshot is a JSON object with the crop record, its sensor readings and
//! optional devices and weather:
//!
//! ```json
//! {
//!   "crop": {"cropName": "tomato", "plantingDate": "2024-03-01T00:00:00Z",
//!            "expectedHarvestDate": "2024-06-05T00:00:00Z"},
//!   "sensors": [{"sensorId": "s-1", "type": "soilMoisture", "value": 15,
//!                "unit": "%", "timestamp": "2024-06-01T11:55:00Z"}],
//!   "weather": {"temperature": 3.5, "forecast": "light rain"}
//! }
//! ```
//!
//! An action log is a JSON array of `{timestamp, action, status}` entries,
//! e.g. `{"timestamp": "2024-06-01T10:00:00Z", "action": "farm/gh-1/open_roof", "status": "ack"}`.
//!
//! # Configuration
//!
//! The CLI reads `~/.config/agrotwin/config.toml` (or platform equivalent),
//! overridable with `--config` or `AGROTWIN_CONFIG`:
//!
//! - `format`: Default output format (`text` or `json`)
//! - `no_color`: Disable colored output
//! - `[engine]`: Expiry and weather/harvest rule constants
//! - `[thresholds.<crop>]`: Custom threshold sets per crop
//! - `[watch]`: `interval_secs` for watch mode
//!
//! # Environment Variables
//!
//! - `AGROTWIN_CONFIG`: Config file path (overridden by `--config` flag)
//! - `NO_COLOR`: Disable colored output when set
//! - `RUST_LOG`: Log filter when neither `--verbose` nor `--quiet` is given
//!
//! # Examples
//!
//! ```bash
//! agrotwin recommend --input snapshot.json
//! agrotwin recommend --input snapshot.json --format json --now 2024-06-01T12:00:00Z
//! agrotwin twin --log actions.json
//! agrotwin thresholds tomato
//! agrotwin watch --input snapshot.json --log actions.json --interval 30
//! ```

// Re-export core dependencies for convenience
pub use agrotwin_core;
pub use agrotwin_types;
