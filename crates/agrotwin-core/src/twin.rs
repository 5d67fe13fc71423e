//! Actuator digital twin.
//!
//! Actuator state is never polled directly. It is inferred by replaying the
//! device action log: each entry's action path (e.g.
//! `"farm/greenhouse-1/ventilator_off"`) is mapped to an actuator and an
//! on/off state, and the most recent qualifying entry per actuator wins.
//!
//! Ties on the exact same timestamp prefer an acknowledged entry (`"ack"`);
//! if that does not separate them, the entry appearing later in the log wins.
//!
//! # Example
//!
//! ```
//! use agrotwin_core::DigitalTwin;
//! use agrotwin_types::{ActionLogEntry, ActuatorType};
//! use time::macros::datetime;
//!
//! let log = vec![
//!     ActionLogEntry::new(datetime!(2024-06-01 10:00 UTC), "farm/gh1/open_roof", "ack"),
//!     ActionLogEntry::new(datetime!(2024-06-01 11:00 UTC), "farm/gh1/close_roof", "ack"),
//! ];
//!
//! let mut twin = DigitalTwin::new();
//! let changes = twin.apply(&log);
//! assert_eq!(changes.len(), 1);
//! assert!(!twin.is_on(ActuatorType::Roof));
//! assert_eq!(twin.state(ActuatorType::Roof).label(), "closed");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use agrotwin_types::{ActionLogEntry, ActuatorState, ActuatorType};

/// Minimum number of `/`-separated segments in a well-formed action path.
const MIN_SEGMENTS: usize = 2;

const SYNONYMS: [(&str, ActuatorType, bool); 12] = [
    ("ventilator_off", ActuatorType::Fan, false),
    ("fan_off", ActuatorType::Fan, false),
    ("ventilator_on", ActuatorType::Fan, true),
    ("fan_on", ActuatorType::Fan, true),
    ("close_roof", ActuatorType::Roof, false),
    ("open_roof", ActuatorType::Roof, true),
    ("light_off", ActuatorType::Light, false),
    ("lights_off", ActuatorType::Light, false),
    ("light_on", ActuatorType::Light, true),
    ("lights_on", ActuatorType::Light, true),
    ("humidifier_off", ActuatorType::Humidifier, false),
    ("humidifier_on", ActuatorType::Humidifier, true),
];

const KEYWORDS: [(&[&str], ActuatorType); 4] = [
    (&["ventilator", "fan"], ActuatorType::Fan),
    (&["roof"], ActuatorType::Roof),
    (&["light"], ActuatorType::Light),
    (&["humidifier"], ActuatorType::Humidifier),
];

/// Map an action path to an actuator and on/off state.
///
/// The final path segment is looked up in the synonym table first. Failing
/// that, the whole path is searched for an actuator keyword and the state is
/// `on` when it contains `_on` or `open`. Paths with fewer than two segments,
/// or matching no keyword, yield `None`.
///
/// # Examples
///
/// ```
/// use agrotwin_core::twin::parse_action;
/// use agrotwin_types::ActuatorType;
///
/// assert_eq!(parse_action("x/y/ventilator_off"), Some((ActuatorType::Fan, false)));
/// assert_eq!(parse_action("x/y/Open_Roof "), Some((ActuatorType::Roof, true)));
/// assert_eq!(parse_action("x/y/grow_lights_on_timer"), Some((ActuatorType::Light, true)));
/// assert_eq!(parse_action("fan_on"), None);
/// assert_eq!(parse_action("x/y/pump_on"), None);
/// ```
pub fn parse_action(action: &str) -> Option<(ActuatorType, bool)> {
    let action = action.trim().to_lowercase();
    let segments: Vec<&str> = action.split('/').collect();
    if segments.len() < MIN_SEGMENTS {
        return None;
    }

    let last = segments.last().map(|s| s.trim()).unwrap_or_default();
    if let Some((_, actuator, on)) = SYNONYMS.iter().find(|(name, _, _)| *name == last) {
        return Some((*actuator, *on));
    }

    let (_, actuator) = KEYWORDS
        .iter()
        .find(|(words, _)| words.iter().any(|w| action.contains(w)))?;
    let on = action.contains("_on") || action.contains("open");
    Some((*actuator, on))
}

/// Replay an action log into the latest state per actuator.
///
/// Only actuators mentioned by at least one qualifying entry appear in the
/// result. Entries that cannot be parsed are skipped.
pub fn resolve_actuator_states(log: &[ActionLogEntry]) -> BTreeMap<ActuatorType, ActuatorState> {
    let mut ordered: Vec<(usize, &ActionLogEntry)> = log.iter().enumerate().collect();
    // Newest first; on equal timestamps ack first, then later log position first
    ordered.sort_by(|(ia, a), (ib, b)| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.is_ack().cmp(&a.is_ack()))
            .then_with(|| ib.cmp(ia))
    });

    let mut states = BTreeMap::new();
    for (_, entry) in ordered {
        let Some((actuator, on)) = parse_action(&entry.action) else {
            debug!(action = %entry.action, "skipping unrecognised action");
            continue;
        };
        states.entry(actuator).or_insert(ActuatorState {
            actuator,
            on,
            updated_at: Some(entry.timestamp),
        });
    }
    states
}

/// A state transition applied by [`DigitalTwin::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorChange {
    pub actuator: ActuatorType,
    pub previous: ActuatorState,
    pub current: ActuatorState,
}

/// Last-known state of every actuator, updated from action log batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitalTwin {
    states: BTreeMap<ActuatorType, ActuatorState>,
}

impl Default for DigitalTwin {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitalTwin {
    /// All actuators start off/unknown.
    pub fn new() -> Self {
        let states = ActuatorType::ALL
            .into_iter()
            .map(|a| (a, ActuatorState::unknown(a)))
            .collect();
        Self { states }
    }

    pub fn state(&self, actuator: ActuatorType) -> ActuatorState {
        self.states
            .get(&actuator)
            .copied()
            .unwrap_or_else(|| ActuatorState::unknown(actuator))
    }

    pub fn is_on(&self, actuator: ActuatorType) -> bool {
        self.state(actuator).on
    }

    /// States of all four actuators, in [`ActuatorType::ALL`] order.
    pub fn states(&self) -> impl Iterator<Item = ActuatorState> + '_ {
        ActuatorType::ALL.into_iter().map(|a| self.state(a))
    }

    /// Resolve a log batch and overwrite states that changed.
    ///
    /// A held state is only replaced when it was still unknown or the
    /// resolved on/off value differs. An empty log changes nothing.
    pub fn apply(&mut self, log: &[ActionLogEntry]) -> Vec<ActuatorChange> {
        let mut changes = Vec::new();

        for (actuator, resolved) in resolve_actuator_states(log) {
            let previous = self.state(actuator);
            if previous.is_known() && previous.on == resolved.on {
                continue;
            }

            info!(
                %actuator,
                from = previous.label(),
                to = resolved.label(),
                "actuator state changed"
            );
            self.states.insert(actuator, resolved);
            changes.push(ActuatorChange {
                actuator,
                previous,
                current: resolved,
            });
        }
        changes
    }

    /// Forget all known states.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
