//! Twin command implementation.

use std::path::Path;

use agrotwin_core::DigitalTwin;
use agrotwin_types::ActuatorState;
use anyhow::Result;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_states_text};
use crate::util::{load_action_log, write_output};

pub fn cmd_twin(log: &Path, format: OutputFormat, opts: &FormatOptions) -> Result<()> {
    let entries = load_action_log(log)?;

    let mut twin = DigitalTwin::new();
    let changes = twin.apply(&entries);
    tracing::debug!(
        entries = entries.len(),
        changes = changes.len(),
        "replayed action log"
    );

    let states: Vec<ActuatorState> = twin.states().collect();
    let content = match format {
        OutputFormat::Json => opts.as_json(&states)?,
        OutputFormat::Text => format_states_text(&states, opts),
    };
    write_output(&content)
}
