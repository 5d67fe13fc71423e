//! Recommend command implementation.

use std::path::PathBuf;

use agrotwin_core::{Evaluation, RecommendationEngine};
use agrotwin_types::Recommendation;
use anyhow::Result;
use time::OffsetDateTime;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_recommendations_text};
use crate::util::{Snapshot, load_snapshot, parse_timestamp, write_output};

/// Arguments for the recommend command.
pub struct RecommendArgs<'a> {
    pub input: PathBuf,
    pub now: Option<String>,
    pub format: OutputFormat,
    pub engine: &'a RecommendationEngine,
    pub opts: &'a FormatOptions,
}

/// Evaluate one snapshot at `now`.
pub fn evaluate(
    engine: &RecommendationEngine,
    snapshot: &Snapshot,
    now: OffsetDateTime,
) -> Vec<Recommendation> {
    let mut input = Evaluation::new(&snapshot.sensors, &snapshot.crop).with_devices(&snapshot.devices);
    if let Some(weather) = &snapshot.weather {
        input = input.with_weather(weather);
    }
    engine.generate_at(now, &input)
}

pub fn cmd_recommend(args: RecommendArgs<'_>) -> Result<()> {
    let RecommendArgs {
        input,
        now,
        format,
        engine,
        opts,
    } = args;

    let snapshot = load_snapshot(&input)?;
    let now = match now {
        Some(value) => parse_timestamp(&value)?,
        None => OffsetDateTime::now_utc(),
    };

    let recs = evaluate(engine, &snapshot, now);
    tracing::debug!(
        crop = %snapshot.crop.crop_name,
        count = recs.len(),
        "evaluated snapshot"
    );

    let content = match format {
        OutputFormat::Json => opts.as_json(&recs)?,
        OutputFormat::Text => format_recommendations_text(&recs, opts),
    };
    write_output(&content)
}
