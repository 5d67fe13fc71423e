//! Output formatting utilities for text and JSON output.

use agrotwin_core::{ActuatorChange, MetricBounds, RecommendationSummary, ThresholdSet};
use agrotwin_types::{ActuatorState, Metric, Priority, Recommendation};
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    /// Serialize value to pretty JSON with a trailing newline.
    pub fn as_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)? + "\n")
    }

    fn priority_label(&self, priority: Priority) -> String {
        let label = format!("[{}]", priority.as_str().to_uppercase());
        if self.no_color {
            return label;
        }
        match priority {
            Priority::Critical => label.red().bold().to_string(),
            Priority::High => label.yellow().bold().to_string(),
            Priority::Medium => label.cyan().to_string(),
            Priority::Low => label.green().to_string(),
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.bold().to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.dimmed().to_string()
        }
    }
}

fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Ranked recommendations as human-readable text.
pub fn format_recommendations_text(recs: &[Recommendation], opts: &FormatOptions) -> String {
    if recs.is_empty() {
        return "No recommendations. All readings are within range.\n".to_string();
    }

    let mut out = String::new();
    for rec in recs {
        out.push_str(&format!(
            "{} {}\n",
            opts.priority_label(rec.priority),
            opts.heading(rec.title())
        ));
        out.push_str(&format!("    {}\n", rec.description()));

        let meta = &rec.metadata;
        if let Some(value) = meta.current_value {
            let unit = meta.unit.as_deref().unwrap_or_default();
            let mut line = format!("    Current: {}{}", format_value(value), unit);
            if let Some(range) = meta.optimal_range {
                line.push_str(&format!(
                    " (optimal {}-{}{})",
                    format_value(range.min),
                    format_value(range.max),
                    unit
                ));
            }
            if let Some(sensor) = &meta.sensor_id {
                line.push_str(&format!(" from {}", sensor));
            }
            if let Some(device) = &meta.device_name {
                line.push_str(&format!(" on {}", device));
            }
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&opts.dim(&format!(
            "    {} | {} | action: {}",
            rec.category,
            meta.crop_name,
            rec.action_label()
        )));
        out.push('\n');
    }
    out
}

/// One-line counts, used by watch mode.
pub fn format_summary_line(summary: &RecommendationSummary, opts: &FormatOptions) -> String {
    let critical = if opts.no_color || summary.critical == 0 {
        summary.critical.to_string()
    } else {
        summary.critical.red().bold().to_string()
    };
    format!(
        "{} active | {} critical | {} high | {} medium | {} low",
        summary.active, critical, summary.high, summary.medium, summary.low
    )
}

/// Actuator states as an aligned table.
pub fn format_states_text(states: &[ActuatorState], opts: &FormatOptions) -> String {
    let mut out = String::new();
    for state in states {
        let label = state.label();
        let label = if opts.no_color {
            label.to_string()
        } else if !state.is_known() {
            label.dimmed().to_string()
        } else if state.on {
            label.green().to_string()
        } else {
            label.to_string()
        };

        let since = match state.updated_at {
            Some(ts) => format!("  since {}", format_timestamp(ts)),
            None => String::new(),
        };
        out.push_str(&format!(
            "{:<12}{}{}\n",
            state.actuator.as_str(),
            label,
            opts.dim(&since)
        ));
    }
    out
}

pub fn format_change_line(change: &ActuatorChange, opts: &FormatOptions) -> String {
    let arrow = format!("{} -> {}", change.previous.label(), change.current.label());
    let arrow = if opts.no_color {
        arrow
    } else {
        arrow.yellow().to_string()
    };
    format!("{}: {}", change.actuator, arrow)
}

fn format_bounds_row(metric: Metric, b: &MetricBounds) -> String {
    let [cl, wl, omin, omax, wh, ch] = b.as_array().map(format_value);
    format!(
        "  {:<12} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}\n",
        metric.as_str(),
        cl,
        wl,
        omin,
        omax,
        wh,
        ch
    )
}

/// One crop's threshold set as a table.
pub fn format_threshold_set_text(name: &str, set: &ThresholdSet, opts: &FormatOptions) -> String {
    let mut out = format!("{}\n", opts.heading(name));
    out.push_str(&opts.dim(&format!(
        "  {:<12} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "metric", "crit-", "warn-", "opt-", "opt+", "warn+", "crit+"
    )));
    out.push('\n');
    for metric in Metric::ALL {
        out.push_str(&format_bounds_row(metric, set.bounds(metric)));
    }
    out
}
