//! Thresholds command implementation.

use std::collections::BTreeMap;

use agrotwin_core::{DEFAULT_CROP, ThresholdSet, ThresholdTable};
use anyhow::Result;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_threshold_set_text};
use crate::util::write_output;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedSet<'a> {
    crop: &'a str,
    /// Table entry the name resolved to
    resolved_as: &'a str,
    thresholds: &'a ThresholdSet,
}

/// Name of the table entry `crop` resolves to.
fn resolved_name<'a>(table: &ThresholdTable, crop: &'a str) -> &'a str {
    if table.get(crop).is_some() {
        crop
    } else {
        DEFAULT_CROP
    }
}

pub fn cmd_thresholds(
    table: &ThresholdTable,
    crop: Option<&str>,
    format: OutputFormat,
    opts: &FormatOptions,
) -> Result<()> {
    let content = match crop {
        Some(crop) => {
            let set = table.lookup(crop);
            let resolved_as = resolved_name(table, crop);
            match format {
                OutputFormat::Json => opts.as_json(&ResolvedSet {
                    crop,
                    resolved_as,
                    thresholds: set,
                })?,
                OutputFormat::Text => {
                    let heading = if resolved_as == crop {
                        crop.to_lowercase()
                    } else {
                        format!("{} (using {})", crop, DEFAULT_CROP)
                    };
                    format_threshold_set_text(&heading, set, opts)
                }
            }
        }
        None => {
            let mut all: BTreeMap<&str, &ThresholdSet> =
                table.crops().map(|name| (name, table.lookup(name))).collect();
            all.insert(DEFAULT_CROP, table.default_set());

            match format {
                OutputFormat::Json => opts.as_json(&all)?,
                OutputFormat::Text => all
                    .iter()
                    .map(|(name, set)| format_threshold_set_text(name, set, opts))
                    .collect::<Vec<_>>()
                    .join("\n"),
            }
        }
    };
    write_output(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_name() {
        let table = ThresholdTable::builtin();
        assert_eq!(resolved_name(&table, "Tomato"), "Tomato");
        assert_eq!(resolved_name(&table, "kohlrabi"), DEFAULT_CROP);
        assert_eq!(resolved_name(&table, "default"), "default");
    }

    #[test]
    fn test_resolved_set_json_shape() {
        let table = ThresholdTable::builtin();
        let json = serde_json::to_value(ResolvedSet {
            crop: "kohlrabi",
            resolved_as: DEFAULT_CROP,
            thresholds: table.lookup("kohlrabi"),
        })
        .unwrap();
        assert_eq!(json["resolvedAs"], "default");
        assert_eq!(json["thresholds"]["moisture"]["critical_low"], 20.0);
    }
}
