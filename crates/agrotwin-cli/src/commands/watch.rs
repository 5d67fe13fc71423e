//! Watch command implementation.
//!
//! Re-reads the snapshot (and optional action log) on a fixed interval. One
//! recommendation set and one digital twin are kept across ticks, so each
//! tick reports only actuator changes relative to the previous one. A file
//! that fails to load skips that part of the tick without stopping the loop.

use std::path::PathBuf;
use std::time::Duration;

use agrotwin_core::{DigitalTwin, RecommendationEngine, RecommendationSet};
use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use time::OffsetDateTime;
use time::macros::format_description;
use tokio::time::MissedTickBehavior;

use crate::commands::recommend::evaluate;
use crate::format::{FormatOptions, format_change_line, format_summary_line};
use crate::util::{load_action_log, load_snapshot, write_output};

/// Arguments for the watch command.
pub struct WatchArgs<'a> {
    pub input: PathBuf,
    pub log: Option<PathBuf>,
    pub interval: u64,
    pub count: u32,
    pub quiet: bool,
    pub engine: &'a RecommendationEngine,
    pub opts: &'a FormatOptions,
}

/// State carried between ticks.
struct Watcher<'a> {
    engine: &'a RecommendationEngine,
    set: RecommendationSet,
    twin: DigitalTwin,
}

impl Watcher<'_> {
    /// Run one evaluation and render its report.
    fn tick(&mut self, args: &WatchArgs<'_>, now: OffsetDateTime) -> String {
        let opts = args.opts;
        let stamp = now
            .format(format_description!("[hour]:[minute]:[second]"))
            .unwrap_or_default();
        let stamp = if opts.no_color {
            format!("[{}]", stamp)
        } else {
            format!("[{}]", stamp).dimmed().to_string()
        };

        let mut out = String::new();

        match load_snapshot(&args.input) {
            Ok(snapshot) => {
                self.set.replace(evaluate(self.engine, &snapshot, now));
                out.push_str(&format!(
                    "{} {}\n",
                    stamp,
                    format_summary_line(&self.set.summary(), opts)
                ));
                for rec in self.set.critical() {
                    out.push_str(&format!("    ! {}\n", rec.title()));
                }
            }
            Err(e) => eprintln!("Skipping snapshot: {:#}", e),
        }

        if let Some(log) = &args.log {
            match load_action_log(log) {
                Ok(entries) => {
                    for change in self.twin.apply(&entries) {
                        out.push_str(&format!("{} {}\n", stamp, format_change_line(&change, opts)));
                    }
                }
                Err(e) => eprintln!("Skipping action log: {:#}", e),
            }
        }
        out
    }
}

pub async fn cmd_watch(args: WatchArgs<'_>) -> Result<()> {
    if args.interval == 0 {
        bail!("Interval must be at least 1 second");
    }

    if !args.quiet {
        let target = args.input.display().to_string();
        let target = if args.opts.no_color {
            target
        } else {
            target.cyan().to_string()
        };
        eprintln!("Watching: {}", target);
        if args.count > 0 {
            eprintln!(
                "Interval: {}s | Count: {} | Press Ctrl+C to stop",
                args.interval, args.count
            );
        } else {
            eprintln!("Interval: {}s | Press Ctrl+C to stop", args.interval);
        }
        eprintln!("{}", "-".repeat(50));
    }

    let mut watcher = Watcher {
        engine: args.engine,
        set: RecommendationSet::new(),
        twin: DigitalTwin::new(),
    };
    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks: u32 = 0;

    loop {
        if args.count > 0 && ticks >= args.count {
            if !args.quiet {
                eprintln!("Completed {} evaluations.", ticks);
            }
            return Ok(());
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nShutting down...");
                return Ok(());
            }
            _ = ticker.tick() => {}
        }

        let report = watcher.tick(&args, OffsetDateTime::now_utc());
        write_output(&report)?;
        ticks += 1;
    }
}
