mod cli;
mod commands;
mod config;
mod format;
mod util;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::commands::{
    RecommendArgs, WatchArgs, cmd_config, cmd_recommend, cmd_thresholds, cmd_twin, cmd_watch,
};
use crate::config::Config;
use crate::format::FormatOptions;

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "agrotwin", &mut io::stdout());
        return Ok(());
    }

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config_path = Config::path(cli.config.as_deref());
    let config = Config::load(&config_path);
    let opts = FormatOptions::new(cli.no_color || config.no_color);
    let default_format = OutputFormat::from_config(config.format.as_deref()).unwrap_or_default();

    match cli.command {
        Commands::Recommend { input, format, now } => {
            let engine = config.engine()?;
            cmd_recommend(RecommendArgs {
                input,
                now,
                format: format.unwrap_or(default_format),
                engine: &engine,
                opts: &opts,
            })?;
        }
        Commands::Twin { log, format } => {
            cmd_twin(&log, format.unwrap_or(default_format), &opts)?;
        }
        Commands::Thresholds { crop, format } => {
            let table = config.threshold_table()?;
            cmd_thresholds(
                &table,
                crop.as_deref(),
                format.unwrap_or(default_format),
                &opts,
            )?;
        }
        Commands::Watch {
            input,
            log,
            interval,
            count,
        } => {
            let engine = config.engine()?;
            cmd_watch(WatchArgs {
                input,
                log,
                interval: interval.unwrap_or(config.watch.interval_secs),
                count,
                quiet: cli.quiet,
                engine: &engine,
                opts: &opts,
            })
            .await?;
        }
        Commands::Config { action } => {
            cmd_config(&action, &config_path, cli.quiet)?;
        }
        Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }

    Ok(())
}
