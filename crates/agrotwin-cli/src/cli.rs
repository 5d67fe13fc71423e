//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Parse the `format` value stored in the config file.
    pub fn from_config(value: Option<&str>) -> Option<Self> {
        match value?.trim().to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Parser)]
#[command(name = "agrotwin")]
#[command(author, version, about = "Crop recommendations and actuator state for smart farms", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "AGROTWIN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate ranked recommendations from a farm snapshot
    Recommend {
        /// Snapshot JSON file: {crop, sensors, devices?, weather?}
        #[arg(short, long)]
        input: PathBuf,

        /// Output format (defaults to the config file's format, then text)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Evaluate at this instant (RFC 3339) instead of now
        #[arg(long)]
        now: Option<String>,
    },

    /// Resolve actuator states from an action log
    Twin {
        /// Action log JSON file: [{timestamp, action, status}]
        #[arg(short, long)]
        log: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show the threshold table, or one crop's resolved set
    Thresholds {
        /// Crop name (unknown names resolve to the default set)
        crop: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Re-evaluate a snapshot and action log on a fixed interval
    Watch {
        /// Snapshot JSON file, re-read every tick
        #[arg(short, long)]
        input: PathBuf,

        /// Action log JSON file, re-read every tick
        #[arg(short, long)]
        log: Option<PathBuf>,

        /// Polling interval in seconds (defaults to the config file's value)
        #[arg(long)]
        interval: Option<u64>,

        /// Number of ticks before exiting (0 for unlimited)
        #[arg(short = 'n', long, default_value = "0")]
        count: u32,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Show the config file path
    Path,

    /// Show current configuration
    Show,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
