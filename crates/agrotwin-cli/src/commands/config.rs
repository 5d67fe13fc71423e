//! Config command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::cli::ConfigAction;
use crate::config::Config;
use crate::util::write_output;

pub fn cmd_config(action: &ConfigAction, path: &Path, quiet: bool) -> Result<()> {
    match action {
        ConfigAction::Path => write_output(&format!("{}\n", path.display())),
        ConfigAction::Show => {
            if !path.exists() && !quiet {
                eprintln!("No config file at {}; showing defaults.", path.display());
            }
            let config = Config::load(path);
            let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            write_output(&content)
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "Config file already exists: {}\nUse --force to overwrite it.",
                    path.display()
                );
            }
            Config::default().save(path)?;
            if !quiet {
                eprintln!("Wrote default config to {}", path.display());
            }
            Ok(())
        }
    }
}
