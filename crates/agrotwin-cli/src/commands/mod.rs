//! Command implementations for the CLI.

mod config;
mod recommend;
mod thresholds;
mod twin;
mod watch;

pub use config::cmd_config;
pub use recommend::{RecommendArgs, cmd_recommend};
pub use thresholds::cmd_thresholds;
pub use twin::cmd_twin;
pub use watch::{WatchArgs, cmd_watch};
