//! Command-line arguments of the `stacker` binary.

use clap::Parser;
use std::path::PathBuf;
use stk::domain::{GameVersion, StackCategory};

#[derive(Debug, Parser)]
#[command(name = "stacker")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Loads, backfills and validates the stack settings files")]
pub struct Cli {
    /// Global configuration file; defaults apply when it does not exist
    #[arg(short, long, default_value = "stacker.toml")]
    pub config: PathBuf,

    /// Directory holding the per-category settings files (overrides `server.data_dir`)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Game version to support, e.g. `1.20.4` (overrides `server.game_version`)
    #[arg(short, long)]
    pub game_version: Option<GameVersion>,

    /// Log level (overrides `logging.level`)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Reload only this category instead of all four
    #[arg(long)]
    pub category: Option<StackCategory>,
}
