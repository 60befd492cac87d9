use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Interactive shell over an in-memory directory tree.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// YAML file describing the tree to start with
    #[clap(long, short = 'L', conflicts_with = "empty")]
    pub layout: Option<PathBuf>,

    /// Start with nothing but the root directory
    #[clap(long, short)]
    pub empty: bool,

    /// Read commands from this file instead of prompting
    #[clap(long, short)]
    pub script: Option<PathBuf>,

    /// Never colorize output
    #[clap(long)]
    pub no_color: bool,
}
