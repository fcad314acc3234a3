//! CLI argument definitions using clap
//!
//! Commands:
//! - smartvo instrument --config <path> [--schema-dir D] [--out-dir D] [--force]
//! - smartvo check --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// smartvo - change-tracking value objects
#[derive(Parser, Debug)]
#[command(name = "smartvo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log only warnings and errors
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also log one line per schema
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate instrumented sources from schema files
    Instrument {
        /// Path to configuration file
        #[arg(long, default_value = "./smartvo.json")]
        config: PathBuf,

        /// Overrides `schema_dir` from the configuration
        #[arg(long)]
        schema_dir: Option<PathBuf>,

        /// Overrides `out_dir` from the configuration
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Regenerate files that are already up to date
        #[arg(long)]
        force: bool,
    },

    /// Validate schema files and report field write semantics
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./smartvo.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
