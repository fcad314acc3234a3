//! Command-line interface
//!
//! - instrument: generate `tracked!` sources from schema files
//! - check: validate schema files and report field write semantics

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, instrument, run, run_command, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{response, write_error, write_response};
