//! smartvo CLI entry point
//!
//! Parses arguments, dispatches to the CLI module and exits non-zero on
//! error. The failure is already logged to stderr by `cli::run`.

use smartvo::cli;

fn main() {
    if let Err(e) = cli::run() {
        let _ = cli::write_error(e.code_str(), e.message());
        std::process::exit(1);
    }
}
