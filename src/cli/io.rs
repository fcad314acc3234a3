//! JSON output for CLI commands
//!
//! Results go to stdout as a single JSON object; logs go to stderr.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::{json, Value};

use super::errors::CliResult;

/// Wraps command output in the success envelope.
pub fn response<T: Serialize>(data: &T) -> CliResult<Value> {
    Ok(json!({
        "status": "ok",
        "data": serde_json::to_value(data)?,
    }))
}

/// Writes a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    let envelope = response(data)?;
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &envelope)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Writes an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let envelope = json!({
        "status": "error",
        "code": code,
        "message": message,
    });
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &envelope)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
