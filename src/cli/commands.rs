//! CLI command implementations

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codegen::{semantics_report, EmitOptions, GenerationReport, Generator, TypeReport};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::schema::SchemaLoader;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Configuration file structure (`smartvo.json`)
///
/// Relative directories are resolved against the directory holding the
/// configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory of `*.json` schema files (required)
    pub schema_dir: PathBuf,

    /// Directory receiving generated `.rs` files (required)
    pub out_dir: PathBuf,

    /// Path to the runtime in generated code (default "smartvo")
    #[serde(default = "default_crate_path")]
    pub crate_path: String,

    /// Emit `#[derive(Debug)]` on generated types (default true)
    #[serde(default = "default_derive_debug")]
    pub derive_debug: bool,

    /// Regenerate even when fingerprints match (default false)
    #[serde(default)]
    pub force: bool,
}

fn default_crate_path() -> String {
    "smartvo".to_string()
}
fn default_derive_debug() -> bool {
    true
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        if let Some(base) = path.parent() {
            config.schema_dir = resolve(base, &config.schema_dir);
            config.out_dir = resolve(base, &config.out_dir);
        }

        Ok(config)
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.schema_dir.as_os_str().is_empty() {
            return Err(CliError::config_error("schema_dir must not be empty"));
        }

        if self.out_dir.as_os_str().is_empty() {
            return Err(CliError::config_error("out_dir must not be empty"));
        }

        if !is_rust_path(&self.crate_path) {
            return Err(CliError::config_error(format!(
                "Invalid crate_path: '{}'. Expected a Rust path such as 'smartvo' or 'crate'.",
                self.crate_path
            )));
        }

        Ok(())
    }

    /// Applies command-line overrides
    pub fn with_overrides(
        mut self,
        schema_dir: Option<PathBuf>,
        out_dir: Option<PathBuf>,
        force: bool,
    ) -> Self {
        if let Some(dir) = schema_dir {
            self.schema_dir = dir;
        }
        if let Some(dir) = out_dir {
            self.out_dir = dir;
        }
        self.force |= force;
        self
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            crate_path: self.crate_path.clone(),
            derive_debug: self.derive_debug,
        }
    }
}

fn resolve(base: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() || base.as_os_str().is_empty() {
        dir.to_path_buf()
    } else {
        base.join(dir)
    }
}

fn is_rust_path(path: &str) -> bool {
    let body = path.strip_prefix("::").unwrap_or(path);
    !body.is_empty()
        && body.split("::").all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                && segment != "_"
        })
}

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    if cli.quiet {
        Logger::set_min_severity(Severity::Warn);
    } else if cli.verbose {
        Logger::set_min_severity(Severity::Trace);
    }

    let result = run_command(cli.command);
    if let Err(err) = &result {
        log_event_with_fields(
            Event::CommandFailed,
            &[("code", err.code_str()), ("message", err.message())],
        );
    }
    result
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Instrument {
            config,
            schema_dir,
            out_dir,
            force,
        } => {
            let config = load_config(&config)?.with_overrides(schema_dir, out_dir, force);
            let report = instrument(&config)?;
            write_response(&report)
        }
        Command::Check { config } => {
            let config = load_config(&config)?;
            let report = check(&config)?;
            write_response(&report)
        }
    }
}

fn load_config(path: &Path) -> CliResult<Config> {
    let config = Config::load(path)?;
    let path = path.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("path", path.as_str())]);
    Ok(config)
}

fn load_schemas(config: &Config) -> CliResult<SchemaLoader> {
    let mut loader = SchemaLoader::new(&config.schema_dir);
    loader.load_all()?;

    let count = loader.schema_count().to_string();
    let dir = config.schema_dir.display().to_string();
    log_event_with_fields(
        Event::SchemasLoaded,
        &[("count", count.as_str()), ("schema_dir", dir.as_str())],
    );
    Ok(loader)
}

/// Generates sources for every schema under `config.schema_dir`.
pub fn instrument(config: &Config) -> CliResult<GenerationReport> {
    let loader = load_schemas(config)?;
    let generator = Generator::new(&config.out_dir, config.emit_options()).with_force(config.force);
    Ok(generator.generate_all(&loader)?)
}

/// Validates every schema and reports the write semantics of each field.
pub fn check(config: &Config) -> CliResult<Vec<TypeReport>> {
    let loader = load_schemas(config)?;
    let report = semantics_report(&loader, &config.crate_path);

    let types = report.len().to_string();
    let fields = report.iter().map(|t| t.fields.len()).sum::<usize>().to_string();
    log_event_with_fields(
        Event::CheckComplete,
        &[("types", types.as_str()), ("fields", fields.as_str())],
    );
    Ok(report)
}
