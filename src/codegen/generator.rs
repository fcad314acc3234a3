//! Batch generation of instrumented sources

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::emitter::{self, EmitOptions};
use super::errors::{CodegenError, CodegenResult};
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::schema::{Schema, SchemaLoader};

/// Why a schema produced no output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The type declares it already implements Versionable
    AlreadyVersionable,
    /// The output file carries the same fingerprint
    UpToDate,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::AlreadyVersionable => "already_versionable",
            SkipReason::UpToDate => "up_to_date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated(PathBuf),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSchema {
    pub name: String,
    pub reason: SkipReason,
}

/// Summary of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub generated: Vec<String>,
    pub skipped: Vec<SkippedSchema>,
}

/// Writes one `<snake_name>.rs` per schema into the output directory.
///
/// Generated files import referenced types from sibling modules
/// (`use super::office::Office;`), so the output directory is expected to
/// be declared as a module whose children are the generated files.
pub struct Generator {
    out_dir: PathBuf,
    options: EmitOptions,
    force: bool,
}

impl Generator {
    pub fn new(out_dir: &Path, options: EmitOptions) -> Self {
        Self {
            out_dir: out_dir.to_path_buf(),
            options,
            force: false,
        }
    }

    /// Regenerate even when the existing output is up to date.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn output_path(&self, schema: &Schema) -> PathBuf {
        self.out_dir.join(format!("{}.rs", schema.module_name()))
    }

    /// Generates a single schema, honoring the skip rules.
    pub fn generate(&self, schema: &Schema) -> CodegenResult<Outcome> {
        if schema.is_instrumented() {
            return Ok(Outcome::Skipped(SkipReason::AlreadyVersionable));
        }

        let path = self.output_path(schema);
        let fingerprint = emitter::fingerprint(schema, &self.options);

        if !self.force && path.exists() {
            let existing = fs::read_to_string(&path)
                .map_err(|e| CodegenError::io("read", &path, e))?;
            if emitter::parse_header(&existing) == Some(fingerprint.as_str()) {
                return Ok(Outcome::Skipped(SkipReason::UpToDate));
            }
        }

        if !self.out_dir.exists() {
            fs::create_dir_all(&self.out_dir)
                .map_err(|e| CodegenError::io("create", &self.out_dir, e))?;
        }

        let source = emitter::render(schema, &self.options);
        fs::write(&path, source).map_err(|e| CodegenError::io("write", &path, e))?;

        Ok(Outcome::Generated(path))
    }

    /// Generates every loaded schema in name order.
    pub fn generate_all(&self, loader: &SchemaLoader) -> CodegenResult<GenerationReport> {
        let count = loader.schema_count().to_string();
        let out_dir = self.out_dir.display().to_string();
        let scope = ObservationScope::with_fields(
            "INSTRUMENT",
            &[("schemas", count.as_str()), ("out_dir", out_dir.as_str())],
        );

        let mut report = GenerationReport::default();
        for schema in loader.all_schemas() {
            match self.generate(schema) {
                Ok(Outcome::Generated(path)) => {
                    let path = path.display().to_string();
                    log_event_with_fields(
                        Event::SchemaGenerated,
                        &[("schema", schema.name.as_str()), ("path", path.as_str())],
                    );
                    report.generated.push(schema.name.clone());
                }
                Ok(Outcome::Skipped(reason)) => {
                    log_event_with_fields(
                        Event::SchemaSkipped,
                        &[("schema", schema.name.as_str()), ("reason", reason.as_str())],
                    );
                    report.skipped.push(SkippedSchema {
                        name: schema.name.clone(),
                        reason,
                    });
                }
                Err(err) => {
                    scope.fail(&err.to_string());
                    return Err(err);
                }
            }
        }

        let generated = report.generated.len().to_string();
        let skipped = report.skipped.len().to_string();
        scope.complete_with_fields(&[
            ("generated", generated.as_str()),
            ("skipped", skipped.as_str()),
        ]);
        Ok(report)
    }
}
