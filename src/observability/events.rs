//! Lifecycle events of the instrumentation tooling

use std::fmt;

/// Events emitted while loading schemas and generating code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    ConfigLoaded,
    SchemasLoaded,
    /// One output file written
    SchemaGenerated,
    /// Schema already Versionable or output up to date
    SchemaSkipped,
    /// Semantics report produced
    CheckComplete,
    /// A CLI command returned an error
    CommandFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::SchemaGenerated => "SCHEMA_GENERATED",
            Event::SchemaSkipped => "SCHEMA_SKIPPED",
            Event::CheckComplete => "CHECK_COMPLETE",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }

    /// Failure events are logged at ERROR
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::CommandFailed)
    }

    /// Per-schema events are logged at TRACE
    pub fn is_detail(&self) -> bool {
        matches!(self, Event::SchemaGenerated | Event::SchemaSkipped)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
