//! Type descriptions for the instrumentation generator
//!
//! A schema names a value-object type and declares its fields. The loader
//! reads one JSON file per type and rejects anything the generated
//! `tracked!` invocation could not express.

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity, ValidationDetails};
pub use loader::SchemaLoader;
pub use types::{to_snake_case, FieldDef, FieldType, Schema, VERSIONABLE_MARKER};
