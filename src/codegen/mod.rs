//! Build-time instrumentation
//!
//! Turns JSON schema files into Rust sources, one `tracked!` invocation per
//! type. A generated file starts with a header carrying a fingerprint of
//! its schema and emit options; unchanged schemas are not rewritten, and
//! types declaring `"implements": ["Versionable"]` are never touched.

mod emitter;
mod errors;
mod generator;
mod report;

pub use emitter::{fingerprint, parse_header, render, EmitOptions, HEADER_PREFIX};
pub use errors::{CodegenError, CodegenResult};
pub use generator::{GenerationReport, Generator, Outcome, SkipReason, SkippedSchema};
pub use report::{field_semantics, semantics_report, type_report, FieldReport, TypeReport};
