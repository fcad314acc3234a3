//! Observability for the instrumentation tooling
//!
//! Structured JSON logging, typed lifecycle events and scoped timing.
//! Only schema loading, code generation and the CLI log; the tracking
//! runtime never writes log output.
//!
//! ```ignore
//! use smartvo::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::SchemasLoaded, &[("count", "4")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};

fn severity_of(event: Event) -> Severity {
    if event.is_failure() {
        Severity::Error
    } else if event.is_detail() {
        Severity::Trace
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_of(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_of(event), event.as_str(), fields);
}
