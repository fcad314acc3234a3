//! Begin/complete logging around a unit of work
//!
//! - `{name}_BEGIN` on creation
//! - `{name}_COMPLETE` or `{name}_FAILED` with `elapsed_ms`
//! - `{name}_INCOMPLETE` at WARN when dropped unresolved

use std::cell::Cell;
use std::time::Instant;

use super::logger::Logger;

/// Logs the lifecycle of a named operation
///
/// ```ignore
/// let scope = ObservationScope::new("INSTRUMENT");
/// // ... generate ...
/// scope.complete_with_fields(&[("generated", "3")]);
/// ```
pub struct ObservationScope {
    name: &'static str,
    timer: Timer,
    resolved: Cell<bool>,
}

impl ObservationScope {
    pub fn new(name: &'static str) -> Self {
        Self::with_fields(name, &[])
    }

    pub fn with_fields(name: &'static str, fields: &[(&str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);
        Self {
            name,
            timer: Timer::new(),
            resolved: Cell::new(false),
        }
    }

    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    pub fn complete_with_fields(self, extra: &[(&str, &str)]) {
        self.resolved.set(true);
        let elapsed = self.timer.elapsed_ms();
        let mut fields = vec![("elapsed_ms", elapsed.as_str())];
        fields.extend_from_slice(extra);
        Logger::info(&format!("{}_COMPLETE", self.name), &fields);
    }

    /// Logs `{name}_FAILED` at ERROR
    pub fn fail(self, reason: &str) {
        self.resolved.set(true);
        let elapsed = self.timer.elapsed_ms();
        Logger::error(
            &format!("{}_FAILED", self.name),
            &[("elapsed_ms", elapsed.as_str()), ("reason", reason)],
        );
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get()
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.resolved.get() {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}

/// Wall-clock duration timer
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
