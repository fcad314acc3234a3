//! Instrumentation of plain types
//!
//! `tracked!` turns a field list into a tracked type:
//! - an embedded `VersionState`, created at construction
//! - `Versionable` delegated to that state
//! - setters that compare before touching for equality-safe field types
//!   and touch unconditionally for everything else
//! - container fields stored as tracked containers; setters wrap raw
//!   `Vec`, `HashSet` and `HashMap` values in a fresh wrapper
//! - a generated child enumerator for graph traversal
//!
//! The build-time generator in `codegen` emits `tracked!` invocations from
//! JSON schema files.

mod macros;
mod probe;

use std::fmt;

use crate::container::ContainerKind;
use crate::node::Node;
use crate::version::{VersionState, Versionable};

pub use probe::{
    assign_compared, assign_unconditional, AlwaysWrite, CompareOnWrite, EqualitySafe, WriteProbe,
};

/// How writes to a field are tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteSemantics {
    /// Touch only when the new value differs
    Compare,
    /// Touch on every write
    Always,
    /// Raw container values are wrapped on write
    Container(ContainerKind),
}

impl WriteSemantics {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteSemantics::Compare => "compare",
            WriteSemantics::Always => "always",
            WriteSemantics::Container(_) => "container",
        }
    }
}

impl fmt::Display for WriteSemantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteSemantics::Container(kind) => write!(f, "container({})", kind),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Description of one instrumented field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub setter: &'static str,
    pub semantics: WriteSemantics,
}

/// Marker for types that already carry the Versionable capability through
/// instrumentation.
pub trait Instrumented: Versionable + Node {
    const TYPE_NAME: &'static str;

    /// Instrumented fields in declaration order.
    fn fields() -> Vec<FieldInfo>;

    /// The embedded version state.
    fn version_state(&self) -> &VersionState;
}
