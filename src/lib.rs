//! smartvo - change-tracking value objects
//!
//! Plain data objects record their own lifecycle: whether they were
//! created, modified or deleted since the last checkpoint. Containers of
//! such objects keep soft-deleted members visible to a persistence layer
//! while hiding them from ordinary iteration, and whole object graphs,
//! cyclic ones included, can be asked whether anything changed and reset
//! in one call.
//!
//! - `version`: per-object lifecycle state and the `Versionable` capability
//! - `node`: graph nodes, shared handles and container elements
//! - `filter`: predicate-filtered iteration
//! - `container`: change-tracking list, set, map and collection
//! - `access`: graph-level queries over type-erased nodes
//! - `instrument`: the `tracked!` macro
//! - `schema`, `codegen`: JSON schema files to `tracked!` sources
//! - `mediator`: diffs and optimistic concurrency for persistence
//! - `observability`, `cli`: tooling

pub mod access;
pub mod cli;
pub mod codegen;
pub mod container;
pub mod errors;
pub mod filter;
pub mod instrument;
pub mod mediator;
pub mod node;
pub mod observability;
pub mod schema;
pub mod version;

/// Re-exported so generated code can name calendar types through this crate.
pub use chrono;

pub use access::{is_graph_dirty, reset_graph};
pub use container::{
    ChangeTrackingContainer, ContainerKind, TrackedCollection, TrackedContainer, TrackedList,
    TrackedMap, TrackedSet,
};
pub use errors::{TrackError, TrackResult};
pub use filter::{FilterIter, Predicate};
pub use instrument::{Instrumented, WriteSemantics};
pub use node::{Child, Element, Node, NodeRef, Shared};
pub use version::{VersionId, VersionState, Versionable};
