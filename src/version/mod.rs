//! Version state for tracked entities
//!
//! This module provides:
//! - `VersionId` - checkpoint identity used for optimistic concurrency
//! - `VersionState` - the create/dirty/delete flag state machine
//! - `VersionRecord` - plain snapshot of a state, for mediators
//! - `Versionable` - the capability every tracked entity exposes
//!
//! # Lifecycle
//!
//! A fresh state is created and dirty. `touch`, `create` and `delete`
//! all mark it dirty. `mark_clean` is the checkpoint: all flags drop and a
//! new, strictly greater version id is stamped.

mod clock;
mod state;
mod versionable;

pub use clock::{next_version_id, VersionId};
pub use state::{VersionRecord, VersionState};
pub use versionable::Versionable;
