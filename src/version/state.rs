//! VersionState - create/dirty/delete flag state machine

use std::cell::Cell;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::clock::{next_version_id, VersionId};
use super::versionable::Versionable;

/// Plain snapshot of a version state.
///
/// This is what crosses the mediator boundary; it carries no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub dirty: bool,
    pub created: bool,
    pub deleted: bool,
    pub version_id: VersionId,
}

/// Flag record owned by every tracked entity.
///
/// `created` and `deleted` are never both set. Every mutator sets `dirty`;
/// only `mark_clean` clears it.
pub struct VersionState {
    dirty: Cell<bool>,
    created: Cell<bool>,
    deleted: Cell<bool>,
    version_id: Cell<VersionId>,
}

impl VersionState {
    /// Creates a state for a new object: created and dirty.
    pub fn new() -> Self {
        let state = Self::clean();
        state.create();
        state
    }

    /// Creates a checkpointed state, for objects loaded from a store.
    pub fn clean() -> Self {
        let state = Self {
            dirty: Cell::new(false),
            created: Cell::new(false),
            deleted: Cell::new(false),
            version_id: Cell::new(VersionId::new(0)),
        };
        state.mark_clean();
        state
    }

    /// Restores a state from a snapshot.
    ///
    /// A record with both `created` and `deleted` set is normalised to
    /// deleted, the last lifecycle transition that can produce it.
    pub fn from_record(record: VersionRecord) -> Self {
        Self {
            dirty: Cell::new(record.dirty),
            created: Cell::new(record.created && !record.deleted),
            deleted: Cell::new(record.deleted),
            version_id: Cell::new(record.version_id),
        }
    }

    /// Returns a snapshot of the current flags.
    pub fn snapshot(&self) -> VersionRecord {
        VersionRecord {
            dirty: self.dirty.get(),
            created: self.created.get(),
            deleted: self.deleted.get(),
            version_id: self.version_id.get(),
        }
    }
}

impl Default for VersionState {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for VersionState {
    fn clone(&self) -> Self {
        Self::from_record(self.snapshot())
    }
}

impl Versionable for VersionState {
    fn touch_field(&self, _field: &str) {
        self.dirty.set(true);
    }

    fn create(&self) {
        self.created.set(true);
        self.deleted.set(false);
        self.dirty.set(true);
    }

    fn delete(&self) {
        self.deleted.set(true);
        self.created.set(false);
        self.dirty.set(true);
    }

    fn is_created(&self) -> bool {
        self.created.get()
    }

    fn is_deleted(&self) -> bool {
        self.deleted.get()
    }

    fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    fn mark_clean(&self) {
        self.dirty.set(false);
        self.created.set(false);
        self.deleted.set(false);
        self.version_id.set(next_version_id(self.version_id.get()));
    }

    fn version_id(&self) -> VersionId {
        self.version_id.get()
    }

    fn set_version_id(&self, id: VersionId) {
        self.version_id.set(id);
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

impl fmt::Debug for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionState")
            .field("dirty", &self.dirty.get())
            .field("created", &self.created.get())
            .field("deleted", &self.deleted.get())
            .field("version_id", &self.version_id.get())
            .finish()
    }
}

impl fmt::Display for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Version [id: {} dirty: {} created: {} deleted: {}]",
            self.version_id.get(),
            yes_no(self.dirty.get()),
            yes_no(self.created.get()),
            yes_no(self.deleted.get()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_created_and_dirty() {
        let state = VersionState::new();
        assert!(state.is_created());
        assert!(state.is_dirty());
        assert!(!state.is_deleted());
    }

    #[test]
    fn test_clean_state_has_no_flags() {
        let state = VersionState::clean();
        assert!(!state.is_created());
        assert!(!state.is_dirty());
        assert!(!state.is_deleted());
    }

    #[test]
    fn test_touch_only_sets_dirty() {
        let state = VersionState::clean();
        state.touch_field("name");
        assert!(state.is_dirty());
        assert!(!state.is_created());
        assert!(!state.is_deleted());
    }

    #[test]
    fn test_delete_clears_created() {
        let state = VersionState::new();
        state.delete();
        assert!(state.is_deleted());
        assert!(!state.is_created());
    }

    #[test]
    fn test_create_clears_deleted() {
        let state = VersionState::clean();
        state.delete();
        state.create();
        assert!(state.is_created());
        assert!(!state.is_deleted());
    }

    #[test]
    fn test_mark_clean_advances_version() {
        let state = VersionState::new();
        let before = state.version_id();
        state.mark_clean();
        assert!(state.version_id() > before);
        assert!(!state.is_dirty());
    }

    #[test]
    fn test_mark_clean_after_external_id_does_not_go_back() {
        let state = VersionState::clean();
        let external = VersionId::new(state.version_id().value() + 1_000_000);
        state.set_version_id(external);
        state.mark_clean();
        assert!(state.version_id() > external);
    }

    #[test]
    fn test_record_roundtrip_keeps_flags() {
        let state = VersionState::clean();
        state.delete();
        let restored = VersionState::from_record(state.snapshot());
        assert_eq!(restored.snapshot(), state.snapshot());
    }

    #[test]
    fn test_from_record_normalises_conflicting_flags() {
        let restored = VersionState::from_record(VersionRecord {
            dirty: true,
            created: true,
            deleted: true,
            version_id: VersionId::new(7),
        });
        assert!(restored.is_deleted());
        assert!(!restored.is_created());
    }

    #[test]
    fn test_display() {
        let state = VersionState::new();
        let display = state.to_string();
        assert!(display.contains("dirty: yes"));
        assert!(display.contains("deleted: no"));
    }
}
