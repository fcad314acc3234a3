//! The Versionable capability

use super::clock::VersionId;

/// Capability exposed by every tracked entity.
///
/// Implemented directly by `VersionState` and by delegation everywhere
/// else: tracked containers and instrumented types forward to the state
/// they embed. All methods take `&self`; state lives in cells so a graph
/// can be walked and reset through shared borrows.
pub trait Versionable {
    /// Marks the entity dirty.
    fn touch(&self) {
        self.touch_field("");
    }

    /// Marks the entity dirty. The field name is diagnostic only.
    fn touch_field(&self, field: &str);

    /// Flags the entity as created (to be inserted).
    fn create(&self);

    /// Flags the entity as deleted (to be removed).
    fn delete(&self);

    fn is_created(&self) -> bool;

    fn is_deleted(&self) -> bool;

    fn is_dirty(&self) -> bool;

    /// Checkpoint: clears every flag and stamps a new version id.
    fn mark_clean(&self);

    fn version_id(&self) -> VersionId;

    fn set_version_id(&self, id: VersionId);
}
