//! TrackedContainer - lifecycle-aware wrapper around a store
//!
//! # Mutation contract
//!
//! - add: insert; count the element if it is a freshly created entity;
//!   always touch the container.
//! - remove: created entities are discarded outright; other entities are
//!   soft-deleted and stay physically present; plain values are removed
//!   with no bookkeeping.
//! - clear: applies remove to every element.
//! - len, contains and default iteration ignore soft-deleted entities.

use std::cell::Cell;
use std::fmt;

use crate::errors::TrackResult;
use crate::filter::{FilterIter, Predicate};
use crate::node::{Child, Element, Node};
use crate::version::{VersionId, VersionState, Versionable};

use super::store::Store;
use super::{ChangeTrackingContainer, ContainerKind};

/// Boxed raw iteration over a store
pub type RawIter<'a, T> = Box<dyn Iterator<Item = &'a T> + 'a>;

/// Filtered iteration over a tracked container
pub type Elements<'a, T> = FilterIter<RawIter<'a, T>>;

/// Lifecycle of a raw element, read from its version state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lifecycle {
    Untracked,
    Created,
    Deleted,
    Persistent,
}

impl Lifecycle {
    pub(crate) fn of<E: Element + ?Sized>(item: &E) -> Self {
        let Some(child) = item.child() else {
            return Lifecycle::Untracked;
        };

        child.with(|node| match node.versionable() {
            None => Lifecycle::Untracked,
            Some(v) if v.is_deleted() => Lifecycle::Deleted,
            Some(v) if v.is_created() => Lifecycle::Created,
            Some(_) => Lifecycle::Persistent,
        })
    }
}

/// Soft-deletes a tracked element.
pub(crate) fn mark_deleted<E: Element + ?Sized>(item: &E) {
    if let Some(child) = item.child() {
        child.with(|node| {
            if let Some(version) = node.versionable() {
                version.delete();
            }
        });
    }
}

fn increment(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

fn decrement(counter: &Cell<usize>) {
    counter.set(counter.get().saturating_sub(1));
}

/// A store wrapped with created/deleted bookkeeping and its own version
/// state.
///
/// The container itself is never created or deleted; `create` and `delete`
/// on it are no-ops. Only its elements carry lifecycle flags.
pub struct TrackedContainer<S: Store> {
    store: S,
    version: VersionState,
    created: Cell<usize>,
    deleted: Cell<usize>,
}

impl<S: Store> TrackedContainer<S> {
    /// Wraps a store in a new, created container.
    ///
    /// Entities already in the store are counted so the created and
    /// deleted counters match its contents.
    pub fn new(store: S) -> Self {
        Self::with_version(store, VersionState::new())
    }

    /// Wraps a store with an explicit version state.
    pub fn with_version(store: S, version: VersionState) -> Self {
        let container = Self {
            store,
            version,
            created: Cell::new(0),
            deleted: Cell::new(0),
        };
        for item in container.store.iter() {
            match Lifecycle::of(item) {
                Lifecycle::Created => increment(&container.created),
                Lifecycle::Deleted => increment(&container.deleted),
                _ => {}
            }
        }
        container
    }

    /// Adds an element.
    ///
    /// Returns false if the store rejected a duplicate. The container is
    /// touched either way.
    pub fn add(&mut self, item: S::Item) -> TrackResult<bool> {
        let lifecycle = Lifecycle::of(&item);
        let inserted = self.store.insert(item)?;
        if inserted && lifecycle == Lifecycle::Created {
            increment(&self.created);
        }
        self.version.touch_field("add");
        Ok(inserted)
    }

    /// Removes an element by value.
    ///
    /// Returns false if nothing visible matched.
    pub fn remove(&mut self, item: &S::Item) -> bool {
        if !self.store.contains_item(item) {
            return false;
        }

        match Lifecycle::of(item) {
            Lifecycle::Untracked => self.store.remove_item(item).is_some(),
            Lifecycle::Created => {
                let removed = self.store.remove_item(item).is_some();
                if removed {
                    decrement(&self.created);
                }
                removed
            }
            Lifecycle::Deleted => false,
            Lifecycle::Persistent => {
                self.soft_delete(|_| mark_deleted(item));
                self.version.touch_field("remove");
                true
            }
        }
    }

    /// True if the element is present and not soft-deleted.
    pub fn contains(&self, item: &S::Item) -> bool {
        self.store.contains_item(item) && Lifecycle::of(item) != Lifecycle::Deleted
    }

    /// Visible element count: raw count minus deleted count.
    pub fn len(&self) -> usize {
        self.store.len().saturating_sub(self.deleted.get())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Physical element count, soft-deleted entities included.
    pub fn raw_len(&self) -> usize {
        self.store.len()
    }

    pub fn created_count(&self) -> usize {
        self.created.get()
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted.get()
    }

    /// Iterates the tracked entities that are not deleted.
    pub fn iter(&self) -> Elements<'_, S::Item> {
        self.filtered(Predicate::Existing)
    }

    /// Iterates the tracked entities accepted by `predicate`.
    pub fn filtered(&self, predicate: Predicate) -> Elements<'_, S::Item> {
        FilterIter::new(self.store.iter(), predicate)
    }

    pub fn created(&self) -> Elements<'_, S::Item> {
        self.filtered(Predicate::Created)
    }

    pub fn deleted(&self) -> Elements<'_, S::Item> {
        self.filtered(Predicate::Deleted)
    }

    pub fn modified(&self) -> Elements<'_, S::Item> {
        self.filtered(Predicate::Dirty)
    }

    pub fn all(&self) -> Elements<'_, S::Item> {
        self.filtered(Predicate::All)
    }

    /// Removes every element through the remove contract.
    ///
    /// Persisted entities stay behind as soft-deleted elements.
    pub fn clear(&mut self) {
        let mut dropped_created = 0;

        let newly_deleted = self.soft_delete(|store| {
            store.retain(&mut |item| match Lifecycle::of(item) {
                Lifecycle::Untracked => false,
                Lifecycle::Created => {
                    dropped_created += 1;
                    false
                }
                Lifecycle::Deleted => true,
                Lifecycle::Persistent => {
                    mark_deleted(item);
                    true
                }
            })
        });

        self.created
            .set(self.created.get().saturating_sub(dropped_created));
        if newly_deleted > 0 {
            self.version.touch_field("clear");
        }
    }

    /// Runs `op` and adds every element it soft-deleted to the deleted
    /// counter. Returns that number.
    ///
    /// Counts raw occurrences, so an entity stored twice in a list counts
    /// twice, matching what `len` subtracts.
    fn soft_delete(&mut self, op: impl FnOnce(&mut S)) -> usize {
        let before = self.soft_deleted_in_store();
        op(&mut self.store);
        let flagged = self.soft_deleted_in_store().saturating_sub(before);
        self.deleted.set(self.deleted.get() + flagged);
        flagged
    }

    fn soft_deleted_in_store(&self) -> usize {
        self.store
            .iter()
            .filter(|item| Lifecycle::of(*item) == Lifecycle::Deleted)
            .count()
    }

    /// Snapshot of the raw elements, soft-deleted entities excluded.
    pub fn to_vec(&self) -> Vec<S::Item>
    where
        S::Item: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        self.copy_into(&mut out);
        out
    }

    /// Replaces the contents of `dest` with the visible raw elements.
    pub fn copy_into(&self, dest: &mut Vec<S::Item>)
    where
        S::Item: Clone,
    {
        dest.clear();
        dest.extend(
            self.store
                .iter()
                .filter(|item| Lifecycle::of(*item) != Lifecycle::Deleted)
                .cloned(),
        );
    }

    /// Physically drops soft-deleted entities and zeroes the deleted
    /// counter. Returns the number of elements dropped.
    ///
    /// Meant for mediators that have persisted the deletions.
    pub fn purge_deleted(&mut self) -> usize {
        let before = self.store.len();
        self.store
            .retain(&mut |item| Lifecycle::of(item) != Lifecycle::Deleted);
        self.deleted.set(0);
        before - self.store.len()
    }

    /// Keyed insert. Fails with `UnsupportedOperation` on non-map stores.
    ///
    /// Returns the element previously stored under `key`.
    pub fn put(&mut self, key: S::Key, item: S::Item) -> TrackResult<Option<S::Item>> {
        let lifecycle = Lifecycle::of(&item);
        let previous = self.store.put(key, item)?;
        if lifecycle == Lifecycle::Created {
            increment(&self.created);
        }
        if let Some(old) = &previous {
            match Lifecycle::of(old) {
                Lifecycle::Created => decrement(&self.created),
                Lifecycle::Deleted => decrement(&self.deleted),
                _ => {}
            }
        }
        self.version.touch_field("put");
        Ok(previous)
    }

    /// Keyed lookup. Soft-deleted values are hidden.
    pub fn get(&self, key: &S::Key) -> TrackResult<Option<&S::Item>> {
        Ok(self
            .store
            .lookup(key)?
            .filter(|item| Lifecycle::of(*item) != Lifecycle::Deleted))
    }

    /// Keyed remove through the remove contract.
    pub fn remove_key(&mut self, key: &S::Key) -> TrackResult<bool> {
        let lifecycle = match self.store.lookup(key)? {
            Some(item) => Lifecycle::of(item),
            None => return Ok(false),
        };

        match lifecycle {
            Lifecycle::Untracked => Ok(self.store.take(key)?.is_some()),
            Lifecycle::Created => {
                self.store.take(key)?;
                decrement(&self.created);
                Ok(true)
            }
            Lifecycle::Deleted => Ok(false),
            Lifecycle::Persistent => {
                self.soft_delete(|store| {
                    if let Ok(Some(item)) = store.lookup(key) {
                        mark_deleted(item);
                    }
                });
                self.version.touch_field("remove");
                Ok(true)
            }
        }
    }

    /// True if `key` maps to a value that is not soft-deleted.
    pub fn contains_key(&self, key: &S::Key) -> TrackResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// The wrapped store.
    pub fn raw(&self) -> &S {
        &self.store
    }

    /// Mutable raw access for operations that bypass bookkeeping.
    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Unwraps the store, dropping the bookkeeping.
    pub fn into_raw(self) -> S {
        self.store
    }

    pub fn version(&self) -> &VersionState {
        &self.version
    }
}

impl<S: Store + Default> Default for TrackedContainer<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: Store> Versionable for TrackedContainer<S> {
    fn touch_field(&self, field: &str) {
        self.version.touch_field(field);
    }

    fn create(&self) {}

    fn delete(&self) {}

    fn is_created(&self) -> bool {
        self.version.is_created()
    }

    fn is_deleted(&self) -> bool {
        self.version.is_deleted()
    }

    fn is_dirty(&self) -> bool {
        self.version.is_dirty()
    }

    /// Zeroes both counters and checkpoints the container's own state.
    ///
    /// Soft-deleted elements stay in the store; see `purge_deleted`.
    fn mark_clean(&self) {
        self.created.set(0);
        self.deleted.set(0);
        self.version.mark_clean();
    }

    fn version_id(&self) -> VersionId {
        self.version.version_id()
    }

    fn set_version_id(&self, id: VersionId) {
        self.version.set_version_id(id);
    }
}

impl<S> ChangeTrackingContainer for TrackedContainer<S>
where
    S: Store + 'static,
    S::Item: 'static,
{
    fn kind(&self) -> ContainerKind {
        S::KIND
    }

    fn len(&self) -> usize {
        TrackedContainer::len(self)
    }

    fn raw_len(&self) -> usize {
        self.store.len()
    }

    fn created_count(&self) -> usize {
        self.created.get()
    }

    fn deleted_count(&self) -> usize {
        self.deleted.get()
    }

    fn raw_elements(&self) -> Box<dyn Iterator<Item = &dyn Element> + '_> {
        Box::new(self.store.iter().map(|item| item as &dyn Element))
    }
}

impl<S> Node for TrackedContainer<S>
where
    S: Store + 'static,
    S::Item: 'static,
{
    fn versionable(&self) -> Option<&dyn Versionable> {
        Some(self)
    }

    fn container(&self) -> Option<&dyn ChangeTrackingContainer> {
        Some(self)
    }

    fn children(&self) -> Vec<Child<'_>> {
        self.iter().filter_map(|item| item.child()).collect()
    }
}

impl<S: Store + fmt::Debug> fmt::Debug for TrackedContainer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedContainer")
            .field("kind", &S::KIND)
            .field("created", &self.created.get())
            .field("deleted", &self.deleted.get())
            .field("version", &self.version)
            .field("store", &self.store)
            .finish()
    }
}
