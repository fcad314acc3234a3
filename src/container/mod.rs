//! Change-tracking containers
//!
//! Wrappers that make insertion and removal lifecycle-aware:
//! - `TrackedList` - ordered, with untracked index operations
//! - `TrackedSet` - set semantics for add and contains
//! - `TrackedMap` - keyed access, elements are the values
//! - `TrackedCollection` - unordered bag, no keyed access
//!
//! All four are `TrackedContainer` over a different `Store`.

mod list;
mod map;
mod store;
mod tracked;
mod view;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use crate::node::Element;
use crate::version::{VersionState, Versionable};

pub use store::{BagStore, ListStore, MapStore, SetStore, Store};
pub use tracked::{Elements, RawIter, TrackedContainer};
pub use map::Entries;
pub use view::{MapEntries, MapValues};

pub(crate) use tracked::Lifecycle;

pub type TrackedList<E> = TrackedContainer<ListStore<E>>;
pub type TrackedSet<E> = TrackedContainer<SetStore<E>>;
pub type TrackedMap<K, V> = TrackedContainer<MapStore<K, V>>;
pub type TrackedCollection<E> = TrackedContainer<BagStore<E>>;

/// Shape of a tracked container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    List,
    Set,
    Map,
    Collection,
}

impl ContainerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::List => "list",
            ContainerKind::Set => "set",
            ContainerKind::Map => "map",
            ContainerKind::Collection => "collection",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type-erased view of a tracked container.
///
/// This is what graph traversal sees; typed access goes through
/// `TrackedContainer`.
pub trait ChangeTrackingContainer: Versionable {
    fn kind(&self) -> ContainerKind;

    /// Visible element count
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Physical element count
    fn raw_len(&self) -> usize;

    fn created_count(&self) -> usize;

    fn deleted_count(&self) -> usize;

    /// Raw elements in store order, untracked and deleted ones included.
    fn raw_elements(&self) -> Box<dyn Iterator<Item = &dyn Element> + '_>;
}

impl<E: Element + PartialEq> From<Vec<E>> for TrackedList<E> {
    fn from(raw: Vec<E>) -> Self {
        TrackedContainer::new(ListStore(raw))
    }
}

impl<E: Element + PartialEq> From<Vec<E>> for TrackedCollection<E> {
    fn from(raw: Vec<E>) -> Self {
        TrackedContainer::new(BagStore(raw))
    }
}

impl<E: Element + Hash + Eq> From<HashSet<E>> for TrackedSet<E> {
    fn from(raw: HashSet<E>) -> Self {
        TrackedContainer::new(SetStore(raw))
    }
}

impl<K, V> From<HashMap<K, V>> for TrackedMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Element + PartialEq,
{
    fn from(raw: HashMap<K, V>) -> Self {
        TrackedContainer::new(MapStore(raw))
    }
}

impl<E: Element + PartialEq> FromIterator<E> for TrackedList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

/// Wraps a raw container with a fresh version state.
///
/// Used by instrumented setters: every assignment of a raw container
/// stores a new tracked wrapper.
pub fn wrap<S: Store>(store: S) -> TrackedContainer<S> {
    TrackedContainer::with_version(store, VersionState::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, Shared};
    use crate::version::VersionState;

    struct Item(VersionState);

    impl Node for Item {
        fn versionable(&self) -> Option<&dyn Versionable> {
            Some(&self.0)
        }
    }

    fn fresh() -> Shared<Item> {
        Shared::new(Item(VersionState::new()))
    }

    fn persisted() -> Shared<Item> {
        Shared::new(Item(VersionState::clean()))
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ContainerKind::Collection.to_string(), "collection");
        let list: TrackedList<i32> = TrackedList::default();
        assert_eq!(ChangeTrackingContainer::kind(&list), ContainerKind::List);
    }

    #[test]
    fn test_wrapping_counts_existing_entities() {
        let gone = persisted();
        gone.borrow().0.delete();
        let list = TrackedList::from(vec![fresh(), persisted(), gone]);
        assert_eq!(list.created_count(), 1);
        assert_eq!(list.deleted_count(), 1);
        assert_eq!(list.len(), 2);
        assert_eq!(list.raw_len(), 3);
    }

    #[test]
    fn test_container_create_and_delete_are_noops() {
        let list: TrackedList<Shared<Item>> = TrackedList::default();
        list.mark_clean();
        Versionable::delete(&list);
        assert!(!list.is_deleted());
        assert!(!list.is_dirty());
        Versionable::create(&list);
        assert!(!list.is_created());
    }

    #[test]
    fn test_raw_elements_include_everything() {
        let item = persisted();
        let mut list = TrackedList::from(vec![item.clone(), persisted()]);
        list.remove(&item);
        let erased: &dyn ChangeTrackingContainer = &list;
        assert_eq!(erased.raw_elements().count(), 2);
        assert_eq!(erased.len(), 1);
    }

    #[test]
    fn test_wrap_starts_created() {
        let wrapped = wrap(ListStore(vec![1, 2, 3]));
        assert!(wrapped.is_created());
        assert!(wrapped.is_dirty());
        assert_eq!(wrapped.len(), 3);
    }

    #[test]
    fn test_collect_into_list() {
        let list: TrackedList<Shared<Item>> = (0..4).map(|_| fresh()).collect();
        assert_eq!(list.created_count(), 4);
    }
}
