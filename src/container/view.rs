//! Value and entry views over a tracked map
//!
//! Views borrow the map. Mutation through a view is mutation of the map:
//! the same counters move and the same version state is touched.

use std::hash::Hash;

use crate::errors::TrackResult;
use crate::filter::Predicate;
use crate::node::{Child, Element, Node};
use crate::version::{VersionId, Versionable};

use super::map::Entries;
use super::tracked::Elements;
use super::{ChangeTrackingContainer, ContainerKind, TrackedMap};

/// The values of a tracked map, as a collection.
pub struct MapValues<'a, K, V>
where
    K: Hash + Eq + Clone,
    V: Element + PartialEq,
{
    map: &'a mut TrackedMap<K, V>,
}

/// The entries of a tracked map, as a set of key/value pairs.
pub struct MapEntries<'a, K, V>
where
    K: Hash + Eq + Clone,
    V: Element + PartialEq,
{
    map: &'a mut TrackedMap<K, V>,
}

impl<'a, K, V> MapValues<'a, K, V>
where
    K: Hash + Eq + Clone,
    V: Element + PartialEq,
{
    pub(super) fn new(map: &'a mut TrackedMap<K, V>) -> Self {
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> Elements<'_, V> {
        self.map.iter()
    }

    pub fn filtered(&self, predicate: Predicate) -> Elements<'_, V> {
        self.map.filtered(predicate)
    }

    pub fn contains(&self, value: &V) -> bool {
        self.map.contains(value)
    }

    /// Removes a value through the map's remove contract.
    pub fn remove(&mut self, value: &V) -> bool {
        self.map.remove(value)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn to_vec(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.map.to_vec()
    }
}

impl<'a, K, V> MapEntries<'a, K, V>
where
    K: Hash + Eq + Clone,
    V: Element + PartialEq,
{
    pub(super) fn new(map: &'a mut TrackedMap<K, V>) -> Self {
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Entries whose value is not soft-deleted.
    pub fn iter(&self) -> Entries<'_, K, V> {
        self.map.filtered_entries(Predicate::Existing)
    }

    pub fn filtered(&self, predicate: Predicate) -> Entries<'_, K, V> {
        self.map.filtered_entries(predicate)
    }

    pub fn contains_key(&self, key: &K) -> TrackResult<bool> {
        self.map.contains_key(key)
    }

    /// Removes the entry for `key` through the map's remove contract.
    pub fn remove(&mut self, key: &K) -> TrackResult<bool> {
        self.map.remove_key(key)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

macro_rules! delegate_view {
    ($view:ident, $kind:expr) => {
        impl<'a, K, V> Versionable for $view<'a, K, V>
        where
            K: Hash + Eq + Clone,
            V: Element + PartialEq,
        {
            fn touch_field(&self, field: &str) {
                self.map.touch_field(field);
            }

            fn create(&self) {}

            fn delete(&self) {}

            fn is_created(&self) -> bool {
                self.map.is_created()
            }

            fn is_deleted(&self) -> bool {
                self.map.is_deleted()
            }

            fn is_dirty(&self) -> bool {
                self.map.is_dirty()
            }

            fn mark_clean(&self) {
                self.map.mark_clean();
            }

            fn version_id(&self) -> VersionId {
                self.map.version_id()
            }

            fn set_version_id(&self, id: VersionId) {
                self.map.set_version_id(id);
            }
        }

        impl<'a, K, V> ChangeTrackingContainer for $view<'a, K, V>
        where
            K: Hash + Eq + Clone + 'static,
            V: Element + PartialEq + 'static,
        {
            fn kind(&self) -> ContainerKind {
                $kind
            }

            fn len(&self) -> usize {
                self.map.len()
            }

            fn raw_len(&self) -> usize {
                self.map.raw_len()
            }

            fn created_count(&self) -> usize {
                self.map.created_count()
            }

            fn deleted_count(&self) -> usize {
                self.map.deleted_count()
            }

            fn raw_elements(&self) -> Box<dyn Iterator<Item = &dyn Element> + '_> {
                ChangeTrackingContainer::raw_elements(&*self.map)
            }
        }

        impl<'a, K, V> Node for $view<'a, K, V>
        where
            K: Hash + Eq + Clone + 'static,
            V: Element + PartialEq + 'static,
        {
            fn versionable(&self) -> Option<&dyn Versionable> {
                Some(self)
            }

            fn container(&self) -> Option<&dyn ChangeTrackingContainer> {
                Some(self)
            }

            fn children(&self) -> Vec<Child<'_>> {
                self.map.children()
            }
        }
    };
}

delegate_view!(MapValues, ContainerKind::Collection);
delegate_view!(MapEntries, ContainerKind::Set);
