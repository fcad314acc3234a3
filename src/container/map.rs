//! Keyed access on tracked maps

use std::hash::Hash;

use crate::filter::{FilterIter, Predicate};
use crate::node::Element;

use super::view::{MapEntries, MapValues};
use super::{Lifecycle, TrackedMap};

/// Filtered iteration over map entries
pub type Entries<'a, K, V> = FilterIter<Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>>;

impl<K, V> TrackedMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Element + PartialEq,
{
    /// Keys whose value is not a soft-deleted entity.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.raw()
            .0
            .iter()
            .filter(|(_, v)| Lifecycle::of(*v) != Lifecycle::Deleted)
            .map(|(k, _)| k)
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.contains(value)
    }

    /// Entries whose tracked value is accepted by `predicate`.
    pub fn filtered_entries(&self, predicate: Predicate) -> Entries<'_, K, V> {
        let source: Box<dyn Iterator<Item = (&K, &V)> + '_> = Box::new(self.raw().0.iter());
        FilterIter::new(source, predicate)
    }

    /// Value view sharing this map's version state and counters.
    pub fn values(&mut self) -> MapValues<'_, K, V> {
        MapValues::new(self)
    }

    /// Entry view sharing this map's version state and counters.
    pub fn entries(&mut self) -> MapEntries<'_, K, V> {
        MapEntries::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, Shared};
    use crate::version::{VersionState, Versionable};

    struct Office(VersionState);

    impl Node for Office {
        fn versionable(&self) -> Option<&dyn Versionable> {
            Some(&self.0)
        }
    }

    fn persisted() -> Shared<Office> {
        Shared::new(Office(VersionState::clean()))
    }

    #[test]
    fn test_keys_exclude_deleted_values() {
        let mut map: TrackedMap<String, Shared<Office>> = TrackedMap::default();
        map.put("paris".into(), persisted()).unwrap();
        map.put("oslo".into(), persisted()).unwrap();
        map.remove_key(&"paris".to_string()).unwrap();

        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, vec![&"oslo".to_string()]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.raw_len(), 2);
    }

    #[test]
    fn test_keys_keep_untracked_values() {
        let mut map: TrackedMap<&'static str, i32> = TrackedMap::default();
        map.put("a", 1).unwrap();
        assert_eq!(map.keys().count(), 1);
        assert!(map.remove_key(&"a").unwrap());
        assert_eq!(map.keys().count(), 0);
    }

    #[test]
    fn test_get_hides_deleted_value() {
        let mut map: TrackedMap<u32, Shared<Office>> = TrackedMap::default();
        map.put(1, persisted()).unwrap();
        assert!(map.contains_key(&1).unwrap());
        map.remove_key(&1).unwrap();
        assert!(map.get(&1).unwrap().is_none());
        assert!(!map.contains_key(&1).unwrap());
    }

    #[test]
    fn test_put_over_created_value_keeps_counts() {
        let mut map: TrackedMap<u32, Shared<Office>> = TrackedMap::default();
        map.put(1, Shared::new(Office(VersionState::new()))).unwrap();
        map.put(1, Shared::new(Office(VersionState::new()))).unwrap();
        assert_eq!(map.created_count(), 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_filtered_entries() {
        let mut map: TrackedMap<u32, Shared<Office>> = TrackedMap::default();
        map.put(1, persisted()).unwrap();
        map.put(2, Shared::new(Office(VersionState::new()))).unwrap();
        let created: Vec<u32> = map
            .filtered_entries(Predicate::Created)
            .map(|(k, _)| *k)
            .collect();
        assert_eq!(created, vec![2]);
    }
}
