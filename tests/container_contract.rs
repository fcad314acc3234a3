//! Container Contract Tests
//!
//! Lifecycle-aware insertion and removal for every container shape:
//! - created elements are discarded outright when removed
//! - persisted elements are soft-deleted and stay queryable
//! - len() is the raw count minus soft-deleted elements
//! - default iteration hides deleted elements

use std::collections::{HashMap, HashSet};

use smartvo::access;
use smartvo::container::{ListStore, SetStore};
use smartvo::{
    is_graph_dirty, reset_graph, ChangeTrackingContainer, Shared, TrackError, TrackedCollection,
    TrackedList, TrackedMap, TrackedSet, VersionState, Versionable,
};

smartvo::tracked! {
    #[derive(Debug)]
    pub struct Office {
        values {
            city: Option<String> => set_city,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn fresh(city: &str) -> Shared<Office> {
    let mut office = Office::new();
    office.set_city(Some(city.to_string()));
    Shared::new(office)
}

fn persisted(city: &str) -> Shared<Office> {
    let office = fresh(city);
    office.borrow().mark_clean();
    office
}

fn holds<T>(items: impl Iterator<Item = T>, needle: &T) -> bool
where
    T: PartialEq,
{
    items.into_iter().any(|item| &item == needle)
}

// =============================================================================
// Documented Scenario
// =============================================================================

/// add three, checkpoint, remove one persisted, add and drop a fresh one.
#[test]
fn test_lifecycle_scenario() {
    let mut list: TrackedList<Shared<Office>> = TrackedList::default();
    let a = fresh("Aarau");
    let b = fresh("Bern");
    let c = fresh("Chur");

    list.add(a.clone()).unwrap();
    list.add(b.clone()).unwrap();
    list.add(c.clone()).unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.created_count(), 3);
    assert_eq!(list.deleted_count(), 0);

    reset_graph(&list).unwrap();
    assert_eq!(list.created_count(), 0);

    assert!(list.remove(&b));
    assert_eq!(list.len(), 2);
    assert_eq!(list.deleted_count(), 1);
    assert!(holds(list.deleted(), &&b));
    assert!(!holds(list.iter(), &&b));
    assert!(!holds(list.created(), &&b));

    let d = fresh("Davos");
    list.add(d.clone()).unwrap();
    assert_eq!(list.created_count(), 1);
    assert!(list.remove(&d));
    assert_eq!(list.created_count(), 0);
    assert!(!holds(list.all(), &&d));
    assert_eq!(list.raw_len(), 3);
}

// =============================================================================
// Remove Contract
// =============================================================================

/// A never-persisted element disappears from every view.
#[test]
fn test_remove_created_element_is_physical() {
    let mut list: TrackedList<Shared<Office>> = TrackedList::default();
    let office = fresh("Zug");
    list.add(office.clone()).unwrap();

    list.remove(&office);

    assert_eq!(list.raw_len(), 0);
    assert_eq!(list.iter().count(), 0);
    assert_eq!(list.created().count(), 0);
    assert_eq!(list.deleted().count(), 0);
    assert!(!office.borrow().is_deleted());
}

/// A persisted element is soft-deleted and marked dirty.
#[test]
fn test_remove_persisted_element_is_soft() {
    let office = persisted("Sion");
    let mut list: TrackedList<Shared<Office>> =
        TrackedList::with_version(ListStore(vec![office.clone()]), VersionState::clean());

    assert!(list.remove(&office));

    assert!(office.borrow().is_deleted());
    assert!(office.borrow().is_dirty());
    assert!(!list.contains(&office));
    assert_eq!(list.len(), 0);
    assert_eq!(list.raw_len(), 1);
    assert!(list.is_dirty());
}

/// Plain values are removed without bookkeeping.
#[test]
fn test_plain_values_bypass_bookkeeping() {
    let mut list: TrackedList<i32> = TrackedList::default();
    list.add(1).unwrap();
    list.add(2).unwrap();

    assert!(list.remove(&1));
    assert_eq!(list.len(), 1);
    assert_eq!(list.created_count(), 0);
    assert_eq!(list.deleted_count(), 0);
    assert_eq!(list.as_slice(), &[2]);
}

/// clear applies the remove contract element by element.
#[test]
fn test_clear_is_tracked() {
    let kept = persisted("Thun");
    let mut list: TrackedList<Shared<Office>> =
        TrackedList::with_version(ListStore(vec![kept.clone()]), VersionState::clean());
    list.add(fresh("Olten")).unwrap();

    list.clear();

    assert_eq!(list.len(), 0);
    assert_eq!(list.raw_len(), 1);
    assert_eq!(list.deleted_count(), 1);
    assert!(kept.borrow().is_deleted());
}

/// An entity stored twice counts once per stored copy.
#[test]
fn test_duplicate_persisted_entity_counts_every_copy() {
    let office = persisted("Baden");
    let mut list: TrackedList<Shared<Office>> = TrackedList::with_version(
        ListStore(vec![office.clone(), office.clone()]),
        VersionState::clean(),
    );

    assert!(list.remove(&office));
    assert_eq!(list.deleted_count(), 2);
    assert_eq!(list.len(), 0);
    assert_eq!(list.len(), list.iter().count());
    assert!(list.is_empty());

    // already soft-deleted copies are not counted again
    list.clear();
    assert_eq!(list.deleted_count(), 2);
    assert_eq!(list.raw_len(), 2);
}

/// clear over duplicates keeps len() consistent with iteration.
#[test]
fn test_clear_counts_duplicate_copies() {
    let office = persisted("Wil");
    let mut bag: TrackedCollection<Shared<Office>> = TrackedCollection::default();
    bag.add(office.clone()).unwrap();
    bag.add(office.clone()).unwrap();
    bag.add(fresh("Uster")).unwrap();
    assert_eq!(bag.created_count(), 1);

    bag.clear();

    assert_eq!(bag.created_count(), 0);
    assert_eq!(bag.deleted_count(), 2);
    assert_eq!(bag.raw_len(), 2);
    assert!(bag.is_empty());
    assert_eq!(bag.len(), bag.iter().count());
}

// =============================================================================
// Container Versioning
// =============================================================================

/// Adding marks the container dirty; create and delete on it do nothing.
#[test]
fn test_container_lifecycle_is_inert() {
    let list: TrackedList<Shared<Office>> =
        TrackedList::with_version(ListStore(Vec::new()), VersionState::clean());

    list.delete();
    assert!(!list.is_deleted());
    list.create();
    assert!(!list.is_created());
    assert!(!list.is_dirty());
}

/// mark_clean zeroes counters but keeps soft-deleted elements.
#[test]
fn test_mark_clean_keeps_soft_deleted() {
    let office = persisted("Biel");
    let mut list: TrackedList<Shared<Office>> =
        TrackedList::with_version(ListStore(vec![office.clone()]), VersionState::clean());
    list.remove(&office);

    list.mark_clean();

    assert_eq!(list.deleted_count(), 0);
    assert_eq!(list.raw_len(), 1);
    assert_eq!(list.deleted().count(), 1);
    assert!(!list.is_dirty());

    assert_eq!(list.purge_deleted(), 1);
    assert_eq!(list.raw_len(), 0);
}

// =============================================================================
// Variants
// =============================================================================

/// Duplicate adds to a set do not count twice.
#[test]
fn test_set_semantics() {
    let mut set: TrackedSet<Shared<Office>> = TrackedSet::default();
    let office = fresh("Baden");

    assert!(set.add(office.clone()).unwrap());
    assert!(!set.add(office.clone()).unwrap());
    assert_eq!(set.created_count(), 1);
    assert_eq!(set.len(), 1);
    assert!(set.contains(&office));
}

/// Keyed operations on a map follow the same contract.
#[test]
fn test_map_keyed_operations() {
    let office = persisted("Lugano");
    let mut raw = HashMap::new();
    raw.insert("south".to_string(), office.clone());
    let mut map: TrackedMap<String, Shared<Office>> = TrackedMap::from(raw);

    assert!(map.contains_key(&"south".to_string()).unwrap());
    assert!(map.remove_key(&"south".to_string()).unwrap());
    assert!(!map.contains_key(&"south".to_string()).unwrap());
    assert_eq!(map.keys().count(), 0);
    assert_eq!(map.len(), 0);
    assert_eq!(map.deleted_count(), 1);

    map.put("north".to_string(), fresh("Basel")).unwrap();
    assert_eq!(map.created_count(), 1);
    assert_eq!(map.keys().collect::<Vec<_>>(), vec![&"north".to_string()]);
}

/// A plain collection rejects keyed access.
#[test]
fn test_collection_rejects_keyed_access() {
    let mut bag: TrackedCollection<Shared<Office>> = TrackedCollection::default();

    let office = fresh("Chur");
    let err = bag.put(office.clone(), office).unwrap_err();
    assert!(matches!(err, TrackError::UnsupportedOperation(_)));
    assert_eq!(err.code(), "SVO_UNSUPPORTED_OPERATION");
}

/// Index operations on a list bypass tracking.
#[test]
fn test_list_index_operations_are_untracked() {
    let mut list: TrackedList<Shared<Office>> =
        TrackedList::with_version(ListStore(Vec::new()), VersionState::clean());
    let office = fresh("Nyon");

    list.insert_at(0, office.clone()).unwrap();
    assert!(!list.is_dirty());
    assert_eq!(list.created_count(), 0);
    assert_eq!(list.index_of(&office), Some(0));

    assert!(list.insert_at(5, fresh("Vevey")).is_err());
}

/// Map value views share the map's state.
#[test]
fn test_map_values_view_shares_state() {
    let office = persisted("Genf");
    let mut raw = HashMap::new();
    raw.insert(1u32, office.clone());
    let mut map: TrackedMap<u32, Shared<Office>> =
        smartvo::container::TrackedContainer::with_version(
            smartvo::container::MapStore(raw),
            VersionState::clean(),
        );

    {
        let mut values = map.values();
        assert_eq!(values.len(), 1);
        assert!(values.remove(&office));
        assert_eq!(values.len(), 0);
    }

    assert_eq!(map.deleted_count(), 1);
    assert!(map.is_dirty());
}

/// Map views answer the graph-level queries like the map itself.
#[test]
fn test_map_views_are_graph_nodes() {
    let office = persisted("Lugano");
    let mut map: TrackedMap<u32, Shared<Office>> = TrackedMap::default();
    map.put(1, office.clone()).unwrap();
    map.put(2, fresh("Locarno")).unwrap();
    reset_graph(&map).unwrap();
    map.put(3, fresh("Ascona")).unwrap();
    map.remove_key(&1).unwrap();

    {
        let values = map.values();
        assert!(access::is_container(&values));
        assert_eq!(access::created_iter(&values).unwrap().count(), 1);
        assert_eq!(access::deleted_iter(&values).unwrap().count(), 1);
        assert_eq!(access::deleted_count(&values).unwrap(), 1);
        assert!(is_graph_dirty(&values).unwrap());
    }

    let entries = map.entries();
    assert_eq!(access::existing_iter(&entries).unwrap().count(), 2);
    assert_eq!(access::container(&entries).unwrap().kind().as_str(), "set");
}

// =============================================================================
// Type-erased View
// =============================================================================

/// The object-safe view reports the same counts.
#[test]
fn test_object_safe_view() {
    let office = persisted("Aarau");
    let mut set: TrackedSet<Shared<Office>> =
        TrackedSet::with_version(SetStore(HashSet::from([office.clone()])), VersionState::clean());
    set.remove(&office);

    let erased: &dyn ChangeTrackingContainer = &set;
    assert_eq!(erased.len(), erased.raw_len() - erased.deleted_count());
    assert_eq!(erased.kind().as_str(), "set");
}
