//! Graph access
//!
//! Stateless entry points used by mediators and callers that only hold a
//! type-erased node. Every function checks its argument's capability first
//! and fails with `InvalidArgument` when it is missing.
//!
//! Whole-graph operations (`is_graph_dirty`, `reset_graph`) live in
//! `traversal` and are re-exported here.

mod traversal;

use crate::container::ChangeTrackingContainer;
use crate::errors::{TrackError, TrackResult};
use crate::filter::{FilterIter, Predicate};
use crate::node::{Child, Element, Node};
use crate::version::{VersionId, Versionable};

pub use traversal::{is_graph_dirty, reset_graph, walk, Flow};

/// Filtered iteration over a type-erased container
pub type NodeIter<'a> = FilterIter<Box<dyn Iterator<Item = &'a dyn Element> + 'a>>;

pub fn is_versionable(node: &dyn Node) -> bool {
    node.versionable().is_some()
}

pub fn is_container(node: &dyn Node) -> bool {
    node.container().is_some()
}

/// Versionable capability of `node`, or `InvalidArgument`.
pub fn versionable(node: &dyn Node) -> TrackResult<&dyn Versionable> {
    node.versionable()
        .ok_or_else(|| TrackError::not_versionable(node.type_name()))
}

/// Container capability of `node`, or `InvalidArgument`.
pub fn container(node: &dyn Node) -> TrackResult<&dyn ChangeTrackingContainer> {
    node.container()
        .ok_or_else(|| TrackError::not_container(node.type_name()))
}

/// Iterates the elements of a container accepted by `predicate`.
pub fn iterator(node: &dyn Node, predicate: Predicate) -> TrackResult<NodeIter<'_>> {
    let container = container(node)?;
    Ok(FilterIter::new(container.raw_elements(), predicate))
}

pub fn created_iter(node: &dyn Node) -> TrackResult<NodeIter<'_>> {
    iterator(node, Predicate::Created)
}

pub fn deleted_iter(node: &dyn Node) -> TrackResult<NodeIter<'_>> {
    iterator(node, Predicate::Deleted)
}

pub fn modified_iter(node: &dyn Node) -> TrackResult<NodeIter<'_>> {
    iterator(node, Predicate::Dirty)
}

pub fn existing_iter(node: &dyn Node) -> TrackResult<NodeIter<'_>> {
    iterator(node, Predicate::Existing)
}

pub fn all_iter(node: &dyn Node) -> TrackResult<NodeIter<'_>> {
    iterator(node, Predicate::All)
}

/// Number of created entities held by a container.
pub fn created_count(node: &dyn Node) -> TrackResult<usize> {
    Ok(container(node)?.created_count())
}

/// Number of soft-deleted entities held by a container.
pub fn deleted_count(node: &dyn Node) -> TrackResult<usize> {
    Ok(container(node)?.deleted_count())
}

pub fn is_dirty(node: &dyn Node) -> TrackResult<bool> {
    Ok(versionable(node)?.is_dirty())
}

pub fn is_created(node: &dyn Node) -> TrackResult<bool> {
    Ok(versionable(node)?.is_created())
}

pub fn is_deleted(node: &dyn Node) -> TrackResult<bool> {
    Ok(versionable(node)?.is_deleted())
}

/// Direct tracked members of `node`: references and container fields.
pub fn child_entities(node: &dyn Node) -> TrackResult<Vec<Child<'_>>> {
    versionable(node)?;
    Ok(node.children())
}

/// The subset of `child_entities` that are containers.
pub fn child_containers(node: &dyn Node) -> TrackResult<Vec<Child<'_>>> {
    Ok(child_entities(node)?
        .into_iter()
        .filter(|child| child.with(|n| Predicate::IsContainer.accepts(n)))
        .collect())
}

/// Checkpoints a single node.
pub fn reset(node: &dyn Node) -> TrackResult<()> {
    versionable(node)?.mark_clean();
    Ok(())
}

/// True if both nodes carry the same version id.
pub fn same_version(a: &dyn Node, b: &dyn Node) -> TrackResult<bool> {
    Ok(versionable(a)?.version_id() == versionable(b)?.version_id())
}

pub fn version_id(node: &dyn Node) -> TrackResult<VersionId> {
    Ok(versionable(node)?.version_id())
}

pub fn set_version_id(node: &dyn Node, id: VersionId) -> TrackResult<()> {
    versionable(node)?.set_version_id(id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::TrackedList;
    use crate::node::Shared;
    use crate::version::VersionState;

    struct Item(VersionState);

    impl Node for Item {
        fn versionable(&self) -> Option<&dyn Versionable> {
            Some(&self.0)
        }
    }

    fn persisted() -> Shared<Item> {
        Shared::new(Item(VersionState::clean()))
    }

    #[test]
    fn test_plain_value_is_invalid_argument() {
        let value = 7i32;
        assert!(!is_versionable(&value));
        assert_eq!(is_dirty(&value).unwrap_err().code(), "SVO_INVALID_ARGUMENT");
        assert!(reset(&value).is_err());
        assert!(child_entities(&value).is_err());
    }

    #[test]
    fn test_iterator_requires_container() {
        let item = Item(VersionState::new());
        assert!(is_versionable(&item));
        assert!(!is_container(&item));
        let err = created_iter(&item).err().unwrap();
        assert_eq!(err.code(), "SVO_INVALID_ARGUMENT");
    }

    #[test]
    fn test_typed_iterators_over_container() {
        let gone = persisted();
        let mut list = TrackedList::from(vec![
            persisted(),
            gone.clone(),
            Shared::new(Item(VersionState::new())),
        ]);
        list.remove(&gone);

        assert_eq!(created_iter(&list).unwrap().count(), 1);
        assert_eq!(deleted_iter(&list).unwrap().count(), 1);
        assert_eq!(existing_iter(&list).unwrap().count(), 2);
        assert_eq!(modified_iter(&list).unwrap().count(), 2);
        assert_eq!(all_iter(&list).unwrap().count(), 3);
        assert_eq!(created_count(&list).unwrap(), 1);
        assert_eq!(deleted_count(&list).unwrap(), 1);
    }

    #[test]
    fn test_same_version_and_ids() {
        let a = Item(VersionState::clean());
        let b = Item(VersionState::clean());
        assert!(!same_version(&a, &b).unwrap());
        set_version_id(&b, version_id(&a).unwrap()).unwrap();
        assert!(same_version(&a, &b).unwrap());
    }

    #[test]
    fn test_reset_single_node() {
        let item = Item(VersionState::new());
        assert!(is_created(&item).unwrap());
        reset(&item).unwrap();
        assert!(!is_dirty(&item).unwrap());
        assert!(!is_created(&item).unwrap());
        assert!(!is_deleted(&item).unwrap());
    }
}
