//! Minimal diffs computed from tracking state

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::errors::MediatorResult;
use crate::access::{self, walk, Flow};
use crate::container::{Lifecycle, Store, TrackedContainer};
use crate::node::{Element, Node};

/// Dirty elements of one container, split by what a store must do
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet<T> {
    pub created: Vec<T>,
    pub updated: Vec<T>,
    pub deleted: Vec<T>,
}

impl<T> ChangeSet<T> {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.created.len() + self.updated.len() + self.deleted.len()
    }
}

impl<T: Element + Clone> ChangeSet<T> {
    /// Classifies every dirty element of `container`.
    ///
    /// Deleted wins over created; dirty persistent elements are updates.
    pub fn collect<S>(container: &TrackedContainer<S>) -> Self
    where
        S: Store<Item = T>,
    {
        let mut changes = ChangeSet {
            created: Vec::new(),
            updated: Vec::new(),
            deleted: Vec::new(),
        };

        for item in container.modified() {
            match Lifecycle::of(item) {
                Lifecycle::Deleted => changes.deleted.push(item.clone()),
                Lifecycle::Created => changes.created.push(item.clone()),
                Lifecycle::Persistent => changes.updated.push(item.clone()),
                Lifecycle::Untracked => {}
            }
        }
        changes
    }
}

/// Outcome of storing a graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSummary<K> {
    /// Key of the stored root, if one was assigned
    pub key: Option<K>,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Human-readable account of what was done
    pub report: String,
}

impl<K> ChangeSummary<K> {
    /// Summary for a graph with nothing to store
    pub fn unchanged(key: Option<K>) -> Self {
        Self {
            key,
            created: 0,
            updated: 0,
            deleted: 0,
            report: "nothing to update".into(),
        }
    }

    /// Counts the dirty entities reachable from `root`.
    ///
    /// Containers are skipped; their elements are counted instead. Deleted
    /// elements are not reachable through a walk, so pass the deleted
    /// count of the containers separately when it matters.
    pub fn of_graph(key: Option<K>, root: &dyn Node) -> MediatorResult<Self> {
        access::versionable(root)?;

        let mut summary = Self::unchanged(key);
        let mut visited = HashSet::new();
        walk(root, &mut visited, &mut |node: &dyn Node| {
            if node.container().is_some() {
                return Flow::Continue;
            }
            if let Some(version) = node.versionable() {
                if version.is_deleted() {
                    summary.deleted += 1;
                } else if version.is_created() {
                    summary.created += 1;
                } else if version.is_dirty() {
                    summary.updated += 1;
                }
            }
            Flow::Continue
        });

        summary.report = summary.describe();
        Ok(summary)
    }

    pub fn has_changes(&self) -> bool {
        self.created + self.updated + self.deleted > 0
    }

    fn describe(&self) -> String {
        if !self.has_changes() {
            return "nothing to update".into();
        }
        format!(
            "created {}, updated {}, deleted {}",
            self.created, self.updated, self.deleted
        )
    }
}

impl<K> fmt::Display for ChangeSummary<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::TrackedList;
    use crate::node::Shared;
    use crate::version::{VersionState, Versionable};

    crate::tracked! {
        #[derive(Debug)]
        pub struct Branch {
            values {
                city: Option<String> => set_city,
            }
        }
    }

    fn persisted(city: &str) -> Shared<Branch> {
        let mut branch = Branch::new();
        branch.set_city(Some(city.to_string()));
        branch.mark_clean();
        Shared::new(branch)
    }

    #[test]
    fn test_collect_classifies_dirty_elements() {
        let kept = persisted("Bern");
        let edited = persisted("Basel");
        let dropped = persisted("Genf");
        let mut list: TrackedList<Shared<Branch>> =
            TrackedList::with_version(
                crate::container::ListStore(vec![kept.clone(), edited.clone(), dropped.clone()]),
                VersionState::clean(),
            );

        edited.borrow_mut().set_city(Some("Lugano".into()));
        list.remove(&dropped);
        let fresh = Shared::new(Branch::new());
        list.add(fresh.clone()).unwrap();

        let changes = ChangeSet::collect(&list);
        assert_eq!(changes.created, vec![fresh]);
        assert_eq!(changes.updated, vec![edited]);
        assert_eq!(changes.deleted, vec![dropped]);
        assert_eq!(changes.len(), 3);
    }

    #[test]
    fn test_clean_container_has_no_changes() {
        let list: TrackedList<Shared<Branch>> = TrackedList::with_version(
            crate::container::ListStore(vec![persisted("Bern")]),
            VersionState::clean(),
        );
        assert!(ChangeSet::collect(&list).is_empty());
    }

    #[test]
    fn test_summary_of_graph() {
        let branch = Branch::new();
        let summary = ChangeSummary::of_graph(Some(7u64), &branch).unwrap();
        assert_eq!(summary.created, 1);
        assert_eq!(summary.key, Some(7));
        assert_eq!(summary.report, "created 1, updated 0, deleted 0");

        branch.mark_clean();
        let summary = ChangeSummary::<u64>::of_graph(None, &branch).unwrap();
        assert!(!summary.has_changes());
        assert_eq!(summary.to_string(), "nothing to update");
    }

    #[test]
    fn test_summary_rejects_untracked_root() {
        assert!(ChangeSummary::<u64>::of_graph(None, &42i32).is_err());
    }
}
