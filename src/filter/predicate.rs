//! Closed set of element predicates

use std::fmt;

use crate::node::Node;

/// Predicate over the version state of a tracked element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Every tracked element
    All,
    /// Created and not deleted
    Created,
    /// Deleted
    Deleted,
    /// Not deleted
    Existing,
    /// Dirty
    Dirty,
    /// The element is itself a tracked container
    IsContainer,
}

impl Predicate {
    /// Returns true if `node` is tracked and accepted by this predicate.
    pub fn accepts(&self, node: &dyn Node) -> bool {
        let Some(version) = node.versionable() else {
            return false;
        };

        match self {
            Predicate::All => true,
            Predicate::Created => version.is_created() && !version.is_deleted(),
            Predicate::Deleted => version.is_deleted(),
            Predicate::Existing => !version.is_deleted(),
            Predicate::Dirty => version.is_dirty(),
            Predicate::IsContainer => node.container().is_some(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Predicate::All => "ALL",
            Predicate::Created => "CREATED",
            Predicate::Deleted => "DELETED",
            Predicate::Existing => "EXISTING",
            Predicate::Dirty => "DIRTY",
            Predicate::IsContainer => "IS_CONTAINER",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
