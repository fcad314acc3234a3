//! Graph nodes
//!
//! A tracked object graph is made of nodes. Every node can say whether it
//! carries version state, whether it is a tracked container, and which
//! tracked nodes it refers to directly. That last part is the property
//! enumerator graph traversal walks; instrumented types generate it.
//!
//! Nodes reach each other either by embedding (a container field lives
//! inside its owner) or through `Shared` handles, which may form cycles.

mod element;
mod shared;

use crate::container::ChangeTrackingContainer;
use crate::version::Versionable;

pub use element::Element;
pub use shared::{NodeRef, Shared};

/// A value that can take part in a tracked graph.
pub trait Node {
    /// Version state of this node, if it is a tracked entity.
    fn versionable(&self) -> Option<&dyn Versionable> {
        None
    }

    /// Container view of this node, if it is a tracked container.
    fn container(&self) -> Option<&dyn ChangeTrackingContainer> {
        None
    }

    /// Direct references to tracked entities held by this node.
    ///
    /// Excludes the node's own version state and untracked members.
    fn children(&self) -> Vec<Child<'_>> {
        Vec::new()
    }

    /// Type name used in error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Full path of the implementing type. Part of traversal identity;
    /// keep the default.
    #[doc(hidden)]
    fn concrete_type(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A reference from one node to another.
#[derive(Clone)]
pub enum Child<'a> {
    /// Node stored inline in its owner, such as a container field
    Embedded(&'a dyn Node),
    /// Node behind a shared handle
    Shared(NodeRef),
}

impl<'a> Child<'a> {
    /// Runs `f` with the referenced node borrowed.
    ///
    /// Shared nodes are borrowed for the duration of the call.
    pub fn with<R>(&self, f: impl FnOnce(&dyn Node) -> R) -> R {
        match self {
            Child::Embedded(node) => f(*node),
            Child::Shared(shared) => {
                let guard = shared.borrow();
                f(&*guard)
            }
        }
    }

    /// Identity of the referenced node.
    pub fn key(&self) -> NodeKey {
        self.with(NodeKey::of)
    }

    /// Returns the shared handle, if this reference goes through one.
    pub fn as_shared(&self) -> Option<&NodeRef> {
        match self {
            Child::Shared(shared) => Some(shared),
            Child::Embedded(_) => None,
        }
    }
}

impl std::fmt::Debug for Child<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Child::Embedded(node) => write!(f, "Embedded({})", node.type_name()),
            Child::Shared(shared) => write!(f, "Shared({:?})", shared),
        }
    }
}

/// Identity of a node inside one traversal.
///
/// A container embedded at offset zero of its owner shares the owner's
/// address, so the concrete type is part of the key. Nodes need not be
/// `'static`, so the type is identified by its path rather than a `TypeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    addr: usize,
    concrete_type: &'static str,
}

impl NodeKey {
    pub fn of(node: &dyn Node) -> Self {
        Self {
            addr: node as *const dyn Node as *const () as usize,
            concrete_type: node.concrete_type(),
        }
    }
}
