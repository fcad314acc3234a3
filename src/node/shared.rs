//! Shared node handles

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::Node;

/// Reference-counted handle to a node.
///
/// Equality and hashing are by identity, never by value, so handles can key
/// sets and maps even when the graph behind them is cyclic.
pub struct Shared<T: ?Sized>(Rc<RefCell<T>>);

/// Type-erased shared node
pub type NodeRef = Shared<dyn Node>;

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }
}

impl<T: Node + 'static> Shared<T> {
    /// Erases the concrete type, keeping identity.
    pub fn to_node(&self) -> NodeRef {
        let erased: Rc<RefCell<dyn Node>> = self.0.clone();
        Shared(erased)
    }
}

impl<T: ?Sized> Shared<T> {
    /// Immutably borrows the node.
    ///
    /// # Panics
    ///
    /// Panics if the node is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutably borrows the node.
    ///
    /// # Panics
    ///
    /// Panics if the node is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Returns true if both handles point at the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl<T: ?Sized> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: ?Sized> Eq for Shared<T> {}

impl<T: ?Sized> Hash for Shared<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

// Address only: printing the target would recurse forever on cycles.
impl<T: ?Sized> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shared@{:#x}", self.addr())
    }
}
