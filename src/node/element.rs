//! Raw container elements
//!
//! Containers hold arbitrary values. `Element` tells them which of those
//! values are tracked entities (and therefore take part in created/deleted
//! bookkeeping) and which are plain data.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::shared::{NodeRef, Shared};
use super::{Child, Node};

/// A value that may be stored in a tracked container.
pub trait Element {
    /// The tracked node behind this element, or `None` for plain data.
    fn child(&self) -> Option<Child<'_>>;
}

impl<T: Node + 'static> Element for Shared<T> {
    fn child(&self) -> Option<Child<'_>> {
        Some(Child::Shared(self.to_node()))
    }
}

impl Element for NodeRef {
    fn child(&self) -> Option<Child<'_>> {
        Some(Child::Shared(self.clone()))
    }
}

impl<E: Element + ?Sized> Element for &E {
    fn child(&self) -> Option<Child<'_>> {
        (**self).child()
    }
}

impl<E: Element> Element for Option<E> {
    fn child(&self) -> Option<Child<'_>> {
        self.as_ref().and_then(|e| e.child())
    }
}

// Map entries are tracked through their value.
impl<K, V: Element> Element for (K, V) {
    fn child(&self) -> Option<Child<'_>> {
        self.1.child()
    }
}

macro_rules! untracked {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                fn child(&self) -> Option<Child<'_>> {
                    None
                }
            }

            impl Node for $ty {}
        )*
    };
}

untracked!(
    (), bool, char,
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
    String,
    NaiveDate, NaiveDateTime, NaiveTime, DateTime<Utc>,
);

// `&'static str` is covered by the reference impl above.
impl Element for str {
    fn child(&self) -> Option<Child<'_>> {
        None
    }
}

impl Node for &'static str {}
