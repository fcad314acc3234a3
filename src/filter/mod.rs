//! Filtered iteration over tracked elements
//!
//! A `FilterIter` walks a raw element sequence and surfaces only the
//! tracked entities accepted by a `Predicate`. Untracked elements are
//! never surfaced.

mod iter;
mod predicate;

pub use iter::FilterIter;
pub use predicate::Predicate;
