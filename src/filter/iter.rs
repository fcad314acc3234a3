//! FilterIter - lazy predicate-driven iteration

use crate::errors::{TrackError, TrackResult};
use crate::node::Element;

use super::predicate::Predicate;

/// Lazy, one-shot iterator that yields only accepted tracked elements.
///
/// Holds at most one element of lookahead. `has_next` advances the source
/// until an accepted element is buffered; `next` consumes the buffer.
pub struct FilterIter<I: Iterator> {
    source: I,
    predicate: Predicate,
    lookahead: Option<I::Item>,
}

impl<I> FilterIter<I>
where
    I: Iterator,
    I::Item: Element,
{
    pub fn new(source: I, predicate: Predicate) -> Self {
        Self {
            source,
            predicate,
            lookahead: None,
        }
    }

    pub fn predicate(&self) -> Predicate {
        self.predicate
    }

    /// Returns true if another accepted element exists.
    ///
    /// Calling this repeatedly does not skip elements.
    pub fn has_next(&mut self) -> bool {
        if self.lookahead.is_some() {
            return true;
        }

        let predicate = self.predicate;
        self.lookahead = self.source.find(|item| accepts(predicate, item));
        self.lookahead.is_some()
    }

    /// Returns the next accepted element, or `ExhaustedSequence`.
    pub fn try_next(&mut self) -> TrackResult<I::Item> {
        self.has_next();
        self.lookahead.take().ok_or(TrackError::ExhaustedSequence)
    }

    /// Always fails: mutation goes through the owning container.
    pub fn remove(&mut self) -> TrackResult<()> {
        Err(TrackError::unsupported(
            "remove through a filtered iterator; use the owning container",
        ))
    }
}

fn accepts<E: Element>(predicate: Predicate, item: &E) -> bool {
    item.child()
        .map_or(false, |child| child.with(|node| predicate.accepts(node)))
}

impl<I> Iterator for FilterIter<I>
where
    I: Iterator,
    I::Item: Element,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_next() {
            self.lookahead.take()
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = usize::from(self.lookahead.is_some());
        let (_, upper) = self.source.size_hint();
        (buffered, upper.map(|u| u + buffered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, Shared};
    use crate::version::{VersionState, Versionable};

    struct Item(VersionState);

    impl Node for Item {
        fn versionable(&self) -> Option<&dyn Versionable> {
            Some(&self.0)
        }
    }

    fn clean_item() -> Shared<Item> {
        Shared::new(Item(VersionState::clean()))
    }

    #[test]
    fn test_skips_rejected_elements() {
        let items = vec![clean_item(), Shared::new(Item(VersionState::new())), clean_item()];
        let created: Vec<_> = FilterIter::new(items.iter(), Predicate::Created).collect();
        assert_eq!(created.len(), 1);
        assert!(created[0].ptr_eq(&items[1]));
    }

    #[test]
    fn test_untracked_elements_never_surface() {
        let raw = vec![1, 2, 3];
        let mut iter = FilterIter::new(raw.iter(), Predicate::All);
        assert!(!iter.has_next());
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_has_next_is_idempotent() {
        let items = vec![clean_item(), clean_item()];
        let mut iter = FilterIter::new(items.iter(), Predicate::Existing);
        assert!(iter.has_next());
        assert!(iter.has_next());
        assert!(iter.has_next());
        assert_eq!(iter.count(), 2);
    }

    #[test]
    fn test_try_next_exhausted() {
        let items: Vec<Shared<Item>> = vec![clean_item()];
        let mut iter = FilterIter::new(items.iter(), Predicate::All);
        assert!(iter.try_next().is_ok());
        assert_eq!(iter.try_next().unwrap_err(), TrackError::ExhaustedSequence);
    }

    #[test]
    fn test_remove_is_unsupported() {
        let items: Vec<Shared<Item>> = vec![clean_item()];
        let mut iter = FilterIter::new(items.iter(), Predicate::All);
        let err = iter.remove().unwrap_err();
        assert_eq!(err.code(), "SVO_UNSUPPORTED_OPERATION");
    }
}
