//! Index operations on tracked lists
//!
//! These are a low-level escape hatch: they work on raw positions
//! (soft-deleted entities included) and bypass all bookkeeping. No
//! counter moves and the list is not touched.

use std::ops::Range;

use crate::errors::{TrackError, TrackResult};
use crate::node::Element;

use super::store::ListStore;
use super::TrackedList;

impl<E: Element + PartialEq> TrackedList<E> {
    /// Element at a raw position.
    pub fn get_at(&self, index: usize) -> Option<&E> {
        self.raw().0.get(index)
    }

    /// Replaces the element at a raw position, returning the old one.
    pub fn set_at(&mut self, index: usize, item: E) -> TrackResult<E> {
        let slot = self
            .raw_mut()
            .0
            .get_mut(index)
            .ok_or_else(|| out_of_range(index))?;
        Ok(std::mem::replace(slot, item))
    }

    /// Inserts at a raw position.
    pub fn insert_at(&mut self, index: usize, item: E) -> TrackResult<()> {
        let store = self.raw_mut();
        if index > store.0.len() {
            return Err(out_of_range(index));
        }
        store.0.insert(index, item);
        Ok(())
    }

    /// Removes the element at a raw position.
    pub fn remove_at(&mut self, index: usize) -> TrackResult<E> {
        let store = self.raw_mut();
        if index >= store.0.len() {
            return Err(out_of_range(index));
        }
        Ok(store.0.remove(index))
    }

    /// Raw position of the first element equal to `item`.
    pub fn index_of(&self, item: &E) -> Option<usize> {
        self.raw().0.iter().position(|e| e == item)
    }

    /// Raw position of the last element equal to `item`.
    pub fn last_index_of(&self, item: &E) -> Option<usize> {
        self.raw().0.iter().rposition(|e| e == item)
    }

    /// Raw slice over `range`.
    pub fn sub_list(&self, range: Range<usize>) -> TrackResult<&[E]> {
        let raw = &self.raw().0;
        if range.start > range.end || range.end > raw.len() {
            return Err(TrackError::InvalidArgument(format!(
                "range {}..{} out of bounds for length {}",
                range.start,
                range.end,
                raw.len()
            )));
        }
        Ok(&raw[range])
    }

    /// The whole raw list.
    pub fn as_slice(&self) -> &[E] {
        &self.raw().0
    }

    fn raw_mut(&mut self) -> &mut ListStore<E> {
        self.store_mut()
    }
}

fn out_of_range(index: usize) -> TrackError {
    TrackError::InvalidArgument(format!("index {} out of range", index))
}
