//! Raw backing stores
//!
//! A store is the physical container a `TrackedContainer` wraps. It knows
//! nothing about version state; bookkeeping lives in the wrapper.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::errors::{TrackError, TrackResult};
use crate::node::Element;

use super::ContainerKind;

/// Physical storage behind a tracked container.
///
/// Keyed operations default to `UnsupportedOperation`; only maps have keys.
pub trait Store {
    /// Key type for keyed access. Non-keyed stores use the element type.
    type Key;
    type Item: Element;

    const KIND: ContainerKind;

    /// Inserts one element. Returns false if the store rejected it as a
    /// duplicate.
    fn insert(&mut self, item: Self::Item) -> TrackResult<bool>;

    /// Physically removes one element equal to `item`.
    fn remove_item(&mut self, item: &Self::Item) -> Option<Self::Item>;

    /// Physical membership, ignoring version state.
    fn contains_item(&self, item: &Self::Item) -> bool;

    fn len(&self) -> usize;

    /// Raw iteration order.
    fn iter(&self) -> Box<dyn Iterator<Item = &Self::Item> + '_>;

    /// Keeps only the elements for which `keep` returns true.
    fn retain(&mut self, keep: &mut dyn FnMut(&Self::Item) -> bool);

    fn put(&mut self, _key: Self::Key, _item: Self::Item) -> TrackResult<Option<Self::Item>> {
        Err(TrackError::keyed_unsupported(Self::KIND, "put"))
    }

    fn lookup(&self, _key: &Self::Key) -> TrackResult<Option<&Self::Item>> {
        Err(TrackError::keyed_unsupported(Self::KIND, "get"))
    }

    fn take(&mut self, _key: &Self::Key) -> TrackResult<Option<Self::Item>> {
        Err(TrackError::keyed_unsupported(Self::KIND, "remove by key"))
    }
}

/// Ordered list backed by a `Vec`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListStore<E>(pub Vec<E>);

/// Unordered bag backed by a `Vec`. Removal does not keep order.
#[derive(Debug, Clone, PartialEq)]
pub struct BagStore<E>(pub Vec<E>);

/// Set backed by a `HashSet`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetStore<E: Hash + Eq>(pub HashSet<E>);

/// Map backed by a `HashMap`. Element iteration walks the values.
#[derive(Debug, Clone, PartialEq)]
pub struct MapStore<K: Hash + Eq, V>(pub HashMap<K, V>);

impl<E> Default for ListStore<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<E> Default for BagStore<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<E: Hash + Eq> Default for SetStore<E> {
    fn default() -> Self {
        Self(HashSet::new())
    }
}

impl<K: Hash + Eq, V> Default for MapStore<K, V> {
    fn default() -> Self {
        Self(HashMap::new())
    }
}

impl<E: Element + PartialEq> Store for ListStore<E> {
    type Key = E;
    type Item = E;

    const KIND: ContainerKind = ContainerKind::List;

    fn insert(&mut self, item: E) -> TrackResult<bool> {
        self.0.push(item);
        Ok(true)
    }

    fn remove_item(&mut self, item: &E) -> Option<E> {
        let index = self.0.iter().position(|e| e == item)?;
        Some(self.0.remove(index))
    }

    fn contains_item(&self, item: &E) -> bool {
        self.0.contains(item)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &E> + '_> {
        Box::new(self.0.iter())
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&E) -> bool) {
        self.0.retain(|e| keep(e));
    }
}

impl<E: Element + PartialEq> Store for BagStore<E> {
    type Key = E;
    type Item = E;

    const KIND: ContainerKind = ContainerKind::Collection;

    fn insert(&mut self, item: E) -> TrackResult<bool> {
        self.0.push(item);
        Ok(true)
    }

    fn remove_item(&mut self, item: &E) -> Option<E> {
        let index = self.0.iter().position(|e| e == item)?;
        Some(self.0.swap_remove(index))
    }

    fn contains_item(&self, item: &E) -> bool {
        self.0.contains(item)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &E> + '_> {
        Box::new(self.0.iter())
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&E) -> bool) {
        self.0.retain(|e| keep(e));
    }
}

impl<E: Element + Hash + Eq> Store for SetStore<E> {
    type Key = E;
    type Item = E;

    const KIND: ContainerKind = ContainerKind::Set;

    fn insert(&mut self, item: E) -> TrackResult<bool> {
        Ok(self.0.insert(item))
    }

    fn remove_item(&mut self, item: &E) -> Option<E> {
        self.0.take(item)
    }

    fn contains_item(&self, item: &E) -> bool {
        self.0.contains(item)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &E> + '_> {
        Box::new(self.0.iter())
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&E) -> bool) {
        self.0.retain(|e| keep(e));
    }
}

impl<K, V> Store for MapStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Element + PartialEq,
{
    type Key = K;
    type Item = V;

    const KIND: ContainerKind = ContainerKind::Map;

    fn insert(&mut self, _item: V) -> TrackResult<bool> {
        Err(TrackError::unsupported(
            "single-argument add on a map container; use put",
        ))
    }

    fn remove_item(&mut self, item: &V) -> Option<V> {
        let key = self
            .0
            .iter()
            .find(|(_, v)| *v == item)
            .map(|(k, _)| k.clone())?;
        self.0.remove(&key)
    }

    fn contains_item(&self, item: &V) -> bool {
        self.0.values().any(|v| v == item)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &V> + '_> {
        Box::new(self.0.values())
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&V) -> bool) {
        self.0.retain(|_, v| keep(v));
    }

    fn put(&mut self, key: K, item: V) -> TrackResult<Option<V>> {
        Ok(self.0.insert(key, item))
    }

    fn lookup(&self, key: &K) -> TrackResult<Option<&V>> {
        Ok(self.0.get(key))
    }

    fn take(&mut self, key: &K) -> TrackResult<Option<V>> {
        Ok(self.0.remove(key))
    }
}
