//! Persistence boundary
//!
//! A mediator loads graphs of tracked objects from a store and writes back
//! only what the tracking state says changed. Optimistic concurrency uses
//! the version id: a graph whose id differs from the stored one is stale.

mod changes;
mod errors;

use std::collections::HashMap;
use std::hash::Hash;

pub use changes::{ChangeSet, ChangeSummary};
pub use errors::{MediatorError, MediatorResult};

use crate::access;
use crate::node::Node;
use crate::version::VersionId;

/// Loads, stores and deletes graphs of tracked objects.
pub trait Mediator {
    type Key;
    type Graph;

    /// Returns a fresh, clean copy of the stored graph.
    fn get_graph(&self, key: &Self::Key) -> MediatorResult<Self::Graph>;

    /// Writes the changes recorded in `graph` and checkpoints it.
    fn update_graph(&mut self, graph: &Self::Graph) -> MediatorResult<ChangeSummary<Self::Key>>;

    fn delete_graph(&mut self, key: &Self::Key) -> MediatorResult<()>;
}

/// Fails with `StaleVersion` when `node` was not checked out at `stored`.
///
/// `None` means the store has no version yet, which always passes.
pub fn check_version(node: &dyn Node, stored: Option<VersionId>) -> MediatorResult<()> {
    let found = access::version_id(node)?;
    match stored {
        Some(expected) if expected != found => Err(MediatorError::StaleVersion { expected, found }),
        _ => Ok(()),
    }
}

/// Last version id handed out per stored key
#[derive(Debug, Clone)]
pub struct VersionCache<K> {
    ids: HashMap<K, VersionId>,
}

impl<K: Hash + Eq> VersionCache<K> {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<VersionId> {
        self.ids.get(key).copied()
    }

    /// Records the current version id of `node` under `key`.
    pub fn record(&mut self, key: K, node: &dyn Node) -> MediatorResult<VersionId> {
        let id = access::version_id(node)?;
        self.ids.insert(key, id);
        Ok(id)
    }

    pub fn check(&self, key: &K, node: &dyn Node) -> MediatorResult<()> {
        check_version(node, self.get(key))
    }

    pub fn remove(&mut self, key: &K) -> Option<VersionId> {
        self.ids.remove(key)
    }
}

impl<K: Hash + Eq> Default for VersionCache<K> {
    fn default() -> Self {
        Self::new()
    }
}
