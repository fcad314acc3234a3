//! Cycle-safe graph traversal
//!
//! Depth-first, pre-order. Plain nodes descend into their child entities;
//! container nodes descend into their non-deleted elements. The visited set
//! is filled before a node's children are explored, so each node is seen at
//! most once however the graph is wired.
//!
//! Shared nodes are borrowed while their subtree is walked. Pass the root
//! through a shared borrow; a root held through `borrow_mut` panics if the
//! graph cycles back to it.

use std::collections::HashSet;

use crate::errors::TrackResult;
use crate::filter::{FilterIter, Predicate};
use crate::node::{Child, Node, NodeKey};

use super::versionable;

/// Outcome of visiting one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep walking
    Continue,
    /// Stop the whole traversal with a result
    Stop(bool),
}

/// Walks the graph below `node`, calling `visit` once per distinct node.
///
/// Returns `Flow::Stop` as soon as a visit does.
pub fn walk(
    node: &dyn Node,
    visited: &mut HashSet<NodeKey>,
    visit: &mut dyn FnMut(&dyn Node) -> Flow,
) -> Flow {
    if !visited.insert(NodeKey::of(node)) {
        return Flow::Continue;
    }

    if let Flow::Stop(result) = visit(node) {
        return Flow::Stop(result);
    }

    for child in descendants(node) {
        if let Flow::Stop(result) = child.with(|n| walk(n, visited, visit)) {
            return Flow::Stop(result);
        }
    }

    Flow::Continue
}

fn descendants(node: &dyn Node) -> Vec<Child<'_>> {
    match node.container() {
        Some(container) => FilterIter::new(container.raw_elements(), Predicate::Existing)
            .filter_map(|element| element.child())
            .collect(),
        None => node.children(),
    }
}

/// True if any node reachable from `root` is dirty.
///
/// Stops at the first dirty node.
pub fn is_graph_dirty(root: &dyn Node) -> TrackResult<bool> {
    versionable(root)?;

    let mut visited = HashSet::new();
    let flow = walk(root, &mut visited, &mut |node: &dyn Node| {
        match node.versionable() {
            Some(version) if version.is_dirty() => Flow::Stop(true),
            _ => Flow::Continue,
        }
    });

    Ok(matches!(flow, Flow::Stop(true)))
}

/// Checkpoints every node reachable from `root`, root first.
///
/// Each node is cleaned exactly once. Soft-deleted container elements are
/// not reached and keep their flags.
pub fn reset_graph(root: &dyn Node) -> TrackResult<()> {
    versionable(root)?;

    let mut visited = HashSet::new();
    walk(root, &mut visited, &mut |node: &dyn Node| {
        if let Some(version) = node.versionable() {
            version.mark_clean();
        }
        Flow::Continue
    });

    Ok(())
}
