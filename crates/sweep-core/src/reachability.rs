// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mark phase: breadth-first reachability from the root set.
//!
//! Contract
//! - Empty cells are FREE.
//! - Roots are ACTIVE regardless of their edges.
//! - An object is ACTIVE iff some directed path of edges leads to it from a
//!   root through objects only; every other object is DEAD.
//! - The result depends only on node kinds, root flags and the edge set. All
//!   roots seed the queue together and a node is marked at most once, so FIFO
//!   order affects visit order but never the classification.
//!
//! The pass is rerun from scratch after each mutation (`O(V + E)`); grids are
//! small and fixed, so there is no incremental bookkeeping to keep in sync.
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::ident::CellId;
use crate::record::{EdgeRecord, MemoryStatus, NodeKind, NodeRecord};

/// Classification result: one status per node present in the input.
pub type StatusMap = BTreeMap<CellId, MemoryStatus>;

/// Classifies every node as FREE, ACTIVE or DEAD.
pub fn classify(nodes: &BTreeMap<CellId, NodeRecord>, edges: &[EdgeRecord]) -> StatusMap {
    let is_object = |id: &CellId| nodes.get(id).is_some_and(|n| n.kind == NodeKind::Object);

    // Forward adjacency, ignoring edges that touch anything but objects.
    let mut adjacency: BTreeMap<CellId, Vec<CellId>> = BTreeMap::new();
    for edge in edges {
        if is_object(&edge.from) && is_object(&edge.to) {
            adjacency.entry(edge.from).or_default().push(edge.to);
        }
    }

    let mut statuses = StatusMap::new();
    let mut visited: BTreeSet<CellId> = BTreeSet::new();
    let mut queue: VecDeque<CellId> = VecDeque::new();

    for (id, node) in nodes {
        let status = match node.kind {
            NodeKind::Empty => MemoryStatus::Free,
            NodeKind::Object if node.is_root => {
                visited.insert(*id);
                queue.push_back(*id);
                MemoryStatus::Active
            }
            NodeKind::Object => MemoryStatus::Dead,
        };
        statuses.insert(*id, status);
    }

    while let Some(current) = queue.pop_front() {
        let Some(targets) = adjacency.get(&current) else {
            continue;
        };
        for to in targets {
            if visited.insert(*to) {
                statuses.insert(*to, MemoryStatus::Active);
                queue.push_back(*to);
            }
        }
    }

    statuses
}

/// Number of edges whose target is `id`.
pub fn incoming_edge_count(id: CellId, edges: &[EdgeRecord]) -> usize {
    edges.iter().filter(|e| e.to == id).count()
}
