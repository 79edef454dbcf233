// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use sweep_core::{CellId, HeapGraph, MemoryStatus, NodeKind};

/// Arbitrary reclassified heap: grid side 1..=6, ~half the cells occupied,
/// ~20% of objects rooted, up to two references per cell (self-loops and
/// duplicates included).
pub fn arb_graph() -> impl Strategy<Value = HeapGraph> {
    (1u16..=6)
        .prop_flat_map(|size| {
            let cells = usize::from(size) * usize::from(size);
            (
                Just(size),
                prop::collection::vec((any::<bool>(), prop::bool::weighted(0.2)), cells),
                prop::collection::vec((0..cells, 0..cells), 0..=cells * 2),
            )
        })
        .prop_map(|(size, slots, edges)| {
            let side = usize::from(size);
            let cell = |index: usize| CellId::from_index(index, side).expect("index in grid");
            let mut graph = HeapGraph::new(size);
            for (index, (occupied, root)) in slots.into_iter().enumerate() {
                if occupied {
                    graph.allocate(cell(index), root, index as u64);
                }
            }
            for (from, to) in edges {
                graph.insert_edge(cell(from), cell(to));
            }
            graph.reclassify();
            graph
        })
}

/// Reachable set computed by naive fixpoint iteration (independent of the
/// queue-based mark phase).
pub fn reachable_by_fixpoint(graph: &HeapGraph) -> BTreeSet<CellId> {
    let mut marked: BTreeSet<CellId> = graph.roots().into_iter().collect();
    loop {
        let before = marked.len();
        for edge in graph.edges() {
            let target_is_object = graph
                .node(&edge.to)
                .is_some_and(|n| n.kind == NodeKind::Object);
            if marked.contains(&edge.from) && target_is_object {
                marked.insert(edge.to);
            }
        }
        if marked.len() == before {
            return marked;
        }
    }
}

/// No edge touches an empty cell.
pub fn assert_no_dangling(graph: &HeapGraph) {
    for edge in graph.edges() {
        for end in [edge.from, edge.to] {
            let kind = graph.node(&end).map(|n| n.kind);
            assert_eq!(kind, Some(NodeKind::Object), "edge {} touches {end}", edge.id);
        }
    }
}

/// Ids of DEAD objects in row-major order.
pub fn dead_cells(graph: &HeapGraph) -> Vec<CellId> {
    graph
        .objects()
        .filter(|n| n.status == MemoryStatus::Dead)
        .map(|n| n.id)
        .collect()
}
