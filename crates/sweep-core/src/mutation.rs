// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mutation engine: spawn, delete and nullify.
//!
//! Each operation reads the previous snapshot, builds a complete new one, and
//! either returns it whole or returns an outcome without touching anything.
//! There is no partially applied mutation.
use crate::config::GameConfig;
use crate::error::{Fault, MutationError, Rejection};
use crate::graph::HeapGraph;
use crate::ident::CellId;
use crate::math::RandomSource;
use crate::record::{EdgeRecord, MemoryStatus};

/// Result of a successful allocation.
#[derive(Debug, Clone)]
pub struct Spawned {
    /// Next snapshot, already reclassified.
    pub graph: HeapGraph,
    /// Cell that received the new object.
    pub cell: CellId,
    /// Whether the object was born (or forced to be) a root.
    pub is_root: bool,
    /// ACTIVE object that received a reference to the newcomer, if any.
    pub parent: Option<CellId>,
    /// Extra random reference created this tick, if any.
    pub cross_edge: Option<EdgeRecord>,
    /// Root demoted this tick ("scope exit"), if any.
    pub scope_exit: Option<CellId>,
}

/// Result of freeing an unreferenced DEAD object.
#[derive(Debug, Clone)]
pub struct Freed {
    /// Next snapshot.
    pub graph: HeapGraph,
    /// Freed cell.
    pub cell: CellId,
    /// Incident edges removed with it.
    pub edges_removed: usize,
}

/// Result of nullifying a DEAD object's outgoing references.
#[derive(Debug, Clone)]
pub struct Nullified {
    /// Next snapshot.
    pub graph: HeapGraph,
    /// Source cell whose references were dropped.
    pub cell: CellId,
    /// Number of edges removed.
    pub edges_removed: usize,
}

/// Allocates one object in a random empty cell.
///
/// Draw order on `rng`: empty-cell index, root roll, parent index (only when
/// the object is not a root and ACTIVE objects exist), cross-edge roll, source
/// and target indices (only with at least two objects), scope-exit roll (only
/// with more than `scope_exit_min_roots` roots) and victim index.
///
/// A non-root newcomer always gets an incoming reference from an ACTIVE
/// parent; when no ACTIVE object exists it becomes a root instead. The extra
/// random reference skips self-loops and exact duplicates; the parent
/// reference does not check for duplicates.
///
/// Returns [`Fault::OutOfCapacity`] when no empty cell is left.
pub fn spawn<R>(
    graph: &HeapGraph,
    config: &GameConfig,
    rng: &mut R,
    created_at: u64,
) -> Result<Spawned, Fault>
where
    R: RandomSource + ?Sized,
{
    let empty = graph.empty_cells();
    if empty.is_empty() {
        return Err(Fault::OutOfCapacity);
    }
    let cell = empty[rng.next_index(empty.len())];

    let mut is_root = rng.chance(config.root_probability);
    let mut parent = None;
    if !is_root {
        // Parents come from the previous classification; the newcomer is not
        // a candidate.
        let candidates = graph.active_objects();
        if candidates.is_empty() {
            is_root = true;
        } else {
            parent = Some(candidates[rng.next_index(candidates.len())]);
        }
    }

    let mut next = graph.clone();
    next.allocate(cell, is_root, created_at);
    if let Some(parent) = parent {
        next.insert_edge(parent, cell);
    }

    let mut cross_edge = None;
    if rng.chance(config.cross_edge_probability) {
        let objects: Vec<CellId> = next.objects().map(|n| n.id).collect();
        if objects.len() >= 2 {
            let from = objects[rng.next_index(objects.len())];
            let to = objects[rng.next_index(objects.len())];
            if from != to && !next.has_edge(from, to) {
                cross_edge = next
                    .insert_edge(from, to)
                    .map(|id| EdgeRecord { id, from, to });
            }
        }
    }

    let mut scope_exit = None;
    let roots = next.roots();
    if roots.len() > config.scope_exit_min_roots && rng.chance(config.scope_exit_probability) {
        let victim = roots[rng.next_index(roots.len())];
        next.set_root(victim, false);
        scope_exit = Some(victim);
    }

    next.reclassify();

    Ok(Spawned {
        graph: next,
        cell,
        is_root,
        parent,
        cross_edge,
        scope_exit,
    })
}

/// Player attempt to free the object at `cell`.
///
/// - `Ok(None)`: `cell` is empty or outside the grid (no-op).
/// - [`Fault::UseAfterFree`]: the object is ACTIVE.
/// - [`Rejection::ReferencedDelete`]: the object is DEAD but still referenced.
/// - `Ok(Some(_))`: the object is gone together with every incident edge.
pub fn delete(graph: &HeapGraph, cell: CellId) -> Result<Option<Freed>, MutationError> {
    let Some(node) = graph.node(&cell).filter(|n| n.is_object()) else {
        return Ok(None);
    };
    if node.status == MemoryStatus::Active {
        return Err(Fault::UseAfterFree(cell).into());
    }
    let incoming = graph.incoming_count(cell);
    if incoming > 0 {
        return Err(Rejection::ReferencedDelete { cell, incoming }.into());
    }

    let mut next = graph.clone();
    let edges_removed = next.delete_node_cascade(cell).unwrap_or_default();
    next.reclassify();
    Ok(Some(Freed {
        graph: next,
        cell,
        edges_removed,
    }))
}

/// Player attempt to drop every reference held by the object at `cell`.
///
/// ACTIVE objects are refused before the edge count is looked at. A DEAD
/// object without outgoing references is a no-op. Statuses are not recomputed:
/// edges leaving an unreachable object are never traversed by the mark phase,
/// so removing them cannot change any classification.
pub fn nullify_outgoing(graph: &HeapGraph, cell: CellId) -> Result<Option<Nullified>, Rejection> {
    let Some(node) = graph.node(&cell).filter(|n| n.is_object()) else {
        return Ok(None);
    };
    if node.status == MemoryStatus::Active {
        return Err(Rejection::IllegalMutateActive(cell));
    }
    if graph.outgoing_count(cell) == 0 {
        return Ok(None);
    }

    let mut next = graph.clone();
    let edges_removed = next.delete_edges_from(cell);
    Ok(Some(Nullified {
        graph: next,
        cell,
        edges_removed,
    }))
}
