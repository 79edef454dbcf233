// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory heap graph: one node per grid cell plus directed references.
use std::collections::BTreeMap;

use blake3::Hasher;

use crate::ident::{CellId, EdgeId, Hash};
use crate::reachability::{classify, incoming_edge_count, StatusMap};
use crate::record::{EdgeRecord, MemoryStatus, NodeKind, NodeRecord};

/// Snapshot of the simulated heap.
///
/// Every cell of the `grid_size × grid_size` grid has a node; empty cells are
/// nodes of kind [`NodeKind::Empty`]. Edges are kept in insertion order.
///
/// Published snapshots are never edited in place: the mutation engine clones
/// the previous graph, edits the clone, and hands out the result. Structural
/// methods on this type keep the edge invariant (no edge touches an empty
/// cell) but leave `status` fields alone; call [`HeapGraph::reclassify`] after
/// a batch of edits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeapGraph {
    grid_size: usize,
    /// Row-major map from cell id to node record.
    pub(crate) nodes: BTreeMap<CellId, NodeRecord>,
    /// Directed references in insertion order.
    pub(crate) edges: Vec<EdgeRecord>,
    next_edge_id: u64,
}

impl HeapGraph {
    /// Creates an all-empty grid of `grid_size × grid_size` cells.
    pub fn new(grid_size: u16) -> Self {
        let nodes = (0..grid_size)
            .flat_map(|row| (0..grid_size).map(move |col| CellId { row, col }))
            .map(|id| (id, NodeRecord::empty(id)))
            .collect();
        Self {
            grid_size: usize::from(grid_size),
            nodes,
            edges: Vec::new(),
            next_edge_id: 0,
        }
    }

    /// Side length of the grid.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Total number of cells (maximum number of live objects).
    pub fn capacity(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Returns the node for `id` when it lies inside the grid.
    pub fn node(&self, id: &CellId) -> Option<&NodeRecord> {
        self.nodes.get(id)
    }

    /// Returns the full node map.
    pub fn nodes(&self) -> &BTreeMap<CellId, NodeRecord> {
        &self.nodes
    }

    /// Iterate over all nodes in row-major order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.values()
    }

    /// Iterate over object nodes in row-major order.
    pub fn objects(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.values().filter(|n| n.is_object())
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    /// Edges whose source is `id`.
    pub fn edges_from(&self, id: CellId) -> impl Iterator<Item = &EdgeRecord> {
        self.edges.iter().filter(move |e| e.from == id)
    }

    /// Edges whose target is `id`.
    pub fn edges_to(&self, id: CellId) -> impl Iterator<Item = &EdgeRecord> {
        self.edges.iter().filter(move |e| e.to == id)
    }

    /// Number of references pointing at `id`.
    pub fn incoming_count(&self, id: CellId) -> usize {
        incoming_edge_count(id, &self.edges)
    }

    /// Number of references held by `id`.
    pub fn outgoing_count(&self, id: CellId) -> usize {
        self.edges_from(id).count()
    }

    /// Returns `true` if at least one edge `from -> to` exists.
    pub fn has_edge(&self, from: CellId, to: CellId) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }

    /// Number of allocated objects.
    pub fn object_count(&self) -> usize {
        self.objects().count()
    }

    /// Ids of empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<CellId> {
        self.nodes
            .values()
            .filter(|n| n.kind == NodeKind::Empty)
            .map(|n| n.id)
            .collect()
    }

    /// Ids of objects currently classified ACTIVE, in row-major order.
    pub fn active_objects(&self) -> Vec<CellId> {
        self.nodes
            .values()
            .filter(|n| n.is_active())
            .map(|n| n.id)
            .collect()
    }

    /// Ids of root objects in row-major order.
    pub fn roots(&self) -> Vec<CellId> {
        self.objects().filter(|n| n.is_root).map(|n| n.id).collect()
    }

    /// `floor(100 * objects / capacity)`, clamped to `0..=100`.
    pub fn memory_usage(&self) -> u8 {
        let capacity = self.capacity();
        if capacity == 0 {
            return 100;
        }
        let pct = (100 * self.object_count()) / capacity;
        u8::try_from(pct.min(100)).unwrap_or(100)
    }

    /// Turns the empty cell `id` into an object.
    ///
    /// Returns `false` (and changes nothing) when `id` is outside the grid or
    /// already holds an object. The new object's status is left DEAD until the
    /// next classification.
    pub fn allocate(&mut self, id: CellId, is_root: bool, created_at: u64) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if node.is_object() {
            return false;
        }
        node.kind = NodeKind::Object;
        node.is_root = is_root;
        node.status = MemoryStatus::Dead;
        node.created_at = created_at;
        true
    }

    /// Sets the root flag on an object. Returns `false` for empty cells.
    pub fn set_root(&mut self, id: CellId, is_root: bool) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) if node.is_object() => {
                node.is_root = is_root;
                true
            }
            _ => false,
        }
    }

    /// Appends a reference `from -> to` and returns its id.
    ///
    /// Both endpoints must be objects; otherwise nothing is inserted. Duplicate
    /// `(from, to)` pairs are permitted here; callers that want to avoid them
    /// check [`HeapGraph::has_edge`] first.
    pub fn insert_edge(&mut self, from: CellId, to: CellId) -> Option<EdgeId> {
        let endpoints_live = [from, to]
            .iter()
            .all(|id| self.nodes.get(id).is_some_and(NodeRecord::is_object));
        if !endpoints_live {
            return None;
        }
        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;
        self.edges.push(EdgeRecord { id, from, to });
        Some(id)
    }

    /// Frees the object at `id` and removes every edge incident to it (as
    /// source or target) in the same step.
    ///
    /// Returns the number of edges removed, or `None` if `id` is not an
    /// object.
    pub fn delete_node_cascade(&mut self, id: CellId) -> Option<usize> {
        let node = self.nodes.get_mut(&id)?;
        if !node.is_object() {
            return None;
        }
        *node = NodeRecord::empty(id);
        let before = self.edges.len();
        self.edges.retain(|e| e.from != id && e.to != id);
        Some(before - self.edges.len())
    }

    /// Removes every edge whose source is `id`. Returns how many were removed.
    pub fn delete_edges_from(&mut self, id: CellId) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| e.from != id);
        before - self.edges.len()
    }

    /// Runs the mark phase over this graph without modifying it.
    pub fn classify(&self) -> StatusMap {
        classify(&self.nodes, &self.edges)
    }

    /// Writes `statuses` back onto the nodes. Ids missing from the map fall
    /// back to FREE for empty cells and DEAD for objects.
    pub fn apply_classification(&mut self, statuses: &StatusMap) {
        for (id, node) in &mut self.nodes {
            node.status = match (node.kind, statuses.get(id)) {
                (NodeKind::Empty, _) => MemoryStatus::Free,
                (NodeKind::Object, Some(MemoryStatus::Active)) => MemoryStatus::Active,
                (NodeKind::Object, _) => MemoryStatus::Dead,
            };
        }
    }

    /// Recomputes every node's status from scratch.
    pub fn reclassify(&mut self) {
        let statuses = self.classify();
        self.apply_classification(&statuses);
    }

    /// Computes a canonical BLAKE3 digest of the whole snapshot.
    ///
    /// Encoding (little-endian, fixed width):
    /// - grid size (`u64`), next edge id (`u64`)
    /// - per node in row-major order: row (`u16`), col (`u16`), kind tag,
    ///   root flag, status tag, `created_at` (`u64`)
    /// - edge count (`u64`), then per edge in list order: id (`u64`), from and
    ///   to coordinates (`u16` each)
    ///
    /// Two snapshots hash equal iff they are structurally identical, including
    /// edge order and the edge id allocator.
    pub fn canonical_state_hash(&self) -> Hash {
        let mut hasher = Hasher::new();
        hasher.update(&(self.grid_size as u64).to_le_bytes());
        hasher.update(&self.next_edge_id.to_le_bytes());
        for node in self.nodes.values() {
            hasher.update(&node.id.row.to_le_bytes());
            hasher.update(&node.id.col.to_le_bytes());
            hasher.update(&[u8::from(node.kind == NodeKind::Object)]);
            hasher.update(&[u8::from(node.is_root)]);
            hasher.update(&[node.status.tag()]);
            hasher.update(&node.created_at.to_le_bytes());
        }
        hasher.update(&(self.edges.len() as u64).to_le_bytes());
        for edge in &self.edges {
            hasher.update(&edge.id.0.to_le_bytes());
            hasher.update(&edge.from.row.to_le_bytes());
            hasher.update(&edge.from.col.to_le_bytes());
            hasher.update(&edge.to.row.to_le_bytes());
            hasher.update(&edge.to.col.to_le_bytes());
        }
        hasher.finalize().into()
    }
}
