// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Graph record types: nodes and edges.
use crate::ident::{CellId, EdgeId};

/// Whether a cell currently holds an object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Unallocated cell. Holds no data and has no edges.
    Empty,
    /// Allocated object.
    Object,
}

/// Liveness classification produced by the mark phase.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemoryStatus {
    /// Cell is empty.
    Free,
    /// Object reachable from a root.
    Active,
    /// Object not reachable from any root.
    Dead,
}

impl MemoryStatus {
    pub(crate) fn tag(self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Active => 1,
            Self::Dead => 2,
        }
    }
}

/// Materialised record for a single grid cell.
///
/// Invariants
/// - `status == Free` iff `kind == Empty`.
/// - `is_root` is only meaningful (and only ever `true`) for objects.
/// - `status` is derived by the mark phase and never set by player action.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRecord {
    /// Coordinate id (doubles as the grid position).
    pub id: CellId,
    /// Empty or object.
    pub kind: NodeKind,
    /// GC root flag.
    pub is_root: bool,
    /// Derived liveness.
    pub status: MemoryStatus,
    /// Session tick at which the object was allocated (informational only).
    pub created_at: u64,
}

impl NodeRecord {
    /// A fresh empty cell.
    pub fn empty(id: CellId) -> Self {
        Self {
            id,
            kind: NodeKind::Empty,
            is_root: false,
            status: MemoryStatus::Free,
            created_at: 0,
        }
    }

    /// Returns `true` when the cell holds an object.
    pub fn is_object(&self) -> bool {
        self.kind == NodeKind::Object
    }

    /// Returns `true` for objects currently classified ACTIVE.
    pub fn is_active(&self) -> bool {
        self.is_object() && self.status == MemoryStatus::Active
    }

    /// Returns `true` for objects currently classified DEAD.
    pub fn is_dead(&self) -> bool {
        self.is_object() && self.status == MemoryStatus::Dead
    }
}

/// Directed reference from one object to another.
///
/// Invariants
/// - `from` and `to` both resolve to objects while the edge is in the graph.
/// - `id` is unique within the graph.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeRecord {
    /// Stable identifier for the edge.
    pub id: EdgeId,
    /// Source object.
    pub from: CellId,
    /// Referenced object.
    pub to: CellId,
}
