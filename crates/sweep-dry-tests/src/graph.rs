// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Heap graph and game state builders for tests.

use sweep_core::{coordinate_id, CellId, GameConfig, GameState, HeapGraph, Phase};

/// Builder for hand-drawn heap layouts.
///
/// Cells are given as `(row, col)`. References to cells that were never
/// placed are skipped by [`HeapGraph::insert_edge`]. The built graph is
/// always reclassified.
///
/// # Example
///
/// ```
/// use sweep_core::{coordinate_id, MemoryStatus};
/// use sweep_dry_tests::GraphBuilder;
///
/// let graph = GraphBuilder::new(6)
///     .root((0, 0))
///     .object((0, 1))
///     .edge((0, 0), (0, 1))
///     .build();
/// let status = graph.node(&coordinate_id(0, 1)).map(|n| n.status);
/// assert_eq!(status, Some(MemoryStatus::Active));
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    grid_size: u16,
    objects: Vec<(CellId, bool)>,
    edges: Vec<(CellId, CellId)>,
}

impl GraphBuilder {
    /// Start from an empty `grid_size × grid_size` grid.
    pub fn new(grid_size: u16) -> Self {
        Self {
            grid_size,
            objects: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Place a root object.
    pub fn root(mut self, (row, col): (u16, u16)) -> Self {
        self.objects.push((coordinate_id(row, col), true));
        self
    }

    /// Place a non-root object.
    pub fn object(mut self, (row, col): (u16, u16)) -> Self {
        self.objects.push((coordinate_id(row, col), false));
        self
    }

    /// Add a reference `from -> to`.
    pub fn edge(mut self, from: (u16, u16), to: (u16, u16)) -> Self {
        self.edges
            .push((coordinate_id(from.0, from.1), coordinate_id(to.0, to.1)));
        self
    }

    /// Fill every remaining empty cell with a non-root object.
    pub fn fill(mut self) -> Self {
        let taken: Vec<CellId> = self.objects.iter().map(|(id, _)| *id).collect();
        for row in 0..self.grid_size {
            for col in 0..self.grid_size {
                let id = coordinate_id(row, col);
                if !taken.contains(&id) {
                    self.objects.push((id, false));
                }
            }
        }
        self
    }

    /// Build the reclassified graph.
    pub fn build(self) -> HeapGraph {
        let mut graph = HeapGraph::new(self.grid_size);
        for (created_at, (id, is_root)) in (0u64..).zip(self.objects) {
            graph.allocate(id, is_root, created_at);
        }
        for (from, to) in self.edges {
            graph.insert_edge(from, to);
        }
        graph.reclassify();
        graph
    }

    /// Wrap the graph in a state with the given phase and score zero.
    pub fn state(self, config: &GameConfig, phase: Phase) -> GameState {
        GameState::from_graph(config, self.build(), phase, 0)
    }

    /// Wrap the graph in a Running state.
    pub fn running(self, config: &GameConfig) -> GameState {
        self.state(config, Phase::Running)
    }
}
