// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Game state and its pure transitions.
//!
//! Every transition takes `&GameState` and returns a new [`GameState`] plus an
//! [`Outcome`]; the previous state is never modified. The graph is shared
//! through an `Arc`, so a published state stays valid (and cheap to clone)
//! while the next one is being built.
use std::sync::Arc;

use crate::config::GameConfig;
use crate::error::{Fault, MutationError, Rejection};
use crate::graph::HeapGraph;
use crate::ident::CellId;
use crate::math::RandomSource;
use crate::mutation::{delete, nullify_outgoing, spawn};
use crate::system_log::SystemLog;

const READY_MESSAGE: &str = "System Ready. Press Start.";

/// Lifecycle phase of a session.
///
/// ```text
/// Ready --start--> Running <--pause/resume--> Paused
///                     |
///                     +--fault--> GameOver --reset--> Ready
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Fresh empty grid, waiting for the first start.
    Ready,
    /// Ticking and accepting cell actions.
    Running,
    /// Frozen by the player.
    Paused,
    /// Terminal until reset.
    GameOver,
}

/// Discrete player intent forwarded by a presentation adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    /// Leave the Ready phase.
    Start,
    /// Freeze a running session.
    Pause,
    /// Continue a paused session.
    Resume,
    /// Discard everything and return to Ready.
    Reset,
    /// Primary action on a cell: attempt to free it.
    ActivateCell(CellId),
    /// Secondary action on a cell: nullify its outgoing references.
    SecondaryActivateCell(CellId),
}

/// What a transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Nothing applied; the state is unchanged.
    Ignored,
    /// Ready -> Running.
    Started,
    /// Running -> Paused.
    Paused,
    /// Paused -> Running.
    Resumed,
    /// Back to a fresh Ready state.
    Reset,
    /// A tick allocated an object.
    Allocated {
        /// Cell of the new object.
        cell: CellId,
        /// Root demoted during the same tick.
        scope_exit: Option<CellId>,
    },
    /// The player freed an object.
    Freed {
        /// Freed cell.
        cell: CellId,
        /// Incident edges removed.
        edges_removed: usize,
    },
    /// The player nullified an object's references.
    Nullified {
        /// Source cell.
        cell: CellId,
        /// Edges removed.
        edges_removed: usize,
    },
    /// A player action was refused; the graph is unchanged.
    Rejected(Rejection),
    /// The session ended.
    Faulted(Fault),
}

impl Outcome {
    /// Returns `true` when the transition ended the session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Faulted(_))
    }
}

/// New state plus what produced it.
#[derive(Debug, Clone)]
pub struct Transition {
    /// State after the transition.
    pub state: GameState,
    /// What happened.
    pub outcome: Outcome,
}

impl Transition {
    fn ignored(state: &GameState) -> Self {
        Self {
            state: state.clone(),
            outcome: Outcome::Ignored,
        }
    }
}

/// Complete, read-only game snapshot.
///
/// `score` never decreases before a reset; `memory_usage` is always
/// `floor(100 * objects / capacity)` of the current graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    graph: Arc<HeapGraph>,
    score: u64,
    memory_usage: u8,
    phase: Phase,
    log: SystemLog,
    level: u32,
    ticks: u64,
}

impl GameState {
    /// Fresh Ready state: all cells empty, paused, score zero.
    pub fn new(config: &GameConfig) -> Self {
        let mut log = SystemLog::new(config.log_capacity);
        log.push(READY_MESSAGE);
        Self {
            graph: Arc::new(HeapGraph::new(config.grid_size)),
            score: 0,
            memory_usage: 0,
            phase: Phase::Ready,
            log,
            level: 1,
            ticks: 0,
        }
    }

    /// Wraps an existing graph (reclassified first) in a state with the given
    /// phase and score. Used to resume or stage sessions.
    pub fn from_graph(config: &GameConfig, mut graph: HeapGraph, phase: Phase, score: u64) -> Self {
        graph.reclassify();
        let mut state = Self::new(config);
        state.memory_usage = graph.memory_usage();
        state.graph = Arc::new(graph);
        state.phase = phase;
        state.score = score;
        state
    }

    /// Current heap snapshot.
    pub fn graph(&self) -> &HeapGraph {
        &self.graph
    }

    /// Shared handle to the current heap snapshot.
    pub fn snapshot(&self) -> Arc<HeapGraph> {
        Arc::clone(&self.graph)
    }

    /// Points earned by freeing objects.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Occupied share of the grid in percent.
    pub fn memory_usage(&self) -> u8 {
        self.memory_usage
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `true` in Ready and Paused.
    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Ready | Phase::Paused)
    }

    /// `true` once a fault ended the session.
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Recent messages, newest first.
    pub fn log(&self) -> &SystemLog {
        &self.log
    }

    /// Difficulty level (fixed at 1 for now).
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Spawn ticks processed since the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Score shown in the cosmetic KB unit.
    pub fn reclaimed_kb(&self, config: &GameConfig) -> u64 {
        self.score.saturating_mul(config.kb_per_unit)
    }

    /// Applies a player intent.
    pub fn apply(&self, config: &GameConfig, intent: Intent) -> Transition {
        match (intent, self.phase) {
            (Intent::Reset, _) => Transition {
                state: Self::new(config),
                outcome: Outcome::Reset,
            },
            (Intent::Start, Phase::Ready) => {
                self.enter(Phase::Running, "Process started.", Outcome::Started)
            }
            (Intent::Pause, Phase::Running) => {
                self.enter(Phase::Paused, "Process frozen.", Outcome::Paused)
            }
            (Intent::Resume, Phase::Paused) => {
                self.enter(Phase::Running, "Process resumed.", Outcome::Resumed)
            }
            (Intent::ActivateCell(cell), Phase::Running) => self.free_cell(config, cell),
            (Intent::SecondaryActivateCell(cell), Phase::Running) => self.nullify_cell(cell),
            _ => Transition::ignored(self),
        }
    }

    /// Runs one spawn tick. Ignored unless the session is running.
    pub fn tick<R>(&self, config: &GameConfig, rng: &mut R) -> Transition
    where
        R: RandomSource + ?Sized,
    {
        if self.phase != Phase::Running {
            return Transition::ignored(self);
        }
        let mut next = self.clone();
        next.ticks += 1;

        let spawned = match spawn(&self.graph, config, rng, next.ticks) {
            Ok(spawned) => spawned,
            Err(fault) => return next.fault(fault),
        };

        if let Some(victim) = spawned.scope_exit {
            next.log.push(format!("Scope Exit: {victim}"));
        }
        next.memory_usage = spawned.graph.memory_usage();
        next.graph = Arc::new(spawned.graph);

        if next.memory_usage >= 100 {
            return next.fault(Fault::CapacityExceeded);
        }
        Transition {
            state: next,
            outcome: Outcome::Allocated {
                cell: spawned.cell,
                scope_exit: spawned.scope_exit,
            },
        }
    }

    fn enter(&self, phase: Phase, message: &str, outcome: Outcome) -> Transition {
        let mut next = self.clone();
        next.phase = phase;
        next.log.push(message);
        Transition {
            state: next,
            outcome,
        }
    }

    fn fault(mut self, fault: Fault) -> Transition {
        self.phase = Phase::GameOver;
        self.log.push(fault.to_string());
        Transition {
            state: self,
            outcome: Outcome::Faulted(fault),
        }
    }

    fn reject(&self, rejection: Rejection) -> Transition {
        let mut next = self.clone();
        next.log.push(rejection.to_string());
        Transition {
            state: next,
            outcome: Outcome::Rejected(rejection),
        }
    }

    fn free_cell(&self, config: &GameConfig, cell: CellId) -> Transition {
        match delete(&self.graph, cell) {
            Ok(None) => Transition::ignored(self),
            Ok(Some(freed)) => {
                let mut next = self.clone();
                next.score = next.score.saturating_add(config.delete_reward);
                next.memory_usage = freed.graph.memory_usage();
                next.graph = Arc::new(freed.graph);
                next.log
                    .push(format!("Freed {}KB at {cell}", config.kb_per_unit));
                Transition {
                    state: next,
                    outcome: Outcome::Freed {
                        cell,
                        edges_removed: freed.edges_removed,
                    },
                }
            }
            Err(MutationError::Fault(fault)) => self.clone().fault(fault),
            Err(MutationError::Rejected(rejection)) => self.reject(rejection),
        }
    }

    fn nullify_cell(&self, cell: CellId) -> Transition {
        match nullify_outgoing(&self.graph, cell) {
            Ok(None) => Transition::ignored(self),
            Ok(Some(nullified)) => {
                let mut next = self.clone();
                next.graph = Arc::new(nullified.graph);
                next.log.push(format!("Nullified pointers from {cell}"));
                Transition {
                    state: next,
                    outcome: Outcome::Nullified {
                        cell,
                        edges_removed: nullified.edges_removed,
                    },
                }
            }
            Err(rejection) => self.reject(rejection),
        }
    }
}
