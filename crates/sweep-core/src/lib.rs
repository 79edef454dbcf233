// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! sweep-core: grid heap model and manual-collection game rules.
//!
//! The crate models a fixed grid of memory cells, directed references between
//! allocated objects, and a breadth-first mark phase that classifies every
//! object as ACTIVE (reachable from a root) or DEAD. On top of that it provides
//! the mutation engine (spawn, delete, nullify) and a pure game state machine:
//! `(previous state, intent) -> new state`. Timing and rendering live in other
//! crates; everything here is synchronous and deterministic given a
//! [`RandomSource`].
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::module_name_repetitions,
    clippy::use_self
)]

/// Deterministic random sources (PRNG + injectable trait).
pub mod math;

mod config;
mod error;
mod graph;
mod ident;
mod machine;
mod mutation;
mod reachability;
mod record;
mod state;
mod system_log;

// Re-exports for stable public API
/// Tunable game constants.
pub use config::{ConfigError, GameConfig, MAX_GRID_SIZE};
/// Gameplay outcomes that end or refuse an operation.
pub use error::{Fault, MutationError, Rejection};
/// Heap snapshot (nodes + edges) and its canonical digest.
pub use graph::HeapGraph;
/// Identifiers for cells and references.
pub use ident::{coordinate_id, CellId, EdgeId, Hash, ParseCellIdError};
/// Bounded newest-first message log.
pub use system_log::SystemLog;
/// Stateful wrapper driving the pure transitions.
pub use machine::GameMachine;
/// Mutation engine operations.
pub use mutation::{delete, nullify_outgoing, spawn, Freed, Nullified, Spawned};
/// Mark-phase classification.
pub use reachability::{classify, incoming_edge_count, StatusMap};
/// Node and edge records.
pub use record::{EdgeRecord, MemoryStatus, NodeKind, NodeRecord};
/// Game state, intents and transition results.
pub use state::{GameState, Intent, Outcome, Phase, Transition};
/// Random source seam used by the mutation engine.
pub use math::{Prng, RandomSource};
