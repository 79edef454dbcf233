// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Gameplay outcomes that stop an operation.
//!
//! None of these are program errors. A [`Fault`] ends the session; a
//! [`Rejection`] refuses one player action and leaves the graph untouched.
//! The `Display` strings are the system log lines shown to the player.
use thiserror::Error;

use crate::ident::CellId;

/// Fatal outcome: the session transitions to game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fault {
    /// A spawn found no empty cell.
    #[error("CRITICAL: OUT OF MEMORY")]
    OutOfCapacity,
    /// Memory usage reached 100% after a spawn.
    #[error("SYSTEM CRASH: HEAP OVERFLOW")]
    CapacityExceeded,
    /// The player freed a reachable object.
    #[error("SEGFAULT: Accessed Active Object {0}")]
    UseAfterFree(CellId),
}

/// Recoverable refusal of a player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    /// A DEAD object is still the target of at least one reference.
    #[error("ACCESS DENIED: Object {cell} is referenced!")]
    ReferencedDelete {
        /// Target of the refused delete.
        cell: CellId,
        /// Number of references pointing at it.
        incoming: usize,
    },
    /// Nullify was attempted on a reachable object.
    #[error("ERROR: Cannot modify Active Object {0}")]
    IllegalMutateActive(CellId),
}

impl Rejection {
    /// Cell the rejected action targeted (for per-cell feedback).
    pub fn cell(&self) -> CellId {
        match self {
            Self::ReferencedDelete { cell, .. } | Self::IllegalMutateActive(cell) => *cell,
        }
    }
}

/// Error returned by [`crate::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MutationError {
    /// The attempt ended the session.
    #[error(transparent)]
    Fault(#[from] Fault),
    /// The attempt was refused.
    #[error(transparent)]
    Rejected(#[from] Rejection),
}
