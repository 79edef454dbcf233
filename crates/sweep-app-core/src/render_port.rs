// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port trait for presentation layers to receive fresh game snapshots
//! without depending on a specific terminal or windowing crate.

use sweep_core::{GameState, Outcome};

use crate::cue::CueRender;

/// One published snapshot plus what produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// State after the transition.
    pub state: GameState,
    /// The transition's outcome.
    pub outcome: Outcome,
    /// Cells currently shaking.
    pub cues: Vec<CueRender>,
}

impl Frame {
    /// Frame without cues.
    pub fn new(state: GameState, outcome: Outcome) -> Self {
        Self {
            state,
            outcome,
            cues: Vec::new(),
        }
    }
}

/// Presentation port; implementations should be cheap and best-effort.
pub trait RenderPort {
    /// Present a new frame.
    fn present(&self, frame: Frame);
}
