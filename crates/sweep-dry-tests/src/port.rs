// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Render port that records every frame it is handed.

use std::sync::{Arc, Mutex, MutexGuard};

use sweep_app_core::render_port::{Frame, RenderPort};
use sweep_core::Outcome;

/// [`RenderPort`] that keeps every presented frame. Clones share the buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingPort {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl RecordingPort {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Frame>> {
        self.frames.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Copy of every frame so far, oldest first.
    pub fn frames(&self) -> Vec<Frame> {
        self.lock().clone()
    }

    /// Number of frames presented.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// `true` before the first frame.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Most recent frame.
    pub fn last(&self) -> Option<Frame> {
        self.lock().last().cloned()
    }

    /// Outcomes in presentation order.
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.lock().iter().map(|f| f.outcome).collect()
    }
}

impl RenderPort for RecordingPort {
    fn present(&self, frame: Frame) {
        self.lock().push(frame);
    }
}
