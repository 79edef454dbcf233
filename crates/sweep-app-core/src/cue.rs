// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Short-lived per-cell feedback (the "shake" on a refused action).

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use sweep_core::{CellId, Rejection};

/// How long a refused cell keeps shaking.
pub const SHAKE_TTL: Duration = Duration::from_millis(500);

/// Why a cell is flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    /// Delete refused: the object is still referenced.
    Referenced,
    /// Nullify refused: the object is live.
    ActiveTarget,
}

impl From<&Rejection> for CueKind {
    fn from(rejection: &Rejection) -> Self {
        match rejection {
            Rejection::ReferencedDelete { .. } => Self::Referenced,
            Rejection::IllegalMutateActive(_) => Self::ActiveTarget,
        }
    }
}

#[derive(Debug, Clone)]
struct Cue {
    cell: CellId,
    kind: CueKind,
    ttl: Duration,
    created: Instant,
}

/// Rendering-friendly view of a cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueRender {
    /// Flagged cell.
    pub cell: CellId,
    /// Reason.
    pub kind: CueKind,
    /// 1.0 -> just raised, 0.0 -> expired.
    pub progress: f32,
}

/// Bounded queue of cell cues with TTL; at most one live cue per cell.
#[derive(Debug)]
pub struct CueService {
    queue: VecDeque<Cue>,
    max: usize,
}

impl CueService {
    /// Create a service holding at most `max` cues.
    pub fn new(max: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            max: max.max(1),
        }
    }

    /// Flag `cell`. Re-flagging a cell restarts its timer instead of stacking.
    pub fn raise(&mut self, cell: CellId, kind: CueKind, ttl: Duration, now: Instant) {
        if let Some(existing) = self.queue.iter_mut().find(|c| c.cell == cell) {
            existing.kind = kind;
            existing.ttl = ttl;
            existing.created = now;
            return;
        }
        if self.queue.len() == self.max {
            self.queue.pop_front();
        }
        self.queue.push_back(Cue {
            cell,
            kind,
            ttl,
            created: now,
        });
    }

    /// Flag the cell named by a rejection with the standard shake duration.
    pub fn raise_for(&mut self, rejection: &Rejection, now: Instant) {
        self.raise(rejection.cell(), CueKind::from(rejection), SHAKE_TTL, now);
    }

    /// Drop expired cues.
    pub fn retain_visible(&mut self, now: Instant) {
        self.queue.retain(|c| now.duration_since(c.created) < c.ttl);
    }

    /// Drop everything (used on reset).
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Whether `cell` is currently flagged.
    pub fn is_flagged(&self, cell: CellId, now: Instant) -> bool {
        self.queue
            .iter()
            .any(|c| c.cell == cell && now.duration_since(c.created) < c.ttl)
    }

    /// Render-ready cues with progress ratios.
    pub fn visible(&self, now: Instant) -> Vec<CueRender> {
        self.queue
            .iter()
            .filter(|c| now.duration_since(c.created) < c.ttl)
            .map(|c| CueRender {
                cell: c.cell,
                kind: c.kind,
                progress: 1.0
                    - (now.duration_since(c.created).as_secs_f32() / c.ttl.as_secs_f32()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweep_core::coordinate_id;

    #[test]
    fn cue_expires_after_ttl() {
        let mut cues = CueService::new(4);
        let t0 = Instant::now();
        let cell = coordinate_id(1, 2);
        cues.raise(cell, CueKind::Referenced, SHAKE_TTL, t0);
        assert!(cues.is_flagged(cell, t0 + Duration::from_millis(499)));
        assert!(!cues.is_flagged(cell, t0 + SHAKE_TTL));
        cues.retain_visible(t0 + SHAKE_TTL);
        assert!(cues.visible(t0 + SHAKE_TTL).is_empty());
    }

    #[test]
    fn reraising_restarts_timer_without_stacking() {
        let mut cues = CueService::new(4);
        let t0 = Instant::now();
        let cell = coordinate_id(0, 0);
        cues.raise(cell, CueKind::Referenced, SHAKE_TTL, t0);
        let later = t0 + Duration::from_millis(400);
        cues.raise(cell, CueKind::ActiveTarget, SHAKE_TTL, later);
        let visible = cues.visible(later + Duration::from_millis(300));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].kind, CueKind::ActiveTarget);
    }

    #[test]
    fn oldest_cue_evicted_at_capacity() {
        let mut cues = CueService::new(2);
        let t0 = Instant::now();
        for col in 0..3 {
            cues.raise(coordinate_id(0, col), CueKind::Referenced, SHAKE_TTL, t0);
        }
        assert!(!cues.is_flagged(coordinate_id(0, 0), t0));
        assert!(cues.is_flagged(coordinate_id(0, 2), t0));
    }

    #[test]
    fn rejection_maps_to_its_cell() {
        let mut cues = CueService::new(2);
        let t0 = Instant::now();
        let cell = coordinate_id(3, 4);
        cues.raise_for(&Rejection::IllegalMutateActive(cell), t0);
        assert_eq!(cues.visible(t0)[0].kind, CueKind::ActiveTarget);
        assert!(cues.is_flagged(cell, t0));
    }
}
