// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Stateful driver around the pure [`GameState`] transitions.
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::config::GameConfig;
use crate::math::RandomSource;
use crate::state::{GameState, Intent, Outcome, Phase, Transition};

/// Owns the configuration, the random source and the current state.
///
/// Callers serialize access (one `&mut self` at a time), so a tick and a
/// player action can never interleave.
#[derive(Debug, Clone)]
pub struct GameMachine<R> {
    config: GameConfig,
    rng: R,
    state: GameState,
}

impl<R: RandomSource> GameMachine<R> {
    /// Starts a fresh Ready session.
    pub fn new(config: GameConfig, rng: R) -> Self {
        let state = GameState::new(&config);
        Self { config, rng, state }
    }

    /// Resumes from an existing state.
    pub fn from_state(config: GameConfig, rng: R, state: GameState) -> Self {
        Self { config, rng, state }
    }

    /// Session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current state snapshot.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Whether a scheduler should fire ticks right now.
    pub fn should_tick(&self) -> bool {
        self.state.phase() == Phase::Running
    }

    /// Delay until the next spawn at the current score.
    pub fn spawn_interval(&self) -> Duration {
        self.config.spawn_interval(self.state.score())
    }

    /// Applies a player intent and returns what happened.
    #[instrument(skip(self), fields(phase = ?self.state.phase()))]
    pub fn apply(&mut self, intent: Intent) -> Outcome {
        let transition = self.state.apply(&self.config, intent);
        self.commit(transition)
    }

    /// Runs one spawn tick.
    #[instrument(skip(self), fields(tick = self.state.ticks() + 1))]
    pub fn advance_tick(&mut self) -> Outcome {
        let transition = self.state.tick(&self.config, &mut self.rng);
        self.commit(transition)
    }

    /// Consumes the machine and returns the final state.
    pub fn into_state(self) -> GameState {
        self.state
    }

    fn commit(&mut self, transition: Transition) -> Outcome {
        let Transition { state, outcome } = transition;
        match outcome {
            Outcome::Ignored => {}
            Outcome::Faulted(fault) => {
                warn!(%fault, score = state.score(), "session over");
            }
            Outcome::Rejected(rejection) => {
                warn!(%rejection, "action refused");
            }
            Outcome::Started | Outcome::Paused | Outcome::Resumed | Outcome::Reset => {
                info!(?outcome, phase = ?state.phase(), "phase change");
            }
            Outcome::Allocated { cell, scope_exit } => {
                debug!(
                    %cell,
                    ?scope_exit,
                    usage = state.memory_usage(),
                    "allocated"
                );
            }
            Outcome::Freed {
                cell,
                edges_removed,
            } => {
                info!(%cell, edges_removed, score = state.score(), "freed");
            }
            Outcome::Nullified {
                cell,
                edges_removed,
            } => {
                debug!(%cell, edges_removed, "nullified");
            }
        }
        self.state = state;
        outcome
    }
}
