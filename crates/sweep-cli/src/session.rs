// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Headless and real-time session drivers.

use anyhow::Result;
use std::time::Duration;
use sweep_app_core::render_port::Frame;
use sweep_core::{GameMachine, GameState, Intent, Outcome, Prng};
use sweep_sched::{watch_port, Scheduler};
use tracing::{debug, info, warn};

use crate::autopilot;
use crate::SessionSetup;

/// Starts a session and runs up to `ticks` spawn ticks back to back.
///
/// With autopilot on, one collector action is applied before each tick.
pub(crate) fn simulate(setup: &SessionSetup, ticks: u64) -> GameState {
    let mut machine = GameMachine::new(
        setup.prefs.game.clone(),
        Prng::from_seed_u64(setup.seed),
    );
    machine.apply(Intent::Start);

    for _ in 0..ticks {
        if setup.prefs.autopilot {
            if let Some(intent) = autopilot::next_intent(machine.state().graph()) {
                machine.apply(intent);
            }
        }
        if machine.advance_tick().is_fatal() {
            break;
        }
    }
    machine.into_state()
}

/// Plays a real-time session until game over, Ctrl-C, or `limit` elapses.
/// Returns the last published frame.
pub(crate) async fn run(setup: &SessionSetup, limit: Duration) -> Result<Frame> {
    let machine = GameMachine::new(
        setup.prefs.game.clone(),
        Prng::from_seed_u64(setup.seed),
    );
    let (port, mut frames) = watch_port();
    let handle = Scheduler::spawn(machine, port);
    handle.start().await?;

    let timeout = tokio::time::sleep(limit);
    tokio::pin!(timeout);
    loop {
        tokio::select! {
            () = &mut timeout => {
                info!("time limit reached");
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("interrupted");
                break;
            }
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let Some(frame) = frames.borrow_and_update().clone() else {
                    continue;
                };
                if frame.state.is_game_over() {
                    break;
                }
                if setup.prefs.autopilot && matches!(frame.outcome, Outcome::Allocated { .. }) {
                    if let Some(intent) = autopilot::next_intent(frame.state.graph()) {
                        let outcome = handle.apply(intent).await?;
                        debug!(?intent, ?outcome, "autopilot");
                    }
                }
            }
        }
    }

    let last = frames.borrow().clone();
    let state = handle.shutdown().await?;
    let cues = last.map(|f| f.cues).unwrap_or_default();
    Ok(Frame {
        state,
        outcome: Outcome::Ignored,
        cues,
    })
}
