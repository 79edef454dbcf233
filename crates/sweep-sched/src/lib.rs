// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sweep Scheduler
//!
//! Drives a [`GameMachine`] in real time: one tokio task owns the machine,
//! fires spawn ticks at the score-dependent interval and applies player
//! intents between ticks. Every applied transition is published to a
//! [`RenderPort`].

use anyhow::{anyhow, Result};
use sweep_app_core::cue::CueService;
use sweep_app_core::render_port::{Frame, RenderPort};
use sweep_core::{CellId, GameMachine, GameState, Intent, Outcome, RandomSource};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info, instrument};

const COMMAND_BUFFER: usize = 32;
const MAX_CUES: usize = 16;

enum Command {
    Apply {
        intent: Intent,
        reply: oneshot::Sender<Outcome>,
    },
    Shutdown,
}

enum Wake {
    Command(Option<Command>),
    Deadline,
}

/// Entry point for real-time sessions.
pub struct Scheduler;

impl Scheduler {
    /// Moves `machine` into a new tokio task and returns a handle to it.
    ///
    /// The current state is published once immediately with
    /// [`Outcome::Ignored`]. Must be called from inside a tokio runtime.
    pub fn spawn<R, P>(machine: GameMachine<R>, port: P) -> SchedulerHandle
    where
        R: RandomSource + Send + 'static,
        P: RenderPort + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        let task = tokio::spawn(run(machine, port, rx));
        SchedulerHandle { tx, task }
    }
}

/// Handle to a running scheduler task.
pub struct SchedulerHandle {
    tx: mpsc::Sender<Command>,
    task: JoinHandle<GameState>,
}

impl SchedulerHandle {
    /// Sends an intent and waits until the task has applied it.
    pub async fn apply(&self, intent: Intent) -> Result<Outcome> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Apply { intent, reply })
            .await
            .map_err(|_| anyhow!("scheduler stopped"))?;
        rx.await.map_err(|_| anyhow!("scheduler dropped the reply"))
    }

    /// Leave the Ready phase.
    pub async fn start(&self) -> Result<Outcome> {
        self.apply(Intent::Start).await
    }

    /// Freeze the session.
    pub async fn pause(&self) -> Result<Outcome> {
        self.apply(Intent::Pause).await
    }

    /// Continue a frozen session.
    pub async fn resume(&self) -> Result<Outcome> {
        self.apply(Intent::Resume).await
    }

    /// Back to a fresh Ready state.
    pub async fn reset(&self) -> Result<Outcome> {
        self.apply(Intent::Reset).await
    }

    /// Primary action on `cell` (free).
    pub async fn activate(&self, cell: CellId) -> Result<Outcome> {
        self.apply(Intent::ActivateCell(cell)).await
    }

    /// Secondary action on `cell` (nullify).
    pub async fn secondary(&self, cell: CellId) -> Result<Outcome> {
        self.apply(Intent::SecondaryActivateCell(cell)).await
    }

    /// Stops the task and returns the final state.
    pub async fn shutdown(self) -> Result<GameState> {
        // A closed channel means the task is already winding down.
        let _ = self.tx.send(Command::Shutdown).await;
        Ok(self.task.await?)
    }
}

/// [`RenderPort`] backed by a tokio watch channel; receivers always see the
/// latest frame.
#[derive(Debug, Clone)]
pub struct WatchPort {
    tx: watch::Sender<Option<Frame>>,
}

/// Creates a connected [`WatchPort`] and receiver.
pub fn watch_port() -> (WatchPort, watch::Receiver<Option<Frame>>) {
    let (tx, rx) = watch::channel(None);
    (WatchPort { tx }, rx)
}

impl RenderPort for WatchPort {
    fn present(&self, frame: Frame) {
        self.tx.send_replace(Some(frame));
    }
}

#[instrument(skip_all)]
async fn run<R, P>(
    mut machine: GameMachine<R>,
    port: P,
    mut rx: mpsc::Receiver<Command>,
) -> GameState
where
    R: RandomSource,
    P: RenderPort,
{
    let mut cues = CueService::new(MAX_CUES);
    let mut deadline = arm(&machine, None, true);

    info!(phase = ?machine.phase(), "Scheduler started");
    publish(&port, &machine, &mut cues, Outcome::Ignored);

    loop {
        let wake = match deadline {
            Some(at) => tokio::select! {
                cmd = rx.recv() => Wake::Command(cmd),
                () = time::sleep_until(at) => Wake::Deadline,
            },
            None => Wake::Command(rx.recv().await),
        };

        match wake {
            Wake::Deadline => {
                let outcome = machine.advance_tick();
                deadline = arm(&machine, deadline, true);
                if let Some(at) = deadline {
                    debug!(next_in = ?at.saturating_duration_since(Instant::now()), "re-armed");
                }
                publish(&port, &machine, &mut cues, outcome);
            }
            Wake::Command(Some(Command::Apply { intent, reply })) => {
                let score_before = machine.state().score();
                let outcome = machine.apply(intent);
                let score_changed = machine.state().score() != score_before;
                deadline = arm(&machine, deadline, score_changed);
                match outcome {
                    Outcome::Rejected(rejection) => {
                        cues.raise_for(&rejection, Instant::now().into_std());
                    }
                    Outcome::Reset => cues.clear(),
                    _ => {}
                }
                if outcome != Outcome::Ignored {
                    publish(&port, &machine, &mut cues, outcome);
                }
                // The caller may have stopped waiting.
                let _ = reply.send(outcome);
            }
            Wake::Command(Some(Command::Shutdown) | None) => break,
        }
    }

    info!(ticks = machine.state().ticks(), score = machine.state().score(), "Scheduler stopped");
    machine.into_state()
}

/// Next tick deadline: cleared unless Running; kept when already armed,
/// otherwise (or when `rearm`) set one interval from now.
fn arm<R: RandomSource>(
    machine: &GameMachine<R>,
    current: Option<Instant>,
    rearm: bool,
) -> Option<Instant> {
    if !machine.should_tick() {
        return None;
    }
    match current {
        Some(at) if !rearm => Some(at),
        _ => Some(Instant::now() + machine.spawn_interval()),
    }
}

fn publish<R, P>(port: &P, machine: &GameMachine<R>, cues: &mut CueService, outcome: Outcome)
where
    R: RandomSource,
    P: RenderPort,
{
    let now = Instant::now().into_std();
    cues.retain_visible(now);
    port.present(Frame {
        state: machine.state().clone(),
        outcome,
        cues: cues.visible(now),
    });
}
