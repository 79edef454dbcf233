// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sweep CLI
//!
//! Headless front end for the manual-collection game: run a seeded
//! simulation, play a real-time session on the scheduler, or manage saved
//! preferences.

mod autopilot;
mod render;
mod session;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};
use sweep_app_core::config::{ConfigService, ConfigStore};
use sweep_app_core::prefs::{PrefsPort, SessionPrefs, SESSION_PREFS_KEY};
use sweep_config_fs::FsConfigStore;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sweep: manual garbage collection on a 6x6 heap")]
struct Args {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a fixed number of spawn ticks without real time and print the result
    Simulate {
        /// PRNG seed (defaults to the saved seed, then a fresh one)
        #[arg(long)]
        seed: Option<u64>,
        /// Number of spawn ticks to run
        #[arg(long, default_value_t = 50)]
        ticks: u64,
        /// Let the built-in collector free and nullify cells
        #[arg(long)]
        autopilot: bool,
    },
    /// Play a real-time session on the scheduler
    Run {
        /// PRNG seed (defaults to the saved seed, then a fresh one)
        #[arg(long)]
        seed: Option<u64>,
        /// Wall-clock seconds before the session is stopped
        #[arg(long, default_value_t = 30)]
        seconds: u64,
        /// Let the built-in collector free and nullify cells
        #[arg(long)]
        autopilot: bool,
    },
    /// Inspect or reset saved preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum PrefsAction {
    /// Print the effective preferences as JSON
    Show,
    /// Overwrite saved preferences with defaults
    Reset,
}

/// Seed, autopilot flag and game constants for one session.
#[derive(Debug, Clone)]
pub(crate) struct SessionSetup {
    pub(crate) prefs: SessionPrefs,
    pub(crate) seed: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let prefs = ConfigService::new(FsConfigStore::new().context("opening config dir")?);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.cmd {
        Command::Simulate {
            seed,
            ticks,
            autopilot,
        } => {
            let setup = resolve(&prefs, seed, autopilot)?;
            info!(seed = setup.seed, ticks, "simulating");
            let state = session::simulate(&setup, ticks);
            render::write_report(&mut out, &setup, &state, &[])?;
        }
        Command::Run {
            seed,
            seconds,
            autopilot,
        } => {
            let setup = resolve(&prefs, seed, autopilot)?;
            info!(seed = setup.seed, seconds, "starting session");
            let frame = session::run(&setup, std::time::Duration::from_secs(seconds)).await?;
            render::write_report(&mut out, &setup, &frame.state, &frame.cues)?;
        }
        Command::Prefs { action } => prefs_command(&prefs, action, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn init_tracing(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

/// Merges saved prefs with command-line overrides.
fn resolve<S: ConfigStore>(
    prefs: &ConfigService<S>,
    seed: Option<u64>,
    autopilot: bool,
) -> Result<SessionSetup> {
    let mut saved: SessionPrefs = prefs
        .load_or_default()
        .context("loading saved preferences")?;
    saved.autopilot |= autopilot;
    let seed = seed.or(saved.seed).unwrap_or_else(fresh_seed);
    debug!(seed, autopilot = saved.autopilot, "session setup");
    Ok(SessionSetup {
        prefs: saved,
        seed,
    })
}

fn fresh_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() ^ u64::from(d.subsec_nanos()).rotate_left(32))
}

fn prefs_command<S: ConfigStore>(
    prefs: &ConfigService<S>,
    action: PrefsAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        PrefsAction::Show => {
            let current = prefs.load_prefs()?.unwrap_or_default();
            writeln!(out, "{}", serde_json::to_string_pretty(&current)?)?;
        }
        PrefsAction::Reset => {
            prefs.save_prefs(&SessionPrefs::default())?;
            info!(key = SESSION_PREFS_KEY, "preferences reset");
            writeln!(out, "preferences reset to defaults")?;
        }
    }
    Ok(())
}
