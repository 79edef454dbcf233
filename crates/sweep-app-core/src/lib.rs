// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for Sweep adapters (config, prefs, cell cues).
//! Keeps presentation layers thin and framework-agnostic.

pub mod config;
pub mod cue;
pub mod prefs;
pub mod render_port;
