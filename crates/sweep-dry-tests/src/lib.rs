// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for Sweep crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`graph`] - Heap graph and game state builders
//! - [`port`] - Render port that records every frame
//! - [`random`] - Scripted random source for exact spawn sequences

pub mod config;
pub mod graph;
pub mod port;
pub mod random;

pub use config::{FailOn, InMemoryConfigStore};
pub use graph::GraphBuilder;
pub use port::RecordingPort;
pub use random::ScriptedRandom;
