//! # Scuffle Sim
//!
//! Headless runner for the Scuffle combat core.
//!
//! This crate provides:
//! - Runner configuration loaded from TOML
//! - Fixed-timestep pacing for realtime runs
//! - AI-vs-AI matches over a best-of-N round counter
//! - Replay recording and determinism verification

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod replay;
pub mod runner;
pub mod timing;

pub use config::{SimConfig, CONFIG_FILE};
pub use replay::{Replay, ReplayError, RoundRecord, StateHash};
pub use runner::{MatchRunner, MatchSummary, RoundSummary};
pub use timing::{FixedStep, TICK_RATE};
