//! # Scuffle Combat
//!
//! Deterministic combat core for a two-player 2D fighter.
//!
//! This crate provides:
//! - Hitbox data with facing-aware mirroring
//! - Fixed animation tables with per-frame hitboxes, sprites and movement
//! - Input buffering with double-tap dash recognition
//! - Data-driven tuning tables (RON or TOML)
//! - The fighter state machine and hit resolution
//! - Fight orchestration: separation, walls, freeze frames, round results
//! - Presentation intents returned after every tick
//! - A scripted AI opponent and a best-of-N round counter
//!
//! The core holds no global state and performs no I/O apart from the explicit
//! tuning loaders.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod ai;
pub mod animation;
pub mod events;
pub mod fight;
pub mod fighter;
pub mod hitbox;
pub mod input;
pub mod matchup;
pub mod moves;
pub mod tuning;
pub mod types;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::ai::*;
    pub use crate::animation::*;
    pub use crate::events::*;
    pub use crate::fight::*;
    pub use crate::fighter::*;
    pub use crate::hitbox::*;
    pub use crate::input::*;
    pub use crate::matchup::*;
    pub use crate::moves::*;
    pub use crate::tuning::*;
    pub use crate::types::*;
}

pub use prelude::*;
