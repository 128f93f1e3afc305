//! Presentation intents emitted by the combat core.
//!
//! The core never calls into audio, effects or UI. Fighters and the
//! orchestrator queue these events and hand them out after each tick.

use crate::animation::AnimationCue;
use crate::types::{Direction, RoundResult};
use scuffle_common::{PlayerSlot, Vec2};
use serde::{Deserialize, Serialize};

/// One-shot sound keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Punch started
    Punch,
    /// Kick started
    Kick,
    /// Grab started
    Whiff,
    /// Strike landed
    Hit,
    /// Heavy strike landed
    HeavyHit,
    /// Attack blocked
    Block,
    /// Grab connected
    Grab,
    /// Grabbed fighter thrown
    Throw,
    /// Takeoff
    Jump,
    /// Touchdown
    Land,
    /// Dash started
    Dash,
    /// Fighter died
    Death,
}

/// Visual effect keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VfxKind {
    /// Hit spark
    Hit,
    /// Heavy hit spark
    HeavyHit,
    /// Block spark
    Block,
    /// Dust cloud at the feet
    Dust,
}

/// Something the presentation layer should react to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FightEvent {
    /// Play a one-shot sound
    Sound {
        /// Fighter the sound belongs to
        slot: PlayerSlot,
        /// Sound key
        cue: SoundCue,
    },
    /// Spawn a cosmetic effect
    Vfx {
        /// Effect key
        kind: VfxKind,
        /// World position
        position: Vec2,
        /// Facing of the effect
        facing: Direction,
    },
    /// Spawn a fading copy of a dashing fighter
    AfterImage {
        /// Dashing fighter
        slot: PlayerSlot,
        /// World position of the copy
        position: Vec2,
        /// Frame to freeze in the copy
        cue: AnimationCue,
    },
    /// A fighter's health changed
    HealthChanged {
        /// Fighter
        slot: PlayerSlot,
        /// Signed change
        delta: i32,
        /// Health after the change
        current: i32,
        /// Maximum health
        max: i32,
    },
    /// The simulation holds for a number of ticks
    FreezeFrame {
        /// Hold length
        ticks: u32,
    },
    /// Slow motion started
    SlowMotion {
        /// Playback rate, below 1
        rate: f32,
        /// Length in simulation ticks
        ticks: u32,
    },
    /// The round resolved
    RoundEnded {
        /// Outcome
        result: RoundResult,
    },
}

impl FightEvent {
    /// Shorthand for a sound event.
    #[must_use]
    pub const fn sound(slot: PlayerSlot, cue: SoundCue) -> Self {
        Self::Sound { slot, cue }
    }

    /// The sound cue, if this is a sound event.
    #[must_use]
    pub const fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            Self::Sound { cue, .. } => Some(*cue),
            _ => None,
        }
    }
}
