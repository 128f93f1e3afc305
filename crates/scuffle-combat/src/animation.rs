//! Animation clips and precomputed fixed animations.
//!
//! A fixed animation always plays out identically once started, so every
//! frame's hitbox, sprite and displacement is flattened into lookup tables
//! when the move set is built.

use crate::hitbox::OrientableHitbox;
use crate::types::HitBoxData;
use scuffle_common::{SpriteId, Vec2};
use serde::{Deserialize, Serialize};

// ============================================================================
// Clips
// ============================================================================

/// Named animation clips the combat core can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Clip {
    /// Standing still
    #[default]
    StandIdle,
    /// Walking either way
    Walk,
    /// Crouching down (reversed when standing up)
    CrouchTransition,
    /// Holding a crouch
    CrouchIdle,
    /// Jump takeoff and airtime (reversed on landing)
    Jump,
    /// Standing punch
    StandPunch,
    /// Standing kick
    StandKick,
    /// Crouching punch
    CrouchPunch,
    /// Crouching kick
    CrouchKick,
    /// Air punch
    JumpPunch,
    /// Air kick
    JumpKick,
    /// Standing guard
    StandBlock,
    /// Crouching guard
    CrouchBlock,
    /// Standing hit reaction
    StandHurt,
    /// Crouching hit reaction
    CrouchHurt,
    /// Airborne hit reaction
    JumpHurt,
    /// Forward dash
    DashForward,
    /// Back dash
    DashBack,
    /// Grab attempt
    Grab,
    /// Being held
    Grabbed,
    /// Holding and throwing
    GrabSuccess,
    /// Lying down and getting up
    KnockDownGetUp,
    /// Death
    Die,
}

/// Which clip and frame the presentation layer should show this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AnimationCue {
    /// Selected clip
    pub clip: Clip,
    /// Frame index within the clip
    pub frame: u32,
    /// Play the clip backwards
    pub reversed: bool,
    /// Exact sprite, for clips driven by a fixed animation
    pub sprite: Option<SpriteId>,
}

impl AnimationCue {
    /// Cue for a clip played forward.
    #[must_use]
    pub const fn new(clip: Clip, frame: u32) -> Self {
        Self {
            clip,
            frame,
            reversed: false,
            sprite: None,
        }
    }

    /// Same cue played backwards.
    #[must_use]
    pub const fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    /// Same cue pinned to a sprite.
    #[must_use]
    pub const fn with_sprite(mut self, sprite: SpriteId) -> Self {
        self.sprite = Some(sprite);
        self
    }
}

// ============================================================================
// Fixed Animation
// ============================================================================

/// One segment of a fixed animation, repeated for `duration` frames.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPart {
    /// Hitbox data for every frame of the part
    pub hitbox: OrientableHitbox,
    /// Sprite shown for every frame of the part
    pub sprite: SpriteId,
    /// Number of frames
    pub duration: u32,
    /// Displacement applied each frame, authored facing +x
    pub movement: Vec2,
}

impl AnimationPart {
    /// Builds a part from raw hitbox data.
    #[must_use]
    pub fn new(data: HitBoxData, sprite: SpriteId, duration: u32, movement: Vec2) -> Self {
        Self {
            hitbox: OrientableHitbox::new(data),
            sprite,
            duration,
            movement,
        }
    }
}

/// Frame-indexed table built from an ordered list of parts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FixedAnimation {
    hitboxes: Vec<OrientableHitbox>,
    sprites: Vec<SpriteId>,
    movements: Vec<Vec2>,
}

impl FixedAnimation {
    /// Flattens parts into per-frame tables.
    #[must_use]
    pub fn from_parts(parts: &[AnimationPart]) -> Self {
        let total: usize = parts.iter().map(|p| p.duration as usize).sum();
        let mut anim = Self {
            hitboxes: Vec::with_capacity(total),
            sprites: Vec::with_capacity(total),
            movements: Vec::with_capacity(total),
        };

        for part in parts {
            for _ in 0..part.duration {
                anim.hitboxes.push(part.hitbox.clone());
                anim.sprites.push(part.sprite);
                anim.movements.push(part.movement);
            }
        }

        anim
    }

    /// Total length in frames.
    #[must_use]
    pub fn total_frames(&self) -> u32 {
        self.sprites.len() as u32
    }

    /// Whether `frame` is past the final frame.
    #[must_use]
    pub fn is_over(&self, frame: u32) -> bool {
        frame >= self.total_frames()
    }

    /// Hitbox at `frame`.
    ///
    /// # Panics
    /// Panics if `frame` is past the end; check [`Self::is_over`] first.
    #[must_use]
    pub fn hitbox_at_frame(&self, frame: u32) -> &OrientableHitbox {
        self.check_frame(frame);
        &self.hitboxes[frame as usize]
    }

    /// Sprite at `frame`.
    ///
    /// # Panics
    /// Panics if `frame` is past the end.
    #[must_use]
    pub fn sprite_at_frame(&self, frame: u32) -> SpriteId {
        self.check_frame(frame);
        self.sprites[frame as usize]
    }

    /// Per-frame displacement at `frame`, authored facing +x.
    ///
    /// # Panics
    /// Panics if `frame` is past the end.
    #[must_use]
    pub fn movement_at_frame(&self, frame: u32) -> Vec2 {
        self.check_frame(frame);
        self.movements[frame as usize]
    }

    fn check_frame(&self, frame: u32) {
        debug_assert!(
            !self.is_over(frame),
            "fixed animation queried at frame {frame} but it is {} frames long",
            self.total_frames()
        );
    }
}
