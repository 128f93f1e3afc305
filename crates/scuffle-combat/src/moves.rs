//! Move sets: tuning specs compiled into fixed animations.

use crate::animation::{AnimationPart, Clip, FixedAnimation};
use crate::tuning::{AttackSpec, FighterTuning, PartSpec, Pose};
use crate::types::AttackInfo;
use scuffle_common::{PlayerSlot, SpriteId};

/// Moves backed by a fixed animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
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
    /// Grab attempt
    Grab,
    /// Hold and throw
    GrabSuccess,
}

impl MoveKind {
    /// Every move, in table order.
    pub const ALL: [Self; 8] = [
        Self::StandPunch,
        Self::StandKick,
        Self::CrouchPunch,
        Self::CrouchKick,
        Self::JumpPunch,
        Self::JumpKick,
        Self::Grab,
        Self::GrabSuccess,
    ];

    /// Field name in the tuning table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StandPunch => "stand_punch",
            Self::StandKick => "stand_kick",
            Self::CrouchPunch => "crouch_punch",
            Self::CrouchKick => "crouch_kick",
            Self::JumpPunch => "jump_punch",
            Self::JumpKick => "jump_kick",
            Self::Grab => "grab",
            Self::GrabSuccess => "grab_success",
        }
    }

    /// Clip shown while the move plays.
    #[must_use]
    pub const fn clip(self) -> Clip {
        match self {
            Self::StandPunch => Clip::StandPunch,
            Self::StandKick => Clip::StandKick,
            Self::CrouchPunch => Clip::CrouchPunch,
            Self::CrouchKick => Clip::CrouchKick,
            Self::JumpPunch => Clip::JumpPunch,
            Self::JumpKick => Clip::JumpKick,
            Self::Grab => Clip::Grab,
            Self::GrabSuccess => Clip::GrabSuccess,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Compiled animations for every move of one fighter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MoveSet {
    anims: Vec<FixedAnimation>,
}

impl MoveSet {
    /// Compiles every move in `tuning`, tagging attacks with `slot`.
    #[must_use]
    pub fn build(tuning: &FighterTuning, slot: PlayerSlot) -> Self {
        let anims = MoveKind::ALL
            .iter()
            .map(|&kind| {
                let parts: Vec<AnimationPart> = tuning
                    .moves
                    .get(kind)
                    .parts
                    .iter()
                    .map(|part| compile_part(tuning, part, slot))
                    .collect();
                FixedAnimation::from_parts(&parts)
            })
            .collect();

        Self { anims }
    }

    /// Animation for a move.
    #[must_use]
    pub fn get(&self, kind: MoveKind) -> &FixedAnimation {
        &self.anims[kind.index()]
    }
}

fn compile_part(tuning: &FighterTuning, part: &PartSpec, slot: PlayerSlot) -> AnimationPart {
    let mut data = tuning.poses.get(part.pose).hitbox_data();
    if let Some(hurtboxes) = &part.hurtboxes {
        data.hurtboxes.clone_from(hurtboxes);
    }
    if part.pose == Pose::Down {
        data = data.invulnerable();
    }
    if let Some(spec) = &part.attack {
        data = data.with_attack(attack_info(spec, slot));
    }

    AnimationPart::new(data, SpriteId::new(part.sprite), part.duration, part.movement)
}

fn attack_info(spec: &AttackSpec, slot: PlayerSlot) -> AttackInfo {
    AttackInfo {
        from: slot,
        bounds: spec.bounds,
        direction: spec.direction,
        attack_type: spec.attack_type,
        damage: spec.damage,
        is_heavy: spec.heavy,
        is_grab: spec.grab,
        visual_offset: spec.visual_offset,
        visual_direction: spec.visual_direction,
    }
}
