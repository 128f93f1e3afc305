//! Core value types shared by fighters and the fight orchestrator.

use scuffle_common::{mirror_rect, PlayerSlot, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Horizontal direction relative to a fighter's facing.
///
/// Doubles as a sign multiplier for movement and knockback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Away from the opponent
    Backward = -1,
    /// No horizontal intent
    #[default]
    None = 0,
    /// Toward the opponent
    Forward = 1,
}

impl Direction {
    /// Swaps Forward and Backward.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Backward => Self::Forward,
            Self::Forward => Self::Backward,
            Self::None => Self::None,
        }
    }

    /// Sign as a float multiplier.
    #[must_use]
    pub fn sign(self) -> f32 {
        f32::from(self as i8)
    }

    /// Direction of a signed value; zero maps to `None`.
    #[must_use]
    pub fn from_sign(value: f32) -> Self {
        if value > 0.0 {
            Self::Forward
        } else if value < 0.0 {
            Self::Backward
        } else {
            Self::None
        }
    }

    /// Combines a world-space direction with a facing, giving the
    /// direction relative to that facing (and vice versa).
    #[must_use]
    pub const fn relative_to(self, facing: Self) -> Self {
        match (self, facing) {
            (Self::None, _) | (_, Self::None) => Self::None,
            (a, b) if a as i8 == b as i8 => Self::Forward,
            _ => Self::Backward,
        }
    }
}

/// Height class of an attack; decides which block stance stops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttackType {
    /// Blocked standing only
    High,
    /// Blocked standing or crouching
    #[default]
    Mid,
    /// Blocked crouching only
    Low,
}

impl AttackType {
    /// Whether a standing block stops this attack.
    #[must_use]
    pub const fn blockable_standing(self) -> bool {
        matches!(self, Self::High | Self::Mid)
    }

    /// Whether a crouching block stops this attack.
    #[must_use]
    pub const fn blockable_crouching(self) -> bool {
        matches!(self, Self::Mid | Self::Low)
    }
}

/// Outcome of an attack reaching a defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackResult {
    /// Damage or grab applied
    Hit,
    /// Stopped by a block (or a grab trade)
    Blocked,
    /// The defender was not affected
    None,
}

impl AttackResult {
    /// Whether the attack made contact at all.
    #[must_use]
    pub const fn connected(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// One active attack, supplied fresh by the attacker every frame it is live.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackInfo {
    /// Attacking slot
    pub from: PlayerSlot,
    /// Reach of the attack, relative to the attacker position
    pub bounds: Rect,
    /// Direction the attack pushes, in world terms once oriented
    pub direction: Direction,
    /// Height class
    pub attack_type: AttackType,
    /// Health removed on hit
    pub damage: i32,
    /// Picks the heavy hit cue and longer freeze
    pub is_heavy: bool,
    /// Routes to grab resolution
    pub is_grab: bool,
    /// Where hit sparks spawn, relative to the attacker position
    pub visual_offset: Vec2,
    /// Orientation of hit sparks
    pub visual_direction: Vec2,
}

impl AttackInfo {
    /// Horizontal mirror image of this attack.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            bounds: mirror_rect(self.bounds),
            direction: self.direction.flip(),
            visual_offset: Vec2::new(-self.visual_offset.x, self.visual_offset.y),
            visual_direction: Vec2::new(-self.visual_direction.x, self.visual_direction.y),
            ..*self
        }
    }
}

/// Everything a fighter exposes for collision on one tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HitBoxData {
    /// Box used for wall and opponent separation
    pub collision_box: Rect,
    /// Regions where the fighter can be hit; empty while invulnerable
    pub hurtboxes: Vec<Rect>,
    /// Live attack, present only on active frames
    pub attack: Option<AttackInfo>,
}

impl HitBoxData {
    /// Creates hitbox data with no attack.
    #[must_use]
    pub fn new(collision_box: Rect, hurtboxes: Vec<Rect>) -> Self {
        Self {
            collision_box,
            hurtboxes,
            attack: None,
        }
    }

    /// Same data with an attack attached.
    #[must_use]
    pub fn with_attack(mut self, attack: AttackInfo) -> Self {
        self.attack = Some(attack);
        self
    }

    /// Same boxes with every hurtbox removed.
    #[must_use]
    pub fn invulnerable(mut self) -> Self {
        self.hurtboxes.clear();
        self
    }

    /// Horizontal mirror image, flipping the attack direction too.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            collision_box: mirror_rect(self.collision_box),
            hurtboxes: self.hurtboxes.iter().copied().map(mirror_rect).collect(),
            attack: self.attack.as_ref().map(AttackInfo::mirrored),
        }
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundResult {
    /// Both fighters fell on the same tick
    Draw,
    /// Player one won
    P1Win,
    /// Player two won
    P2Win,
}

impl RoundResult {
    /// The winning slot, if any.
    #[must_use]
    pub const fn winner(self) -> Option<PlayerSlot> {
        match self {
            Self::Draw => None,
            Self::P1Win => Some(PlayerSlot::P1),
            Self::P2Win => Some(PlayerSlot::P2),
        }
    }

    /// Decides a round from both health values, or `None` while both stand.
    #[must_use]
    pub const fn from_health(p1: i32, p2: i32) -> Option<Self> {
        match (p1 <= 0, p2 <= 0) {
            (true, true) => Some(Self::Draw),
            (true, false) => Some(Self::P2Win),
            (false, true) => Some(Self::P1Win),
            (false, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_attack() -> AttackInfo {
        AttackInfo {
            from: PlayerSlot::P1,
            bounds: Rect::new(0.5, 0.9, 0.7, 0.2),
            direction: Direction::Forward,
            attack_type: AttackType::Mid,
            damage: 60,
            is_heavy: false,
            is_grab: false,
            visual_offset: Vec2::new(1.0, 1.0),
            visual_direction: Vec2::new(1.0, 0.0),
        }
    }

    #[test]
    fn test_direction_flip() {
        assert_eq!(Direction::Forward.flip(), Direction::Backward);
        assert_eq!(Direction::Backward.flip(), Direction::Forward);
        assert_eq!(Direction::None.flip(), Direction::None);
    }

    #[test]
    fn test_direction_relative() {
        assert_eq!(
            Direction::Backward.relative_to(Direction::Backward),
            Direction::Forward
        );
        assert_eq!(
            Direction::Forward.relative_to(Direction::Backward),
            Direction::Backward
        );
        assert_eq!(Direction::None.relative_to(Direction::Forward), Direction::None);
    }

    #[test]
    fn test_block_compatibility() {
        assert!(AttackType::Mid.blockable_standing());
        assert!(AttackType::Mid.blockable_crouching());
        assert!(AttackType::High.blockable_standing());
        assert!(!AttackType::High.blockable_crouching());
        assert!(!AttackType::Low.blockable_standing());
        assert!(AttackType::Low.blockable_crouching());
    }

    #[test]
    fn test_mirror_flips_attack() {
        let data = HitBoxData::new(Rect::new(-0.3, 0.0, 0.6, 1.4), vec![Rect::new(0.0, 0.0, 0.5, 1.0)])
            .with_attack(sample_attack());
        let flipped = data.mirrored();
        let attack = flipped.attack.as_ref().map(|a| a.direction);

        assert_eq!(attack, Some(Direction::Backward));
        assert_eq!(flipped.hurtboxes[0], Rect::new(-0.5, 0.0, 0.5, 1.0));
    }

    #[test]
    fn test_round_result_from_health() {
        assert_eq!(RoundResult::from_health(10, 10), None);
        assert_eq!(RoundResult::from_health(0, 10), Some(RoundResult::P2Win));
        assert_eq!(RoundResult::from_health(10, -5), Some(RoundResult::P1Win));
        assert_eq!(RoundResult::from_health(0, 0), Some(RoundResult::Draw));
    }

    proptest! {
        #[test]
        fn prop_double_mirror_is_identity(
            x in -3.0f32..3.0,
            w in 0.0f32..2.0,
            hurts in proptest::collection::vec((-3.0f32..3.0, 0.0f32..2.0), 0..4),
            facing in prop_oneof![Just(Direction::Forward), Just(Direction::Backward), Just(Direction::None)],
        ) {
            let mut attack = sample_attack();
            attack.direction = facing;
            attack.bounds = Rect::new(x, 0.5, w, 0.2);
            let data = HitBoxData::new(
                Rect::new(x, 0.0, w, 1.4),
                hurts.iter().map(|&(hx, hw)| Rect::new(hx, 0.0, hw, 1.0)).collect(),
            )
            .with_attack(attack);

            let back = data.mirrored().mirrored();
            prop_assert!((back.collision_box.x - data.collision_box.x).abs() < 1e-4);
            prop_assert_eq!(back.hurtboxes.len(), data.hurtboxes.len());
            for (a, b) in back.hurtboxes.iter().zip(&data.hurtboxes) {
                prop_assert!((a.x - b.x).abs() < 1e-4);
                prop_assert_eq!(a.width, b.width);
            }
            let (a, b) = (back.attack.unwrap(), data.attack.unwrap());
            prop_assert_eq!(a.direction, b.direction);
            prop_assert!((a.bounds.x - b.bounds.x).abs() < 1e-4);
        }
    }
}
