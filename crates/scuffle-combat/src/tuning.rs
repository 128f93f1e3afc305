//! Versioned tuning tables for fighter archetypes.
//!
//! Every physics constant, reaction timing and move frame lives here rather
//! than in the state machine. Tables are plain serde structs loaded from RON
//! or TOML and checked with [`FighterTuning::validate`] before use.

use crate::input::BufferConfig;
use crate::moves::MoveKind;
use crate::types::{AttackType, Direction, HitBoxData};
use scuffle_common::{
    collision_box_rect, Rect, SchemaVersion, ScuffleError, ScuffleResult, TuningError, Vec2,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

// ============================================================================
// Physics
// ============================================================================

/// Movement and integration constants, in world units per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Forward walk speed
    pub walk_speed: f32,
    /// Backward walk speed
    pub back_walk_speed: f32,
    /// Downward acceleration while airborne
    pub gravity: f32,
    /// Initial upward velocity of a jump
    pub jump_velocity: f32,
    /// Horizontal speed of a diagonal jump
    pub jump_drift: f32,
    /// Horizontal speed lost per tick while knocked back on the ground
    pub knockback_decel: f32,
    /// Horizontal speed lost per tick while sliding after death
    pub ground_friction: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            walk_speed: 0.06,
            back_walk_speed: 0.05,
            gravity: 0.012,
            jump_velocity: 0.24,
            jump_drift: 0.05,
            knockback_decel: 0.01,
            ground_friction: 0.006,
        }
    }
}

// ============================================================================
// Combat Reactions
// ============================================================================

/// How a fighter reacts to being hit, blocking and grabbing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Stun length of a standing or crouching hit
    pub hurt_frames: u32,
    /// Stun length of a heavy hit
    pub heavy_hurt_frames: u32,
    /// Length of block stun
    pub block_frames: u32,
    /// Knockback speed of a hit
    pub hit_knockback: f32,
    /// Knockback speed of a blocked attack
    pub block_knockback: f32,
    /// Knockback applied to an airborne fighter
    pub air_hit_knockback: f32,
    /// Fraction of upward velocity kept when hit in the air
    pub air_hit_damping: f32,
    /// Speed at which a grabbed fighter is pulled toward the grabber
    pub grab_pull: f32,
    /// Knockback both fighters take when grabs trade
    pub grab_trade_knockback: f32,
    /// Pushback on a grabber whose grab was blocked
    pub grab_blocked_pushback: f32,
    /// Ticks before an unthrown grabbed fighter breaks free
    pub grabbed_frames: u32,
    /// Ticks spent lying down after a throw
    pub knockdown_frames: u32,
    /// Launch velocity of a throw, x away from the thrower
    pub knock_impulse: Vec2,
    /// Launch velocity on death, x away from the killer
    pub death_impulse: Vec2,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            hurt_frames: 16,
            heavy_hurt_frames: 22,
            block_frames: 12,
            hit_knockback: 0.08,
            block_knockback: 0.05,
            air_hit_knockback: 0.06,
            air_hit_damping: 0.3,
            grab_pull: 0.03,
            grab_trade_knockback: 0.08,
            grab_blocked_pushback: 0.06,
            grabbed_frames: 45,
            knockdown_frames: 40,
            knock_impulse: Vec2::new(0.09, 0.2),
            death_impulse: Vec2::new(0.07, 0.18),
        }
    }
}

// ============================================================================
// Dash
// ============================================================================

/// Dash timings and speeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashTuning {
    /// Speed of a forward dash
    pub forward_speed: f32,
    /// Speed of a back dash
    pub back_speed: f32,
    /// Length of a forward dash
    pub forward_frames: u32,
    /// Length of a back dash
    pub back_frames: u32,
    /// Ticks between after-images
    pub after_image_interval: u32,
    /// Ticks before a dash can be cancelled into an attack
    pub cancel_after: u32,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            forward_speed: 0.13,
            back_speed: 0.11,
            forward_frames: 16,
            back_frames: 14,
            after_image_interval: 3,
            cancel_after: 8,
        }
    }
}

// ============================================================================
// Poses
// ============================================================================

/// Body posture used to pick collision and hurtboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Pose {
    /// Upright on the ground
    #[default]
    Stand,
    /// Crouched on the ground
    Crouch,
    /// In the air
    Air,
    /// Lying on the ground, untouchable
    Down,
}

/// Collision box and hurtboxes of one posture, authored facing +x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseBoxes {
    /// Separation box
    pub collision: Rect,
    /// Damageable regions
    pub hurtboxes: Vec<Rect>,
}

impl PoseBoxes {
    /// Hitbox data for this pose with no attack.
    #[must_use]
    pub fn hitbox_data(&self) -> HitBoxData {
        HitBoxData::new(self.collision, self.hurtboxes.clone())
    }
}

/// Boxes for every posture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseTuning {
    /// Standing boxes
    pub stand: PoseBoxes,
    /// Crouching boxes
    pub crouch: PoseBoxes,
    /// Airborne boxes
    pub air: PoseBoxes,
    /// Knocked-down boxes; hurtboxes are ignored
    pub down: PoseBoxes,
}

impl PoseTuning {
    /// Boxes for a pose.
    #[must_use]
    pub fn get(&self, pose: Pose) -> &PoseBoxes {
        match pose {
            Pose::Stand => &self.stand,
            Pose::Crouch => &self.crouch,
            Pose::Air => &self.air,
            Pose::Down => &self.down,
        }
    }
}

impl Default for PoseTuning {
    fn default() -> Self {
        Self {
            stand: PoseBoxes {
                collision: collision_box_rect(0.6, 1.4),
                hurtboxes: vec![Rect::new(-0.4, 0.0, 0.8, 0.8), Rect::new(-0.3, 0.8, 0.6, 0.8)],
            },
            crouch: PoseBoxes {
                collision: collision_box_rect(0.6, 0.9),
                hurtboxes: vec![Rect::new(-0.4, 0.0, 0.8, 0.6), Rect::new(-0.3, 0.6, 0.6, 0.4)],
            },
            air: PoseBoxes {
                collision: Rect::new(-0.3, 0.2, 0.6, 1.1),
                hurtboxes: vec![Rect::new(-0.35, 0.1, 0.7, 1.3)],
            },
            down: PoseBoxes {
                collision: collision_box_rect(1.2, 0.4),
                hurtboxes: Vec::new(),
            },
        }
    }
}

/// Lengths of the short one-shot transition clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionTuning {
    /// Crouch-down clip, also played reversed when standing up
    pub crouch_frames: u32,
    /// Jump squat before takeoff
    pub jump_squat_frames: u32,
    /// Landing recovery, the jump clip played reversed
    pub land_frames: u32,
    /// Getting up after a knockdown
    pub get_up_frames: u32,
}

impl Default for TransitionTuning {
    fn default() -> Self {
        Self {
            crouch_frames: 3,
            jump_squat_frames: 4,
            land_frames: 4,
            get_up_frames: 12,
        }
    }
}

// ============================================================================
// Moves
// ============================================================================

/// An attack box authored facing +x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackSpec {
    /// Reach, relative to the attacker position
    pub bounds: Rect,
    /// Push direction; `Forward` pushes away from the attacker
    pub direction: Direction,
    /// Height class
    pub attack_type: AttackType,
    /// Health removed on hit
    pub damage: i32,
    /// Heavy feedback and longer stun
    pub heavy: bool,
    /// Grab instead of strike
    pub grab: bool,
    /// Hit spark offset
    pub visual_offset: Vec2,
    /// Hit spark direction
    pub visual_direction: Vec2,
}

impl Default for AttackSpec {
    fn default() -> Self {
        Self {
            bounds: Rect::EMPTY,
            direction: Direction::Forward,
            attack_type: AttackType::Mid,
            damage: 0,
            heavy: false,
            grab: false,
            visual_offset: Vec2::ZERO,
            visual_direction: Vec2::X,
        }
    }
}

/// One segment of a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartSpec {
    /// Posture supplying the collision box and default hurtboxes
    pub pose: Pose,
    /// Replaces the pose hurtboxes when set
    pub hurtboxes: Option<Vec<Rect>>,
    /// Live attack during this part
    pub attack: Option<AttackSpec>,
    /// Sprite index within the move's sheet
    pub sprite: u16,
    /// Frames
    pub duration: u32,
    /// Displacement per frame
    pub movement: Vec2,
}

impl Default for PartSpec {
    fn default() -> Self {
        Self {
            pose: Pose::Stand,
            hurtboxes: None,
            attack: None,
            sprite: 0,
            duration: 1,
            movement: Vec2::ZERO,
        }
    }
}

impl PartSpec {
    fn new(pose: Pose, sprite: u16, duration: u32) -> Self {
        Self {
            pose,
            sprite,
            duration,
            ..Self::default()
        }
    }

    fn moving(mut self, dx: f32) -> Self {
        self.movement = Vec2::new(dx, 0.0);
        self
    }

    fn striking(mut self, attack: AttackSpec) -> Self {
        self.attack = Some(attack);
        self
    }
}

/// Ordered parts of one move.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveSpec {
    /// Parts in play order
    pub parts: Vec<PartSpec>,
}

impl MoveSpec {
    /// Total length in frames.
    #[must_use]
    pub fn total_frames(&self) -> u32 {
        self.parts.iter().map(|p| p.duration).sum()
    }
}

/// Every move a fighter can perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveTable {
    /// Standing punch
    pub stand_punch: MoveSpec,
    /// Standing kick
    pub stand_kick: MoveSpec,
    /// Crouching punch
    pub crouch_punch: MoveSpec,
    /// Crouching kick (sweep)
    pub crouch_kick: MoveSpec,
    /// Air punch
    pub jump_punch: MoveSpec,
    /// Air kick
    pub jump_kick: MoveSpec,
    /// Grab attempt
    pub grab: MoveSpec,
    /// Hold and throw after a successful grab
    pub grab_success: MoveSpec,
}

impl MoveTable {
    /// Spec for a move.
    #[must_use]
    pub fn get(&self, kind: MoveKind) -> &MoveSpec {
        match kind {
            MoveKind::StandPunch => &self.stand_punch,
            MoveKind::StandKick => &self.stand_kick,
            MoveKind::CrouchPunch => &self.crouch_punch,
            MoveKind::CrouchKick => &self.crouch_kick,
            MoveKind::JumpPunch => &self.jump_punch,
            MoveKind::JumpKick => &self.jump_kick,
            MoveKind::Grab => &self.grab,
            MoveKind::GrabSuccess => &self.grab_success,
        }
    }
}

fn strike(bounds: Rect, attack_type: AttackType, damage: i32) -> AttackSpec {
    AttackSpec {
        bounds,
        attack_type,
        damage,
        visual_offset: Vec2::new(bounds.x_max(), bounds.y + bounds.height * 0.5),
        ..AttackSpec::default()
    }
}

impl Default for MoveTable {
    fn default() -> Self {
        use Pose::{Air, Crouch, Stand};

        let heavy = |mut spec: AttackSpec| {
            spec.heavy = true;
            spec
        };

        Self {
            stand_punch: MoveSpec {
                parts: vec![
                    PartSpec::new(Stand, 0, 5).moving(0.03),
                    PartSpec::new(Stand, 1, 4)
                        .striking(strike(Rect::new(0.3, 1.0, 0.8, 0.2), AttackType::Mid, 60)),
                    PartSpec::new(Stand, 2, 8),
                ],
            },
            stand_kick: MoveSpec {
                parts: vec![
                    PartSpec::new(Stand, 0, 8).moving(0.01),
                    PartSpec::new(Stand, 1, 4).striking(heavy(strike(
                        Rect::new(0.3, 0.6, 1.1, 0.25),
                        AttackType::Mid,
                        90,
                    ))),
                    PartSpec::new(Stand, 2, 12),
                ],
            },
            crouch_punch: MoveSpec {
                parts: vec![
                    PartSpec::new(Crouch, 0, 4),
                    PartSpec::new(Crouch, 1, 3)
                        .striking(strike(Rect::new(0.3, 0.5, 0.9, 0.2), AttackType::Mid, 50)),
                    PartSpec::new(Crouch, 2, 7),
                ],
            },
            crouch_kick: MoveSpec {
                parts: vec![
                    PartSpec::new(Crouch, 0, 6),
                    PartSpec::new(Crouch, 1, 4)
                        .striking(strike(Rect::new(0.3, 0.0, 1.2, 0.2), AttackType::Low, 80)),
                    PartSpec::new(Crouch, 2, 14),
                ],
            },
            jump_punch: MoveSpec {
                parts: vec![
                    PartSpec::new(Air, 0, 3),
                    PartSpec::new(Air, 1, 6)
                        .striking(strike(Rect::new(0.2, 0.4, 0.7, 0.3), AttackType::High, 60)),
                    PartSpec::new(Air, 2, 6),
                ],
            },
            jump_kick: MoveSpec {
                parts: vec![
                    PartSpec::new(Air, 0, 4),
                    PartSpec::new(Air, 1, 8).striking(heavy(strike(
                        Rect::new(0.2, 0.0, 0.9, 0.4),
                        AttackType::High,
                        80,
                    ))),
                    PartSpec::new(Air, 2, 8),
                ],
            },
            grab: MoveSpec {
                parts: vec![
                    PartSpec::new(Stand, 0, 4).moving(0.02),
                    PartSpec::new(Stand, 1, 3).striking(AttackSpec {
                        grab: true,
                        ..strike(Rect::new(0.2, 0.5, 0.6, 0.6), AttackType::Mid, 0)
                    }),
                    PartSpec::new(Stand, 2, 16),
                ],
            },
            grab_success: MoveSpec {
                parts: vec![
                    PartSpec::new(Stand, 0, 12),
                    PartSpec::new(Stand, 1, 3).striking(heavy(strike(
                        Rect::new(-0.3, 0.0, 1.4, 1.6),
                        AttackType::Mid,
                        120,
                    ))),
                    PartSpec::new(Stand, 2, 14),
                ],
            },
        }
    }
}

// ============================================================================
// Fighter Tuning
// ============================================================================

/// Complete tuning table for one fighter archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterTuning {
    /// Table schema version
    pub version: SchemaVersion,
    /// Archetype name, for logs
    pub name: String,
    /// Starting and maximum health
    pub max_health: i32,
    /// Movement constants
    pub physics: PhysicsTuning,
    /// Hit, block and grab reactions
    pub combat: CombatTuning,
    /// Dash behaviour
    pub dash: DashTuning,
    /// Input windows
    pub input: BufferConfig,
    /// Boxes per posture
    pub poses: PoseTuning,
    /// Transition clip lengths
    pub transitions: TransitionTuning,
    /// Move frame data
    pub moves: MoveTable,
}

impl Default for FighterTuning {
    fn default() -> Self {
        Self {
            version: SchemaVersion::TUNING_TABLE,
            name: "basic".to_string(),
            max_health: 1000,
            physics: PhysicsTuning::default(),
            combat: CombatTuning::default(),
            dash: DashTuning::default(),
            input: BufferConfig::default(),
            poses: PoseTuning::default(),
            transitions: TransitionTuning::default(),
            moves: MoveTable::default(),
        }
    }
}

impl FighterTuning {
    /// Parses and validates a RON table.
    pub fn from_ron_str(source: &str) -> Result<Self, TuningError> {
        let tuning: Self = ron::from_str(source).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parses and validates a TOML table.
    pub fn from_toml_str(source: &str) -> Result<Self, TuningError> {
        let tuning: Self = toml::from_str(source).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Loads a table from a `.ron` or `.toml` file.
    pub fn load<P: AsRef<Path>>(path: P) -> ScuffleResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;

        let tuning = match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => Self::from_ron_str(&source)?,
            Some("toml") => Self::from_toml_str(&source)?,
            other => {
                return Err(ScuffleError::Serialization(format!(
                    "unknown tuning file extension {other:?} for {}",
                    path.display()
                )))
            },
        };

        info!("Loaded tuning `{}` from {}", tuning.name, path.display());
        Ok(tuning)
    }

    /// Serializes the table to pretty RON.
    pub fn to_ron_string(&self) -> ScuffleResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ScuffleError::Serialization(e.to_string()))
    }

    /// Rejects tables the fighter cannot run with.
    pub fn validate(&self) -> Result<(), TuningError> {
        if !SchemaVersion::TUNING_TABLE.is_compatible_with(&self.version) {
            return Err(TuningError::UnsupportedVersion {
                found: self.version.to_string(),
                supported: SchemaVersion::TUNING_TABLE.to_string(),
            });
        }
        if self.max_health <= 0 {
            return Err(TuningError::invalid("max_health", "must be positive"));
        }

        let physics = &self.physics;
        positive("physics.gravity", physics.gravity)?;
        positive("physics.jump_velocity", physics.jump_velocity)?;
        non_negative("physics.walk_speed", physics.walk_speed)?;
        non_negative("physics.back_walk_speed", physics.back_walk_speed)?;
        non_negative("physics.knockback_decel", physics.knockback_decel)?;
        non_negative("physics.ground_friction", physics.ground_friction)?;

        let combat = &self.combat;
        if !(0.0..=1.0).contains(&combat.air_hit_damping) {
            return Err(TuningError::invalid(
                "combat.air_hit_damping",
                "must be between 0 and 1",
            ));
        }
        for (field, frames) in [
            ("combat.hurt_frames", combat.hurt_frames),
            ("combat.heavy_hurt_frames", combat.heavy_hurt_frames),
            ("combat.block_frames", combat.block_frames),
            ("combat.grabbed_frames", combat.grabbed_frames),
            ("dash.forward_frames", self.dash.forward_frames),
            ("dash.back_frames", self.dash.back_frames),
            ("dash.cancel_after", self.dash.cancel_after),
            ("dash.after_image_interval", self.dash.after_image_interval),
            ("input.buffer_window", self.input.buffer_window),
            ("input.double_tap_window", self.input.double_tap_window),
        ] {
            if frames == 0 {
                return Err(TuningError::invalid(field, "must be at least one tick"));
            }
        }

        for pose in [Pose::Stand, Pose::Crouch, Pose::Air, Pose::Down] {
            let boxes = self.poses.get(pose);
            check_rect(&format!("poses.{pose:?}.collision"), boxes.collision)?;
            if !boxes.collision.is_active() {
                return Err(TuningError::invalid(
                    format!("poses.{pose:?}.collision"),
                    "collision box needs a positive area",
                ));
            }
            for rect in &boxes.hurtboxes {
                check_rect(&format!("poses.{pose:?}.hurtboxes"), *rect)?;
            }
        }

        for kind in MoveKind::ALL {
            let spec = self.moves.get(kind);
            if spec.total_frames() == 0 {
                return Err(TuningError::EmptyMove(kind.name().to_string()));
            }
            for part in &spec.parts {
                if let Some(attack) = &part.attack {
                    check_rect(&format!("moves.{}.attack", kind.name()), attack.bounds)?;
                    if attack.damage < 0 {
                        return Err(TuningError::invalid(
                            format!("moves.{}.attack.damage", kind.name()),
                            "must not be negative",
                        ));
                    }
                }
                for rect in part.hurtboxes.iter().flatten() {
                    check_rect(&format!("moves.{}.hurtboxes", kind.name()), *rect)?;
                }
            }
        }

        Ok(())
    }
}

fn positive(field: &str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::invalid(field, "must be positive"))
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::invalid(field, "must not be negative"))
    }
}

fn check_rect(field: &str, rect: Rect) -> Result<(), TuningError> {
    if rect.width < 0.0 || rect.height < 0.0 {
        Err(TuningError::invalid(field, "box extents must not be negative"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(FighterTuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_ron_round_trip() {
        let tuning = FighterTuning::default();
        let text = tuning.to_ron_string().expect("serialize");
        let back = FighterTuning::from_ron_str(&text).expect("parse");
        assert_eq!(back, tuning);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let tuning = FighterTuning::from_toml_str(
            r#"
            name = "heavy"
            max_health = 1400

            [physics]
            walk_speed = 0.04
            "#,
        )
        .expect("parse");

        assert_eq!(tuning.name, "heavy");
        assert_eq!(tuning.max_health, 1400);
        assert!((tuning.physics.walk_speed - 0.04).abs() < 1e-6);
        assert!((tuning.physics.gravity - PhysicsTuning::default().gravity).abs() < 1e-6);
        assert_eq!(tuning.moves, MoveTable::default());
    }

    #[test]
    fn test_rejects_bad_health() {
        let err = FighterTuning::from_toml_str("max_health = 0").unwrap_err();
        assert_eq!(err, TuningError::invalid("max_health", "must be positive"));
    }

    #[test]
    fn test_rejects_future_major_version() {
        let tuning = FighterTuning {
            version: SchemaVersion::new(2, 0, 0),
            ..FighterTuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_move() {
        let mut tuning = FighterTuning::default();
        tuning.moves.crouch_kick.parts.clear();
        assert_eq!(
            tuning.validate(),
            Err(TuningError::EmptyMove("crouch_kick".to_string()))
        );
    }

    #[test]
    fn test_rejects_negative_box() {
        let mut tuning = FighterTuning::default();
        tuning.poses.crouch.hurtboxes.push(Rect::new(0.0, 0.0, -1.0, 1.0));
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_tick_dash_fields() {
        let mut tuning = FighterTuning::default();
        tuning.dash.cancel_after = 0;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::invalid("dash.cancel_after", "must be at least one tick"))
        );

        let mut tuning = FighterTuning::default();
        tuning.dash.after_image_interval = 0;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::invalid(
                "dash.after_image_interval",
                "must be at least one tick"
            ))
        );
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = FighterTuning::from_ron_str("(max_health: \"lots\")").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_default_move_lengths() {
        let moves = MoveTable::default();
        assert_eq!(moves.stand_punch.total_frames(), 17);
        assert!(moves.grab.parts.iter().any(|p| p.attack.is_some_and(|a| a.grab)));
        assert!(moves
            .grab_success
            .parts
            .iter()
            .any(|p| p.attack.is_some_and(|a| a.heavy && !a.grab)));
    }
}
