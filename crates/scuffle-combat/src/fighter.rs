//! The fighter state machine.
//!
//! A [`Fighter`] owns its position, health and state. It advances once per
//! tick from buffered input and the opponent's pre-tick position, publishes
//! fresh [`HitBoxData`] every tick, and reacts to attacks the orchestrator
//! routes to it. Physics constants and move data come from its
//! [`FighterTuning`]; nothing here is shared with the opponent.

use crate::animation::{AnimationCue, Clip};
use crate::events::{FightEvent, SoundCue, VfxKind};
use crate::hitbox::OrientableHitbox;
use crate::input::{BufferedAction, InputBuffer, InputInfo};
use crate::moves::{MoveKind, MoveSet};
use crate::tuning::{FighterTuning, Pose};
use crate::types::{AttackInfo, AttackResult, Direction, HitBoxData};
use scuffle_common::{PlayerSlot, Vec2};
use std::hash::{Hash, Hasher};
use tracing::{debug, trace};

// ============================================================================
// States
// ============================================================================

/// Discrete fighter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FighterState {
    /// Standing, free to act
    #[default]
    StandIdle,
    /// Standing punch
    StandPunch,
    /// Standing kick
    StandKick,
    /// Standing block stun
    StandBlock,
    /// Standing hit stun
    StandHurt,
    /// Forward dash
    DashForward,
    /// Back dash
    DashBack,
    /// Crouching, free to act
    CrouchIdle,
    /// Crouching punch
    CrouchPunch,
    /// Crouching kick
    CrouchKick,
    /// Crouching block stun
    CrouchBlock,
    /// Crouching hit stun
    CrouchHurt,
    /// Jump squat or airborne, free to act
    JumpIdle,
    /// Air punch
    JumpPunch,
    /// Air kick
    JumpKick,
    /// Hit in the air
    JumpHurt,
    /// Grab attempt
    Grab,
    /// Held by the opponent
    Grabbed,
    /// Holding and throwing the opponent
    GrabSuccess,
    /// Thrown and lying down
    Knocked,
    /// Terminal
    Dead,
}

impl FighterState {
    /// Idle states recompute facing and accept new actions.
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::StandIdle | Self::CrouchIdle | Self::JumpIdle)
    }

    /// Move animation driving this state, if any.
    #[must_use]
    pub const fn move_kind(self) -> Option<MoveKind> {
        match self {
            Self::StandPunch => Some(MoveKind::StandPunch),
            Self::StandKick => Some(MoveKind::StandKick),
            Self::CrouchPunch => Some(MoveKind::CrouchPunch),
            Self::CrouchKick => Some(MoveKind::CrouchKick),
            Self::JumpPunch => Some(MoveKind::JumpPunch),
            Self::JumpKick => Some(MoveKind::JumpKick),
            Self::Grab => Some(MoveKind::Grab),
            Self::GrabSuccess => Some(MoveKind::GrabSuccess),
            _ => None,
        }
    }

    /// Clip shown by default in this state.
    #[must_use]
    pub const fn clip(self) -> Clip {
        match self {
            Self::StandIdle => Clip::StandIdle,
            Self::StandPunch => Clip::StandPunch,
            Self::StandKick => Clip::StandKick,
            Self::StandBlock => Clip::StandBlock,
            Self::StandHurt => Clip::StandHurt,
            Self::DashForward => Clip::DashForward,
            Self::DashBack => Clip::DashBack,
            Self::CrouchIdle => Clip::CrouchIdle,
            Self::CrouchPunch => Clip::CrouchPunch,
            Self::CrouchKick => Clip::CrouchKick,
            Self::CrouchBlock => Clip::CrouchBlock,
            Self::CrouchHurt => Clip::CrouchHurt,
            Self::JumpIdle => Clip::Jump,
            Self::JumpPunch => Clip::JumpPunch,
            Self::JumpKick => Clip::JumpKick,
            Self::JumpHurt => Clip::JumpHurt,
            Self::Grab => Clip::Grab,
            Self::Grabbed => Clip::Grabbed,
            Self::GrabSuccess => Clip::GrabSuccess,
            Self::Knocked => Clip::KnockDownGetUp,
            Self::Dead => Clip::Die,
        }
    }

    const fn is_crouched(self) -> bool {
        matches!(
            self,
            Self::CrouchIdle
                | Self::CrouchPunch
                | Self::CrouchKick
                | Self::CrouchBlock
                | Self::CrouchHurt
        )
    }
}

/// How an incoming attack is resolved, by posture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Standing,
    Crouching,
    Airborne,
    Held,
    Immune,
}

/// One-shot transition clip played on entering an idle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Intro {
    clip: Clip,
    frames: u32,
    reversed: bool,
}

impl Intro {
    fn cue(self, frame: u32) -> AnimationCue {
        let cue = AnimationCue::new(self.clip, frame);
        if self.reversed {
            cue.reversed()
        } else {
            cue
        }
    }
}

// ============================================================================
// Fighter
// ============================================================================

/// A single fighter driven by a tuning table.
#[derive(Debug, Clone)]
pub struct Fighter {
    slot: PlayerSlot,
    tuning: FighterTuning,
    moves: MoveSet,
    initialized: bool,

    health: i32,
    position: Vec2,
    velocity: Vec2,
    state: FighterState,
    state_counter: u32,
    facing: Direction,
    intro: Option<Intro>,
    stun: u32,
    airborne: bool,
    ground_frames: u32,
    walk_frame: u32,

    buffer: InputBuffer,
    ready_to_block: bool,
    attack_spent: bool,
    attack_active: bool,
    air_attack_used: bool,
    first_frame_pending: bool,

    hitboxes: HitBoxData,
    cue: AnimationCue,
    events: Vec<FightEvent>,
}

impl Fighter {
    /// Creates a fighter for `slot`. Call [`Self::init`] before ticking.
    #[must_use]
    pub fn new(slot: PlayerSlot, tuning: FighterTuning) -> Self {
        let moves = MoveSet::build(&tuning, slot);
        let buffer = InputBuffer::new(tuning.input);
        let health = tuning.max_health;

        Self {
            slot,
            tuning,
            moves,
            initialized: false,
            health,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            state: FighterState::StandIdle,
            state_counter: 0,
            facing: Direction::Forward,
            intro: None,
            stun: 0,
            airborne: false,
            ground_frames: 0,
            walk_frame: 0,
            buffer,
            ready_to_block: false,
            attack_spent: false,
            attack_active: false,
            air_attack_used: false,
            first_frame_pending: false,
            hitboxes: HitBoxData::default(),
            cue: AnimationCue::default(),
            events: Vec::new(),
        }
    }

    /// Places the fighter for a new round at full health.
    pub fn init(&mut self, position: Vec2, opponent_position: Vec2) {
        self.initialized = true;
        self.health = self.tuning.max_health;
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.facing = if opponent_position.x > position.x {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.airborne = false;
        self.ground_frames = 0;
        self.walk_frame = 0;
        self.stun = 0;
        self.buffer.reset();
        self.ready_to_block = false;
        self.attack_active = false;
        self.air_attack_used = false;
        self.first_frame_pending = false;
        self.events.clear();
        self.enter(FighterState::StandIdle);
    }

    /// Advances one tick.
    ///
    /// # Panics
    /// Panics if [`Self::init`] has not been called.
    pub fn tick(&mut self, input: &InputInfo, opponent_position: Vec2) {
        assert!(
            self.initialized,
            "fighter {} ticked before init",
            self.slot
        );

        self.buffer.update(input);
        self.state_counter += 1;
        self.ready_to_block = false;

        self.step(opponent_position);
        if self.first_frame_pending {
            self.first_frame_pending = false;
            self.step(opponent_position);
        }

        self.attack_active = self.hitboxes.attack.is_some();
    }

    fn step(&mut self, opponent_position: Vec2) {
        use FighterState as S;

        match self.state {
            S::StandIdle => self.stand_idle(opponent_position),
            S::CrouchIdle => self.crouch_idle(opponent_position),
            S::JumpIdle => self.jump_idle(opponent_position),
            S::StandPunch | S::StandKick | S::CrouchPunch | S::CrouchKick | S::Grab | S::GrabSuccess => {
                self.fixed_move();
            },
            S::JumpPunch | S::JumpKick => self.air_move(),
            S::StandBlock | S::StandHurt | S::CrouchBlock | S::CrouchHurt => self.reeling(),
            S::JumpHurt => self.air_hurt(),
            S::DashForward | S::DashBack => self.dashing(),
            S::Grabbed => self.grabbed(),
            S::Knocked => self.knocked(),
            S::Dead => self.dead(),
        }
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    fn enter(&mut self, state: FighterState) {
        if state != self.state {
            trace!(slot = %self.slot, from = ?self.state, to = ?state, "state transition");
        }
        self.state = state;
        self.state_counter = 0;
        self.intro = None;
        self.attack_spent = false;
        self.hitboxes = self.pose_boxes(self.default_pose());
        if matches!(
            state,
            FighterState::JumpHurt | FighterState::Knocked | FighterState::Dead
        ) {
            self.hitboxes.hurtboxes.clear();
        }
        self.cue = AnimationCue::new(state.clip(), 0);
    }

    fn enter_with_intro(&mut self, state: FighterState, clip: Clip, frames: u32, reversed: bool) {
        self.enter(state);
        let intro = Intro {
            clip,
            frames,
            reversed,
        };
        self.intro = Some(intro);
        self.cue = intro.cue(0);
    }

    /// Enters an action state chosen from idle; its first frame runs this tick.
    fn begin_action(&mut self, state: FighterState) {
        self.enter(state);
        self.first_frame_pending = true;
    }

    fn active_intro(&self) -> Option<Intro> {
        self.intro.filter(|intro| self.state_counter < intro.frames)
    }

    fn default_pose(&self) -> Pose {
        match self.state {
            s if s.is_crouched() => Pose::Crouch,
            FighterState::Knocked | FighterState::Dead if !self.airborne => Pose::Down,
            _ if self.airborne => Pose::Air,
            _ => Pose::Stand,
        }
    }

    fn pose_boxes(&self, pose: Pose) -> HitBoxData {
        let data = self.tuning.poses.get(pose).hitbox_data();
        let data = match pose {
            Pose::Down => data.invulnerable(),
            _ => data,
        };
        OrientableHitbox::new(data).oriented(self.facing).clone()
    }

    fn set_pose(&mut self, pose: Pose) {
        self.hitboxes = self.pose_boxes(pose);
    }

    fn face(&mut self, opponent_position: Vec2) {
        let dx = opponent_position.x - self.position.x;
        if dx != 0.0 {
            self.facing = Direction::from_sign(dx);
        }
    }

    fn holding_back(&self) -> bool {
        self.buffer.horizontal().relative_to(self.facing) == Direction::Backward
    }

    fn emit(&mut self, event: FightEvent) {
        self.events.push(event);
    }

    fn sound(&mut self, cue: SoundCue) {
        self.emit(FightEvent::sound(self.slot, cue));
    }

    fn try_attack(&mut self, punch: FighterState, kick: FighterState, allow_grab: bool) -> bool {
        if allow_grab && self.buffer.take(BufferedAction::Grab) {
            self.begin_action(FighterState::Grab);
            self.sound(SoundCue::Whiff);
        } else if self.buffer.take(BufferedAction::Punch) {
            self.begin_action(punch);
            self.sound(SoundCue::Punch);
        } else if self.buffer.take(BufferedAction::Kick) {
            self.begin_action(kick);
            self.sound(SoundCue::Kick);
        } else {
            return false;
        }
        true
    }

    // ------------------------------------------------------------------------
    // Physics
    // ------------------------------------------------------------------------

    /// Applies gravity and velocity. Returns true on touching the ground.
    fn integrate_air(&mut self) -> bool {
        self.velocity.y -= self.tuning.physics.gravity;
        self.position += self.velocity;

        if self.position.y <= 0.0 && self.velocity.y <= 0.0 {
            self.position.y = 0.0;
            self.velocity.y = 0.0;
            true
        } else {
            false
        }
    }

    fn slide(&mut self, decel: f32) {
        self.position.x += self.velocity.x;
        let speed = (self.velocity.x.abs() - decel).max(0.0);
        self.velocity.x = speed.copysign(self.velocity.x);
    }

    fn land(&mut self) {
        self.airborne = false;
        self.position.y = 0.0;
        self.velocity = Vec2::ZERO;
        let frames = self.tuning.transitions.land_frames;
        self.enter_with_intro(FighterState::StandIdle, Clip::Jump, frames, true);
        self.sound(SoundCue::Land);
        self.emit(FightEvent::Vfx {
            kind: VfxKind::Dust,
            position: self.position,
            facing: self.facing,
        });
    }

    // ------------------------------------------------------------------------
    // State handlers
    // ------------------------------------------------------------------------

    fn stand_idle(&mut self, opponent_position: Vec2) {
        self.face(opponent_position);
        self.velocity = Vec2::ZERO;
        self.set_pose(Pose::Stand);
        self.ready_to_block = self.holding_back();

        if let Some(intro) = self.active_intro() {
            self.cue = intro.cue(self.state_counter);
            return;
        }

        let dash = self.buffer.dash().relative_to(self.facing);
        if dash != Direction::None {
            self.buffer.consume_dash();
            let state = match dash {
                Direction::Forward => FighterState::DashForward,
                _ => FighterState::DashBack,
            };
            self.begin_action(state);
            self.sound(SoundCue::Dash);
            return;
        }

        if self.try_attack(FighterState::StandPunch, FighterState::StandKick, true) {
            return;
        }

        if self.buffer.take(BufferedAction::Jump) {
            let frames = self.tuning.transitions.jump_squat_frames;
            self.enter_with_intro(FighterState::JumpIdle, Clip::Jump, frames, false);
            // drift is locked in at the press, applied at takeoff
            let drift = self.buffer.horizontal().sign() * self.tuning.physics.jump_drift;
            self.velocity = Vec2::new(drift, 0.0);
            return;
        }

        if self.buffer.crouch() {
            let frames = self.tuning.transitions.crouch_frames;
            self.enter_with_intro(FighterState::CrouchIdle, Clip::CrouchTransition, frames, false);
            return;
        }

        let physics = self.tuning.physics;
        match self.buffer.horizontal().relative_to(self.facing) {
            Direction::Forward => {
                self.position.x += self.facing.sign() * physics.walk_speed;
                self.walk_frame += 1;
                self.cue = AnimationCue::new(Clip::Walk, self.walk_frame);
            },
            Direction::Backward => {
                self.position.x -= self.facing.sign() * physics.back_walk_speed;
                self.walk_frame += 1;
                self.cue = AnimationCue::new(Clip::Walk, self.walk_frame).reversed();
            },
            Direction::None => {
                self.cue = AnimationCue::new(Clip::StandIdle, self.state_counter);
            },
        }
    }

    fn crouch_idle(&mut self, opponent_position: Vec2) {
        self.face(opponent_position);
        self.velocity = Vec2::ZERO;
        self.set_pose(Pose::Crouch);
        self.ready_to_block = self.holding_back();

        if let Some(intro) = self.active_intro() {
            self.cue = intro.cue(self.state_counter);
            return;
        }

        if !self.buffer.crouch() {
            let frames = self.tuning.transitions.crouch_frames;
            self.enter_with_intro(FighterState::StandIdle, Clip::CrouchTransition, frames, true);
            return;
        }

        if self.try_attack(FighterState::CrouchPunch, FighterState::CrouchKick, false) {
            return;
        }

        self.cue = AnimationCue::new(Clip::CrouchIdle, self.state_counter);
    }

    fn jump_idle(&mut self, opponent_position: Vec2) {
        self.face(opponent_position);

        if !self.airborne {
            self.set_pose(Pose::Stand);
            if let Some(intro) = self.active_intro() {
                self.cue = intro.cue(self.state_counter);
                return;
            }

            self.velocity.y = self.tuning.physics.jump_velocity;
            self.airborne = true;
            self.air_attack_used = false;
            self.sound(SoundCue::Jump);
        }

        if self.integrate_air() {
            self.land();
            return;
        }
        self.set_pose(Pose::Air);

        if !self.air_attack_used {
            let next = if self.buffer.take(BufferedAction::Punch) {
                Some((FighterState::JumpPunch, SoundCue::Punch))
            } else if self.buffer.take(BufferedAction::Kick) {
                Some((FighterState::JumpKick, SoundCue::Kick))
            } else {
                None
            };
            if let Some((state, cue)) = next {
                self.air_attack_used = true;
                // already moved this tick
                self.enter(state);
                self.sound(cue);
                self.play_move_frame();
                return;
            }
        }

        self.cue = AnimationCue::new(Clip::Jump, self.state_counter);
    }

    /// Applies the current move frame's boxes, sprite and displacement.
    fn play_move_frame(&mut self) {
        let Some(kind) = self.state.move_kind() else {
            return;
        };
        let anim = self.moves.get(kind);
        let frame = self.state_counter;
        let mut hitboxes = anim.hitbox_at_frame(frame).oriented(self.facing).clone();
        let movement = anim.movement_at_frame(frame);
        let sprite = anim.sprite_at_frame(frame);

        if self.attack_spent {
            hitboxes.attack = None;
        }
        self.hitboxes = hitboxes;
        self.position += Vec2::new(movement.x * self.facing.sign(), movement.y);
        self.cue = AnimationCue::new(kind.clip(), frame).with_sprite(sprite);
    }

    fn move_over(&self) -> bool {
        self.state
            .move_kind()
            .map_or(true, |kind| self.moves.get(kind).is_over(self.state_counter))
    }

    fn fixed_move(&mut self) {
        if self.move_over() {
            let next = if self.state.is_crouched() {
                FighterState::CrouchIdle
            } else {
                FighterState::StandIdle
            };
            self.enter(next);
            return;
        }

        self.slide(self.tuning.physics.knockback_decel);
        self.play_move_frame();
    }

    fn air_move(&mut self) {
        if self.integrate_air() {
            self.land();
            return;
        }
        if self.move_over() {
            self.enter(FighterState::JumpIdle);
            return;
        }
        self.play_move_frame();
    }

    fn reeling(&mut self) {
        let crouched = self.state.is_crouched();
        self.set_pose(if crouched { Pose::Crouch } else { Pose::Stand });
        self.slide(self.tuning.physics.knockback_decel);

        if matches!(self.state, FighterState::StandBlock | FighterState::CrouchBlock) {
            self.ready_to_block = self.holding_back();
        }
        self.cue = AnimationCue::new(self.state.clip(), self.state_counter);

        if self.state_counter >= self.stun {
            self.velocity = Vec2::ZERO;
            self.enter(if crouched {
                FighterState::CrouchIdle
            } else {
                FighterState::StandIdle
            });
        }
    }

    fn air_hurt(&mut self) {
        if self.integrate_air() {
            self.land();
            return;
        }
        self.hitboxes = self.pose_boxes(Pose::Air).invulnerable();
        self.cue = AnimationCue::new(Clip::JumpHurt, self.state_counter);
    }

    fn dashing(&mut self) {
        let dash = self.tuning.dash;
        let (dir, speed, frames) = match self.state {
            FighterState::DashForward => (self.facing, dash.forward_speed, dash.forward_frames),
            _ => (self.facing.flip(), dash.back_speed, dash.back_frames),
        };

        if self.state_counter >= frames {
            self.enter(FighterState::StandIdle);
            return;
        }
        if self.state_counter >= dash.cancel_after
            && self.try_attack(FighterState::StandPunch, FighterState::StandKick, true)
        {
            return;
        }

        self.position.x += dir.sign() * speed;
        self.set_pose(Pose::Stand);
        self.cue = AnimationCue::new(self.state.clip(), self.state_counter);

        if self.state_counter % dash.after_image_interval == 0 {
            self.emit(FightEvent::AfterImage {
                slot: self.slot,
                position: self.position,
                cue: self.cue,
            });
        }
    }

    fn grabbed(&mut self) {
        self.set_pose(Pose::Stand);
        self.slide(self.tuning.physics.knockback_decel);
        self.cue = AnimationCue::new(Clip::Grabbed, self.state_counter);

        if self.state_counter >= self.tuning.combat.grabbed_frames {
            self.release_grab();
        }
    }

    fn knocked(&mut self) {
        if self.airborne {
            if self.integrate_air() {
                self.airborne = false;
                self.ground_frames = 0;
                self.sound(SoundCue::Land);
                self.emit(FightEvent::Vfx {
                    kind: VfxKind::Dust,
                    position: self.position,
                    facing: self.facing,
                });
            }
            self.hitboxes = self.pose_boxes(Pose::Air).invulnerable();
            self.cue = AnimationCue::new(Clip::KnockDownGetUp, 0);
            return;
        }

        self.set_pose(Pose::Down);
        self.slide(self.tuning.physics.ground_friction);
        self.ground_frames += 1;
        self.cue = AnimationCue::new(Clip::KnockDownGetUp, self.ground_frames);

        let transitions = self.tuning.transitions;
        if self.ground_frames >= self.tuning.combat.knockdown_frames + transitions.get_up_frames {
            self.velocity = Vec2::ZERO;
            self.enter(FighterState::StandIdle);
        }
    }

    fn dead(&mut self) {
        if self.airborne {
            if self.integrate_air() {
                self.airborne = false;
            }
            self.hitboxes = self.pose_boxes(Pose::Air).invulnerable();
        } else {
            self.slide(self.tuning.physics.ground_friction);
            self.set_pose(Pose::Down);
        }
        self.cue = AnimationCue::new(Clip::Die, self.state_counter);
    }

    // ------------------------------------------------------------------------
    // Attack resolution
    // ------------------------------------------------------------------------

    fn bucket(&self) -> Bucket {
        use FighterState as S;

        match self.state {
            S::Knocked | S::Dead => Bucket::Immune,
            S::Grabbed => Bucket::Held,
            S::JumpPunch | S::JumpKick | S::JumpHurt => Bucket::Airborne,
            S::JumpIdle if self.airborne => Bucket::Airborne,
            s if s.is_crouched() => Bucket::Crouching,
            _ => Bucket::Standing,
        }
    }

    /// Resolves an attack that overlapped this fighter's hurtboxes.
    pub fn on_hit_by_attack(&mut self, attack: &AttackInfo) -> AttackResult {
        let before = self.state;
        let result = if attack.is_grab {
            self.resolve_grab(attack)
        } else {
            self.resolve_strike(attack)
        };

        debug!(
            slot = %self.slot,
            from = %attack.from,
            ?result,
            state = ?before,
            health = self.health,
            "attack resolved"
        );
        result
    }

    fn resolve_strike(&mut self, attack: &AttackInfo) -> AttackResult {
        match self.bucket() {
            Bucket::Standing => self.strike_grounded(attack, false),
            Bucket::Crouching => self.strike_grounded(attack, true),
            Bucket::Airborne => self.strike_airborne(attack),
            Bucket::Held => self.thrown(attack),
            Bucket::Immune => AttackResult::None,
        }
    }

    fn strike_grounded(&mut self, attack: &AttackInfo, crouched: bool) -> AttackResult {
        let combat = self.tuning.combat;
        let blockable = if crouched {
            attack.attack_type.blockable_crouching()
        } else {
            attack.attack_type.blockable_standing()
        };

        if self.ready_to_block && blockable {
            self.enter(if crouched {
                FighterState::CrouchBlock
            } else {
                FighterState::StandBlock
            });
            self.stun = combat.block_frames;
            self.velocity = Vec2::new(attack.direction.sign() * combat.block_knockback, 0.0);
            self.sound(SoundCue::Block);
            return AttackResult::Blocked;
        }

        if self.take_damage(attack) {
            return AttackResult::Hit;
        }

        self.enter(if crouched {
            FighterState::CrouchHurt
        } else {
            FighterState::StandHurt
        });
        self.airborne = false;
        self.stun = if attack.is_heavy {
            combat.heavy_hurt_frames
        } else {
            combat.hurt_frames
        };
        self.velocity = Vec2::new(attack.direction.sign() * combat.hit_knockback, 0.0);
        AttackResult::Hit
    }

    fn strike_airborne(&mut self, attack: &AttackInfo) -> AttackResult {
        if self.take_damage(attack) {
            return AttackResult::Hit;
        }

        let combat = self.tuning.combat;
        self.airborne = true;
        self.enter(FighterState::JumpHurt);
        self.velocity.x = attack.direction.sign() * combat.air_hit_knockback;
        if self.velocity.y > 0.0 {
            self.velocity.y *= combat.air_hit_damping;
        }
        AttackResult::Hit
    }

    fn thrown(&mut self, attack: &AttackInfo) -> AttackResult {
        if self.take_damage(attack) {
            return AttackResult::Hit;
        }

        let impulse = self.tuning.combat.knock_impulse;
        self.airborne = true;
        self.enter(FighterState::Knocked);
        self.ground_frames = 0;
        self.velocity = Vec2::new(attack.direction.sign() * impulse.x, impulse.y);
        self.sound(SoundCue::Throw);
        AttackResult::Hit
    }

    fn resolve_grab(&mut self, attack: &AttackInfo) -> AttackResult {
        use FighterState as S;

        let combat = self.tuning.combat;
        match self.state {
            S::Grab if self.attack_active => {
                // trade: both grabbers bounce off, nobody is held
                self.velocity.x = attack.direction.sign() * combat.grab_trade_knockback;
                AttackResult::Blocked
            },
            S::StandIdle
            | S::CrouchIdle
            | S::StandPunch
            | S::StandKick
            | S::CrouchPunch
            | S::CrouchKick
            | S::DashForward
            | S::DashBack
            | S::Grab => self.grabbed_by(attack),
            S::JumpIdle if !self.airborne => self.grabbed_by(attack),
            _ => AttackResult::None,
        }
    }

    fn grabbed_by(&mut self, attack: &AttackInfo) -> AttackResult {
        self.enter(FighterState::Grabbed);
        self.airborne = false;
        self.velocity = Vec2::new(-attack.direction.sign() * self.tuning.combat.grab_pull, 0.0);
        self.sound(SoundCue::Grab);
        AttackResult::Hit
    }

    /// Applies damage and kills the fighter at zero health.
    /// Returns true if the hit was fatal.
    fn take_damage(&mut self, attack: &AttackInfo) -> bool {
        let before = self.health;
        self.health = (self.health - attack.damage.max(0)).max(0);

        let delta = self.health - before;
        if delta != 0 {
            self.emit(FightEvent::HealthChanged {
                slot: self.slot,
                delta,
                current: self.health,
                max: self.tuning.max_health,
            });
        }
        self.sound(if attack.is_heavy {
            SoundCue::HeavyHit
        } else {
            SoundCue::Hit
        });

        if self.health > 0 {
            return false;
        }

        let away = match attack.direction {
            Direction::None => self.facing.flip(),
            dir => dir,
        };
        let impulse = self.tuning.combat.death_impulse;
        debug!(slot = %self.slot, "fighter died");

        self.airborne = true;
        self.enter(FighterState::Dead);
        self.velocity = Vec2::new(away.sign() * impulse.x, impulse.y);
        self.sound(SoundCue::Death);
        true
    }

    /// Lets a grabbed fighter go. Does nothing in any other state.
    pub fn release_grab(&mut self) {
        if self.state != FighterState::Grabbed {
            return;
        }
        debug!(slot = %self.slot, "released from grab");
        self.velocity = Vec2::ZERO;
        self.enter(FighterState::StandIdle);
    }

    /// Told by the orchestrator how this fighter's attack resolved.
    pub fn on_attack_landed(&mut self, result: AttackResult) {
        if !result.connected() {
            return;
        }
        self.attack_spent = true;

        if self.state != FighterState::Grab {
            return;
        }
        match result {
            AttackResult::Hit => self.enter(FighterState::GrabSuccess),
            AttackResult::Blocked => {
                let push = self.tuning.combat.grab_blocked_pushback;
                let away = -self.facing.sign();
                self.velocity.x = away * push.max(self.velocity.x.abs());
            },
            AttackResult::None => {},
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Player slot.
    #[must_use]
    pub fn slot(&self) -> PlayerSlot {
        self.slot
    }

    /// Current health, never negative.
    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Maximum health from the tuning table.
    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.tuning.max_health
    }

    /// Ground-contact point in world space.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Moves the fighter; used by the separation pass.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FighterState {
        self.state
    }

    /// Ticks since the current state was entered.
    #[must_use]
    pub fn state_counter(&self) -> u32 {
        self.state_counter
    }

    /// World-space facing; `Forward` faces +x.
    #[must_use]
    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Boxes for this tick, relative to [`Self::position`].
    #[must_use]
    pub fn hitboxes(&self) -> &HitBoxData {
        &self.hitboxes
    }

    /// Clip and frame to display.
    #[must_use]
    pub fn animation_cue(&self) -> AnimationCue {
        self.cue
    }

    /// Whether an incoming strike would be blocked this tick.
    #[must_use]
    pub fn is_ready_to_block(&self) -> bool {
        self.ready_to_block
    }

    /// Whether this fighter's attack box was live at the end of its tick.
    #[must_use]
    pub fn is_attack_active(&self) -> bool {
        self.attack_active
    }

    /// Whether the fighter is off the ground.
    #[must_use]
    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    /// Whether [`Self::init`] has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Walk cycle counter.
    #[must_use]
    pub fn walk_frame(&self) -> u32 {
        self.walk_frame
    }

    /// Tuning table in use.
    #[must_use]
    pub fn tuning(&self) -> &FighterTuning {
        &self.tuning
    }

    /// Takes the events queued since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, FightEvent> {
        self.events.drain(..)
    }

    /// Feeds every simulation field into `state`.
    pub fn hash_state<H: Hasher>(&self, state: &mut H) {
        self.slot.hash(state);
        self.health.hash(state);
        for value in [self.position, self.velocity] {
            value.x.to_bits().hash(state);
            value.y.to_bits().hash(state);
        }
        self.state.hash(state);
        self.state_counter.hash(state);
        self.facing.hash(state);
        self.intro.hash(state);
        self.stun.hash(state);
        self.airborne.hash(state);
        self.ground_frames.hash(state);
        self.walk_frame.hash(state);
        self.buffer.hash(state);
        self.ready_to_block.hash(state);
        self.attack_spent.hash(state);
        self.attack_active.hash(state);
        self.air_attack_used.hash(state);
    }
}
