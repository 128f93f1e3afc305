//! Fight orchestration: the fixed-tick loop over two fighters.
//!
//! Each tick snapshots both positions, advances both fighters against the
//! snapshot, separates their collision boxes inside the walls, routes attack
//! boxes that overlap hurtboxes, and latches the round result.

use crate::events::{FightEvent, VfxKind};
use crate::fighter::{Fighter, FighterState};
use crate::input::InputInfo;
use crate::tuning::FighterTuning;
use crate::types::{AttackInfo, AttackResult, RoundResult};
use scuffle_common::{translate, PlayerSlot, Rect, TuningError, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{debug, info};

/// Orchestrator tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Distance from the center to each arena edge
    pub half_width: f32,
    /// Widest gap allowed between the walls that follow the fighters
    pub max_separation: f32,
    /// Fastest two overlapping fighters are pushed apart per tick
    pub max_separation_speed: f32,
    /// Start distance of each fighter from the center
    pub start_offset: f32,
    /// Freeze after a hit
    pub hit_freeze_frames: u32,
    /// Freeze after a heavy hit
    pub heavy_freeze_frames: u32,
    /// Freeze after a block
    pub block_freeze_frames: u32,
    /// Playback rate once the round is decided
    pub slow_motion_rate: f32,
    /// Length of the slow motion, in simulation ticks
    pub slow_motion_ticks: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            half_width: 5.0,
            max_separation: 4.0,
            max_separation_speed: 0.14,
            start_offset: 1.5,
            hit_freeze_frames: 5,
            heavy_freeze_frames: 9,
            block_freeze_frames: 3,
            slow_motion_rate: 0.3,
            slow_motion_ticks: 90,
        }
    }
}

impl ArenaConfig {
    /// Rejects arenas the separation pass cannot work in.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.half_width <= 0.0 {
            return Err(TuningError::invalid("arena.half_width", "must be positive"));
        }
        if self.max_separation <= 0.0 {
            return Err(TuningError::invalid("arena.max_separation", "must be positive"));
        }
        if self.max_separation_speed <= 0.0 {
            return Err(TuningError::invalid(
                "arena.max_separation_speed",
                "must be positive",
            ));
        }
        if self.start_offset < 0.0 || self.start_offset > self.half_width {
            return Err(TuningError::invalid(
                "arena.start_offset",
                "must lie inside the arena",
            ));
        }
        if !(self.slow_motion_rate > 0.0 && self.slow_motion_rate <= 1.0) {
            return Err(TuningError::invalid(
                "arena.slow_motion_rate",
                "must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SlowMotion {
    rate: f32,
    remaining: u32,
}

/// Runs a round between two fighters.
#[derive(Debug, Clone)]
pub struct FightManager {
    config: ArenaConfig,
    fighters: [Fighter; 2],
    left_wall: f32,
    right_wall: f32,
    freeze_frames: u32,
    slow_motion: Option<SlowMotion>,
    result: Option<RoundResult>,
    running: bool,
    ticks: u64,
    events: Vec<FightEvent>,
}

impl FightManager {
    /// Creates a manager. Call [`Self::reset_game`] before ticking.
    #[must_use]
    pub fn new(config: ArenaConfig, p1: FighterTuning, p2: FighterTuning) -> Self {
        Self {
            config,
            fighters: [Fighter::new(PlayerSlot::P1, p1), Fighter::new(PlayerSlot::P2, p2)],
            left_wall: -config.half_width,
            right_wall: config.half_width,
            freeze_frames: 0,
            slow_motion: None,
            result: None,
            running: false,
            ticks: 0,
            events: Vec::new(),
        }
    }

    /// Puts both fighters at their start marks and clears round state.
    pub fn reset_game(&mut self) {
        let p1 = Vec2::new(-self.config.start_offset, 0.0);
        let p2 = Vec2::new(self.config.start_offset, 0.0);
        self.fighters[0].init(p1, p2);
        self.fighters[1].init(p2, p1);

        self.freeze_frames = 0;
        self.slow_motion = None;
        self.result = None;
        self.running = false;
        self.ticks = 0;
        self.events.clear();
        self.update_walls();
        debug!("fight reset");
    }

    /// Hands control to the inputs.
    pub fn start_fight(&mut self) {
        self.running = true;
        debug!("fight started");
    }

    /// Advances one fixed tick and returns the intents it produced.
    ///
    /// Inputs are ignored before [`Self::start_fight`] and after the round
    /// resolves.
    ///
    /// # Panics
    /// Panics if [`Self::reset_game`] has not been called.
    pub fn tick(&mut self, inputs: [InputInfo; 2]) -> Vec<FightEvent> {
        self.ticks += 1;

        if self.freeze_frames > 0 {
            self.freeze_frames -= 1;
            return std::mem::take(&mut self.events);
        }

        let inputs = if self.running && self.result.is_none() {
            inputs
        } else {
            [InputInfo::NEUTRAL; 2]
        };

        let p1_pos = self.fighters[0].position();
        let p2_pos = self.fighters[1].position();
        self.fighters[0].tick(&inputs[0], p2_pos);
        self.fighters[1].tick(&inputs[1], p1_pos);

        self.separate();
        self.process_hits();
        self.release_unheld();
        self.check_round();
        self.update_walls();

        if let Some(slow) = &mut self.slow_motion {
            slow.remaining = slow.remaining.saturating_sub(1);
            if slow.remaining == 0 {
                self.slow_motion = None;
            }
        }

        let mut events = std::mem::take(&mut self.events);
        for fighter in &mut self.fighters {
            events.extend(fighter.drain_events());
        }
        events
    }

    // ------------------------------------------------------------------------
    // Separation
    // ------------------------------------------------------------------------

    fn world_box(fighter: &Fighter) -> Rect {
        translate(fighter.hitboxes().collision_box, fighter.position())
    }

    fn separate(&mut self) {
        let (left_wall, right_wall) = (self.left_wall, self.right_wall);

        for fighter in &mut self.fighters {
            let body = Self::world_box(fighter);
            let mut pos = fighter.position();
            pos.y = pos.y.max(0.0);

            let from_left = body.x_min() - left_wall;
            let from_right = body.x_max() - right_wall;
            if from_left < 0.0 {
                pos.x -= from_left;
            } else if from_right > 0.0 {
                pos.x -= from_right;
            }
            fighter.set_position(pos);
        }

        let r1 = Self::world_box(&self.fighters[0]);
        let r2 = Self::world_box(&self.fighters[1]);
        if !r1.overlaps(&r2) {
            return;
        }

        let (left, right) = if r1.center_x() <= r2.center_x() {
            (0, 1)
        } else {
            (1, 0)
        };
        let (left_rect, right_rect) = if left == 0 { (r1, r2) } else { (r2, r1) };

        let separation =
            (left_rect.x_max() - right_rect.x_min()).min(self.config.max_separation_speed);
        let mut left_offset = -separation * 0.5;
        let mut right_offset = separation * 0.5;

        let from_left = left_rect.x_min() + left_offset - left_wall;
        let from_right = right_rect.x_max() + right_offset - right_wall;
        if from_left < 0.0 {
            left_offset -= from_left;
            right_offset -= from_left;
        } else if from_right > 0.0 {
            left_offset -= from_right;
            right_offset -= from_right;
        }

        let shift = |fighter: &mut Fighter, dx: f32| {
            let pos = fighter.position();
            fighter.set_position(Vec2::new(pos.x + dx, pos.y));
        };
        shift(&mut self.fighters[left], left_offset);
        shift(&mut self.fighters[right], right_offset);
    }

    /// Walls for the next tick: the arena edges, tightened to a window
    /// centred between the fighters.
    fn update_walls(&mut self) {
        let center = (self.fighters[0].position().x + self.fighters[1].position().x) * 0.5;
        let half_window = self.config.max_separation * 0.5;
        self.left_wall = (center - half_window).max(-self.config.half_width);
        self.right_wall = (center + half_window).min(self.config.half_width);
    }

    // ------------------------------------------------------------------------
    // Hits
    // ------------------------------------------------------------------------

    /// The attack `attacker` lands on `defender` this tick, if any.
    fn attack_on(&self, attacker: usize, defender: usize) -> Option<AttackInfo> {
        let from = &self.fighters[attacker];
        let target = &self.fighters[defender];
        let attack = from.hitboxes().attack?;

        let reach = translate(attack.bounds, from.position() - target.position());
        target
            .hitboxes()
            .hurtboxes
            .iter()
            .any(|hurtbox| reach.overlaps(hurtbox))
            .then_some(attack)
    }

    fn process_hits(&mut self) {
        // both decided before either defender reacts
        let incoming = [self.attack_on(1, 0), self.attack_on(0, 1)];
        let mut results = [AttackResult::None; 2];

        for (defender, attack) in incoming.iter().enumerate() {
            if let Some(attack) = attack {
                results[defender] = self.fighters[defender].on_hit_by_attack(attack);
            }
        }

        let mut freeze = 0;
        for (defender, attack) in incoming.iter().enumerate() {
            let Some(attack) = attack else {
                continue;
            };
            let attacker = 1 - defender;
            let result = results[defender];
            self.fighters[attacker].on_attack_landed(result);

            let kind = match result {
                AttackResult::Hit if attack.is_heavy => VfxKind::HeavyHit,
                AttackResult::Hit => VfxKind::Hit,
                AttackResult::Blocked => VfxKind::Block,
                AttackResult::None => continue,
            };
            freeze = freeze.max(match kind {
                VfxKind::HeavyHit => self.config.heavy_freeze_frames,
                VfxKind::Block => self.config.block_freeze_frames,
                _ => self.config.hit_freeze_frames,
            });
            self.events.push(FightEvent::Vfx {
                kind,
                position: self.fighters[attacker].position() + attack.visual_offset,
                facing: attack.direction,
            });
        }

        if freeze > 0 {
            self.freeze_frames = freeze;
            self.events.push(FightEvent::FreezeFrame { ticks: freeze });
        }
    }

    /// A grabber struck on the tick its grab lands never reaches
    /// `GrabSuccess`, so nobody holds its victim.
    fn release_unheld(&mut self) {
        for (held, holder) in [(0, 1), (1, 0)] {
            if self.fighters[held].state() == FighterState::Grabbed
                && self.fighters[holder].state() != FighterState::GrabSuccess
            {
                self.fighters[held].release_grab();
            }
        }
    }

    fn check_round(&mut self) {
        if self.result.is_some() {
            return;
        }
        let Some(result) =
            RoundResult::from_health(self.fighters[0].health(), self.fighters[1].health())
        else {
            return;
        };

        info!(?result, tick = self.ticks, "round resolved");
        self.result = Some(result);
        self.events.push(FightEvent::RoundEnded { result });

        let rate = self.config.slow_motion_rate;
        let ticks = self.config.slow_motion_ticks;
        if ticks > 0 {
            self.slow_motion = Some(SlowMotion {
                rate,
                remaining: ticks,
            });
            self.events.push(FightEvent::SlowMotion { rate, ticks });
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// A fighter by slot.
    #[must_use]
    pub fn fighter(&self, slot: PlayerSlot) -> &Fighter {
        &self.fighters[slot.index()]
    }

    /// Both fighters, P1 first.
    #[must_use]
    pub fn fighters(&self) -> &[Fighter; 2] {
        &self.fighters
    }

    /// Current wall positions.
    #[must_use]
    pub fn walls(&self) -> (f32, f32) {
        (self.left_wall, self.right_wall)
    }

    /// The latched round result.
    #[must_use]
    pub fn result(&self) -> Option<RoundResult> {
        self.result
    }

    /// Whether the round has been decided.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }

    /// Whether inputs are being applied.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks of freeze left.
    #[must_use]
    pub fn freeze_frames(&self) -> u32 {
        self.freeze_frames
    }

    /// Ticks since the last reset, frozen ones included.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Orchestrator tunables.
    #[must_use]
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Playback rate the driver should pace ticks at.
    #[must_use]
    pub fn time_scale(&self) -> f32 {
        self.slow_motion.map_or(1.0, |slow| slow.rate)
    }

    /// Hash of every simulation field, for determinism checks.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for fighter in &self.fighters {
            fighter.hash_state(&mut hasher);
        }
        self.left_wall.to_bits().hash(&mut hasher);
        self.right_wall.to_bits().hash(&mut hasher);
        self.freeze_frames.hash(&mut hasher);
        if let Some(slow) = self.slow_motion {
            slow.rate.to_bits().hash(&mut hasher);
            slow.remaining.hash(&mut hasher);
        }
        self.result.hash(&mut hasher);
        self.running.hash(&mut hasher);
        self.ticks.hash(&mut hasher);
        hasher.finish()
    }
}
