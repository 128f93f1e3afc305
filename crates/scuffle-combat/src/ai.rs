//! Scripted AI opponent.
//!
//! The AI produces the same [`InputInfo`] a human controller does. Each time
//! it is free to decide, it gathers a pool of scripted reactions gated by the
//! opponent's state and distance, samples one, and plays its macro out tick
//! by tick. With nothing sampled it drifts toward a preferred range.
//!
//! Macros are whitespace-separated, case-insensitive tokens:
//!
//! | token | meaning |
//! |---|---|
//! | `ml` `mr` `mt` `ma` `ms` | move left, right, toward, away, stop |
//! | `c` `uc` `cb` | crouch, uncrouch, crouch-block |
//! | `p` `k` `g` | punch, kick, grab |
//! | `ju` `jl` `jr` `jt` `ja` | jump up, left, right, toward, away |
//! | `wN` | hold the current stick for N ticks |
//! | `dX` | dash in direction X (`ms mX ms mX`) |

use crate::fight::FightManager;
use crate::fighter::{Fighter, FighterState};
use crate::input::InputInfo;
use scuffle_common::{PlayerSlot, Vec2};
use std::collections::VecDeque;
use thiserror::Error;
use tracing::{trace, warn};

/// A macro token that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// Not a known command
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// `w` without a valid count
    #[error("invalid wait command `{0}`")]
    InvalidWait(String),
    /// `d` without a valid direction
    #[error("invalid dash command `{0}`")]
    InvalidDash(String),
}

/// One tick of scripted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Act {
    /// Move left
    MoveLeft,
    /// Move right
    MoveRight,
    /// Move toward the opponent
    MoveToward,
    /// Move away from the opponent
    MoveAway,
    /// Release the stick
    MoveStop,
    /// Hold down
    Crouch,
    /// Release down
    Uncrouch,
    /// Hold down and away
    CrouchBlock,
    /// Press kick
    Kick,
    /// Press punch
    Punch,
    /// Press grab
    Grab,
    /// Jump straight up
    JumpUp,
    /// Jump left
    JumpLeft,
    /// Jump right
    JumpRight,
    /// Jump toward the opponent
    JumpToward,
    /// Jump away from the opponent
    JumpAway,
    /// Keep the stick as it is
    Wait,
}

/// Parses one token into the ticks it expands to.
pub fn parse_token(token: &str) -> Result<Vec<Act>, ScriptError> {
    let token = token.to_ascii_lowercase();

    let simple = match token.as_str() {
        "ml" => Some(Act::MoveLeft),
        "mr" => Some(Act::MoveRight),
        "mt" => Some(Act::MoveToward),
        "ma" => Some(Act::MoveAway),
        "ms" => Some(Act::MoveStop),
        "c" => Some(Act::Crouch),
        "uc" => Some(Act::Uncrouch),
        "cb" => Some(Act::CrouchBlock),
        "k" => Some(Act::Kick),
        "p" => Some(Act::Punch),
        "g" => Some(Act::Grab),
        "ju" => Some(Act::JumpUp),
        "jl" => Some(Act::JumpLeft),
        "jr" => Some(Act::JumpRight),
        "jt" => Some(Act::JumpToward),
        "ja" => Some(Act::JumpAway),
        _ => None,
    };
    if let Some(act) = simple {
        return Ok(vec![act]);
    }

    if let Some(count) = token.strip_prefix('w') {
        let count: usize = count
            .parse()
            .map_err(|_| ScriptError::InvalidWait(token.clone()))?;
        return Ok(vec![Act::Wait; count]);
    }

    if let Some(dir) = token.strip_prefix('d') {
        let step = match dir {
            "l" => Act::MoveLeft,
            "r" => Act::MoveRight,
            "t" => Act::MoveToward,
            "a" => Act::MoveAway,
            _ => return Err(ScriptError::InvalidDash(token.clone())),
        };
        return Ok(vec![Act::MoveStop, step, Act::MoveStop, step]);
    }

    Err(ScriptError::UnknownCommand(token))
}

/// Parses a macro, logging and skipping malformed tokens.
pub fn parse_script(script: &str) -> Vec<Act> {
    let mut acts = Vec::new();
    for token in script.split_whitespace() {
        match parse_token(token) {
            Ok(expanded) => acts.extend(expanded),
            Err(e) => warn!(script, "skipping AI token: {e}"),
        }
    }
    acts
}

// ============================================================================
// Move Pool
// ============================================================================

#[derive(Debug, Clone)]
struct PoolOption {
    priority: u8,
    rarity: f32,
    acts: Vec<Act>,
}

/// Candidate reactions for one decision.
#[derive(Debug, Clone, Default)]
struct MovePool {
    options: Vec<PoolOption>,
}

impl MovePool {
    fn clear(&mut self) {
        self.options.clear();
    }

    fn add(&mut self, priority: u8, rarity: f32, acts: Vec<Act>) {
        if !acts.is_empty() {
            self.options.push(PoolOption {
                priority,
                rarity,
                acts,
            });
        }
    }

    /// Keeps only the top priority, rolls each option against its rarity
    /// out of 60, then picks uniformly among survivors.
    fn sample(&self, rng: &mut fastrand::Rng) -> Option<&[Act]> {
        let top = self.options.iter().map(|o| o.priority).max()?;
        let survivors: Vec<&PoolOption> = self
            .options
            .iter()
            .filter(|o| o.priority == top)
            .filter(|o| rng.f32() < o.rarity / 60.0)
            .collect();

        if survivors.is_empty() {
            return None;
        }
        Some(&survivors[rng.usize(..survivors.len())].acts)
    }
}

// ============================================================================
// Context
// ============================================================================

/// What the AI sees of the fight on one tick.
#[derive(Debug, Clone, Copy)]
struct Context {
    me: FighterState,
    enemy: FighterState,
    enemy_counter: u32,
    enemy_velocity: Vec2,
    offset_x: f32,
}

impl Context {
    fn new(me: &Fighter, enemy: &Fighter) -> Self {
        Self {
            me: me.state(),
            enemy: enemy.state(),
            enemy_counter: enemy.state_counter(),
            enemy_velocity: enemy.velocity(),
            offset_x: enemy.position().x - me.position().x,
        }
    }

    fn distance(&self) -> f32 {
        self.offset_x.abs()
    }

    fn toward(&self) -> f32 {
        if self.offset_x < 0.0 {
            -1.0
        } else {
            1.0
        }
    }

    fn in_range(&self, from: f32, to: f32) -> bool {
        (from..=to).contains(&self.distance())
    }

    fn near(&self, dist: f32, tolerance: f32) -> bool {
        (self.distance() - dist).abs() <= tolerance
    }

    fn enemy_started(&self, state: FighterState) -> bool {
        self.enemy == state && self.enemy_counter < 2
    }
}

// ============================================================================
// Fight AI
// ============================================================================

/// Scripted controller for one fighter.
#[derive(Debug, Clone)]
pub struct FightAi {
    slot: PlayerSlot,
    seed: u64,
    rng: fastrand::Rng,
    queue: VecDeque<Act>,
    pool: MovePool,
    dir: Vec2,
    reposition_counter: i32,
    target_range: f32,
    spacing: f32,
}

impl FightAi {
    /// Creates an AI for `slot` with a fixed seed.
    #[must_use]
    pub fn new(slot: PlayerSlot, seed: u64) -> Self {
        Self {
            slot,
            seed,
            rng: fastrand::Rng::with_seed(seed),
            queue: VecDeque::new(),
            pool: MovePool::default(),
            dir: Vec2::ZERO,
            reposition_counter: 1,
            target_range: 1.6,
            spacing: 1.8,
        }
    }

    /// Clears any macro in progress and reseeds.
    pub fn reset(&mut self) {
        *self = Self::new(self.slot, self.seed);
    }

    /// Slot this AI controls.
    #[must_use]
    pub fn slot(&self) -> PlayerSlot {
        self.slot
    }

    /// Input for the controlled fighter on this tick.
    pub fn decide(&mut self, fight: &FightManager) -> InputInfo {
        let me = fight.fighter(self.slot);
        let enemy = fight.fighter(self.slot.opponent());
        self.tick(me, enemy)
    }

    /// Input for `me` facing `enemy` on this tick.
    pub fn tick(&mut self, me: &Fighter, enemy: &Fighter) -> InputInfo {
        let ctx = Context::new(me, enemy);

        if let Some(act) = self.queue.pop_front() {
            return self.input_from_act(Some(act), &ctx);
        }

        self.pool.clear();
        self.reactions(&ctx);
        self.random_attacks(&ctx);
        self.keep_spacing(&ctx);
        self.recover_from_knockdown(&ctx);

        let first = match self.pool.sample(&mut self.rng) {
            Some(acts) => {
                let acts = acts.to_vec();
                trace!(slot = %self.slot, ?acts, "AI picked macro");
                self.queue.extend(acts.iter().skip(1));
                acts.first().copied()
            },
            None => None,
        };
        self.input_from_act(first, &ctx)
    }

    fn option(&mut self, ctx: &Context, range: (f32, f32), rarity: f32, script: &str, priority: u8) {
        if ctx.in_range(range.0, range.1) {
            self.pool.add(priority, rarity, parse_script(script));
        }
    }

    /// Counters to the opponent's freshly started moves.
    fn reactions(&mut self, ctx: &Context) {
        use FighterState as S;

        if ctx.me != S::StandIdle {
            return;
        }

        if ctx.enemy_started(S::StandKick) {
            self.option(ctx, (0.4, 3.0), 45.0, "w4 ma w12", 2);
            self.option(ctx, (0.4, 1.75), 20.0, "c k", 2);
            self.option(ctx, (0.4, 1.2), 20.0, "p", 2);
            self.option(ctx, (0.4, 1.2), 20.0, "c p", 2);
            self.option(ctx, (0.4, 1.55), 6.0, "da", 2);
            self.option(ctx, (0.4, 1.55), 6.0, "da w4 jt w26 k", 2);
        }
        if ctx.enemy_started(S::StandPunch) {
            self.option(ctx, (0.4, 1.3), 36.0, "w2 ma w12", 2);
            self.option(ctx, (0.4, 1.2), 10.0, "da", 2);
            self.option(ctx, (0.4, 1.2), 3.0, "da w4 jt w12 k", 2);
        }
        if ctx.enemy_started(S::CrouchKick) {
            self.option(ctx, (1.55, 2.0), 45.0, "w4 ma w12", 2);
            self.option(ctx, (0.4, 1.55), 45.0, "w4 cb w12", 2);
            self.option(ctx, (0.4, 1.45), 25.0, "ju w18 k", 2);
            self.option(ctx, (1.45, 2.5), 25.0, "jt w18 k", 2);
            self.option(ctx, (0.4, 1.2), 10.0, "w4 da", 2);
            self.option(ctx, (0.4, 1.55), 10.0, "da w4 jt w26 k", 2);
        }
        if ctx.enemy_started(S::JumpKick) {
            self.option(ctx, (0.8, 2.0), 45.0, "w4 ma w12", 2);
            if ctx.enemy_velocity.y > -0.03 {
                self.option(ctx, (0.4, 2.0), 20.0, "w2 dt", 2);
            }
        }
        if ctx.enemy_started(S::DashForward) {
            self.option(ctx, (0.8, 3.0), 40.0, "w4 p", 2);
            self.option(ctx, (0.8, 2.5), 20.0, "ju w18 k", 2);
        }
        if ctx.enemy_started(S::Grab) {
            self.option(ctx, (0.4, 2.0), 20.0, "w4 da", 2);
            self.option(ctx, (0.4, 1.8), 20.0, "w4 p", 2);
            self.option(ctx, (0.4, 1.8), 20.0, "w4 k", 2);
            self.option(ctx, (0.4, 1.45), 15.0, "ju w18 k", 2);
        }
        // slip under a jump near its peak
        if ctx.enemy == S::JumpIdle && (-0.1..0.15).contains(&ctx.enemy_velocity.y) {
            self.option(ctx, (0.4, 1.1), 30.0, "w4 dt", 2);
        }
    }

    fn random_attacks(&mut self, ctx: &Context) {
        if ctx.me != FighterState::StandIdle || ctx.enemy == FighterState::JumpIdle {
            return;
        }

        self.option(ctx, (0.6, 1.2), 3.2, "p", 1);
        self.option(ctx, (1.0, 1.7), 3.2, "k", 1);
        self.option(ctx, (0.8, 1.3), 0.4, "g", 1);
        self.option(ctx, (1.5, 2.5), 0.2, "dt g", 1);
        self.option(ctx, (0.4, 1.45), 0.3, "ju w14 k", 1);
        self.option(ctx, (1.45, 2.5), 0.3, "jt w14 k", 1);
        self.option(ctx, (1.2, 1.5), 2.6, "c p", 1);
        self.option(ctx, (1.2, 1.82), 2.6, "c k", 1);
        self.option(ctx, (1.2, 1.82), 0.4, "da", 1);
        self.option(ctx, (1.8, 2.5), 3.0, "mt w6", 1);
        self.option(ctx, (1.2, 1.6), 0.3, "da w4 jt w14 k", 1);
    }

    fn keep_spacing(&mut self, ctx: &Context) {
        if ctx.distance() > self.spacing + 1.2 {
            self.pool.add(
                1,
                0.05,
                vec![Act::MoveStop, Act::MoveToward, Act::MoveStop, Act::MoveToward],
            );
        }
    }

    fn recover_from_knockdown(&mut self, ctx: &Context) {
        if ctx.me == FighterState::Knocked {
            self.option(ctx, (0.0, 5.0), 100.0, "p", 1);
        }
    }

    fn reposition(&mut self, ctx: &Context) -> InputInfo {
        self.reposition_counter -= 1;
        if self.reposition_counter < 1 {
            self.target_range = 1.3 + self.rng.f32() * 0.6;
            self.reposition_counter += self.rng.i32(15..40);
        }

        if ctx.distance() > self.target_range + 0.3 {
            self.dir = Vec2::new(ctx.toward(), 0.0);
        } else if ctx.distance() < self.target_range - 0.3 {
            self.dir = Vec2::new(-ctx.toward(), 0.0);
        } else if ctx.near(self.target_range, 0.04) {
            self.dir = Vec2::ZERO;
        }

        InputInfo {
            dir: self.dir,
            ..InputInfo::NEUTRAL
        }
    }

    fn input_from_act(&mut self, act: Option<Act>, ctx: &Context) -> InputInfo {
        let Some(act) = act else {
            return self.reposition(ctx);
        };

        let toward = ctx.toward();
        self.dir.x = match act {
            Act::MoveStop | Act::JumpUp => 0.0,
            Act::MoveLeft | Act::JumpLeft => -1.0,
            Act::MoveRight | Act::JumpRight => 1.0,
            Act::MoveToward | Act::JumpToward => toward,
            Act::MoveAway | Act::JumpAway | Act::CrouchBlock => -toward,
            _ => self.dir.x,
        };
        self.dir.y = match act {
            Act::MoveStop | Act::MoveLeft | Act::MoveRight | Act::MoveToward | Act::MoveAway => 0.0,
            Act::JumpUp | Act::JumpLeft | Act::JumpRight | Act::JumpToward | Act::JumpAway => 1.0,
            Act::Crouch | Act::CrouchBlock => -1.0,
            Act::Uncrouch => 0.0,
            _ => self.dir.y,
        };

        InputInfo {
            dir: self.dir,
            punch: act == Act::Punch,
            kick: act == Act::Kick,
            grab: act == Act::Grab,
        }
    }
}
