//! Input buffering and gesture recognition.
//!
//! This module provides:
//! - The raw per-tick input struct shared by human and AI controllers
//! - Buffered button and jump presses that stay pending for a short window
//! - Double-tap dash detection

use crate::types::Direction;
use scuffle_common::Vec2;
use serde::{Deserialize, Serialize};

/// Raw input for one fighter on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputInfo {
    /// Stick direction; x is world-space, positive y is up
    pub dir: Vec2,
    /// Punch pressed this tick
    pub punch: bool,
    /// Kick pressed this tick
    pub kick: bool,
    /// Grab pressed this tick
    pub grab: bool,
}

impl InputInfo {
    /// No direction and no buttons.
    pub const NEUTRAL: Self = Self {
        dir: Vec2::ZERO,
        punch: false,
        kick: false,
        grab: false,
    };

    /// Input holding a direction with no buttons.
    #[must_use]
    pub fn with_dir(x: f32, y: f32) -> Self {
        Self {
            dir: Vec2::new(x, y),
            ..Self::NEUTRAL
        }
    }

    /// Horizontal stick sign in world space.
    #[must_use]
    pub fn horizontal(&self) -> Direction {
        Direction::from_sign(self.dir.x)
    }
}

/// Actions whose presses are buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferedAction {
    /// Punch button
    Punch,
    /// Kick button
    Kick,
    /// Grab button
    Grab,
    /// Stick pushed up
    Jump,
}

impl BufferedAction {
    const fn index(self) -> usize {
        match self {
            Self::Punch => 0,
            Self::Kick => 1,
            Self::Grab => 2,
            Self::Jump => 3,
        }
    }
}

/// Input timing windows, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// How long a press stays pending
    pub buffer_window: u32,
    /// Max gap between the two taps of a dash
    pub double_tap_window: u32,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            buffer_window: 12,
            double_tap_window: 16,
        }
    }
}

/// Turns raw per-tick input into "wants to do X" flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputBuffer {
    config: BufferConfig,
    tick: u64,
    last_pressed: [Option<u64>; 4],
    last_dir_press: Option<(Direction, u64)>,
    horizontal: Direction,
    up_held: bool,
    crouch: bool,
    dash: Direction,
}

impl InputBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new(config: BufferConfig) -> Self {
        Self {
            config,
            tick: 0,
            last_pressed: [None; 4],
            last_dir_press: None,
            horizontal: Direction::None,
            up_held: false,
            crouch: false,
            dash: Direction::None,
        }
    }

    /// Clears all pending presses and held state.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Feeds one tick of raw input.
    pub fn update(&mut self, input: &InputInfo) {
        self.tick += 1;
        self.dash = Direction::None;

        let horizontal = input.horizontal();
        if self.horizontal == Direction::None && horizontal != Direction::None {
            self.register_tap(horizontal);
        }
        self.horizontal = horizontal;

        let up = input.dir.y > 0.0;
        if up && !self.up_held {
            self.stamp(BufferedAction::Jump);
        }
        self.up_held = up;
        self.crouch = input.dir.y < 0.0;

        if input.punch {
            self.stamp(BufferedAction::Punch);
        }
        if input.kick {
            self.stamp(BufferedAction::Kick);
        }
        if input.grab {
            self.stamp(BufferedAction::Grab);
        }
    }

    fn register_tap(&mut self, dir: Direction) {
        match self.last_dir_press {
            Some((last, at))
                if last == dir && self.tick - at < u64::from(self.config.double_tap_window) =>
            {
                self.dash = dir;
                self.last_dir_press = None;
            }
            _ => self.last_dir_press = Some((dir, self.tick)),
        }
    }

    fn stamp(&mut self, action: BufferedAction) {
        self.last_pressed[action.index()] = Some(self.tick);
    }

    /// Whether a press of `action` is still pending.
    #[must_use]
    pub fn wants(&self, action: BufferedAction) -> bool {
        self.last_pressed[action.index()]
            .is_some_and(|at| self.tick - at < u64::from(self.config.buffer_window))
    }

    /// Marks the pending press of `action` as used.
    pub fn consume(&mut self, action: BufferedAction) {
        self.last_pressed[action.index()] = None;
    }

    /// Consumes `action` if pending, returning whether it was.
    pub fn take(&mut self, action: BufferedAction) -> bool {
        let wanted = self.wants(action);
        if wanted {
            self.consume(action);
        }
        wanted
    }

    /// Shorthand for [`BufferedAction::Punch`].
    #[must_use]
    pub fn wants_punch(&self) -> bool {
        self.wants(BufferedAction::Punch)
    }

    /// Shorthand for [`BufferedAction::Kick`].
    #[must_use]
    pub fn wants_kick(&self) -> bool {
        self.wants(BufferedAction::Kick)
    }

    /// Shorthand for [`BufferedAction::Grab`].
    #[must_use]
    pub fn wants_grab(&self) -> bool {
        self.wants(BufferedAction::Grab)
    }

    /// Shorthand for [`BufferedAction::Jump`].
    #[must_use]
    pub fn wants_jump(&self) -> bool {
        self.wants(BufferedAction::Jump)
    }

    /// World-space dash direction triggered this tick, or `None`.
    #[must_use]
    pub fn dash(&self) -> Direction {
        self.dash
    }

    /// Drops this tick's dash trigger.
    pub fn consume_dash(&mut self) {
        self.dash = Direction::None;
    }

    /// Current horizontal stick sign in world space.
    #[must_use]
    pub fn horizontal(&self) -> Direction {
        self.horizontal
    }

    /// Whether the stick is held down. Never buffered.
    #[must_use]
    pub fn crouch(&self) -> bool {
        self.crouch
    }

    /// Ticks fed so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Timing windows in use.
    #[must_use]
    pub fn config(&self) -> BufferConfig {
        self.config
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(BufferConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn punch() -> InputInfo {
        InputInfo {
            punch: true,
            ..InputInfo::NEUTRAL
        }
    }

    #[test]
    fn test_press_is_buffered() {
        let mut buffer = InputBuffer::default();
        buffer.update(&punch());
        assert!(buffer.wants_punch());

        for _ in 0..11 {
            buffer.update(&InputInfo::NEUTRAL);
        }
        assert!(buffer.wants_punch());

        buffer.update(&InputInfo::NEUTRAL);
        assert!(!buffer.wants_punch());
    }

    #[test]
    fn test_consume_clears_press() {
        let mut buffer = InputBuffer::default();
        buffer.update(&punch());
        assert!(buffer.take(BufferedAction::Punch));
        assert!(!buffer.wants_punch());
        assert!(!buffer.take(BufferedAction::Punch));
    }

    #[test]
    fn test_jump_is_an_edge() {
        let mut buffer = InputBuffer::default();
        buffer.update(&InputInfo::with_dir(0.0, 1.0));
        assert!(buffer.take(BufferedAction::Jump));

        // holding up does not re-trigger
        buffer.update(&InputInfo::with_dir(0.0, 1.0));
        assert!(!buffer.wants_jump());

        buffer.update(&InputInfo::NEUTRAL);
        buffer.update(&InputInfo::with_dir(1.0, 1.0));
        assert!(buffer.wants_jump());
    }

    #[test]
    fn test_crouch_is_instant() {
        let mut buffer = InputBuffer::default();
        buffer.update(&InputInfo::with_dir(0.0, -1.0));
        assert!(buffer.crouch());
        buffer.update(&InputInfo::NEUTRAL);
        assert!(!buffer.crouch());
    }

    #[test]
    fn test_double_tap_dashes_once() {
        let mut buffer = InputBuffer::default();
        let right = InputInfo::with_dir(1.0, 0.0);

        buffer.update(&right);
        assert_eq!(buffer.dash(), Direction::None);
        buffer.update(&InputInfo::NEUTRAL);
        buffer.update(&right);
        assert_eq!(buffer.dash(), Direction::Forward);

        // dash only lasts one tick
        buffer.update(&right);
        assert_eq!(buffer.dash(), Direction::None);

        // a third tap starts a fresh gesture
        buffer.update(&InputInfo::NEUTRAL);
        buffer.update(&right);
        assert_eq!(buffer.dash(), Direction::None);
    }

    #[test]
    fn test_mixed_taps_do_not_dash() {
        let mut buffer = InputBuffer::default();
        buffer.update(&InputInfo::with_dir(1.0, 0.0));
        buffer.update(&InputInfo::NEUTRAL);
        buffer.update(&InputInfo::with_dir(-1.0, 0.0));
        assert_eq!(buffer.dash(), Direction::None);

        buffer.update(&InputInfo::NEUTRAL);
        buffer.update(&InputInfo::with_dir(-1.0, 0.0));
        assert_eq!(buffer.dash(), Direction::Backward);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut buffer = InputBuffer::default();
        buffer.update(&punch());
        buffer.reset();
        assert!(!buffer.wants_punch());
        assert_eq!(buffer.tick(), 0);
    }

    proptest! {
        #[test]
        fn prop_press_expires_after_window(window in 1u32..40, wait in 0u32..60) {
            let config = BufferConfig { buffer_window: window, double_tap_window: 16 };
            let mut buffer = InputBuffer::new(config);
            buffer.update(&punch());
            for _ in 0..wait {
                buffer.update(&InputInfo::NEUTRAL);
            }
            prop_assert_eq!(buffer.wants_punch(), wait < window);
        }

        #[test]
        fn prop_dash_needs_taps_inside_window(gap in 1u32..40) {
            let mut buffer = InputBuffer::default();
            let left = InputInfo::with_dir(-1.0, 0.0);
            buffer.update(&left);
            for _ in 0..gap {
                buffer.update(&InputInfo::NEUTRAL);
            }
            buffer.update(&left);

            // taps are `gap + 1` ticks apart
            let expected = if gap + 1 < 16 { Direction::Backward } else { Direction::None };
            prop_assert_eq!(buffer.dash(), expected);
        }
    }
}
