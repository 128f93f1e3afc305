//! Fixed-timestep pacing for realtime runs.

use std::time::Duration;

/// Simulation rate.
pub const TICK_RATE: u32 = 60;

/// Most ticks run for one wall-clock sample.
const MAX_STEPS: u32 = 10;

/// Turns wall-clock time into a whole number of fixed ticks.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
    max_dt: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}

impl FixedStep {
    /// Creates a stepper running at `rate` ticks per second.
    #[must_use]
    pub fn new(rate: u32) -> Self {
        Self {
            step: 1.0 / rate.max(1) as f32,
            accumulator: 0.0,
            max_dt: 0.25,
        }
    }

    /// Length of one tick.
    #[must_use]
    pub fn step(&self) -> Duration {
        Duration::from_secs_f32(self.step)
    }

    /// Adds elapsed time, slowed by `time_scale`, and returns how many ticks
    /// are due.
    pub fn advance(&mut self, elapsed: Duration, time_scale: f32) -> u32 {
        // clamp to prevent spiral of death
        let dt = elapsed.as_secs_f32().min(self.max_dt);
        self.accumulator += dt * time_scale.clamp(0.0, 1.0);

        let mut count = 0;
        while self.accumulator >= self.step && count < MAX_STEPS {
            self.accumulator -= self.step;
            count += 1;
        }

        // still behind: drop the backlog
        if self.accumulator > self.step * 2.0 {
            self.accumulator = 0.0;
        }
        count
    }

    /// Forgets accumulated time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_ticks_only() {
        let mut step = FixedStep::new(60);

        assert_eq!(step.advance(Duration::from_millis(10), 1.0), 0);
        assert_eq!(step.advance(Duration::from_millis(10), 1.0), 1);
        assert_eq!(step.advance(Duration::from_millis(50), 1.0), 3);
    }

    #[test]
    fn test_time_scale_slows_ticks() {
        let mut full = FixedStep::new(60);
        let mut slow = FixedStep::new(60);

        let mut full_ticks = 0;
        let mut slow_ticks = 0;
        for _ in 0..60 {
            full_ticks += full.advance(Duration::from_millis(16), 1.0);
            slow_ticks += slow.advance(Duration::from_millis(16), 0.3);
        }

        assert!(slow_ticks * 2 < full_ticks);
        assert!(slow_ticks > 0);
    }

    #[test]
    fn test_long_stall_is_bounded() {
        let mut step = FixedStep::new(60);
        let ticks = step.advance(Duration::from_secs(5), 1.0);

        assert!(ticks <= MAX_STEPS);
        assert_eq!(step.advance(Duration::ZERO, 1.0), 0);
    }

    #[test]
    fn test_reset() {
        let mut step = FixedStep::new(60);
        step.advance(Duration::from_millis(10), 1.0);
        step.reset();
        assert_eq!(step.advance(Duration::from_millis(10), 1.0), 0);
    }
}
