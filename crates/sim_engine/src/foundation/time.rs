//! Time management utilities

use std::time::Instant;

/// Fixed-step tick timer
///
/// Accumulates wall-clock time and hands it out as whole simulation ticks of
/// `step_us` microseconds each. The monotonically increasing time index is
/// the microsecond timestamp of the most recently consumed tick.
pub struct TickTimer {
    step_us: u64,
    time_index_us: u64,
    accumulator_us: u64,
    last_update: Instant,
    tick_count: u64,
}

impl TickTimer {
    /// Create a new tick timer with the given step size in microseconds
    ///
    /// # Panics
    /// Panics if `step_us` is zero.
    pub fn new(step_us: u64) -> Self {
        assert!(step_us > 0, "tick step must be non-zero");
        Self {
            step_us,
            time_index_us: 0,
            accumulator_us: 0,
            last_update: Instant::now(),
            tick_count: 0,
        }
    }

    /// Accumulate wall-clock time since the last call
    ///
    /// Call once per main-loop iteration, then drain ticks with
    /// [`TickTimer::consume_tick`].
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        self.accumulator_us += u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.last_update = now;
    }

    /// Manually add elapsed time, for callers that drive their own clock
    pub fn advance(&mut self, elapsed_us: u64) {
        self.accumulator_us += elapsed_us;
    }

    /// Consume one due tick, returning its time index in microseconds
    ///
    /// Returns `None` when less than a full step has accumulated.
    pub fn consume_tick(&mut self) -> Option<u64> {
        if self.accumulator_us < self.step_us {
            return None;
        }
        self.accumulator_us -= self.step_us;
        self.time_index_us += self.step_us;
        self.tick_count += 1;
        Some(self.time_index_us)
    }

    /// Get the configured step size in microseconds
    pub fn step_us(&self) -> u64 {
        self.step_us
    }

    /// Get the time index of the most recently consumed tick
    pub fn time_index_us(&self) -> u64 {
        self.time_index_us
    }

    /// Get the number of ticks consumed so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Fraction of the next tick already accumulated, in [0, 1)
    ///
    /// Useful for render-side interpolation between committed states.
    pub fn alpha(&self) -> f32 {
        self.accumulator_us as f32 / self.step_us as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_drain_from_accumulated_time() {
        let mut timer = TickTimer::new(1_000);
        timer.advance(3_500);

        assert_eq!(timer.consume_tick(), Some(1_000));
        assert_eq!(timer.consume_tick(), Some(2_000));
        assert_eq!(timer.consume_tick(), Some(3_000));
        assert_eq!(timer.consume_tick(), None);
        assert_eq!(timer.tick_count(), 3);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut timer = TickTimer::new(1_000);
        timer.advance(900);
        assert_eq!(timer.consume_tick(), None);

        timer.advance(200);
        assert_eq!(timer.consume_tick(), Some(1_000));
        assert!((timer.alpha() - 0.1).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_zero_step_rejected() {
        let _ = TickTimer::new(0);
    }
}
