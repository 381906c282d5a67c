//! Fixed-timestep frame clock.

use std::time::{Duration, Instant};

use thornvale_core::GameConfig;

/// Accumulator clock for the 60 Hz cooperative loop.
///
/// Wall time is folded into an accumulator each frame and drained in whole
/// ticks, so scene updates always see the same `dt` no matter how the host
/// schedules us. A slow frame is capped to a handful of catch-up ticks
/// instead of spiraling.
pub struct FrameClock {
    last: Instant,
    accumulator: Duration,
}

/// Most catch-up ticks one frame may run.
const MAX_TICKS_PER_FRAME: u32 = 5;

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            accumulator: Duration::ZERO,
        }
    }

    /// Folds elapsed wall time in and returns how many fixed ticks to run.
    pub fn advance(&mut self) -> u32 {
        let now = Instant::now();
        self.accumulator += now - self.last;
        self.last = now;

        let mut ticks = 0;
        while self.accumulator >= GameConfig::TICK && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= GameConfig::TICK;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            // Drop the backlog instead of running unbounded catch-up ticks.
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    /// Sleeps off the remainder of the current tick.
    pub fn sleep_until_next_tick(&self) {
        let remaining = GameConfig::TICK.saturating_sub(self.accumulator);
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slept_time_drains_as_whole_ticks() {
        let mut clock = FrameClock::new();
        std::thread::sleep(GameConfig::TICK * 2);
        let ticks = clock.advance();
        // Sleep guarantees at least two tick intervals passed; the cap
        // bounds the other side.
        assert!((2..=MAX_TICKS_PER_FRAME).contains(&ticks), "got {ticks}");
    }

    #[test]
    fn a_stalled_frame_is_capped() {
        let mut clock = FrameClock::new();
        std::thread::sleep(GameConfig::TICK * 2);
        // Simulate a long stall by rewinding the reference point.
        clock.last = Instant::now() - GameConfig::TICK * 100;
        assert_eq!(clock.advance(), MAX_TICKS_PER_FRAME);
        assert_eq!(clock.accumulator, Duration::ZERO);
    }
}
