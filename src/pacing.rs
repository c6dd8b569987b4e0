//! Frame pacing.
//!
//! Two policies. `WaitToTarget` (file playback) sleeps away the remainder of
//! the target period so the stream plays at its intended rate. `BestEffort`
//! (live capture) never sleeps: when the loop falls behind it proceeds
//! immediately, dropping pacing rather than frames.
//!
//! Elapsed time is measured with `Instant`, a monotonic clock, so wall-clock
//! jumps cannot stall or rush the stream.

use std::time::{Duration, Instant};

/// Frames per second used when waiting to a target with no configured or
/// reported rate.
pub const DEFAULT_FPS: f64 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayMode {
    /// Block until the target period has elapsed since the last tick.
    WaitToTarget,
    /// Proceed immediately, regardless of schedule.
    BestEffort,
}

/// Enforces the inter-tick interval. Call [`Pacer::wait_for_tick`] at the top
/// of every tick.
#[derive(Debug)]
pub struct Pacer {
    mode: PlayMode,
    target_period: Option<Duration>,
    last_tick: Option<Instant>,
}

impl Pacer {
    /// Builds a pacer from the configured max FPS, falling back to the
    /// capture source's reported rate. In `WaitToTarget` mode a rate is
    /// always resolved (defaulting to [`DEFAULT_FPS`]); in `BestEffort` mode
    /// the rate only serves as documentation, since the pacer never blocks.
    pub fn new(mode: PlayMode, max_fps: Option<f64>, source_rate: Option<f64>) -> Self {
        let fps = max_fps
            .filter(|fps| *fps > 0.0)
            .or(source_rate.filter(|fps| *fps > 0.0))
            .or(match mode {
                PlayMode::WaitToTarget => Some(DEFAULT_FPS),
                PlayMode::BestEffort => None,
            });
        let target_period = fps.map(|fps| Duration::from_nanos((1e9 / fps) as u64));
        Self {
            mode,
            target_period,
            last_tick: None,
        }
    }

    /// The resolved target period, if any.
    pub fn target_period(&self) -> Option<Duration> {
        self.target_period
    }

    /// Gates a tick. In `WaitToTarget` mode this sleeps for whatever remains
    /// of the target period; in `BestEffort` mode it returns immediately.
    /// Either way the tick timestamp is advanced.
    pub fn wait_for_tick(&mut self) {
        if self.mode == PlayMode::WaitToTarget {
            if let (Some(period), Some(last)) = (self.target_period, self.last_tick) {
                let remaining = period.saturating_sub(last.elapsed());
                if !remaining.is_zero() {
                    std::thread::sleep(remaining);
                }
            }
        }
        self.last_tick = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_to_target_never_ticks_early() {
        let period = Duration::from_millis(20);
        let mut pacer = Pacer::new(PlayMode::WaitToTarget, Some(50.0), None);
        assert_eq!(pacer.target_period(), Some(period));

        let start = Instant::now();
        pacer.wait_for_tick();
        pacer.wait_for_tick();
        // The second tick cannot land earlier than one full period after the
        // first tick's timestamp, which itself is at or after `start`.
        assert!(start.elapsed() >= period, "ticked after {:?}", start.elapsed());
    }

    #[test]
    fn best_effort_never_sleeps() {
        // A one-second period would be very noticeable if it slept.
        let mut pacer = Pacer::new(PlayMode::BestEffort, Some(1.0), None);
        pacer.wait_for_tick();
        let start = Instant::now();
        pacer.wait_for_tick();
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn rate_resolution_prefers_override() {
        let pacer = Pacer::new(PlayMode::WaitToTarget, Some(10.0), Some(25.0));
        assert_eq!(pacer.target_period(), Some(Duration::from_millis(100)));

        let pacer = Pacer::new(PlayMode::WaitToTarget, None, Some(25.0));
        assert_eq!(pacer.target_period(), Some(Duration::from_millis(40)));

        let pacer = Pacer::new(PlayMode::WaitToTarget, None, None);
        assert_eq!(
            pacer.target_period(),
            Some(Duration::from_nanos((1e9 / DEFAULT_FPS) as u64))
        );
    }

    #[test]
    fn zero_rate_is_ignored() {
        let pacer = Pacer::new(PlayMode::BestEffort, None, Some(0.0));
        assert_eq!(pacer.target_period(), None);
    }
}
