#![forbid(unsafe_code)]

//! Pointer velocity estimation over a sliding time window.

use std::collections::VecDeque;
use std::time::Duration;

use web_time::Instant;

#[derive(Debug, Clone, Copy)]
struct Sample {
    time: Instant,
    x: f32,
    y: f32,
}

/// Estimates pointer velocity (px/s) from the samples inside `window`.
///
/// The estimate is the displacement between the oldest and newest retained
/// samples divided by the time between them. Fewer than two samples, or two
/// samples at the same instant, give zero.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    window: Duration,
    samples: VecDeque<Sample>,
}

impl VelocityTracker {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            samples: VecDeque::with_capacity(8),
        }
    }

    /// Record a sample and drop the ones that fell out of the window.
    pub fn add(&mut self, x: f32, y: f32, time: Instant) {
        self.samples.push_back(Sample { time, x, y });
        while let Some(front) = self.samples.front() {
            if time.saturating_duration_since(front.time) > self.window {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Per-axis velocity in px/s.
    #[must_use]
    pub fn velocity(&self) -> (f32, f32) {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return (0.0, 0.0);
        };
        let dt = last.time.saturating_duration_since(first.time).as_secs_f32();
        if dt <= 0.0 {
            return (0.0, 0.0);
        }
        ((last.x - first.x) / dt, (last.y - first.y) / dt)
    }

    /// Euclidean norm of [`velocity`](Self::velocity).
    #[must_use]
    pub fn speed(&self) -> f32 {
        let (vx, vy) = self.velocity();
        vx.hypot(vy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_10: Duration = Duration::from_millis(10);
    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn empty_tracker_is_still() {
        let tracker = VelocityTracker::new(MS_100);
        assert_eq!(tracker.velocity(), (0.0, 0.0));
        assert_eq!(tracker.speed(), 0.0);
    }

    #[test]
    fn single_sample_is_still() {
        let mut tracker = VelocityTracker::new(MS_100);
        tracker.add(5.0, 5.0, Instant::now());
        assert_eq!(tracker.speed(), 0.0);
    }

    #[test]
    fn constant_motion() {
        let mut tracker = VelocityTracker::new(MS_100);
        let t = Instant::now();
        for i in 0..5u32 {
            tracker.add(i as f32 * 10.0, 0.0, t + MS_10 * i);
        }
        let (vx, vy) = tracker.velocity();
        assert!((vx - 1000.0).abs() < 1.0, "vx = {vx}");
        assert_eq!(vy, 0.0);
    }

    #[test]
    fn hypot_of_both_axes() {
        let mut tracker = VelocityTracker::new(MS_100);
        let t = Instant::now();
        tracker.add(0.0, 0.0, t);
        tracker.add(3.0, 4.0, t + MS_10);
        assert!((tracker.speed() - 500.0).abs() < 1.0);
    }

    #[test]
    fn old_samples_fall_out_of_window() {
        let mut tracker = VelocityTracker::new(MS_100);
        let t = Instant::now();
        tracker.add(0.0, 0.0, t);
        tracker.add(100.0, 0.0, t + MS_10);
        // Pointer then rests for a long time.
        tracker.add(100.0, 0.0, t + Duration::from_millis(500));
        assert_eq!(tracker.velocity(), (0.0, 0.0));
    }
}
