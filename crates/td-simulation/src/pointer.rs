use std::collections::VecDeque;

use glam::Vec2;

/// Recent pointer positions, used to measure how fast a die was thrown.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    samples: VecDeque<(f64, Vec2)>,
    window: f64,
}

impl PointerTracker {
    /// Create a tracker that considers the last `window` seconds of motion.
    pub fn new(window: f64) -> Self {
        Self {
            samples: VecDeque::new(),
            window,
        }
    }

    /// Record the pointer at `position` at time `at`.
    pub fn record(&mut self, at: f64, position: Vec2) {
        self.samples.push_back((at, position));
        self.prune(at);
    }

    /// Displacement and elapsed seconds across the samples inside the window
    /// ending at `now`.
    ///
    /// Events that arrive between two frames share a timestamp, so the
    /// elapsed time may be zero while the displacement is not.
    pub fn motion(&mut self, now: f64) -> (Vec2, f64) {
        self.prune(now);
        match (self.samples.front(), self.samples.back()) {
            (Some(&(t0, p0)), Some(&(t1, p1))) => (p1 - p0, t1 - t0),
            _ => (Vec2::ZERO, 0.0),
        }
    }

    /// Velocity in units per second over the window ending at `now`.
    ///
    /// Zero when the pointer has not moved within the window or when all
    /// samples share one timestamp.
    pub fn velocity(&mut self, now: f64) -> Vec2 {
        let (moved, elapsed) = self.motion(now);
        if elapsed <= f64::EPSILON {
            return Vec2::ZERO;
        }
        moved / elapsed as f32
    }

    /// Forget all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of samples inside the window.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if no samples are held.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn prune(&mut self, now: f64) {
        // Keep the newest sample even if it is old: it anchors the release point.
        while self.samples.len() > 1 {
            match self.samples.front() {
                Some(&(t, _)) if now - t > self.window => {
                    self.samples.pop_front();
                }
                _ => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_motion_velocity() {
        let mut tracker = PointerTracker::new(0.1);
        tracker.record(0.0, Vec2::new(0.0, 0.0));
        tracker.record(0.05, Vec2::new(10.0, -5.0));
        let v = tracker.velocity(0.05);
        assert!((v.x - 200.0).abs() < 1e-3);
        assert!((v.y + 100.0).abs() < 1e-3);
    }

    #[test]
    fn old_samples_fall_out() {
        let mut tracker = PointerTracker::new(0.1);
        tracker.record(0.0, Vec2::new(0.0, 0.0));
        tracker.record(1.0, Vec2::new(50.0, 0.0));
        tracker.record(1.05, Vec2::new(50.0, 0.0));
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.velocity(1.05), Vec2::ZERO);
    }

    #[test]
    fn single_sample_is_still() {
        let mut tracker = PointerTracker::new(0.1);
        tracker.record(2.0, Vec2::new(3.0, 3.0));
        assert_eq!(tracker.velocity(5.0), Vec2::ZERO);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn same_timestamp_is_still() {
        let mut tracker = PointerTracker::new(0.1);
        tracker.record(1.0, Vec2::new(0.0, 0.0));
        tracker.record(1.0, Vec2::new(30.0, 0.0));
        assert_eq!(tracker.velocity(1.0), Vec2::ZERO);
    }

    #[test]
    fn motion_keeps_displacement_without_elapsed_time() {
        let mut tracker = PointerTracker::new(0.1);
        tracker.record(1.0, Vec2::new(0.0, 0.0));
        tracker.record(1.0, Vec2::new(30.0, 0.0));
        tracker.record(1.0, Vec2::new(45.0, 5.0));
        assert_eq!(tracker.motion(1.0), (Vec2::new(45.0, 5.0), 0.0));
    }

    #[test]
    fn empty_tracker_has_no_motion() {
        let mut tracker = PointerTracker::new(0.1);
        assert_eq!(tracker.motion(0.0), (Vec2::ZERO, 0.0));
    }

    #[test]
    fn clear_empties() {
        let mut tracker = PointerTracker::new(0.1);
        tracker.record(0.0, Vec2::ONE);
        tracker.clear();
        assert!(tracker.is_empty());
    }
}
