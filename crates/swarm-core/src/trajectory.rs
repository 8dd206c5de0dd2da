//! Per-drone trajectories: a minimum-jerk curve plus a time-shifted, clamped
//! position contract.

use crate::math::{minimum_jerk_3d, Point3};

/// Concrete curve state, captured instead of a boxed closure so the planner
/// can inspect `p0`/`pf`/`duration` directly (matching the teacher's
/// preference for plain structs over escaping closures).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinJerkCurve {
    pub p0: Point3,
    pub pf: Point3,
    pub duration: f64,
}

impl MinJerkCurve {
    pub fn new(p0: Point3, pf: Point3, duration: f64) -> Self {
        Self { p0, pf, duration }
    }

    /// Position at local time `t`, clamped to `[0, duration]`.
    pub fn position(&self, t: f64) -> Point3 {
        minimum_jerk_3d(self.p0, self.pf, self.duration, t)
    }
}

/// A single drone's planned motion for one step: a local curve, its
/// (post-scaling) duration, and a start delay applied by the collision
/// resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    pub curve: MinJerkCurve,
    pub duration: f64,
    pub start_time: f64,
}

impl Trajectory {
    /// Builds a fresh trajectory from `p0` to `pf` over `duration` with no
    /// start delay. `duration` must be strictly positive.
    pub fn generate(p0: Point3, pf: Point3, duration: f64) -> Self {
        debug_assert!(duration > 0.0, "trajectory duration must be > 0");
        Self {
            curve: MinJerkCurve::new(p0, pf, duration),
            duration,
            start_time: 0.0,
        }
    }

    /// Drone's own end time: when it stops moving for this step.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Position at the step's global time `t_global`.
    ///
    /// Frozen at `position_fn(0)` before `start_time` and at
    /// `position_fn(duration)` after `start_time + duration`.
    pub fn position(&self, t_global: f64) -> Point3 {
        if t_global < self.start_time {
            self.curve.position(0.0)
        } else if t_global > self.end_time() {
            self.curve.position(self.duration)
        } else {
            self.curve.position(t_global - self.start_time)
        }
    }

    /// Rebuilds this trajectory at a new (scaled) duration, keeping endpoints
    /// and start time.
    pub fn with_duration(&self, duration: f64) -> Self {
        Self {
            curve: MinJerkCurve::new(self.curve.p0, self.curve.pf, duration),
            duration,
            start_time: self.start_time,
        }
    }

    /// Rebuilds this trajectory with a new start delay.
    pub fn with_start_time(&self, start_time: f64) -> Self {
        Self { start_time, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn freezes_before_start_and_after_end() {
        let traj = Trajectory::generate(Point3::zeros(), Point3::new(1.0, 0.0, 0.0), 2.0)
            .with_start_time(1.0);

        let before = traj.position(0.5);
        assert_relative_eq!(before, traj.position(1.0), epsilon = 1e-9);

        let after = traj.position(10.0);
        assert_relative_eq!(after, traj.position(3.0), epsilon = 1e-9);
    }

    #[test]
    fn mid_flight_matches_local_curve() {
        let traj = Trajectory::generate(Point3::zeros(), Point3::new(2.0, 0.0, 0.0), 4.0)
            .with_start_time(1.0);
        let global_t = 3.0; // local_t = 2.0
        assert_relative_eq!(traj.position(global_t), traj.curve.position(2.0), epsilon = 1e-9);
    }
}
