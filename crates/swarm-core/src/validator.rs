//! Samples trajectories to check kinodynamic limits and inter-drone
//! separation over the global time horizon.

use crate::drone::Drone;
use crate::math::Point3;
use crate::trajectory::Trajectory;
use std::collections::HashMap;

/// Default numerical tolerance for limit comparisons.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Result of sampling a single drone's local curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicCheck {
    pub max_speed: f64,
    pub max_acceleration: f64,
    pub ok: bool,
}

/// A single sampled moment where two drones were too close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwarmViolation {
    pub drone_a: u32,
    pub drone_b: u32,
    pub t: f64,
}

/// Combined dynamic + swarm feasibility report for one step.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedCheck {
    pub dynamic_ok: bool,
    pub swarm_ok: bool,
    pub per_drone: HashMap<u32, DynamicCheck>,
    pub swarm_violations: Vec<SwarmViolation>,
}

/// Samples `curve`'s *local* shape (ignoring any `start_time` shift) at
/// `dt` intervals over `[0, duration]` and returns max speed/acceleration
/// against `max_velocity`/`max_acceleration`.
pub fn validate_trajectory(
    traj: &Trajectory,
    max_velocity: f64,
    max_acceleration: f64,
    dt: f64,
    epsilon: f64,
) -> DynamicCheck {
    let duration = traj.duration;
    let n_samples = (duration / dt).ceil() as usize + 1;
    let positions: Vec<Point3> = (0..=n_samples)
        .map(|i| {
            let t = (i as f64 * dt).min(duration);
            traj.curve.position(t)
        })
        .collect();

    let mut max_speed = 0.0_f64;
    for w in positions.windows(2) {
        let v = (w[1] - w[0]) / dt;
        max_speed = max_speed.max(v.norm());
    }

    let mut max_acc = 0.0_f64;
    if positions.len() >= 3 {
        for w in positions.windows(3) {
            let a = (w[2] - 2.0 * w[1] + w[0]) / (dt * dt);
            max_acc = max_acc.max(a.norm());
        }
    }

    let ok = max_speed <= max_velocity + epsilon && max_acc <= max_acceleration + epsilon;
    DynamicCheck { max_speed, max_acceleration: max_acc, ok }
}

/// Samples the global timeline `[0, t_end]` at `dt` intervals and reports
/// every pairwise distance violation below `min_distance`, ordered by time
/// then by the `(i < j)` drone-id pair.
pub fn validate_swarm(
    trajectories: &HashMap<u32, Trajectory>,
    min_distance: f64,
    dt: f64,
) -> Vec<SwarmViolation> {
    let t_end = trajectories
        .values()
        .map(|t| t.end_time())
        .fold(0.0_f64, f64::max);

    let mut ids: Vec<u32> = trajectories.keys().copied().collect();
    ids.sort_unstable();

    let n_samples = if t_end > 0.0 { (t_end / dt).ceil() as usize + 1 } else { 1 };
    let mut violations = Vec::new();

    for i in 0..=n_samples {
        let t = (i as f64 * dt).min(t_end);
        let positions: Vec<(u32, Point3)> = ids
            .iter()
            .map(|&id| (id, trajectories[&id].position(t)))
            .collect();

        for a in 0..positions.len() {
            for b in (a + 1)..positions.len() {
                let (id_a, pa) = positions[a];
                let (id_b, pb) = positions[b];
                let dist = (pb - pa).norm();
                if dist < min_distance {
                    violations.push(SwarmViolation { drone_a: id_a, drone_b: id_b, t });
                }
            }
        }
        if t >= t_end {
            break;
        }
    }

    violations
}

/// Runs both the per-drone dynamic check and the swarm separation check.
pub fn validate_combined(
    drones: &[Drone],
    trajectories: &HashMap<u32, Trajectory>,
    min_distance: f64,
    dt: f64,
    epsilon: f64,
) -> CombinedCheck {
    let mut per_drone = HashMap::new();
    let mut dynamic_ok = true;
    for d in drones {
        if let Some(traj) = trajectories.get(&d.drone_id) {
            let check = validate_trajectory(traj, d.max_velocity, d.max_acceleration, dt, epsilon);
            dynamic_ok &= check.ok;
            per_drone.insert(d.drone_id, check);
        }
    }

    let swarm_violations = validate_swarm(trajectories, min_distance, dt);
    let swarm_ok = swarm_violations.is_empty();

    CombinedCheck { dynamic_ok, swarm_ok, per_drone, swarm_violations }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_trajectory_is_dynamically_ok() {
        let traj = Trajectory::generate(Point3::zeros(), Point3::new(1.0, 0.0, 0.0), 10.0);
        let check = validate_trajectory(&traj, 10.0, 10.0, 0.01, 1e-6);
        assert!(check.ok);
    }

    #[test]
    fn fast_trajectory_violates_limits() {
        let traj = Trajectory::generate(Point3::zeros(), Point3::new(100.0, 0.0, 0.0), 0.1);
        let check = validate_trajectory(&traj, 1.0, 1.0, 0.01, 1e-6);
        assert!(!check.ok);
    }

    #[test]
    fn crossing_drones_are_flagged() {
        let mut trajectories = HashMap::new();
        trajectories.insert(0, Trajectory::generate(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0), 2.0));
        trajectories.insert(1, Trajectory::generate(Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 0.0, 0.0), 2.0));

        let violations = validate_swarm(&trajectories, 0.3, 0.05);
        assert!(!violations.is_empty());
        // Sorted by time ascending.
        for w in violations.windows(2) {
            assert!(w[0].t <= w[1].t);
        }
    }

    #[test]
    fn well_separated_drones_have_no_violations() {
        let mut trajectories = HashMap::new();
        trajectories.insert(0, Trajectory::generate(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), 2.0));
        trajectories.insert(1, Trajectory::generate(Point3::new(0.0, 100.0, 0.0), Point3::new(1.0, 100.0, 0.0), 2.0));

        let violations = validate_swarm(&trajectories, 0.3, 0.05);
        assert!(violations.is_empty());
    }
}
