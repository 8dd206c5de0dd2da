//! Post-processing: iterative duration time-scaling and start-delay collision
//! resolution, run once per step after trajectory synthesis.

use crate::drone::Drone;
use crate::math::Point3;
use crate::trajectory::Trajectory;
use crate::validator::{validate_swarm, validate_trajectory, DEFAULT_EPSILON};
use std::collections::HashMap;
use tracing::{debug, warn};

pub const DEFAULT_MAX_TIME_SCALE_ITERATIONS: usize = 5;
pub const DEFAULT_MAX_COLLISION_ITERATIONS: usize = 200;

/// Outcome of the collision resolver for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionStatus {
    Ok,
    Unresolved,
    UnresolvedMaxDelay { drone_id: u32 },
}

/// Builds fresh minimum-jerk trajectories of `duration` from each drone's
/// current position to its assigned target.
fn generate_trajectories(
    drones: &[Drone],
    assignment: &HashMap<u32, Point3>,
    duration: f64,
) -> HashMap<u32, Trajectory> {
    drones
        .iter()
        .map(|d| {
            let target = assignment[&d.drone_id];
            (d.drone_id, Trajectory::generate(d.current_position, target, duration))
        })
        .collect()
}

/// Grows `seed_duration` until every drone's minimum-jerk curve respects its
/// velocity/acceleration limits, or `max_iterations` is exhausted.
///
/// Returns `(trajectories, actual_duration, dynamic_ok)`.
pub fn time_scale(
    drones: &[Drone],
    assignment: &HashMap<u32, Point3>,
    seed_duration: f64,
    dt: f64,
    epsilon: f64,
    max_iterations: usize,
) -> (HashMap<u32, Trajectory>, f64, bool) {
    let mut duration = seed_duration;

    for iteration in 0..max_iterations {
        let trajectories = generate_trajectories(drones, assignment, duration);

        let mut global_scale = 1.0_f64;
        for d in drones {
            let traj = &trajectories[&d.drone_id];
            let check = validate_trajectory(traj, d.max_velocity, d.max_acceleration, dt, epsilon);

            if check.max_speed > d.max_velocity + epsilon {
                global_scale = global_scale.max(check.max_speed / d.max_velocity);
            }
            if check.max_acceleration > d.max_acceleration + epsilon {
                global_scale = global_scale.max((check.max_acceleration / d.max_acceleration).sqrt());
            }
        }

        if global_scale <= 1.0 + epsilon {
            debug!(iteration, duration, "time scaling converged");
            return (trajectories, duration, true);
        }

        duration *= global_scale + epsilon;
    }

    warn!(max_iterations, duration, "time scaling exhausted iterations without full feasibility");
    let trajectories = generate_trajectories(drones, assignment, duration);
    (trajectories, duration, false)
}

/// Greedily delays the later-id drone of the earliest-in-time violating pair
/// until the swarm validator reports no violations, or gives up.
pub fn resolve_collisions(
    trajectories: &mut HashMap<u32, Trajectory>,
    min_distance: f64,
    dt: f64,
    delay_step: f64,
    max_iters: usize,
    max_total_delay: f64,
) -> CollisionStatus {
    for _ in 0..max_iters {
        let violations = validate_swarm(trajectories, min_distance, dt);
        let Some(first) = violations.first() else {
            return CollisionStatus::Ok;
        };

        let delayed_id = first.drone_a.max(first.drone_b);
        let traj = trajectories.get(&delayed_id).expect("violation referenced unknown drone");
        let new_start = traj.start_time + delay_step;

        if new_start > max_total_delay {
            return CollisionStatus::UnresolvedMaxDelay { drone_id: delayed_id };
        }

        trajectories.insert(delayed_id, traj.with_start_time(new_start));
    }

    CollisionStatus::Unresolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drone(id: u32, p: Point3, v: f64, a: f64) -> Drone {
        Drone::new(id, p, v, a).unwrap()
    }

    #[test]
    fn time_scaling_is_monotone_and_converges() {
        let drones = vec![drone(0, Point3::zeros(), 0.01, 0.01)];
        let mut assignment = HashMap::new();
        assignment.insert(0, Point3::new(10.0, 0.0, 0.0));

        let (trajectories, duration, ok) =
            time_scale(&drones, &assignment, 0.1, 0.01, 1e-6, DEFAULT_MAX_TIME_SCALE_ITERATIONS);

        assert!(duration >= 0.1);
        assert!(ok);
        let traj = &trajectories[&0];
        let check = validate_trajectory(traj, 0.01, 0.01, 0.01, 1e-6);
        assert!(check.ok);
    }

    #[test]
    fn collision_resolver_separates_crossing_drones() {
        let mut trajectories = HashMap::new();
        trajectories.insert(0, Trajectory::generate(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0), 2.0));
        trajectories.insert(1, Trajectory::generate(Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 0.0, 0.0), 2.0));

        let status = resolve_collisions(&mut trajectories, 0.3, 0.02, 0.05, 200, 10.0);
        assert_eq!(status, CollisionStatus::Ok);

        assert!(trajectories[&1].start_time >= 0.05 || trajectories[&0].start_time >= 0.05);

        let violations = validate_swarm(&trajectories, 0.3, 0.02);
        assert!(violations.is_empty());
    }

    #[test]
    fn collision_resolver_respects_max_total_delay() {
        let mut trajectories = HashMap::new();
        trajectories.insert(0, Trajectory::generate(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0), 2.0));
        trajectories.insert(1, Trajectory::generate(Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 0.0, 0.0), 2.0));

        let status = resolve_collisions(&mut trajectories, 2.0, 0.02, 0.05, 200, 0.01);
        assert!(matches!(status, CollisionStatus::UnresolvedMaxDelay { .. }));
        for traj in trajectories.values() {
            assert!(traj.start_time <= 0.01 + 1e-9);
        }
    }

    #[test]
    fn default_epsilon_is_small() {
        assert!(DEFAULT_EPSILON < 1e-6);
    }
}
