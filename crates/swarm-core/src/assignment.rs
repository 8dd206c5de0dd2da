//! Balanced linear assignment: drones -> formation targets, minimising total
//! Euclidean distance (Hungarian / Jonker-Volgenant via Kuhn-Munkres).

use crate::error::{Result, ShowError};
use crate::math::Point3;
use pathfinding::prelude::{kuhn_munkres, Matrix};

/// `kuhn_munkres` requires integer (`Ord`) weights and maximises; Euclidean
/// distances are minimised `f64`s, so costs are negated and scaled into this
/// fixed-point integer range before the solve.
const FIXED_POINT_SCALE: f64 = 1_000_000.0;

/// Solves the assignment problem for `drones` against `targets`, both length
/// N, returning `assignment[i]` = index into `targets` chosen for `drones[i]`.
pub fn solve_assignment(drones: &[Point3], targets: &[Point3]) -> Result<Vec<usize>> {
    if drones.len() != targets.len() {
        return Err(ShowError::SizeMismatch(drones.len(), targets.len()));
    }
    let n = drones.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let weights: Vec<i64> = drones
        .iter()
        .flat_map(|d| {
            targets.iter().map(move |t| {
                let dist = (t - d).norm();
                -((dist * FIXED_POINT_SCALE).round() as i64)
            })
        })
        .collect();
    let matrix = Matrix::from_vec(n, n, weights)
        .map_err(|_| ShowError::SizeMismatch(drones.len(), targets.len()))?;

    let (_, assignment) = kuhn_munkres(&matrix);
    Ok(assignment)
}

/// Total Euclidean cost of an assignment, for diagnostics/tests.
pub fn assignment_cost(drones: &[Point3], targets: &[Point3], assignment: &[usize]) -> f64 {
    drones
        .iter()
        .zip(assignment.iter())
        .map(|(d, &j)| (targets[j] - d).norm())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn size_mismatch_is_an_error() {
        let drones = vec![Point3::zeros()];
        let targets = vec![Point3::zeros(), Point3::zeros()];
        assert!(solve_assignment(&drones, &targets).is_err());
    }

    #[test]
    fn matches_brute_force_for_small_n() {
        let drones = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ];
        let targets = vec![
            Point3::new(0.2, 1.0, 0.0),
            Point3::new(3.1, 0.9, 0.0),
            Point3::new(1.9, -1.0, 0.0),
            Point3::new(0.9, 0.5, 0.0),
        ];

        let assignment = solve_assignment(&drones, &targets).unwrap();
        let got_cost = assignment_cost(&drones, &targets, &assignment);

        let n = drones.len();
        let best_brute_force = (0..n)
            .permutations(n)
            .map(|perm| assignment_cost(&drones, &targets, &perm))
            .fold(f64::INFINITY, f64::min);

        assert!((got_cost - best_brute_force).abs() < 1e-3);
    }

    #[test]
    fn invariant_under_permuted_targets() {
        let drones = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
        ];
        let targets = vec![
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(10.5, -1.0, 0.0),
            Point3::new(5.5, 2.0, 0.0),
        ];

        let assignment_a = solve_assignment(&drones, &targets).unwrap();
        let chosen_a: Vec<Point3> = assignment_a.iter().map(|&j| targets[j]).collect();

        // Same targets, different input order: each drone must still land on
        // the same physical point it was assigned before.
        let permuted_targets = vec![targets[2], targets[0], targets[1]];
        let assignment_b = solve_assignment(&drones, &permuted_targets).unwrap();
        let chosen_b: Vec<Point3> = assignment_b.iter().map(|&j| permuted_targets[j]).collect();

        for (a, b) in chosen_a.iter().zip(chosen_b.iter()) {
            assert!((a - b).norm() < 1e-9);
        }
    }
}
