//! Formation library: generates N×3 target point clouds for a requested shape.

pub mod digits;
pub mod normalize;
pub mod shapes;
pub mod spec;

pub use spec::{FormationConfig, FormationSpec};

use crate::error::Result;
use crate::math::Point3;
use normalize::normalize_to_n;
use rand::RngCore;
use spec::{as_point, parse_axis, parse_plane};

/// Shapes whose raw point count is not guaranteed to equal `n` and therefore
/// go through the count normaliser. The rest (`line`, `circle`, `grid`,
/// `wave`) produce exactly `n` points by construction.
const OVERSAMPLE_FACTOR: usize = 8;
const MIN_RAW_SAMPLES: usize = 64;

fn raw_sample_budget(n: usize) -> usize {
    (n * OVERSAMPLE_FACTOR).max(MIN_RAW_SAMPLES)
}

/// Generates exactly `n` target points for `spec`, using `rng` to seed the
/// count normaliser for shapes that need it.
pub fn generate(spec: &FormationSpec, n: usize, rng: &mut dyn RngCore) -> Result<Vec<Point3>> {
    use FormationSpec::*;
    match spec {
        Line { length, axis } => shapes::line(n, *length, parse_axis(axis)?),
        Circle { radius, center, normal } => {
            shapes::circle(n, *radius, as_point(*center), as_point(*normal))
        }
        Grid { spacing, center, plane } => {
            shapes::grid(n, *spacing, as_point(*center), parse_plane(plane)?)
        }
        Wave { wavelength, amplitude, length, center } => {
            shapes::wave(n, *wavelength, *amplitude, *length, as_point(*center))
        }
        Sphere { radius, center } => {
            let raw = shapes::sphere(raw_sample_budget(n), *radius, as_point(*center));
            Ok(normalize_to_n(&raw, n, rng))
        }
        Heart { size, center, plane } => {
            let raw = shapes::heart(raw_sample_budget(n), *size, as_point(*center), parse_plane(plane)?);
            Ok(normalize_to_n(&raw, n, rng))
        }
        Spiral { radius_start, radius_end, height, turns, center } => {
            let raw = shapes::spiral(
                raw_sample_budget(n),
                *radius_start,
                *radius_end,
                *height,
                *turns,
                as_point(*center),
            );
            Ok(normalize_to_n(&raw, n, rng))
        }
        Helix { radius, height, turns, center } => {
            let raw = shapes::helix(raw_sample_budget(n), *radius, *height, *turns, as_point(*center));
            Ok(normalize_to_n(&raw, n, rng))
        }
        Number { digit, size, center, plane } => {
            let raw = shapes::number(*digit, raw_sample_budget(n), *size, as_point(*center), parse_plane(plane)?)?;
            Ok(normalize_to_n(&raw, n, rng))
        }
        Pyramid { base, height, center } => {
            let raw = shapes::pyramid(raw_sample_budget(n), *base, *height, as_point(*center));
            Ok(normalize_to_n(&raw, n, rng))
        }
        Cube { side, center } => {
            let raw = shapes::cube(raw_sample_budget(n), *side, as_point(*center));
            Ok(normalize_to_n(&raw, n, rng))
        }
        Star { outer_radius, inner_radius, size, center, plane } => {
            let raw = shapes::star(
                raw_sample_budget(n),
                *outer_radius,
                *inner_radius,
                *size,
                as_point(*center),
                parse_plane(plane)?,
            );
            Ok(normalize_to_n(&raw, n, rng))
        }
    }
}
