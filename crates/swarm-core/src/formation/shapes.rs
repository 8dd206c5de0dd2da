//! Pure generator functions: `(num_points, params) -> Vec<Point3>`.
//!
//! Generators for `line`, `circle`, `grid` and `wave` hit the requested count
//! exactly by construction. The rest produce a natural point count for their
//! geometry and are passed through [`crate::formation::normalize::normalize_to_n`]
//! by the dispatcher.

use crate::error::{Result, ShowError};
use crate::formation::digits::segments_for_digit;
use crate::math::{rotation_about_z, rotation_onto_normal, Axis, Plane, Point3};
use std::f64::consts::PI;

pub fn line(n: usize, length: f64, axis: Axis) -> Result<Vec<Point3>> {
    if n < 2 {
        return Err(ShowError::GeometryDegenerate("line requires at least 2 points".into()));
    }
    let unit = axis.unit();
    Ok((0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64; // 0..1
            let offset = (t - 0.5) * length;
            unit * offset
        })
        .collect())
}

pub fn circle(n: usize, radius: f64, center: Point3, normal: Point3) -> Result<Vec<Point3>> {
    if n < 3 {
        return Err(ShowError::GeometryDegenerate("circle requires at least 3 points".into()));
    }
    if normal.norm() < 1e-9 {
        return Err(ShowError::GeometryDegenerate("circle normal must be non-zero".into()));
    }
    let rot = rotation_onto_normal(normal);
    Ok((0..n)
        .map(|i| {
            let theta = 2.0 * PI * i as f64 / n as f64;
            let local = Point3::new(radius * theta.cos(), radius * theta.sin(), 0.0);
            center + rot * local
        })
        .collect())
}

pub fn grid(n: usize, spacing: f64, center: Point3, plane: Plane) -> Result<Vec<Point3>> {
    if n == 0 {
        return Err(ShowError::GeometryDegenerate("grid requires at least 1 point".into()));
    }
    let cols = (n as f64).sqrt().ceil() as usize;
    let rows = (n as f64 / cols as f64).ceil() as usize;

    let mut points = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let u = (c as f64 - (cols as f64 - 1.0) / 2.0) * spacing;
            let v = (r as f64 - (rows as f64 - 1.0) / 2.0) * spacing;
            points.push(center + plane.embed(u, v));
        }
    }
    points.truncate(n);
    Ok(points)
}

pub fn sphere(n: usize, radius: f64, center: Point3) -> Vec<Point3> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![center + Point3::new(0.0, 0.0, radius)];
    }
    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
    (0..n)
        .map(|i| {
            let y = 1.0 - 2.0 * i as f64 / (n as f64 - 1.0);
            let ring_radius = (1.0 - y * y).max(0.0).sqrt();
            let phi = golden_angle * i as f64;
            let x = phi.cos() * ring_radius;
            let z = phi.sin() * ring_radius;
            center + Point3::new(x, y, z) * radius
        })
        .collect()
}

pub fn heart(raw_samples: usize, size: f64, center: Point3, plane: Plane) -> Vec<Point3> {
    (0..raw_samples)
        .map(|i| {
            let t = 2.0 * PI * i as f64 / raw_samples as f64;
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
            let (u, v) = (x / 16.0 * size, y / 16.0 * size);
            center + plane.embed(u, v)
        })
        .collect()
}

pub fn wave(n: usize, wavelength: f64, amplitude: f64, length: f64, center: Point3) -> Result<Vec<Point3>> {
    if n < 2 {
        return Err(ShowError::GeometryDegenerate("wave requires at least 2 points".into()));
    }
    if wavelength.abs() < 1e-9 {
        return Err(ShowError::GeometryDegenerate("wave wavelength must be non-zero".into()));
    }
    Ok((0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            let x = (t - 0.5) * length;
            let y = amplitude * (2.0 * PI * x / wavelength).sin();
            center + Point3::new(x, y, 0.0)
        })
        .collect())
}

pub fn spiral(raw_samples: usize, radius_start: f64, radius_end: f64, height: f64, turns: f64, center: Point3) -> Vec<Point3> {
    if raw_samples == 0 {
        return Vec::new();
    }
    (0..raw_samples)
        .map(|i| {
            let t = i as f64 / (raw_samples as f64 - 1.0).max(1.0);
            let r = radius_start + (radius_end - radius_start) * t;
            let theta = 2.0 * PI * turns * t;
            let z = height * t;
            center + Point3::new(r * theta.cos(), r * theta.sin(), z)
        })
        .collect()
}

pub fn helix(raw_samples: usize, radius: f64, height: f64, turns: f64, center: Point3) -> Vec<Point3> {
    spiral(raw_samples, radius, radius, height, turns, center)
}

/// Distributes `raw_samples` points along a polyline of 2-D segments,
/// proportionally to segment length, then maps onto `plane`, scaled by `size`
/// and centred at the segments' own centroid (so the glyph/shape sits on `center`).
fn points_along_segments(
    segments: &[((f64, f64), (f64, f64))],
    raw_samples: usize,
    size: f64,
    center: Point3,
    plane: Plane,
) -> Vec<Point3> {
    if segments.is_empty() || raw_samples == 0 {
        return Vec::new();
    }
    let lengths: Vec<f64> = segments
        .iter()
        .map(|&((x0, y0), (x1, y1))| ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt())
        .collect();
    let total_length: f64 = lengths.iter().sum();
    if total_length < 1e-12 {
        return Vec::new();
    }

    // Centre the [0,1]^2 pattern on its own bounding-box midpoint before scaling.
    let centroid_u = 0.5;
    let centroid_v = 0.5;

    let mut points = Vec::with_capacity(raw_samples);
    let mut remaining = raw_samples;
    for (seg_idx, &((x0, y0), (x1, y1))) in segments.iter().enumerate() {
        let is_last = seg_idx == segments.len() - 1;
        let count = if is_last {
            remaining
        } else {
            let share = ((lengths[seg_idx] / total_length) * raw_samples as f64).round() as usize;
            share.min(remaining)
        };
        remaining -= count;
        for k in 0..count {
            let t = if count > 1 { k as f64 / (count - 1) as f64 } else { 0.0 };
            let u = x0 + (x1 - x0) * t;
            let v = y0 + (y1 - y0) * t;
            let (cu, cv) = ((u - centroid_u) * size, (v - centroid_v) * size);
            points.push(center + plane.embed(cu, cv));
        }
    }
    points
}

pub fn number(digit: u8, raw_samples: usize, size: f64, center: Point3, plane: Plane) -> Result<Vec<Point3>> {
    let segments = segments_for_digit(digit).ok_or(ShowError::UnsupportedDigit(digit))?;
    Ok(points_along_segments(segments, raw_samples, size, center, plane))
}

pub fn star(raw_samples: usize, outer_radius: f64, inner_radius: f64, size: f64, center: Point3, plane: Plane) -> Vec<Point3> {
    const POINTS: usize = 5;
    let mut verts = Vec::with_capacity(POINTS * 2);
    for i in 0..POINTS * 2 {
        let r = if i % 2 == 0 { outer_radius } else { inner_radius };
        let theta = PI / 2.0 + PI * i as f64 / POINTS as f64;
        verts.push((r * theta.cos(), r * theta.sin()));
    }
    let segments: Vec<((f64, f64), (f64, f64))> = (0..verts.len())
        .map(|i| (verts[i], verts[(i + 1) % verts.len()]))
        .collect();
    points_along_segments_unnormalized(&segments, raw_samples, size, center, plane)
}

pub fn cube(raw_samples: usize, side: f64, center: Point3) -> Vec<Point3> {
    let h = side / 2.0;
    let corners = [
        Point3::new(-h, -h, -h), Point3::new(h, -h, -h), Point3::new(h, h, -h), Point3::new(-h, h, -h),
        Point3::new(-h, -h, h), Point3::new(h, -h, h), Point3::new(h, h, h), Point3::new(-h, h, h),
    ];
    let edges: [(usize, usize); 12] = [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ];
    let lengths: Vec<f64> = edges.iter().map(|&(a, b)| (corners[b] - corners[a]).norm()).collect();
    let total: f64 = lengths.iter().sum();
    if total < 1e-12 || raw_samples == 0 {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(raw_samples);
    let mut remaining = raw_samples;
    for (idx, &(a, b)) in edges.iter().enumerate() {
        let is_last = idx == edges.len() - 1;
        let count = if is_last {
            remaining
        } else {
            ((lengths[idx] / total) * raw_samples as f64).round() as usize
        }
        .min(remaining);
        remaining -= count;
        for k in 0..count {
            let t = if count > 1 { k as f64 / (count - 1) as f64 } else { 0.0 };
            points.push(center + corners[a] + (corners[b] - corners[a]) * t);
        }
    }
    points
}

pub fn pyramid(raw_samples: usize, base: f64, height: f64, center: Point3) -> Vec<Point3> {
    let h = base / 2.0;
    let apex = Point3::new(0.0, 0.0, height);
    let corners = [
        Point3::new(-h, -h, 0.0), Point3::new(h, -h, 0.0), Point3::new(h, h, 0.0), Point3::new(-h, h, 0.0),
    ];
    let edges: Vec<(Point3, Point3)> = vec![
        (corners[0], corners[1]), (corners[1], corners[2]), (corners[2], corners[3]), (corners[3], corners[0]),
        (corners[0], apex), (corners[1], apex), (corners[2], apex), (corners[3], apex),
    ];
    let lengths: Vec<f64> = edges.iter().map(|&(a, b)| (b - a).norm()).collect();
    let total: f64 = lengths.iter().sum();
    if total < 1e-12 || raw_samples == 0 {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(raw_samples);
    let mut remaining = raw_samples;
    for (idx, &(a, b)) in edges.iter().enumerate() {
        let is_last = idx == edges.len() - 1;
        let count = if is_last {
            remaining
        } else {
            ((lengths[idx] / total) * raw_samples as f64).round() as usize
        }
        .min(remaining);
        remaining -= count;
        for k in 0..count {
            let t = if count > 1 { k as f64 / (count - 1) as f64 } else { 0.0 };
            points.push(center + a + (b - a) * t);
        }
    }
    points
}

// `star`'s vertices are already centred at the origin, so no extra centroid
// shift is needed -- a small variant of `points_along_segments` without the
// [0,1]^2 recentring step.
fn points_along_segments_unnormalized(
    segments: &[((f64, f64), (f64, f64))],
    raw_samples: usize,
    size: f64,
    center: Point3,
    plane: Plane,
) -> Vec<Point3> {
    if segments.is_empty() || raw_samples == 0 {
        return Vec::new();
    }
    let lengths: Vec<f64> = segments
        .iter()
        .map(|&((x0, y0), (x1, y1))| ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt())
        .collect();
    let total_length: f64 = lengths.iter().sum();
    if total_length < 1e-12 {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(raw_samples);
    let mut remaining = raw_samples;
    for (seg_idx, &((x0, y0), (x1, y1))) in segments.iter().enumerate() {
        let is_last = seg_idx == segments.len() - 1;
        let count = if is_last {
            remaining
        } else {
            ((lengths[seg_idx] / total_length) * raw_samples as f64).round() as usize
        }
        .min(remaining);
        remaining -= count;
        for k in 0..count {
            let t = if count > 1 { k as f64 / (count - 1) as f64 } else { 0.0 };
            let u = (x0 + (x1 - x0) * t) * size;
            let v = (y0 + (y1 - y0) * t) * size;
            points.push(center + plane.embed(u, v));
        }
    }
    points
}

#[allow(dead_code)]
pub(crate) fn rotate_z_demo(points: &mut [Point3], theta: f64) {
    let r = rotation_about_z(theta);
    for p in points.iter_mut() {
        *p = r * *p;
    }
}
