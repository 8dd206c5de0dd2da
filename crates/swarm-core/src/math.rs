//! Math kernel: minimum-jerk curves, numerical differentiation, rigid transforms.

use nalgebra::{Rotation3, Vector3};

/// A point/vector in 3-D space, in metres.
pub type Point3 = Vector3<f64>;

/// Clamp `t/duration` into `[0, 1]`.
fn normalized_time(t: f64, duration: f64) -> f64 {
    (t / duration).clamp(0.0, 1.0)
}

/// Scalar minimum-jerk interpolation between `p0` and `pf` over `[0, duration]`.
///
/// `f(t) = p0 + (pf - p0) * (10*tau^3 - 15*tau^4 + 6*tau^5)`, `tau = clamp(t/T, 0, 1)`.
pub fn minimum_jerk_1d(p0: f64, pf: f64, duration: f64, t: f64) -> f64 {
    let tau = normalized_time(t, duration);
    let blend = 10.0 * tau.powi(3) - 15.0 * tau.powi(4) + 6.0 * tau.powi(5);
    p0 + (pf - p0) * blend
}

/// Componentwise 3-D minimum-jerk interpolation.
pub fn minimum_jerk_3d(p0: Point3, pf: Point3, duration: f64, t: f64) -> Point3 {
    Point3::new(
        minimum_jerk_1d(p0.x, pf.x, duration, t),
        minimum_jerk_1d(p0.y, pf.y, duration, t),
        minimum_jerk_1d(p0.z, pf.z, duration, t),
    )
}

/// Central-difference derivative of a scalar sampler `f` at `t`, with forward/backward
/// fallback at the domain boundary `[0, t_max]`.
pub fn central_difference<F: Fn(f64) -> Point3>(f: &F, t: f64, dt: f64, t_max: f64) -> Point3 {
    if t - dt < 0.0 {
        (f(t + dt) - f(t)) / dt
    } else if t + dt > t_max {
        (f(t) - f(t - dt)) / dt
    } else {
        (f(t + dt) - f(t - dt)) / (2.0 * dt)
    }
}

/// Replace any non-finite component with `NaN` (export-time sanitisation only).
pub fn sanitize_for_export(p: Point3) -> Point3 {
    let fix = |v: f64| if v.is_finite() { v } else { f64::NAN };
    Point3::new(fix(p.x), fix(p.y), fix(p.z))
}

/// Rotation that carries the canonical +Z axis onto the unit vector `normal`
/// (Rodrigues rotation). Degenerate near +-Z are handled explicitly.
pub fn rotation_onto_normal(normal: Point3) -> Rotation3<f64> {
    let z = Vector3::z();
    let n = normal.normalize();

    let cos_theta = z.dot(&n).clamp(-1.0, 1.0);
    if cos_theta > 1.0 - 1e-9 {
        return Rotation3::identity();
    }
    if cos_theta < -1.0 + 1e-9 {
        // 180 degrees about X.
        return Rotation3::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI);
    }

    let axis = z.cross(&n);
    let axis_norm = axis.norm();
    let axis = nalgebra::Unit::new_normalize(axis / axis_norm);
    let angle = cos_theta.acos();
    Rotation3::from_axis_angle(&axis, angle)
}

/// Z-axis rotation matrix for angle `theta` (radians).
pub fn rotation_about_z(theta: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), theta)
}

/// Translate every point in `points` by `offset`.
pub fn translate(points: &mut [Point3], offset: Point3) {
    for p in points.iter_mut() {
        *p += offset;
    }
}

/// Uniformly scale every point in `points` about the origin by `factor`.
pub fn scale(points: &mut [Point3], factor: f64) {
    for p in points.iter_mut() {
        *p *= factor;
    }
}

/// Map a 2-D point `(u, v)` defined in a local XY plane onto one of the named
/// 3-D planes, returning the point still centred at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Xy,
    Xz,
    Yz,
}

impl Plane {
    pub fn parse(s: &str) -> Option<Plane> {
        match s {
            "xy" => Some(Plane::Xy),
            "xz" => Some(Plane::Xz),
            "yz" => Some(Plane::Yz),
            _ => None,
        }
    }

    pub fn embed(&self, u: f64, v: f64) -> Point3 {
        match self {
            Plane::Xy => Point3::new(u, v, 0.0),
            Plane::Xz => Point3::new(u, 0.0, v),
            Plane::Yz => Point3::new(0.0, u, v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn parse(s: &str) -> Option<Axis> {
        match s {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            _ => None,
        }
    }

    pub fn unit(&self) -> Point3 {
        match self {
            Axis::X => Point3::x(),
            Axis::Y => Point3::y(),
            Axis::Z => Point3::z(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn minimum_jerk_boundary_conditions() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let pf = Point3::new(10.0, -5.0, 2.0);
        let duration = 3.0;

        assert_relative_eq!(minimum_jerk_3d(p0, pf, duration, 0.0), p0, epsilon = 1e-9);
        assert_relative_eq!(minimum_jerk_3d(p0, pf, duration, duration), pf, epsilon = 1e-9);

        // Velocity and acceleration at the endpoints should be ~0.
        let f = |t: f64| minimum_jerk_3d(p0, pf, duration, t);
        let dt = 1e-4;
        let v0 = (f(dt) - f(0.0)) / dt;
        let v1 = (f(duration) - f(duration - dt)) / dt;
        assert_relative_eq!(v0, Point3::zeros(), epsilon = 1e-2);
        assert_relative_eq!(v1, Point3::zeros(), epsilon = 1e-2);
    }

    #[test]
    fn minimum_jerk_scaling() {
        // Peak speed scales as 1/T, peak accel as 1/T^2.
        let p0 = 0.0;
        let pf = 1.0;
        let mid_speed = |t: f64| {
            let dt = 1e-5;
            (minimum_jerk_1d(p0, pf, t, t / 2.0 + dt) - minimum_jerk_1d(p0, pf, t, t / 2.0 - dt))
                / (2.0 * dt)
        };
        let s1 = mid_speed(1.0);
        let s2 = mid_speed(2.0);
        assert_relative_eq!(s1 / s2, 2.0, epsilon = 1e-2);
    }

    #[test]
    fn rotation_onto_normal_identity_for_z() {
        let r = rotation_onto_normal(Point3::z());
        let p = Point3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(r * p, p, epsilon = 1e-9);
    }

    #[test]
    fn rotation_onto_normal_flip_for_neg_z() {
        let r = rotation_onto_normal(-Point3::z());
        let p = Point3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(r * p, Point3::new(0.0, 0.0, -1.0), epsilon = 1e-9);
    }

    #[test]
    fn rotation_onto_normal_generic() {
        let normal = Point3::new(1.0, 1.0, 1.0).normalize();
        let r = rotation_onto_normal(normal);
        let rotated_z = r * Point3::z();
        assert_relative_eq!(rotated_z, normal, epsilon = 1e-9);
    }
}
