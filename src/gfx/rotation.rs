//! # Rotation Helpers
//!
//! Quaternion utilities shared by the orbit camera and the orientation gizmo:
//! look-at orientations, angular distance and bounded rotate-towards steps.
//!
//! Conventions: right-handed, Y up. A camera looks along its local `-Z`;
//! any other object "looks" along its local `+Z`.

use cgmath::{InnerSpace, Matrix3, Quaternion, Vector3};

/// Nudge applied to a look direction that is parallel to the up vector
const DEGENERATE_NUDGE: f32 = 0.0001;

/// Angle in radians between two unit quaternions, in `[0, PI]`.
///
/// Evaluated through `atan2` of the relative rotation so that identical
/// quaternions give exactly zero and tiny differences stay measurable.
pub fn angle_between(a: Quaternion<f32>, b: Quaternion<f32>) -> f32 {
    let relative = a.conjugate() * b;
    2.0 * relative.v.magnitude().atan2(relative.s.abs())
}

/// Spherical interpolation along the shortest arc.
pub fn slerp(a: Quaternion<f32>, b: Quaternion<f32>, t: f32) -> Quaternion<f32> {
    if t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }

    let mut cos_half = a.dot(b);
    let mut end = b;
    if cos_half < 0.0 {
        end = -b;
        cos_half = -cos_half;
    }

    if cos_half >= 1.0 {
        return a;
    }

    let sqr_sin_half = 1.0 - cos_half * cos_half;
    if sqr_sin_half <= f32::EPSILON {
        let s = 1.0 - t;
        return (a * s + end * t).normalize();
    }

    let sin_half = sqr_sin_half.sqrt();
    let half_theta = sin_half.atan2(cos_half);
    let ratio_a = ((1.0 - t) * half_theta).sin() / sin_half;
    let ratio_b = (t * half_theta).sin() / sin_half;

    a * ratio_a + end * ratio_b
}

/// Rotates `current` towards `target` by at most `step` radians.
///
/// Returns `target` itself once the remaining angle fits in `step`, so a
/// converged rotation compares equal to its target.
pub fn rotate_towards(current: Quaternion<f32>, target: Quaternion<f32>, step: f32) -> Quaternion<f32> {
    if current == target {
        return current;
    }
    let angle = angle_between(current, target);
    if angle == 0.0 || step >= angle {
        return target;
    }
    if step <= 0.0 {
        return current;
    }
    slerp(current, target, step / angle)
}

/// Orientation whose local `+Z` axis points along `forward`.
///
/// When `forward` is parallel to `up` it is nudged off-axis so the basis
/// stays defined.
pub fn look_rotation(forward: Vector3<f32>, up: Vector3<f32>) -> Quaternion<f32> {
    let mut z = if forward.magnitude2() == 0.0 {
        Vector3::unit_z()
    } else {
        forward.normalize()
    };

    let mut x = up.cross(z);
    if x.magnitude2() == 0.0 {
        if up.z.abs() == 1.0 {
            z.x += DEGENERATE_NUDGE;
        } else {
            z.z += DEGENERATE_NUDGE;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);

    Quaternion::from(Matrix3::from_cols(x, y, z)).normalize()
}

/// Orientation of an object at `position` facing `target`.
pub fn object_look_at(position: Vector3<f32>, target: Vector3<f32>, up: Vector3<f32>) -> Quaternion<f32> {
    look_rotation(target - position, up)
}

/// Orientation of a camera at `eye` looking at `target` (view along `-Z`).
pub fn camera_look_at(eye: Vector3<f32>, target: Vector3<f32>, up: Vector3<f32>) -> Quaternion<f32> {
    look_rotation(eye - target, up)
}

/// Identity rotation
pub fn identity() -> Quaternion<f32> {
    Quaternion::new(1.0, 0.0, 0.0, 0.0)
}

/// Vector rotated by `q`
pub fn rotate_vector(q: Quaternion<f32>, v: Vector3<f32>) -> Vector3<f32> {
    q * v
}

/// True when every component is finite
pub fn is_finite(q: Quaternion<f32>) -> bool {
    q.s.is_finite() && q.v.x.is_finite() && q.v.y.is_finite() && q.v.z.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Rad, Rotation3, Zero};
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx_vec(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-3
    }

    #[test]
    fn test_angle_between_identical_is_zero() {
        let q = Quaternion::from_angle_y(Rad(0.73)) * Quaternion::from_angle_x(Rad(-0.4));
        assert_eq!(angle_between(q, q), 0.0);
    }

    #[test]
    fn test_angle_between_ignores_sign() {
        let q = Quaternion::from_angle_z(Rad(1.0));
        assert!(angle_between(q, -q) < 1e-6);
        let r = Quaternion::from_angle_z(Rad(1.5));
        assert!((angle_between(q, r) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_towards_is_bounded() {
        let start = identity();
        let target = Quaternion::from_angle_y(Rad(FRAC_PI_2));

        let stepped = rotate_towards(start, target, 0.25);
        assert!((angle_between(start, stepped) - 0.25).abs() < 1e-4);
        assert!((angle_between(stepped, target) - (FRAC_PI_2 - 0.25)).abs() < 1e-4);

        let done = rotate_towards(stepped, target, 10.0);
        assert_eq!(done, target);
        assert_eq!(rotate_towards(start, target, 0.0), start);
    }

    #[test]
    fn test_slerp_takes_short_arc() {
        let a = Quaternion::from_angle_y(Rad(0.1));
        let b = -Quaternion::from_angle_y(Rad(0.3));
        let mid = slerp(a, b, 0.5);
        assert!((angle_between(mid, Quaternion::from_angle_y(Rad(0.2)))).abs() < 1e-4);
    }

    #[test]
    fn test_camera_look_at_faces_target() {
        let eye = Vector3::new(4.0, 0.0, 0.0);
        let q = camera_look_at(eye, Vector3::zero(), Vector3::unit_y());
        let view = rotate_vector(q, Vector3::new(0.0, 0.0, -1.0));
        assert!(approx_vec(view, Vector3::new(-1.0, 0.0, 0.0)));
        assert!(angle_between(q, Quaternion::from_angle_y(Rad(FRAC_PI_2))) < 1e-5);
    }

    #[test]
    fn test_object_look_at_faces_target() {
        let q = object_look_at(Vector3::zero(), Vector3::new(0.0, 0.0, -3.0), Vector3::unit_y());
        assert!(angle_between(q, Quaternion::from_angle_y(Rad(PI))) < 1e-5);
    }

    #[test]
    fn test_look_rotation_degenerate_up() {
        let q = look_rotation(Vector3::unit_y(), Vector3::unit_y());
        assert!(is_finite(q));
        let forward = rotate_vector(q, Vector3::unit_z());
        assert!(approx_vec(forward, Vector3::unit_y()));
    }
}
