//! # Overlay Picking
//!
//! Ray casting against the orientation gizmo's indicators.
//!
//! ## How it works
//!
//! 1. **Pointer to NDC**: pointer coordinates are re-based on the overlay
//!    rectangle and normalised to `[-1, 1]` (see
//!    [`OverlayRect::to_ndc`](crate::gfx::viewport::OverlayRect::to_ndc))
//! 2. **NDC to Ray**: the fixed orthographic camera turns NDC into a ray
//! 3. **Ray-Target Intersection**: each target is a camera-facing quad or
//!    disc; the closest hit wins
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{Vector2, Vector3};
//! use heliofield::gfx::picking::{pick_nearest, HitShape, OrthoCamera, PickTarget};
//!
//! let camera = OrthoCamera::gizmo();
//! let ray = camera.ray_from_ndc(Vector2::new(0.0, 0.0));
//! let targets = [PickTarget {
//!     id: 7,
//!     center: Vector3::new(0.0, 0.0, 1.0),
//!     shape: HitShape::Quad { half_extent: 0.5 },
//! }];
//! assert_eq!(pick_nearest(&ray, &targets).map(|hit| hit.id), Some(7));
//! ```

use cgmath::{InnerSpace, Matrix4, Vector2, Vector3};

use crate::gfx::camera::orbit_camera::OPENGL_TO_WGPU_MATRIX;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Orthographic camera looking down `-Z` from `position`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vector3<f32>,
}

impl OrthoCamera {
    /// The fixed camera the orientation gizmo is drawn and picked through
    pub fn gizmo() -> Self {
        Self {
            left: -2.0,
            right: 2.0,
            top: 2.0,
            bottom: -2.0,
            near: 0.0,
            far: 4.0,
            position: Vector3::new(0.0, 0.0, 2.0),
        }
    }

    /// Projection times view, in wgpu clip space
    pub fn view_projection(&self) -> Matrix4<f32> {
        let projection = cgmath::ortho(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        );
        OPENGL_TO_WGPU_MATRIX * projection * Matrix4::from_translation(-self.position)
    }

    /// Ray through the given normalised device coordinates
    ///
    /// Starts on the near plane and points along the view direction.
    pub fn ray_from_ndc(&self, ndc: Vector2<f32>) -> Ray {
        let x = self.left + (ndc.x + 1.0) * 0.5 * (self.right - self.left);
        let y = self.bottom + (ndc.y + 1.0) * 0.5 * (self.top - self.bottom);
        let origin = Vector3::new(x, y, 0.0) + self.position - Vector3::new(0.0, 0.0, self.near);
        Ray::new(origin, -Vector3::unit_z())
    }
}

/// Shape of a camera-facing pick target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    /// Square sprite with the given half side length
    Quad { half_extent: f32 },
    /// Disc with the given radius
    Disk { radius: f32 },
}

/// Something the ray can hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickTarget {
    /// Caller defined identifier returned with the hit
    pub id: usize,
    /// World space centre
    pub center: Vector3<f32>,
    pub shape: HitShape,
}

/// Result of a picking operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    pub id: usize,
    /// Distance along the ray
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Vector3<f32>,
}

/// Intersects `ray` with a target facing back along the ray.
///
/// Returns the distance along the ray, or `None` when the target is missed
/// or lies behind the ray origin.
pub fn intersect_facing(ray: &Ray, target: &PickTarget) -> Option<f32> {
    let distance = (target.center - ray.origin).dot(ray.direction);
    if distance < 0.0 {
        return None;
    }

    let offset = ray.point_at(distance) - target.center;
    let inside = match target.shape {
        HitShape::Quad { half_extent } => {
            let (right, up) = facing_basis(ray.direction);
            offset.dot(right).abs() <= half_extent && offset.dot(up).abs() <= half_extent
        }
        HitShape::Disk { radius } => offset.magnitude2() <= radius * radius,
    };

    inside.then_some(distance)
}

/// Closest target hit by `ray`
pub fn pick_nearest(ray: &Ray, targets: &[PickTarget]) -> Option<PickResult> {
    let mut closest_result: Option<PickResult> = None;

    for target in targets {
        if let Some(distance) = intersect_facing(ray, target) {
            if closest_result
                .as_ref()
                .map_or(true, |result| distance < result.distance)
            {
                closest_result = Some(PickResult {
                    id: target.id,
                    distance,
                    intersection_point: ray.point_at(distance),
                });
            }
        }
    }

    closest_result
}

/// Right and up axes of a plane facing back along `direction`
fn facing_basis(direction: Vector3<f32>) -> (Vector3<f32>, Vector3<f32>) {
    let reference = if direction.y.abs() > 0.99 {
        Vector3::unit_z()
    } else {
        Vector3::unit_y()
    };
    let right = direction.cross(reference).normalize();
    let up = right.cross(direction).normalize();
    (right, up)
}
