use cgmath::*;

use super::camera_utils::{Camera, CameraPose};
use crate::config::CameraConfig;
use crate::gfx::rotation::camera_look_at;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Perspective camera orbiting a target point.
///
/// Position and orientation are the source of truth so that anything
/// implementing the [`CameraPose`] contract (the orientation gizmo in
/// particular) can drive the camera directly. Orbit operations derive
/// spherical coordinates from the current pose and write a new look-at pose.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub position: Vector3<f32>,
    pub orientation: Quaternion<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    home: (Vector3<f32>, Vector3<f32>),
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * self.view_matrix()
    }
}

impl CameraPose for OrbitCamera {
    fn position(&self) -> Vector3<f32> {
        self.position
    }

    fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    fn orientation(&self) -> Quaternion<f32> {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: Quaternion<f32>) {
        self.orientation = orientation;
    }
}

impl OrbitCamera {
    pub fn new(position: Vector3<f32>, target: Vector3<f32>, aspect: f32) -> Self {
        let up = Vector3::unit_y();
        Self {
            position,
            orientation: camera_look_at(position, target, up),
            target,
            up,
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 1000.0,
            home: (position, target),
        }
    }

    /// Builds a camera from the session configuration.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(config.position, config.target, aspect);
        camera.fovy = Rad(config.fovy);
        camera.znear = config.znear;
        camera.zfar = config.zfar;
        camera.bounds.min_distance = Some(config.min_distance);
        camera.bounds.max_distance = Some(config.max_distance);
        camera
    }

    /// World to view transform derived from position and orientation
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::from(self.orientation.conjugate()) * Matrix4::from_translation(-self.position)
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.target).magnitude()
    }

    /// Direction the camera looks along
    pub fn forward(&self) -> Vector3<f32> {
        self.orientation * -Vector3::unit_z()
    }

    pub fn reset_to_default(&mut self) {
        let (position, target) = self.home;
        self.target = target;
        self.look_from(position);
    }

    pub fn set_distance(&mut self, distance: f32) {
        let distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        let offset = self.offset_direction();
        self.look_from(self.target + offset * distance);
    }

    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance().max(1.0 + f32::EPSILON)) * delta;
        self.set_distance(self.distance() + corrected_zoom);
    }

    /// Elevation of the camera above the target's horizontal plane
    pub fn pitch(&self) -> f32 {
        self.offset_direction().y.clamp(-1.0, 1.0).asin()
    }

    /// Heading of the camera around the vertical axis
    pub fn yaw(&self) -> f32 {
        let offset = self.offset_direction();
        offset.x.atan2(offset.z)
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        let pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        let yaw = self.yaw();
        self.place_spherical(pitch, yaw);
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch() + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.clamp(min_yaw, f32::MAX);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.clamp(f32::MIN, max_yaw);
        }
        let pitch = self
            .pitch()
            .clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.place_spherical(pitch, bounded_yaw);
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw() + delta);
    }

    /// Pans the camera relative to the current view direction
    /// delta.0 = horizontal pan (left/right relative to camera view)
    /// delta.1 = vertical pan (up/down relative to camera view)
    pub fn pan(&mut self, delta: (f32, f32)) {
        let right = self.orientation * Vector3::unit_x();
        let up = self.orientation * Vector3::unit_y();

        // Scale by distance for a consistent feel at all zoom levels
        let pan_scale = self.distance() * 0.1;

        let movement = right * delta.0 * pan_scale + up * delta.1 * pan_scale;

        self.position += movement;
        self.target += movement;
    }

    /// Moves the orbit target without moving the camera.
    pub fn set_target(&mut self, target: Vector3<f32>) {
        self.target = target;
        let position = self.position;
        self.look_from(position);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    fn offset_direction(&self) -> Vector3<f32> {
        let offset = self.position - self.target;
        if offset.magnitude2() == 0.0 {
            self.orientation * Vector3::unit_z()
        } else {
            offset.normalize()
        }
    }

    fn place_spherical(&mut self, pitch: f32, yaw: f32) {
        let distance = self.distance();
        self.look_from(calculate_cartesian_eye_position(
            pitch,
            yaw,
            distance,
            self.target,
        ));
    }

    fn look_from(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.orientation = camera_look_at(position, self.target, self.up);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: Some(400.0),
            min_pitch: -std::f32::consts::PI / 2.0 + 0.01,
            max_pitch: std::f32::consts::PI / 2.0 - 0.01,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}
