use cgmath::{Matrix4, Quaternion, Vector3};
use winit::{
    event::{DeviceEvent, KeyEvent},
    window::Window,
};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};

pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Forwards a device event to the controller.
    ///
    /// Returns `true` when the event moved the camera.
    pub fn process_event(&mut self, event: &DeviceEvent, window: &Window) -> bool {
        self.controller
            .process_events(event, window, &mut self.camera)
    }

    /// Forwards a keyboard event to the controller.
    ///
    /// Returns `true` when the event moved the camera.
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> bool {
        self.controller
            .process_keyed_events(event, &mut self.camera)
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

/// World pose of a camera: position plus unit orientation.
///
/// This is the only view of the camera the orientation gizmo needs. The
/// camera looks along its local `-Z` axis.
pub trait CameraPose {
    fn position(&self) -> Vector3<f32>;
    fn set_position(&mut self, position: Vector3<f32>);
    fn orientation(&self) -> Quaternion<f32>;
    fn set_orientation(&mut self, orientation: Quaternion<f32>);
}
