use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::orbit_camera::OrbitCamera;

/// Maps raw mouse and keyboard input onto orbit camera operations.
///
/// Every `process_*` method reports whether the camera was moved so the
/// host can hand camera ownership back to the user (for example by
/// cancelling a running gizmo animation) before the move is applied.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
    suppressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            is_shift_held: false,
            is_mouse_pressed: false,
            suppressed: false,
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut OrbitCamera,
    ) -> bool {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
                if !self.is_mouse_pressed {
                    self.suppressed = false;
                }
                false
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                window.request_redraw();
                true
            }
            DeviceEvent::MouseMotion { delta } => {
                if !self.is_mouse_pressed || self.suppressed {
                    return false;
                }
                if self.is_shift_held {
                    // SHIFT + DRAG = PAN (move focus point)
                    camera.pan((
                        -delta.0 as f32 * self.pan_speed,
                        delta.1 as f32 * self.pan_speed,
                    ));
                } else {
                    // NORMAL DRAG = ROTATE (orbit around focus)
                    camera.add_yaw(-delta.0 as f32 * self.rotate_speed);
                    camera.add_pitch(delta.1 as f32 * self.rotate_speed);
                }
                window.request_redraw();
                true
            }
            _ => false,
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
                state,
                ..
            } => {
                let was_shift_held = self.is_shift_held;
                self.is_shift_held = *state == ElementState::Pressed;
                if was_shift_held != self.is_shift_held {
                    log::debug!("Shift state changed: {}", self.is_shift_held);
                }
                false
            }
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::KeyC),
                state: ElementState::Pressed,
                ..
            } if self.is_shift_held => {
                log::info!("Resetting camera to default position");
                camera.reset_to_default();
                true
            }
            _ => false,
        }
    }

    /// Ignores drag motion until the mouse button is released.
    ///
    /// Used when a press was consumed by an overlay (the orientation gizmo)
    /// so the same press does not also start an orbit drag.
    pub fn suppress_drag(&mut self) {
        self.suppressed = true;
    }

    /// Returns true if currently rotating
    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed && !self.is_shift_held && !self.suppressed
    }
}
