//! # Editor Context
//!
//! [`EditorContext`] holds everything one editor session works on: the orbit
//! camera and its controller, the orientation gizmo, the field layout and
//! the current selection. The application owns exactly one and passes it
//! to whatever needs it.
//!
//! Input routing follows one rule: a pointer press goes to the gizmo first,
//! and only reaches the camera controller when the gizmo did not take it.
//! Any manual camera movement cancels a running gizmo turn.

use winit::{
    event::{DeviceEvent, KeyEvent},
    window::Window,
};

use crate::config::EditorConfig;
use crate::error::GizmoResult;
use crate::field::{FieldLayout, FieldMarkers, FieldObjectKind, ObjectId};
use crate::gfx::camera::{Camera, CameraController, CameraManager, OrbitCamera};
use crate::gfx::gizmos::{
    AxisDirection, OrientationGizmo, OverlayRenderer, PointerEvent, ResourcePool,
};
use crate::gfx::viewport::HostRect;

pub struct EditorContext {
    pub camera_manager: CameraManager,
    gizmo: OrientationGizmo,
    field: FieldLayout,
    markers: FieldMarkers,
    selected: Option<ObjectId>,
    surface_size: (u32, u32),
}

impl EditorContext {
    /// Creates a session with the default field layout.
    ///
    /// Gizmo and marker resources are allocated from `pool`.
    pub fn new(
        config: &EditorConfig,
        pool: &mut dyn ResourcePool,
        width: u32,
        height: u32,
    ) -> GizmoResult<Self> {
        Self::with_field(config, pool, width, height, FieldLayout::with_default_objects())
    }

    pub fn with_field(
        config: &EditorConfig,
        pool: &mut dyn ResourcePool,
        width: u32,
        height: u32,
        field: FieldLayout,
    ) -> GizmoResult<Self> {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let camera = OrbitCamera::from_config(&config.camera, aspect);
        let controller = CameraController::new(0.005, 0.1);

        let mut gizmo = OrientationGizmo::new(config.gizmo, pool)?;
        gizmo.focus_center = camera.target;
        let markers = FieldMarkers::new(pool);

        Ok(Self {
            camera_manager: CameraManager::new(camera, controller),
            gizmo,
            field,
            markers,
            selected: None,
            surface_size: (width, height),
        })
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera_manager.camera
    }

    pub fn gizmo(&self) -> &OrientationGizmo {
        &self.gizmo
    }

    pub fn field(&self) -> &FieldLayout {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut FieldLayout {
        &mut self.field
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Selects `id`; unknown ids clear the selection.
    pub fn select(&mut self, id: Option<ObjectId>) {
        self.selected = id.filter(|id| self.field.get(*id).is_some());
    }

    /// Adds an object at the orbit target and selects it.
    pub fn add_object(&mut self, kind: FieldObjectKind) -> ObjectId {
        let id = self.field.add(kind, self.camera_manager.camera.target);
        self.selected = Some(id);
        id
    }

    /// Removes the selected object, if any.
    pub fn remove_selected(&mut self) {
        if let Some(id) = self.selected.take() {
            self.field.remove(id);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_size = (width, height);
        self.camera_manager.camera.resize_projection(width, height);
    }

    /// The client area the gizmo overlay is anchored in
    pub fn host_rect(&self) -> HostRect {
        let (width, height) = self.surface_size;
        HostRect::new(0.0, 0.0, width as f32, height as f32)
    }

    /// Routes a pointer press in client pixels to the gizmo.
    ///
    /// Returns `true` when the gizmo took the press; the controller then
    /// ignores the drag that follows it.
    pub fn pointer_pressed(&mut self, x: f32, y: f32) -> bool {
        self.sync_focus();
        let host = self.host_rect();
        let consumed = self.gizmo.handle_click(
            &PointerEvent::new(x, y),
            &host,
            &self.camera_manager.camera,
        );
        if consumed {
            self.camera_manager.controller.suppress_drag();
        }
        consumed
    }

    /// Starts the same turn an indicator click would.
    pub fn request_view(&mut self, direction: AxisDirection) -> bool {
        self.sync_focus();
        self.gizmo
            .request_view(direction, &self.camera_manager.camera)
    }

    /// Feeds a device event to the camera controller.
    pub fn camera_device_event(&mut self, event: &DeviceEvent, window: &Window) {
        if self.camera_manager.process_event(event, window) {
            self.manual_camera_input();
        }
    }

    /// Feeds a keyboard event to the camera controller.
    pub fn camera_key_event(&mut self, event: &KeyEvent) {
        if self.camera_manager.process_keyboard_event(event) {
            self.manual_camera_input();
        }
    }

    /// The user moved the camera: they own it again.
    pub fn manual_camera_input(&mut self) {
        self.gizmo.cancel_animation();
        self.sync_focus();
    }

    /// Advances the gizmo turn by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if !self.gizmo.is_animating() {
            self.sync_focus();
        }
        self.gizmo.update(dt, &mut self.camera_manager.camera);
    }

    /// Records the field markers and then the gizmo overlay.
    pub fn render(&mut self, renderer: &mut dyn OverlayRenderer) {
        let drawables = self.markers.drawables(&self.field, self.selected);
        if !drawables.is_empty() {
            renderer.draw(
                &drawables,
                self.camera_manager.camera.build_view_projection_matrix(),
            );
        }
        self.gizmo.render(&self.camera_manager.camera, renderer);
    }

    /// Releases gizmo and marker resources.
    pub fn dispose(mut self, pool: &mut dyn ResourcePool) {
        self.gizmo.dispose(pool);
        self.markers.dispose(pool);
    }

    fn sync_focus(&mut self) {
        self.gizmo.focus_center = self.camera_manager.camera.target;
    }
}
