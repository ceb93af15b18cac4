//! Test doubles for the gizmo seams.

use std::collections::HashMap;

use cgmath::{Matrix4, Quaternion, Vector3};

use crate::gfx::camera::CameraPose;
use crate::gfx::geometry::GeometryData;
use crate::gfx::viewport::Viewport;

use super::traits::{
    Drawable, LabelDesc, MaterialDesc, OverlayRenderer, ResourceHandle, ResourceKind, ResourcePool,
};

/// Pool that hands out sequential ids and counts releases per handle
#[derive(Debug, Default)]
pub struct RecordingPool {
    next_id: u64,
    pub created: Vec<ResourceHandle>,
    pub releases: HashMap<ResourceHandle, usize>,
    pub labels: Vec<LabelDesc>,
}

impl RecordingPool {
    fn allocate(&mut self, kind: ResourceKind) -> ResourceHandle {
        self.next_id += 1;
        let handle = ResourceHandle {
            kind,
            id: self.next_id,
        };
        self.created.push(handle);
        handle
    }

    pub fn release_count(&self, handle: ResourceHandle) -> usize {
        self.releases.get(&handle).copied().unwrap_or(0)
    }

    pub fn count_of(&self, kind: ResourceKind) -> usize {
        self.created.iter().filter(|handle| handle.kind == kind).count()
    }
}

impl ResourcePool for RecordingPool {
    fn create_geometry(&mut self, _geometry: GeometryData) -> ResourceHandle {
        self.allocate(ResourceKind::Geometry)
    }

    fn create_material(&mut self, _material: MaterialDesc) -> ResourceHandle {
        self.allocate(ResourceKind::Material)
    }

    fn create_label_texture(&mut self, label: &LabelDesc) -> ResourceHandle {
        self.labels.push(label.clone());
        self.allocate(ResourceKind::LabelTexture)
    }

    fn release(&mut self, handle: ResourceHandle) {
        *self.releases.entry(handle).or_insert(0) += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    SetViewport(Viewport),
    ClearDepth,
    Draw {
        drawables: Vec<Drawable>,
        view_projection: Matrix4<f32>,
    },
}

/// Renderer that records every call
#[derive(Debug)]
pub struct RecordingRenderer {
    pub current: Viewport,
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            current: Viewport::full(width, height),
            calls: Vec::new(),
        }
    }
}

impl OverlayRenderer for RecordingRenderer {
    fn viewport(&self) -> Viewport {
        self.current
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.current = viewport;
        self.calls.push(RenderCall::SetViewport(viewport));
    }

    fn clear_depth(&mut self) {
        self.calls.push(RenderCall::ClearDepth);
    }

    fn draw(&mut self, drawables: &[Drawable], view_projection: Matrix4<f32>) {
        self.calls.push(RenderCall::Draw {
            drawables: drawables.to_vec(),
            view_projection,
        });
    }
}

/// Bare camera pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestCamera {
    pub position: Vector3<f32>,
    pub orientation: Quaternion<f32>,
}

impl TestCamera {
    pub fn new(position: Vector3<f32>, orientation: Quaternion<f32>) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

impl CameraPose for TestCamera {
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
