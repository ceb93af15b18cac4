//! # Gizmo Traits
//!
//! The seams between the orientation gizmo and the rest of the editor: the
//! renderer it draws through, the pool it allocates GPU resources from, and
//! the indicator style strategy chosen at construction time.

use cgmath::{Matrix4, Quaternion, Vector3};

use crate::config::IndicatorStyleKind;
use crate::gfx::geometry::GeometryData;
use crate::gfx::picking::{HitShape, PickTarget};
use crate::gfx::viewport::Viewport;

use super::indicators::{AxisDirection, AxisIndicator};

/// Kind of resource a [`ResourceHandle`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Geometry,
    Material,
    LabelTexture,
}

/// Opaque handle to a resource owned by a [`ResourcePool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    pub kind: ResourceKind,
    pub id: u64,
}

/// Unlit material: flat colour, optionally multiplied by a texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDesc {
    pub color: [f32; 4],
    pub texture: Option<ResourceHandle>,
}

impl MaterialDesc {
    pub fn flat(color: [f32; 3]) -> Self {
        Self {
            color: [color[0], color[1], color[2], 1.0],
            texture: None,
        }
    }

    pub fn textured(texture: ResourceHandle) -> Self {
        Self {
            color: [1.0; 4],
            texture: Some(texture),
        }
    }
}

/// Sprite texture of one indicator: a filled disc with an optional letter
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDesc {
    pub text: Option<String>,
    pub color: [f32; 3],
    /// Disc radius as a fraction of the texture side
    pub disc_radius: f32,
}

/// One draw of a geometry with a material and a world transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    pub geometry: ResourceHandle,
    pub material: ResourceHandle,
    pub transform: Matrix4<f32>,
    /// Multiplies the material alpha
    pub opacity: f32,
}

/// Resource allocation for gizmo geometry, materials and label textures.
///
/// Every handle returned by a `create_*` call must be given back through
/// [`ResourcePool::release`] exactly once.
pub trait ResourcePool {
    fn create_geometry(&mut self, geometry: GeometryData) -> ResourceHandle;
    fn create_material(&mut self, material: MaterialDesc) -> ResourceHandle;
    fn create_label_texture(&mut self, label: &LabelDesc) -> ResourceHandle;
    fn release(&mut self, handle: ResourceHandle);
}

/// The part of a renderer the gizmo draws through.
pub trait OverlayRenderer {
    /// Current viewport in pixels
    fn viewport(&self) -> Viewport;

    fn set_viewport(&mut self, viewport: Viewport);

    /// Clears depth so the overlay is drawn over the scene
    fn clear_depth(&mut self);

    /// Draws `drawables` in order through `view_projection`
    fn draw(&mut self, drawables: &[Drawable], view_projection: Matrix4<f32>);
}

/// Where an indicator sits in gizmo space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vector3<f32>,
    pub scale: f32,
}

/// Indicator style strategy.
///
/// Both styles share the click and animation contract of the gizmo; only
/// geometry, materials and hit shapes differ.
pub trait IndicatorStyle {
    fn kind(&self) -> IndicatorStyleKind;

    /// Placement of the indicator for `direction` in gizmo space
    fn place(&self, direction: AxisDirection) -> Placement;

    /// Pick shape of an indicator at the given scale
    fn hit_shape(&self, scale: f32) -> HitShape;

    /// The six indicators in pick order
    fn indicators(&self) -> &[AxisIndicator];

    fn indicators_mut(&mut self) -> &mut [AxisIndicator];

    /// Everything to draw for the gizmo rotated by `rotation`, back to front
    fn drawables(&self, rotation: Quaternion<f32>) -> Vec<Drawable>;

    /// Releases every resource the style created. Calling it again does
    /// nothing.
    fn dispose(&mut self, pool: &mut dyn ResourcePool);

    /// Applies the front/back opacity rule for the view vector
    fn set_opacity(&mut self, view: Vector3<f32>) {
        for indicator in self.indicators_mut() {
            indicator.opacity = indicator.direction.opacity_for(view);
        }
    }

    /// Pick targets of the indicators rotated by `rotation`; ids index
    /// [`IndicatorStyle::indicators`]
    fn hit_targets(&self, rotation: Quaternion<f32>) -> Vec<PickTarget> {
        self.indicators()
            .iter()
            .enumerate()
            .map(|(id, indicator)| PickTarget {
                id,
                center: rotation * indicator.placement.position,
                shape: self.hit_shape(indicator.placement.scale),
            })
            .collect()
    }
}
