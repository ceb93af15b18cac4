//! Axis indicators of the orientation gizmo and the two indicator styles.
//!
//! `arrows` draws three axis bars with a sprite on each end; only the
//! positive sprites carry a letter. `circles` drops the bars and draws
//! labelled discs on both ends, the negative one pulled in and shrunk.

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use cgmath::{Matrix4, Quaternion, Rad, Rotation3, Vector3};

use crate::config::{IndicatorStyleKind, LabelScheme};
use crate::error::{GizmoError, GizmoResult};
use crate::gfx::geometry::{generate_box, generate_quad};
use crate::gfx::picking::HitShape;

use super::traits::{
    Drawable, IndicatorStyle, LabelDesc, MaterialDesc, Placement, ResourceHandle, ResourcePool,
};

pub const X_AXIS_COLOR: [f32; 3] = [1.0, 0.212, 0.325];
pub const Y_AXIS_COLOR: [f32; 3] = [0.541, 0.859, 0.0];
pub const Z_AXIS_COLOR: [f32; 3] = [0.173, 0.561, 1.0];

/// Opacity of the indicator on the side the camera looks from
pub const FRONT_OPACITY: f32 = 1.0;
/// Opacity of the opposite indicator
pub const BACK_OPACITY: f32 = 0.5;

/// Scale (and for circles, radius) of the negative indicators
const NEGATIVE_SCALE: f32 = 0.8;

const ARROW_DISC_RADIUS: f32 = 0.25;
const CIRCLE_DISC_RADIUS: f32 = 0.45;

/// One of the six world axis directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisDirection {
    PosX,
    PosY,
    PosZ,
    NegX,
    NegY,
    NegZ,
}

impl AxisDirection {
    /// Pick order of the indicators
    pub const ALL: [AxisDirection; 6] = [
        AxisDirection::PosX,
        AxisDirection::PosY,
        AxisDirection::PosZ,
        AxisDirection::NegX,
        AxisDirection::NegY,
        AxisDirection::NegZ,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            AxisDirection::PosX => "posX",
            AxisDirection::PosY => "posY",
            AxisDirection::PosZ => "posZ",
            AxisDirection::NegX => "negX",
            AxisDirection::NegY => "negY",
            AxisDirection::NegZ => "negZ",
        }
    }

    pub fn from_tag(tag: &str) -> GizmoResult<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.tag() == tag)
            .ok_or_else(|| GizmoError::UnknownDirection(tag.to_string()))
    }

    /// 0 for x, 1 for y, 2 for z
    pub fn axis(&self) -> usize {
        match self {
            AxisDirection::PosX | AxisDirection::NegX => 0,
            AxisDirection::PosY | AxisDirection::NegY => 1,
            AxisDirection::PosZ | AxisDirection::NegZ => 2,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            AxisDirection::PosX | AxisDirection::PosY | AxisDirection::PosZ
        )
    }

    pub fn unit(&self) -> Vector3<f32> {
        let sign = if self.is_positive() { 1.0 } else { -1.0 };
        match self.axis() {
            0 => Vector3::new(sign, 0.0, 0.0),
            1 => Vector3::new(0.0, sign, 0.0),
            _ => Vector3::new(0.0, 0.0, sign),
        }
    }

    pub fn color(&self) -> [f32; 3] {
        match self.axis() {
            0 => X_AXIS_COLOR,
            1 => Y_AXIS_COLOR,
            _ => Z_AXIS_COLOR,
        }
    }

    /// Camera orientation that looks back at the origin from this side
    pub fn camera_orientation(&self) -> Quaternion<f32> {
        match self {
            AxisDirection::PosX => Quaternion::from_angle_y(Rad(FRAC_PI_2)),
            AxisDirection::PosY => Quaternion::from_angle_x(Rad(-FRAC_PI_2)),
            AxisDirection::PosZ => Quaternion::new(1.0, 0.0, 0.0, 0.0),
            AxisDirection::NegX => Quaternion::from_angle_y(Rad(-FRAC_PI_2)),
            AxisDirection::NegY => Quaternion::from_angle_x(Rad(FRAC_PI_2)),
            AxisDirection::NegZ => Quaternion::from_angle_y(Rad(PI)),
        }
    }

    /// Opacity of this indicator for the camera view vector `view`.
    ///
    /// The positive end is in front when the matching component of `view`
    /// is non-negative.
    pub fn opacity_for(&self, view: Vector3<f32>) -> f32 {
        let positive_in_front = view[self.axis()] >= 0.0;
        if positive_in_front == self.is_positive() {
            FRONT_OPACITY
        } else {
            BACK_OPACITY
        }
    }

    /// Letter drawn on the indicator, `None` for an unlabelled end
    pub fn label(&self, scheme: LabelScheme, label_negative: bool) -> Option<String> {
        if !self.is_positive() && !label_negative {
            return None;
        }
        let text = match (scheme, self) {
            (LabelScheme::Axis, AxisDirection::PosX) => "X",
            (LabelScheme::Axis, AxisDirection::PosY) => "Y",
            (LabelScheme::Axis, AxisDirection::PosZ) => "Z",
            (LabelScheme::Axis, AxisDirection::NegX) => "-X",
            (LabelScheme::Axis, AxisDirection::NegY) => "-Y",
            (LabelScheme::Axis, AxisDirection::NegZ) => "-Z",
            (LabelScheme::Compass, AxisDirection::PosX) => "N",
            (LabelScheme::Compass, AxisDirection::PosY) => "U",
            (LabelScheme::Compass, AxisDirection::PosZ) => "E",
            (LabelScheme::Compass, AxisDirection::NegX) => "S",
            (LabelScheme::Compass, AxisDirection::NegY) => "D",
            (LabelScheme::Compass, AxisDirection::NegZ) => "W",
        };
        Some(text.to_string())
    }
}

impl fmt::Display for AxisDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AxisDirection {
    type Err = GizmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

/// One clickable axis marker
#[derive(Debug, Clone, PartialEq)]
pub struct AxisIndicator {
    pub direction: AxisDirection,
    pub label: Option<String>,
    pub color: [f32; 3],
    pub opacity: f32,
    pub placement: Placement,
    pub material: ResourceHandle,
}

/// Sprites shared by both styles
struct SpriteSet {
    indicators: Vec<AxisIndicator>,
    quad: ResourceHandle,
    resources: Vec<ResourceHandle>,
}

impl SpriteSet {
    fn build<F>(
        pool: &mut dyn ResourcePool,
        labels: LabelScheme,
        label_negative: bool,
        disc_radius: f32,
        place: F,
    ) -> Self
    where
        F: Fn(AxisDirection) -> Placement,
    {
        let quad = pool.create_geometry(generate_quad(1.0));
        let mut resources = vec![quad];

        let indicators = AxisDirection::ALL
            .into_iter()
            .map(|direction| {
                let label = direction.label(labels, label_negative);
                let texture = pool.create_label_texture(&LabelDesc {
                    text: label.clone(),
                    color: direction.color(),
                    disc_radius,
                });
                let material = pool.create_material(MaterialDesc::textured(texture));
                resources.push(texture);
                resources.push(material);

                AxisIndicator {
                    direction,
                    label,
                    color: direction.color(),
                    opacity: FRONT_OPACITY,
                    placement: place(direction),
                    material,
                }
            })
            .collect();

        Self {
            indicators,
            quad,
            resources,
        }
    }

    /// Camera-facing sprites sorted back to front
    fn drawables(&self, rotation: Quaternion<f32>) -> Vec<Drawable> {
        let mut sprites: Vec<(f32, Drawable)> = self
            .indicators
            .iter()
            .map(|indicator| {
                let center = rotation * indicator.placement.position;
                let transform = Matrix4::from_translation(center)
                    * Matrix4::from_scale(indicator.placement.scale);
                (
                    center.z,
                    Drawable {
                        geometry: self.quad,
                        material: indicator.material,
                        transform,
                        opacity: indicator.opacity,
                    },
                )
            })
            .collect();
        sprites.sort_by(|a, b| a.0.total_cmp(&b.0));
        sprites.into_iter().map(|(_, drawable)| drawable).collect()
    }

    fn release(&mut self, pool: &mut dyn ResourcePool) {
        for handle in self.resources.drain(..) {
            pool.release(handle);
        }
    }
}

/// Axis bars with a sprite on each end
pub struct ArrowIndicators {
    sprites: SpriteSet,
    bar: ResourceHandle,
    bars: Vec<(Matrix4<f32>, ResourceHandle)>,
    resources: Vec<ResourceHandle>,
}

impl ArrowIndicators {
    pub fn new(pool: &mut dyn ResourcePool, labels: LabelScheme) -> Self {
        let sprites = SpriteSet::build(pool, labels, false, ARROW_DISC_RADIUS, arrow_placement);

        let bar = pool.create_geometry(generate_box(0.8, 0.05, 0.05).translated([0.4, 0.0, 0.0]));
        let mut resources = vec![bar];
        let bars = [
            (Matrix4::from_scale(1.0), X_AXIS_COLOR),
            (Matrix4::from_angle_z(Rad(FRAC_PI_2)), Y_AXIS_COLOR),
            (Matrix4::from_angle_y(Rad(-FRAC_PI_2)), Z_AXIS_COLOR),
        ]
        .into_iter()
        .map(|(local, color)| {
            let material = pool.create_material(MaterialDesc::flat(color));
            resources.push(material);
            (local, material)
        })
        .collect();

        Self {
            sprites,
            bar,
            bars,
            resources,
        }
    }
}

fn arrow_placement(direction: AxisDirection) -> Placement {
    Placement {
        position: direction.unit(),
        scale: if direction.is_positive() {
            1.0
        } else {
            NEGATIVE_SCALE
        },
    }
}

impl IndicatorStyle for ArrowIndicators {
    fn kind(&self) -> IndicatorStyleKind {
        IndicatorStyleKind::Arrows
    }

    fn place(&self, direction: AxisDirection) -> Placement {
        arrow_placement(direction)
    }

    fn hit_shape(&self, scale: f32) -> HitShape {
        HitShape::Quad {
            half_extent: 0.5 * scale,
        }
    }

    fn indicators(&self) -> &[AxisIndicator] {
        &self.sprites.indicators
    }

    fn indicators_mut(&mut self) -> &mut [AxisIndicator] {
        &mut self.sprites.indicators
    }

    fn drawables(&self, rotation: Quaternion<f32>) -> Vec<Drawable> {
        let gizmo = Matrix4::from(rotation);
        let mut drawables: Vec<Drawable> = self
            .bars
            .iter()
            .map(|(local, material)| Drawable {
                geometry: self.bar,
                material: *material,
                transform: gizmo * *local,
                opacity: 1.0,
            })
            .collect();
        drawables.extend(self.sprites.drawables(rotation));
        drawables
    }

    fn dispose(&mut self, pool: &mut dyn ResourcePool) {
        self.sprites.release(pool);
        for handle in self.resources.drain(..) {
            pool.release(handle);
        }
        self.bars.clear();
    }
}

/// Labelled discs on both ends of every axis
pub struct CircleIndicators {
    sprites: SpriteSet,
}

impl CircleIndicators {
    pub fn new(pool: &mut dyn ResourcePool, labels: LabelScheme) -> Self {
        Self {
            sprites: SpriteSet::build(pool, labels, true, CIRCLE_DISC_RADIUS, circle_placement),
        }
    }
}

fn circle_placement(direction: AxisDirection) -> Placement {
    if direction.is_positive() {
        Placement {
            position: direction.unit(),
            scale: 1.0,
        }
    } else {
        Placement {
            position: direction.unit() * NEGATIVE_SCALE,
            scale: NEGATIVE_SCALE,
        }
    }
}

impl IndicatorStyle for CircleIndicators {
    fn kind(&self) -> IndicatorStyleKind {
        IndicatorStyleKind::Circles
    }

    fn place(&self, direction: AxisDirection) -> Placement {
        circle_placement(direction)
    }

    fn hit_shape(&self, scale: f32) -> HitShape {
        HitShape::Disk {
            radius: CIRCLE_DISC_RADIUS * scale,
        }
    }

    fn indicators(&self) -> &[AxisIndicator] {
        &self.sprites.indicators
    }

    fn indicators_mut(&mut self) -> &mut [AxisIndicator] {
        &mut self.sprites.indicators
    }

    fn drawables(&self, rotation: Quaternion<f32>) -> Vec<Drawable> {
        self.sprites.drawables(rotation)
    }

    fn dispose(&mut self, pool: &mut dyn ResourcePool) {
        self.sprites.release(pool);
    }
}

/// Builds the indicator style for `kind`, allocating its resources from
/// `pool`.
pub fn build_style(
    kind: IndicatorStyleKind,
    labels: LabelScheme,
    pool: &mut dyn ResourcePool,
) -> Box<dyn IndicatorStyle> {
    match kind {
        IndicatorStyleKind::Arrows => Box::new(ArrowIndicators::new(pool, labels)),
        IndicatorStyleKind::Circles => Box::new(CircleIndicators::new(pool, labels)),
    }
}
