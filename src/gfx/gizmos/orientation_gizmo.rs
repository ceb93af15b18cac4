//! # Orientation Gizmo
//!
//! A compass overlay drawn in a fixed-size corner of the main viewport. It
//! shows six axis indicators rotated with the inverse of the camera, with
//! the indicators on the side the camera looks from drawn opaque. Clicking
//! an indicator turns the camera around the focus point until it looks down
//! that axis.
//!
//! The gizmo never owns the camera. It borrows it through [`CameraPose`] for
//! each call, so several gizmos and cameras can coexist.
//!
//! ## Usage
//!
//! ```no_run
//! # use heliofield::prelude::*;
//! # fn frame(
//! #     gizmo: &mut OrientationGizmo,
//! #     camera: &mut OrbitCamera,
//! #     renderer: &mut dyn OverlayRenderer,
//! #     dt: f32,
//! # ) {
//! gizmo.focus_center = camera.target;
//! gizmo.update(dt, camera);
//! gizmo.render(&*camera, renderer);
//! # }
//! ```

use cgmath::{InnerSpace, Quaternion, Vector3};

use crate::config::{GizmoConfig, IndicatorStyleKind};
use crate::error::{GizmoError, GizmoResult};
use crate::gfx::camera::CameraPose;
use crate::gfx::picking::{pick_nearest, OrthoCamera};
use crate::gfx::rotation::{angle_between, identity, is_finite, object_look_at, rotate_towards};
use crate::gfx::viewport::HostRect;

use super::indicators::{build_style, AxisDirection, AxisIndicator};
use super::traits::{IndicatorStyle, OverlayRenderer, ResourcePool};

/// A pointer press in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub client_x: f32,
    pub client_y: f32,
}

impl PointerEvent {
    pub fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }
}

/// An in-flight camera turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnAnimation {
    pub direction: AxisDirection,
    /// Orientation of a dummy at the focus facing the camera, advanced each
    /// frame
    pub path: Quaternion<f32>,
    /// Dummy orientation facing the target position
    pub path_target: Quaternion<f32>,
    /// Final camera orientation
    pub target_orientation: Quaternion<f32>,
    pub target_position: Vector3<f32>,
    pub focus: Vector3<f32>,
    /// Camera distance from the focus, kept for the whole turn
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Animating(TurnAnimation),
}

pub struct OrientationGizmo {
    /// Point the camera turns around; the host keeps it on the orbit target
    pub focus_center: Vector3<f32>,
    config: GizmoConfig,
    style: Box<dyn IndicatorStyle>,
    /// Inverse of the camera orientation at the last render
    rotation: Quaternion<f32>,
    ortho: OrthoCamera,
    state: AnimationState,
    disposed: bool,
}

impl OrientationGizmo {
    /// Builds the gizmo and allocates its indicator resources from `pool`.
    pub fn new(config: GizmoConfig, pool: &mut dyn ResourcePool) -> GizmoResult<Self> {
        config.validate()?;
        let style = build_style(config.style, config.labels, pool);
        log::debug!(
            "Orientation gizmo created ({} indicators, {}px overlay)",
            config.style,
            config.overlay_extent_px
        );

        Ok(Self {
            focus_center: Vector3::new(0.0, 0.0, 0.0),
            config,
            style,
            rotation: identity(),
            ortho: OrthoCamera::gizmo(),
            state: AnimationState::Idle,
            disposed: false,
        })
    }

    /// Builds the gizmo from a style tag, rejecting unknown tags.
    pub fn with_style_str(
        config: GizmoConfig,
        style: &str,
        pool: &mut dyn ResourcePool,
    ) -> GizmoResult<Self> {
        Self::new(config.with_style_str(style)?, pool)
    }

    pub fn config(&self) -> &GizmoConfig {
        &self.config
    }

    pub fn style(&self) -> IndicatorStyleKind {
        self.style.kind()
    }

    pub fn indicators(&self) -> &[AxisIndicator] {
        self.style.indicators()
    }

    /// Current opacity of the indicator for `direction`
    pub fn indicator_opacity(&self, direction: AxisDirection) -> Option<f32> {
        self.indicators()
            .iter()
            .find(|indicator| indicator.direction == direction)
            .map(|indicator| indicator.opacity)
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimationState::Animating(_))
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Draws the gizmo into its corner of the renderer's current viewport.
    ///
    /// The renderer viewport is restored afterwards.
    pub fn render<C: CameraPose>(&mut self, camera: &C, renderer: &mut dyn OverlayRenderer) {
        let orientation = camera.orientation();
        self.rotation = orientation.conjugate();

        let view = orientation * Vector3::unit_z();
        self.style.set_opacity(view);

        if self.disposed {
            return;
        }

        let saved = renderer.viewport();
        renderer.set_viewport(saved.overlay(self.config.overlay_extent_px, self.config.corner));
        renderer.clear_depth();
        let drawables = self.style.drawables(self.rotation);
        renderer.draw(&drawables, self.ortho.view_projection());
        renderer.set_viewport(saved);
    }

    /// Handles a pointer press over the host element.
    ///
    /// Returns `true` when the press hit an indicator and a turn started.
    /// Presses are ignored while a turn is running.
    pub fn handle_click<C: CameraPose>(
        &mut self,
        event: &PointerEvent,
        host: &HostRect,
        camera: &C,
    ) -> bool {
        if self.is_animating() || self.disposed {
            return false;
        }

        let overlay = host.overlay(self.config.overlay_extent_px, self.config.corner);
        if !overlay.contains(event.client_x, event.client_y) {
            return false;
        }

        let ndc = overlay.to_ndc(event.client_x, event.client_y);
        let ray = self.ortho.ray_from_ndc(ndc);
        let targets = self.style.hit_targets(self.rotation);

        let Some(hit) = pick_nearest(&ray, &targets) else {
            return false;
        };
        let Some(indicator) = self.style.indicators().get(hit.id) else {
            return false;
        };

        let tag = indicator.direction.tag();
        let focus = self.focus_center;
        self.prepare_animation(tag, focus, camera).is_ok()
    }

    /// Starts a turn towards `direction` as if its indicator was clicked.
    ///
    /// Returns `false` while another turn is running.
    pub fn request_view<C: CameraPose>(&mut self, direction: AxisDirection, camera: &C) -> bool {
        if self.is_animating() {
            return false;
        }
        let focus = self.focus_center;
        self.prepare_animation(direction.tag(), focus, camera).is_ok()
    }

    /// Computes the turn towards the axis named by `tag` around `focus` and
    /// enters the animating state.
    ///
    /// An unknown tag, or a turn that is still running, leaves the state
    /// untouched.
    pub fn prepare_animation<C: CameraPose>(
        &mut self,
        tag: &str,
        focus: Vector3<f32>,
        camera: &C,
    ) -> GizmoResult<()> {
        if self.is_animating() {
            return Err(GizmoError::TurnInProgress);
        }
        let direction = AxisDirection::from_tag(tag).map_err(|err| {
            log::error!("Orientation gizmo: {}", err);
            err
        })?;

        let position = camera.position();
        let radius = (position - focus).magnitude();
        let target_position = focus + direction.unit() * radius;

        let animation = TurnAnimation {
            direction,
            path: object_look_at(focus, position, path_up(position - focus)),
            path_target: object_look_at(focus, target_position, path_up(direction.unit())),
            target_orientation: direction.camera_orientation(),
            target_position,
            focus,
            radius,
        };

        log::debug!(
            "Turning camera to {} (radius {:.3}, {:.3} rad to go)",
            direction,
            radius,
            angle_between(animation.path, animation.path_target)
        );
        self.state = AnimationState::Animating(animation);
        Ok(())
    }

    /// Advances a running turn by `dt` seconds.
    ///
    /// The camera moves along the sphere around the focus and rotates
    /// towards the target orientation, both by at most `dt * turn_rate`
    /// radians. The turn ends once both have reached their targets.
    pub fn update<C: CameraPose>(&mut self, dt: f32, camera: &mut C) {
        let AnimationState::Animating(mut animation) = self.state else {
            return;
        };
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let step = dt * self.config.turn_rate;

        animation.path = rotate_towards(animation.path, animation.path_target, step);
        camera.set_position(
            animation.focus + animation.path * Vector3::unit_z() * animation.radius,
        );

        let orientation = rotate_towards(camera.orientation(), animation.target_orientation, step);
        if is_finite(orientation) {
            camera.set_orientation(orientation);
        } else {
            log::warn!("Orientation gizmo produced a non-finite camera orientation");
            camera.set_orientation(animation.target_orientation);
        }

        if animation.path == animation.path_target
            && camera.orientation() == animation.target_orientation
        {
            log::debug!("Camera turn to {} finished", animation.direction);
            self.state = AnimationState::Idle;
        } else {
            self.state = AnimationState::Animating(animation);
        }
    }

    /// Stops a running turn where it is, leaving the camera untouched.
    pub fn cancel_animation(&mut self) {
        if let AnimationState::Animating(animation) = self.state {
            log::debug!("Camera turn to {} cancelled", animation.direction);
            self.state = AnimationState::Idle;
        }
    }

    /// Releases the indicator resources. Further calls do nothing.
    pub fn dispose(&mut self, pool: &mut dyn ResourcePool) {
        if self.disposed {
            return;
        }
        self.style.dispose(pool);
        self.state = AnimationState::Idle;
        self.disposed = true;
    }
}

/// Up vector for a path look-at along `offset`.
///
/// A Y-up basis is undefined on the Y axis, so the ±Y ends use Z instead.
fn path_up(offset: Vector3<f32>) -> Vector3<f32> {
    if offset.magnitude2() > 0.0 && offset.normalize().y.abs() > 0.9999 {
        Vector3::unit_z()
    } else {
        Vector3::unit_y()
    }
}
