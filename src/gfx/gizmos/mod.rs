//! # Gizmo System
//!
//! The orientation gizmo ("compass") of the field editor: a small overlay in
//! a corner of the viewport that shows the camera orientation and turns the
//! camera to an axis view when one of its indicators is clicked.
//!
//! ## Architecture
//!
//! [`OrientationGizmo`] owns the interaction state. It draws through an
//! [`OverlayRenderer`], allocates from a [`ResourcePool`] and delegates
//! indicator geometry to an [`IndicatorStyle`] picked once from the
//! configuration (`arrows` or `circles`).
//!
//! ## Usage
//!
//! ```no_run
//! use heliofield::config::GizmoConfig;
//! use heliofield::gfx::gizmos::{OrientationGizmo, ResourcePool};
//!
//! fn build(pool: &mut dyn ResourcePool) -> heliofield::error::GizmoResult<OrientationGizmo> {
//!     let config = GizmoConfig::default().with_style_str("circles")?;
//!     OrientationGizmo::new(config, pool)
//! }
//! ```

pub mod indicators;
pub mod orientation_gizmo;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod test_orientation;

// Re-export main types
pub use indicators::{AxisDirection, AxisIndicator};
pub use orientation_gizmo::{AnimationState, OrientationGizmo, PointerEvent, TurnAnimation};
pub use traits::{
    Drawable, IndicatorStyle, LabelDesc, MaterialDesc, OverlayRenderer, Placement,
    ResourceHandle, ResourceKind, ResourcePool,
};
