//! # Prelude
//!
//! Commonly used types of the field editor in one import.
//!
//! ```no_run
//! use heliofield::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut config = EditorConfig::default();
//!     config.theme = Theme::Dark;
//!     EditorApp::new(config)?.run()
//! }
//! ```

// Application and configuration
pub use crate::app::EditorApp;
pub use crate::config::{
    EditorConfig, GizmoConfig, IndicatorStyleKind, LabelScheme, OverlayCorner, Theme,
};
pub use crate::editor::EditorContext;
pub use crate::error::{ConfigError, GizmoError, GizmoResult};

// Field
pub use crate::field::{FieldLayout, FieldObject, FieldObjectKind, ObjectId};

// Camera and gizmo
pub use crate::gfx::camera::{Camera, CameraManager, CameraPose, OrbitCamera};
pub use crate::gfx::gizmos::{
    AnimationState, AxisDirection, Drawable, IndicatorStyle, OrientationGizmo, OverlayRenderer,
    PointerEvent, ResourceHandle, ResourcePool,
};
pub use crate::gfx::viewport::{HostRect, Viewport};
pub use crate::gfx::RenderEngine;

// Common external types
pub use cgmath::{InnerSpace, Quaternion, Vector3};
