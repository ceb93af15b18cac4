//! # User Interface Module
//!
//! Dear ImGui-based panels for the field editor.
//!
//! ## Key Components
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu, theming
//! - [`panel`] - Field panel (object list and inspector) and view panel
//!   (gizmo state and quick views)
//! - [`inspector`] - North/east/up position editing with input validation
//!
//! ## Input Handling
//!
//! When ImGui wants the mouse or keyboard, events stop here and reach
//! neither the orientation gizmo nor the camera controller.

pub mod inspector;
pub mod manager;
pub mod panel;

// Re-export main types
pub use inspector::{FieldAxis, PositionInspector};
pub use manager::UiManager;
pub use panel::{field_panel, view_panel};
