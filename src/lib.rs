// src/lib.rs
//! Heliostat field editor
//!
//! Orbit camera, orientation gizmo overlay and position inspector for
//! laying out a heliostat field, built on wgpu and winit.

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod field;
pub mod gfx;
pub mod prelude;
pub mod ui;

// Re-export main types for convenience
pub use app::EditorApp;
pub use editor::EditorContext;
