//! # Graphics Module
//!
//! All graphics-related functionality of the field editor: camera system,
//! overlay rendering, the orientation gizmo and its supporting math.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Orbit camera stored as a world pose
//! - **Gizmos** ([`gizmos`]) - Orientation gizmo and indicator styles
//! - **Picking** ([`picking`]) - Overlay camera and ray hit-testing
//! - **Rendering** ([`rendering`]) - wgpu surface, overlay pipeline, draw lists
//! - **Resources** ([`resources`]) - Depth and label textures
//! - **Geometry** ([`geometry`]) - Procedural boxes, quads and discs
//!
//! ## Usage
//!
//! ```no_run
//! use heliofield::gfx::RenderEngine;
//!
//! // The render engine is created by EditorApp once a window exists
//! // let render_engine = RenderEngine::new(window, width, height).await?;
//! ```

pub mod camera;
pub mod geometry;
pub mod gizmos;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod rotation;
pub mod viewport;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
