// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles the overlay pipeline, label textures, draw recording and frame
//! rendering.

pub mod label_texture;
pub mod overlay_renderer;
pub mod pipeline_manager;
pub mod render_engine;
pub mod vertex;

// Re-export main types
pub use overlay_renderer::{DrawList, WgpuOverlayRenderer};
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
pub use vertex::OverlayVertex;
