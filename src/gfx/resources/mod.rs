// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Depth buffers and sampled textures used by the overlay renderer.

pub mod texture_resource;

// Re-export main types
pub use texture_resource::TextureResource;
