//! # Procedural Geometry Generation
//!
//! Generates the small set of meshes the editor draws itself: boxes for the
//! gizmo axis bars and field markers, and camera-facing quads for indicator
//! sprites.
//!
//! ## Usage
//!
//! ```rust
//! use heliofield::gfx::geometry::{generate_box, generate_quad};
//!
//! // Axis bar of the orientation gizmo, starting at the origin
//! let bar = generate_box(0.8, 0.05, 0.05).translated([0.4, 0.0, 0.0]);
//!
//! // Unit sprite quad
//! let quad = generate_quad(1.0);
//! assert_eq!(quad.triangle_count(), 2);
//! # let _ = bar;
//! ```

pub mod primitives;

pub use primitives::*;

/// Generated geometry data, kept on the CPU and expanded per frame
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns a copy moved by `offset`
    pub fn translated(mut self, offset: [f32; 3]) -> Self {
        for vertex in &mut self.vertices {
            vertex[0] += offset[0];
            vertex[1] += offset[1];
            vertex[2] += offset[2];
        }
        self
    }

    /// Axis-aligned bounds as `(min, max)`, `None` when empty
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.vertices.first()?;
        let mut min = first;
        let mut max = first;
        for vertex in self.vertices.iter().skip(1) {
            for axis in 0..3 {
                min[axis] = min[axis].min(vertex[axis]);
                max[axis] = max[axis].max(vertex[axis]);
            }
        }
        Some((min, max))
    }

    /// Texture coordinate of vertex `i`, defaulting to the texture centre
    pub fn tex_coord(&self, i: usize) -> [f32; 2] {
        self.tex_coords.get(i).copied().unwrap_or([0.5, 0.5])
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
