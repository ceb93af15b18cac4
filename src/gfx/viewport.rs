//! Pixel rectangles shared by the renderer and the orientation gizmo.
//!
//! Both rectangles use a top-left origin with y growing downwards, which is
//! what wgpu viewports and winit cursor positions use.

use cgmath::Vector2;

use crate::config::OverlayCorner;

/// Render target region in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Viewport covering a whole surface
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    /// Square of side `extent` anchored to `corner` of this viewport
    ///
    /// The side shrinks to fit a viewport smaller than `extent`.
    pub fn overlay(&self, extent: u32, corner: OverlayCorner) -> Viewport {
        let extent = fit_extent(extent, self.width, self.height);
        let (x, y) = corner_origin(self.x, self.y, self.width, self.height, extent, corner);
        Viewport::new(x, y, extent, extent)
    }
}

/// Client-space bounds of the element that receives pointer events
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl HostRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Client-space square the overlay occupies
    ///
    /// Matches [`Viewport::overlay`] for a host of the same size.
    pub fn overlay(&self, extent: u32, corner: OverlayCorner) -> OverlayRect {
        let extent = fit_extent(extent, self.width, self.height);
        let (left, top) = corner_origin(self.left, self.top, self.width, self.height, extent, corner);
        OverlayRect { left, top, extent }
    }
}

/// The overlay square in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRect {
    pub left: f32,
    pub top: f32,
    pub extent: f32,
}

impl OverlayRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.left + self.extent && y >= self.top && y <= self.top + self.extent
    }

    pub fn center(&self) -> (f32, f32) {
        (self.left + self.extent * 0.5, self.top + self.extent * 0.5)
    }

    /// Client coordinates to normalised device coordinates, y up
    pub fn to_ndc(&self, x: f32, y: f32) -> Vector2<f32> {
        Vector2::new(
            (x - self.left) / self.extent * 2.0 - 1.0,
            -((y - self.top) / self.extent) * 2.0 + 1.0,
        )
    }
}

fn fit_extent(extent: u32, width: f32, height: f32) -> f32 {
    (extent as f32).min(width).min(height).max(1.0)
}

fn corner_origin(
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    extent: f32,
    corner: OverlayCorner,
) -> (f32, f32) {
    match corner {
        OverlayCorner::TopLeft => (left, top),
        OverlayCorner::TopRight => (left + width - extent, top),
        OverlayCorner::BottomLeft => (left, top + height - extent),
        OverlayCorner::BottomRight => (left + width - extent, top + height - extent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottom_right_overlay() {
        let viewport = Viewport::full(800, 600);
        assert_eq!(
            viewport.overlay(128, OverlayCorner::BottomRight),
            Viewport::new(672.0, 472.0, 128.0, 128.0)
        );
    }

    #[test]
    fn test_overlay_follows_corner() {
        let host = HostRect::new(10.0, 20.0, 400.0, 300.0);
        let rect = host.overlay(100, OverlayCorner::TopRight);
        assert_eq!((rect.left, rect.top), (310.0, 20.0));
        let rect = host.overlay(100, OverlayCorner::BottomLeft);
        assert_eq!((rect.left, rect.top), (10.0, 220.0));
    }

    #[test]
    fn test_overlay_shrinks_to_small_host() {
        let viewport = Viewport::full(100, 80).overlay(128, OverlayCorner::BottomRight);
        let rect = HostRect::new(0.0, 0.0, 100.0, 80.0).overlay(128, OverlayCorner::BottomRight);

        assert_eq!(viewport, Viewport::new(20.0, 0.0, 80.0, 80.0));
        assert_eq!((rect.left, rect.top, rect.extent), (viewport.x, viewport.y, viewport.width));

        let (cx, cy) = rect.center();
        assert_eq!(rect.to_ndc(cx, cy), Vector2::new(0.0, 0.0));
        assert!(rect.contains(99.0, 79.0));
        assert!(!rect.contains(10.0, 40.0));
    }

    #[test]
    fn test_ndc_corners() {
        let rect = OverlayRect {
            left: 100.0,
            top: 50.0,
            extent: 64.0,
        };
        assert_eq!(rect.to_ndc(100.0, 50.0), Vector2::new(-1.0, 1.0));
        assert_eq!(rect.to_ndc(164.0, 114.0), Vector2::new(1.0, -1.0));
        assert!(rect.contains(164.0, 114.0));
        assert!(!rect.contains(99.0, 60.0));
    }
}
