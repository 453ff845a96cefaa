//! Screen ↔ grid coordinate mapping
//!
//! The window is a square of `screen_size` pixels with the origin at the top
//! left and y growing downwards. The grid is centered on the window, y grows
//! upwards, and at zoom 1.0 it spans `[-grid_size, grid_size]` on both axes.

use glam::DVec2;

use crate::defaults::{GRID_SIZE, SCREEN_SIZE};
use crate::types::{Point, Zoom, pt};

/// Maps window pixels to grid units and back
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Window side length in pixels
    pub screen_size: f64,
    /// Grid half-extent at zoom 1.0
    pub grid_size: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            screen_size: SCREEN_SIZE,
            grid_size: GRID_SIZE,
        }
    }
}

impl Viewport {
    /// Half-extent of the visible grid at `zoom`
    pub fn extent(&self, zoom: Zoom) -> f64 {
        self.grid_size * zoom.factor()
    }

    /// Convert a pixel position to grid coordinates.
    pub fn screen_to_grid(&self, screen: DVec2, zoom: Zoom) -> Point {
        let extent = self.extent(zoom);
        pt(
            2.0 * extent * screen.x / self.screen_size - extent,
            -2.0 * extent * screen.y / self.screen_size + extent,
        )
    }

    /// Convert grid coordinates to a pixel position.
    pub fn grid_to_screen(&self, point: Point, zoom: Zoom) -> DVec2 {
        let extent = self.extent(zoom);
        DVec2::new(
            (point.x + extent) * self.screen_size / (2.0 * extent),
            (extent - point.y) * self.screen_size / (2.0 * extent),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_center_map_to_grid_bounds() {
        let vp = Viewport::default();
        assert_eq!(vp.screen_to_grid(DVec2::new(800.0, 800.0), Zoom::ONE), pt(0.0, 0.0));
        assert_eq!(vp.screen_to_grid(DVec2::new(0.0, 0.0), Zoom::ONE), pt(-10.0, 10.0));
        assert_eq!(vp.screen_to_grid(DVec2::new(1600.0, 1600.0), Zoom::ONE), pt(10.0, -10.0));
    }

    #[test]
    fn zoom_widens_visible_extent() {
        let vp = Viewport::default();
        let zoom = Zoom::try_new(2.0).unwrap();
        assert_eq!(vp.extent(zoom), 20.0);
        assert_eq!(vp.screen_to_grid(DVec2::new(1600.0, 0.0), zoom), pt(20.0, 20.0));
    }

    #[test]
    fn grid_to_screen_inverts_screen_to_grid() {
        let vp = Viewport::default();
        let zoom = Zoom::try_new(1.5).unwrap();
        let screen = DVec2::new(123.0, 1444.0);
        let back = vp.grid_to_screen(vp.screen_to_grid(screen, zoom), zoom);
        assert!((back - screen).abs().max_element() < 1e-9, "{:?}", back);
    }
}
