//! Vertex selection and hit testing
//!
//! Selection is single-vertex only. The hit test deliberately returns the
//! lowest-index vertex inside the hit radius, not the nearest one.

use crate::defaults::SELECT_DISTANCE_SQ;
use crate::geometry::squared_distance;
use crate::shape::Shape;
use crate::types::{Angle, Point, Zoom};

/// Find the first valid vertex of `shape` within the default hit radius of `cursor`.
pub fn find_selected(cursor: Point, shape: &Shape, zoom: Zoom) -> Option<usize> {
    find_selected_within(cursor, shape, zoom, SELECT_DISTANCE_SQ)
}

/// Find the first valid vertex whose squared distance to `cursor` is at most
/// `radius_sq * zoom²`.
///
/// The zoom term keeps the hit radius constant on screen.
pub fn find_selected_within(
    cursor: Point,
    shape: &Shape,
    zoom: Zoom,
    radius_sq: f64,
) -> Option<usize> {
    let threshold = radius_sq * zoom.squared();
    shape
        .valid_points()
        .find(|&(_, p)| squared_distance(p, cursor) <= threshold)
        .map(|(i, _)| i)
}

/// Selection state for the current shape
///
/// Kept apart from the store so the renderer can read it without touching
/// the shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Selection {
    /// Vertex under the cursor, refreshed on every cursor update
    selected: Option<usize>,
    /// Vertex following the cursor while the primary button is held
    dragging: Option<usize>,
    /// Bearing of the cursor around the centroid at the last rotate-drag update
    rotate_anchor: Option<Angle>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    pub fn rotate_anchor(&self) -> Option<Angle> {
        self.rotate_anchor
    }

    pub fn is_rotating(&self) -> bool {
        self.rotate_anchor.is_some()
    }

    pub fn set_selected(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    /// Start dragging the selected vertex. Returns false when nothing is selected.
    pub fn begin_drag(&mut self) -> bool {
        self.dragging = self.selected;
        self.dragging.is_some()
    }

    pub fn end_drag(&mut self) {
        self.dragging = None;
    }

    pub fn begin_rotate(&mut self, bearing: Angle) {
        self.rotate_anchor = Some(bearing);
    }

    /// Record a new cursor bearing and return the change since the last one.
    pub fn advance_rotate(&mut self, bearing: Angle) -> Option<Angle> {
        let previous = self.rotate_anchor?;
        self.rotate_anchor = Some(bearing);
        Some((bearing - previous).wrapped())
    }

    pub fn end_rotate(&mut self) {
        self.rotate_anchor = None;
    }

    /// Forget everything (used when the current shape changes underneath).
    pub fn clear(&mut self) {
        *self = Selection::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pt;

    #[test]
    fn finds_vertex_inside_radius() {
        let shape = Shape::from_points([pt(0.0, 0.0), pt(5.0, 5.0)]);
        assert_eq!(find_selected(pt(5.1, 5.1), &shape, Zoom::ONE), Some(1));
        assert_eq!(find_selected(pt(2.0, 2.0), &shape, Zoom::ONE), None);
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let shape = Shape::from_points([pt(0.0, 0.0)]);
        assert_eq!(find_selected_within(pt(0.0, 0.5), &shape, Zoom::ONE, 0.25), Some(0));
        assert_eq!(find_selected_within(pt(0.0, 0.5001), &shape, Zoom::ONE, 0.25), None);
    }

    #[test]
    fn lower_index_wins_over_closer_vertex() {
        let shape = Shape::from_points([pt(0.0, 0.0), pt(0.1, 0.0)]);
        // The cursor sits on vertex 1, yet vertex 0 is also within range.
        assert_eq!(find_selected(pt(0.1, 0.0), &shape, Zoom::ONE), Some(0));
    }

    #[test]
    fn tombstones_are_skipped() {
        let mut shape = Shape::from_points([pt(0.0, 0.0), pt(0.1, 0.0)]);
        shape.tombstone(0).unwrap();
        assert_eq!(find_selected(pt(0.0, 0.0), &shape, Zoom::ONE), Some(1));
    }

    #[test]
    fn zoom_scales_hit_radius() {
        let shape = Shape::from_points([pt(0.0, 0.0)]);
        let cursor = pt(0.3, 0.0);
        assert_eq!(find_selected(cursor, &shape, Zoom::ONE), None);
        let zoomed_out = Zoom::try_new(2.0).unwrap();
        assert_eq!(find_selected(cursor, &shape, zoomed_out), Some(0));
    }

    #[test]
    fn drag_requires_selection() {
        let mut sel = Selection::new();
        assert!(!sel.begin_drag());
        sel.set_selected(Some(3));
        assert!(sel.begin_drag());
        assert_eq!(sel.dragging(), Some(3));
        sel.end_drag();
        assert_eq!(sel.dragging(), None);
        assert_eq!(sel.selected(), Some(3));
    }

    #[test]
    fn rotate_reports_incremental_deltas() {
        let mut sel = Selection::new();
        assert_eq!(sel.advance_rotate(Angle(1.0)), None);
        assert!(!sel.is_rotating());
        sel.begin_rotate(Angle(0.5));
        let d = sel.advance_rotate(Angle(0.75)).unwrap();
        assert!((d.radians() - 0.25).abs() < 1e-12);
        let d = sel.advance_rotate(Angle(0.5)).unwrap();
        assert!((d.radians() + 0.25).abs() < 1e-12);
        sel.end_rotate();
        assert!(!sel.is_rotating());
    }
}
