//! Derived shape properties: signed area and centroid
//!
//! Both are recomputed from the valid vertices, in array order, every time a
//! shape changes. The sign of the area gives the winding direction:
//! counter-clockwise is positive.

use std::fmt;

use crate::errors::EditError;
use crate::shape::Shape;
use crate::types::{Point, pt};

/// Cached geometric properties of a shape
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ShapeProperties {
    /// Signed shoelace area (CCW positive)
    pub area: f64,
    /// Area-weighted centroid; `None` when the polygon encloses no area
    pub centroid: Option<Point>,
    /// Number of valid vertices the properties were computed from
    pub valid_vertices: usize,
}

/// Winding direction of a polygon, as shown by the winding indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
    /// Zero area (fewer than 3 vertices or collinear)
    Degenerate,
}

impl fmt::Display for Winding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winding::CounterClockwise => write!(f, "ccw"),
            Winding::Clockwise => write!(f, "cw"),
            Winding::Degenerate => write!(f, "degenerate"),
        }
    }
}

impl ShapeProperties {
    /// Centroid, or `DegenerateShape` when it is undefined.
    pub fn centroid(&self) -> Result<Point, EditError> {
        self.centroid.ok_or(EditError::DegenerateShape {
            valid_vertices: self.valid_vertices,
            area: self.area,
        })
    }

    pub fn winding(&self) -> Winding {
        if self.centroid.is_none() {
            Winding::Degenerate
        } else if self.area > 0.0 {
            Winding::CounterClockwise
        } else {
            Winding::Clockwise
        }
    }
}

/// Compute area and centroid from the valid vertices of `shape`.
pub fn compute(shape: &Shape) -> ShapeProperties {
    let points: Vec<Point> = shape.valid_points().map(|(_, p)| p).collect();
    compute_points(&points)
}

/// Compute area and centroid for an ordered list of points (the polygon closes
/// from the last point back to the first).
pub fn compute_points(points: &[Point]) -> ShapeProperties {
    let n = points.len();

    let mut twice_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        twice_area += cross;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    let area = 0.5 * twice_area;

    let centroid = if n < 3 || area == 0.0 {
        None
    } else {
        let c = pt(cx / (6.0 * area), cy / (6.0 * area));
        c.is_finite().then_some(c)
    };

    ShapeProperties {
        area,
        centroid,
        valid_vertices: n,
    }
}
