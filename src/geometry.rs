//! Geometry helpers: distances, rotation, reflection, quantization

use glam::dvec2;

use crate::types::{Angle, Point};

/// Sum of squared coordinate differences between two points.
#[inline]
pub fn squared_distance(a: Point, b: Point) -> f64 {
    let d = a - b;
    d.x * d.x + d.y * d.y
}

/// Rotate `p` about `center` by `angle` (counter-clockwise positive).
pub fn rotate(p: Point, center: Point, angle: Angle) -> Point {
    let (sin, cos) = angle.radians().sin_cos();
    let v = p - center;
    center + dvec2(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Direction from `from` toward `to`, measured from the +x axis.
#[inline]
pub fn bearing(from: Point, to: Point) -> Angle {
    let d = to - from;
    Angle::from_radians(d.y.atan2(d.x))
}

/// Mirror `p` across the vertical line `x = cx`.
#[inline]
pub fn reflect_x(p: Point, cx: f64) -> Point {
    dvec2(2.0 * cx - p.x, p.y)
}

/// Mirror `p` across the horizontal line `y = cy`.
#[inline]
pub fn reflect_y(p: Point, cy: f64) -> Point {
    dvec2(p.x, 2.0 * cy - p.y)
}

/// Round `v` to the nearest multiple of `1 / factor`.
///
/// Halfway cases round away from zero; `quantize(-0.0051, 100.0)` is `-0.01`.
#[inline]
pub fn quantize(v: f64, factor: f64) -> f64 {
    (v * factor).round() / factor
}

/// Quantize both coordinates of a point.
#[inline]
pub fn quantize_point(p: Point, factor: f64) -> Point {
    dvec2(quantize(p.x, factor), quantize(p.y, factor))
}
