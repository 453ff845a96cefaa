//! Fixed-capacity polygon shapes
//!
//! A shape is an array of [`SHAPE_CAPACITY`] vertex slots. Deleting a vertex
//! leaves a tombstone in place rather than compacting the array, so vertex
//! indices stay stable for selection and for the on-disk layout. The polygon's
//! edges run between consecutive valid vertices in array order, wrapping.

use crate::defaults::SHAPE_CAPACITY;
use crate::errors::EditError;
use crate::properties::{self, ShapeProperties};
use crate::types::{Offset, Point};

/// One vertex slot: a point plus a validity flag
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vertex {
    /// Invalid slots are tombstones; their point is kept but ignored
    pub valid: bool,
    pub point: Point,
}

impl Vertex {
    pub const EMPTY: Vertex = Vertex {
        valid: false,
        point: Point::ZERO,
    };

    pub fn new(point: Point) -> Self {
        Vertex { valid: true, point }
    }
}

/// The full vertex array of a shape
pub type VertexArray = [Vertex; SHAPE_CAPACITY];

/// A polygon with a ring-buffer insertion cursor and cached derived properties
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    vertices: VertexArray,
    /// Slot the next added vertex is written to
    cursor: usize,
    properties: ShapeProperties,
}

impl Default for Shape {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape {
    /// Create an empty shape
    pub fn new() -> Self {
        Shape {
            vertices: [Vertex::EMPTY; SHAPE_CAPACITY],
            cursor: 0,
            properties: ShapeProperties::default(),
        }
    }

    /// Build a shape from a complete vertex array.
    ///
    /// The insertion cursor is placed just after the highest valid slot so new
    /// vertices continue the outline instead of overwriting it.
    pub fn from_vertices(vertices: VertexArray) -> Self {
        let mut shape = Shape {
            vertices,
            cursor: 0,
            properties: ShapeProperties::default(),
        };
        shape.reset_cursor();
        shape.recompute();
        shape
    }

    /// Build a shape by adding `points` in order.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut shape = Shape::new();
        for p in points {
            shape.push(p);
        }
        shape
    }

    pub fn vertices(&self) -> &VertexArray {
        &self.vertices
    }

    /// Vertex slot at `index` (valid or not)
    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Valid vertices with their slot indices, in array order
    pub fn valid_points(&self) -> impl Iterator<Item = (usize, Point)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.valid)
            .map(|(i, v)| (i, v.point))
    }

    pub fn valid_count(&self) -> usize {
        self.properties.valid_vertices
    }

    pub fn is_empty(&self) -> bool {
        self.valid_count() == 0
    }

    /// Slot the next `push` writes to
    pub fn insertion_cursor(&self) -> usize {
        self.cursor
    }

    pub fn properties(&self) -> &ShapeProperties {
        &self.properties
    }

    /// Signed area (CCW positive)
    pub fn area(&self) -> f64 {
        self.properties.area
    }

    /// Centroid, or `DegenerateShape` when the shape encloses no area
    pub fn centroid(&self) -> Result<Point, EditError> {
        self.properties.centroid()
    }

    /// Write `point` at the insertion cursor and advance it, wrapping.
    ///
    /// Once all slots have been used the oldest slot is overwritten.
    /// Returns the slot that was written.
    pub fn push(&mut self, point: Point) -> usize {
        let index = self.cursor;
        self.vertices[index] = Vertex::new(point);
        self.cursor = (self.cursor + 1) % SHAPE_CAPACITY;
        self.recompute();
        index
    }

    /// Mark the vertex at `index` invalid without moving any other slot.
    pub fn tombstone(&mut self, index: usize) -> Result<(), EditError> {
        let vertex = self.slot_mut(index)?;
        vertex.valid = false;
        self.recompute();
        Ok(())
    }

    /// Overwrite the point of the vertex at `index`.
    ///
    /// The slot's validity is left untouched.
    pub fn set_point(&mut self, index: usize, point: Point) -> Result<(), EditError> {
        let vertex = self.slot_mut(index)?;
        vertex.point = point;
        self.recompute();
        Ok(())
    }

    /// Apply `f` to every valid point, then recompute once.
    pub fn map_points(&mut self, mut f: impl FnMut(Point) -> Point) {
        for v in self.vertices.iter_mut().filter(|v| v.valid) {
            v.point = f(v.point);
        }
        self.recompute();
    }

    /// Shift every valid vertex by `delta`.
    pub fn translate(&mut self, delta: Offset) {
        self.map_points(|p| p + delta);
    }

    /// Replace all vertex slots (tombstones included) and re-place the cursor.
    pub fn replace_vertices(&mut self, vertices: VertexArray) {
        self.vertices = vertices;
        self.reset_cursor();
        self.recompute();
    }

    /// Replace the points of every slot while keeping the insertion cursor.
    pub(crate) fn overwrite_vertices(&mut self, vertices: VertexArray) {
        self.vertices = vertices;
        self.recompute();
    }

    /// Tombstone every slot and rewind the cursor.
    pub fn clear(&mut self) {
        *self = Shape::new();
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Vertex, EditError> {
        self.vertices.get_mut(index).ok_or(EditError::InvalidIndex {
            index,
            capacity: SHAPE_CAPACITY,
        })
    }

    fn reset_cursor(&mut self) {
        self.cursor = self
            .vertices
            .iter()
            .rposition(|v| v.valid)
            .map(|last| (last + 1) % SHAPE_CAPACITY)
            .unwrap_or(0);
    }

    fn recompute(&mut self) {
        self.properties = properties::compute(self);
    }
}
