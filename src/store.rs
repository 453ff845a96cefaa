//! Shape store - the fixed set of shape slots, the current slot and the clipboard

use crate::defaults::STORE_CAPACITY;
use crate::errors::EditError;
use crate::shape::Shape;

/// Fixed array of shape slots.
///
/// Exactly one slot is current at any time. At most one slot is marked as the
/// clipboard source for paste.
#[derive(Clone, Debug)]
pub struct ShapeStore {
    shapes: [Shape; STORE_CAPACITY],
    current: usize,
    clipboard: Option<usize>,
}

impl Default for ShapeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeStore {
    pub fn new() -> Self {
        ShapeStore {
            shapes: std::array::from_fn(|_| Shape::new()),
            current: 0,
            clipboard: None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_shape(&self) -> &Shape {
        &self.shapes[self.current]
    }

    pub fn current_shape_mut(&mut self) -> &mut Shape {
        &mut self.shapes[self.current]
    }

    /// Make `index` (modulo capacity) the current slot.
    pub fn set_current(&mut self, index: usize) {
        self.current = index % STORE_CAPACITY;
    }

    /// Cycle forward to the next slot.
    pub fn next_shape(&mut self) {
        self.set_current(self.current + 1);
    }

    /// Cycle back to the previous slot.
    pub fn previous_shape(&mut self) {
        self.set_current(self.current + STORE_CAPACITY - 1);
    }

    pub fn clipboard(&self) -> Option<usize> {
        self.clipboard
    }

    /// Mark `index` (modulo capacity) as the clipboard source.
    pub fn set_clipboard(&mut self, index: usize) {
        self.clipboard = Some(index % STORE_CAPACITY);
    }

    pub fn clear_clipboard(&mut self) {
        self.clipboard = None;
    }

    /// Shape in slot `index`
    pub fn shape(&self, index: usize) -> Result<&Shape, EditError> {
        self.shapes.get(index).ok_or(EditError::InvalidIndex {
            index,
            capacity: STORE_CAPACITY,
        })
    }

    /// Mutable shape in slot `index`
    pub fn shape_mut(&mut self, index: usize) -> Result<&mut Shape, EditError> {
        self.shapes.get_mut(index).ok_or(EditError::InvalidIndex {
            index,
            capacity: STORE_CAPACITY,
        })
    }

    /// All slots in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Shape)> {
        self.shapes.iter().enumerate()
    }

    /// Borrow the clipboard shape and the current shape together.
    ///
    /// Returns `None` when no clipboard is set or it names the current slot.
    pub(crate) fn clipboard_and_current_mut(&mut self) -> Option<(&Shape, &mut Shape)> {
        let source = self.clipboard.filter(|&c| c != self.current)?;
        let target = self.current;
        if source < target {
            let (head, tail) = self.shapes.split_at_mut(target);
            Some((&head[source], &mut tail[0]))
        } else {
            let (head, tail) = self.shapes.split_at_mut(source);
            Some((&tail[0], &mut head[target]))
        }
    }
}
