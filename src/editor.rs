//! The editing engine
//!
//! [`Editor`] owns every piece of editing state: the shape store, the vertex
//! selection, the clipboard, the simplify preview and the last cursor. Input
//! front ends feed it world-space cursor positions and commands; renderers read
//! it back through the accessors. All operations act on the current shape.

use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::defaults::{ROTATE_STEP_DEGREES, STORE_CAPACITY};
use crate::errors::EditError;
use crate::geometry::{bearing, reflect_x, reflect_y, rotate};
use crate::log::{debug, info, warn};
use crate::persist::{LoadOutcome, SlotStorage};
use crate::selection::{Selection, find_selected_within};
use crate::shape::Shape;
use crate::simplify::{self, SimplifyMode};
use crate::store::ShapeStore;
use crate::types::{Angle, Offset, Point, Zoom};

/// How pasted vertices are positioned
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasteMode {
    /// Copy coordinates unchanged
    Verbatim,
    /// Shift so the clipboard centroid lands on the current shape's centroid
    Centered,
}

/// Direction of a fixed rotation step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

impl Turn {
    pub fn step(self) -> Angle {
        let step = Angle::from_degrees(ROTATE_STEP_DEGREES);
        match self {
            Turn::Clockwise => -step,
            Turn::CounterClockwise => step,
        }
    }
}

/// Polygon editing engine
#[derive(Debug)]
pub struct Editor {
    store: ShapeStore,
    selection: Selection,
    cursor: Point,
    zoom: Zoom,
    simplify_mode: SimplifyMode,
    preview: Option<Shape>,
    debug: bool,
    config: EditorConfig,
    storage: SlotStorage,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor with empty shapes. Nothing is read from disk.
    pub fn new(config: EditorConfig) -> Self {
        let storage = SlotStorage::new(config.storage_dir.clone());
        Editor {
            store: ShapeStore::new(),
            selection: Selection::new(),
            cursor: Point::ZERO,
            zoom: Zoom::ONE,
            simplify_mode: SimplifyMode::Off,
            preview: None,
            debug: false,
            config,
            storage,
        }
    }

    /// Create an editor and, when `config.autoload` is set, load every slot
    /// that has a shape file. Unreadable slots are logged and left empty.
    pub fn open(config: EditorConfig) -> Self {
        let mut editor = Self::new(config);
        if editor.config.autoload {
            let loaded = editor.load_all();
            info!(loaded, dir = %editor.storage.dir().display(), "opened shape storage");
        }
        editor
    }

    // ------------------------------------------------------------------
    // Read access for renderers
    // ------------------------------------------------------------------

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn current_index(&self) -> usize {
        self.store.current_index()
    }

    pub fn current_shape(&self) -> &Shape {
        self.store.current_shape()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection.selected()
    }

    pub fn dragging(&self) -> Option<usize> {
        self.selection.dragging()
    }

    pub fn clipboard(&self) -> Option<usize> {
        self.store.clipboard()
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn simplify_mode(&self) -> SimplifyMode {
        self.simplify_mode
    }

    /// Quantized copy of the current shape while a simplify mode is active
    pub fn preview(&self) -> Option<&Shape> {
        self.preview.as_ref()
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn storage(&self) -> &SlotStorage {
        &self.storage
    }

    // ------------------------------------------------------------------
    // Cursor and selection
    // ------------------------------------------------------------------

    /// Record a cursor update.
    ///
    /// Re-runs the hit test, then moves the dragged vertex (if any) to the
    /// cursor, then applies the incremental rotation of an active rotate-drag.
    /// A rotate-drag whose shape has lost its centroid just ends.
    pub fn set_cursor(&mut self, cursor: Point, zoom: Zoom) -> Result<(), EditError> {
        self.cursor = cursor;
        self.zoom = zoom;
        self.refresh_selection();

        if let Some(index) = self.selection.dragging() {
            self.store.current_shape_mut().set_point(index, cursor)?;
        }

        if self.selection.is_rotating() {
            match self.current_shape().centroid() {
                Ok(center) => {
                    if let Some(delta) = self.selection.advance_rotate(bearing(center, cursor)) {
                        self.rotate(delta)?;
                    }
                }
                Err(e) => {
                    warn!(shape = self.current_index(), error = %e, "rotate-drag ended");
                    self.selection.end_rotate();
                }
            }
        }
        Ok(())
    }

    /// Re-run the hit test against the last cursor position.
    pub fn refresh_selection(&mut self) {
        let hit = find_selected_within(
            self.cursor,
            self.store.current_shape(),
            self.zoom,
            self.config.select_radius_sq,
        );
        self.selection.set_selected(hit);
    }

    /// Start dragging the selected vertex. Returns false when nothing is selected.
    pub fn begin_drag(&mut self) -> bool {
        self.selection.begin_drag()
    }

    pub fn end_drag(&mut self) {
        self.selection.end_drag();
    }

    /// Start rotating the current shape by dragging the cursor around its centroid.
    pub fn begin_rotate_drag(&mut self) -> Result<(), EditError> {
        let center = self.current_shape().centroid()?;
        self.selection.begin_rotate(bearing(center, self.cursor));
        Ok(())
    }

    pub fn end_rotate_drag(&mut self) {
        self.selection.end_rotate();
    }

    // ------------------------------------------------------------------
    // Vertex operations
    // ------------------------------------------------------------------

    /// Add a vertex at the cursor in the current shape's next ring-buffer slot.
    /// Returns the slot written.
    pub fn add_vertex_at_cursor(&mut self) -> usize {
        let cursor = self.cursor;
        let index = self.store.current_shape_mut().push(cursor);
        debug!(shape = self.current_index(), index, x = cursor.x, y = cursor.y, "added vertex");
        index
    }

    /// Tombstone the selected vertex. Returns false when nothing is selected.
    pub fn delete_selected(&mut self) -> Result<bool, EditError> {
        let Some(index) = self.selection.selected() else {
            return Ok(false);
        };
        self.store.current_shape_mut().tombstone(index)?;
        if self.selection.dragging() == Some(index) {
            self.selection.end_drag();
        }
        self.selection.set_selected(None);
        debug!(shape = self.current_index(), index, "deleted vertex");
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Whole-shape transforms
    // ------------------------------------------------------------------

    /// Shift every valid vertex of the current shape by `delta`.
    pub fn translate(&mut self, delta: Offset) {
        self.store.current_shape_mut().translate(delta);
        self.refresh_selection();
    }

    /// Move the current shape so its centroid sits on the cursor.
    pub fn move_to_cursor(&mut self) -> Result<(), EditError> {
        let center = self.current_shape().centroid()?;
        self.translate(self.cursor - center);
        Ok(())
    }

    /// Move the current shape so its centroid sits on the origin.
    pub fn move_to_origin(&mut self) -> Result<(), EditError> {
        let center = self.current_shape().centroid()?;
        self.translate(-center);
        Ok(())
    }

    /// Rotate the current shape about its centroid.
    pub fn rotate(&mut self, angle: Angle) -> Result<(), EditError> {
        let center = self.current_shape().centroid()?;
        self.store
            .current_shape_mut()
            .map_points(|p| rotate(p, center, angle));
        self.refresh_selection();
        Ok(())
    }

    /// Rotate the current shape a fixed step (90°).
    pub fn rotate_step(&mut self, turn: Turn) -> Result<(), EditError> {
        self.rotate(turn.step())
    }

    /// Mirror the current shape left-to-right about its centroid.
    pub fn flip_horizontal(&mut self) -> Result<(), EditError> {
        let center = self.current_shape().centroid()?;
        self.store
            .current_shape_mut()
            .map_points(|p| reflect_x(p, center.x));
        self.refresh_selection();
        Ok(())
    }

    /// Mirror the current shape top-to-bottom about its centroid.
    pub fn flip_vertical(&mut self) -> Result<(), EditError> {
        let center = self.current_shape().centroid()?;
        self.store
            .current_shape_mut()
            .map_points(|p| reflect_y(p, center.y));
        self.refresh_selection();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Shape slots and clipboard
    // ------------------------------------------------------------------

    /// Make slot `index` (modulo capacity) current.
    pub fn select_shape(&mut self, index: usize) {
        self.store.set_current(index);
        self.on_shape_switched();
    }

    pub fn next_shape(&mut self) {
        self.store.next_shape();
        self.on_shape_switched();
    }

    pub fn previous_shape(&mut self) {
        self.store.previous_shape();
        self.on_shape_switched();
    }

    fn on_shape_switched(&mut self) {
        self.selection.clear();
        self.refresh_selection();
        self.sync_preview();
        debug!(shape = self.current_index(), "switched shape");
    }

    /// Remember the current slot as the paste source.
    pub fn mark_clipboard(&mut self) {
        self.store.set_clipboard(self.store.current_index());
    }

    pub fn clear_clipboard(&mut self) {
        self.store.clear_clipboard();
    }

    /// Copy the clipboard shape into the current shape and clear the clipboard.
    ///
    /// Returns `Ok(false)` without touching anything when there is no clipboard
    /// or it names the current slot. A centered paste needs both shapes to have
    /// a centroid.
    pub fn paste(&mut self, mode: PasteMode) -> Result<bool, EditError> {
        let Some((source, target)) = self.store.clipboard_and_current_mut() else {
            return Ok(false);
        };

        let offset = match mode {
            PasteMode::Verbatim => Offset::ZERO,
            PasteMode::Centered => target.centroid()? - source.centroid()?,
        };
        let vertices = *source.vertices();
        target.replace_vertices(vertices);
        if offset != Offset::ZERO {
            target.translate(offset);
        }

        let from = self.store.clipboard();
        self.store.clear_clipboard();
        self.refresh_selection();
        self.sync_preview();
        debug!(?from, to = self.current_index(), ?mode, "pasted shape");
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Simplify preview
    // ------------------------------------------------------------------

    /// Move to the next simplify mode. The preview is not rebuilt.
    pub fn advance_simplify_mode(&mut self) -> SimplifyMode {
        self.simplify_mode = self.simplify_mode.next();
        self.simplify_mode
    }

    /// Rebuild the preview from the current shape and mode.
    pub fn recompute_preview(&mut self) {
        self.preview = simplify::preview(self.store.current_shape(), self.simplify_mode);
    }

    /// Drop a cached preview that belongs to other vertices, rebuilding it when active.
    fn sync_preview(&mut self) {
        if self.preview.is_some() || self.simplify_mode.is_active() {
            self.recompute_preview();
        }
    }

    /// Quantize the current shape in place and turn simplification off.
    /// Returns false when no simplify mode is active.
    ///
    /// The quantized copy is rebuilt from the live shape, so a cached preview
    /// that went stale since the last `recompute_preview` is never written.
    pub fn commit_preview(&mut self) -> bool {
        self.preview = None;
        let Some(preview) = simplify::preview(self.store.current_shape(), self.simplify_mode)
        else {
            return false;
        };
        self.store
            .current_shape_mut()
            .overwrite_vertices(*preview.vertices());
        self.simplify_mode = SimplifyMode::Off;
        self.refresh_selection();
        debug!(shape = self.current_index(), "committed simplify preview");
        true
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Write slot `slot` to its shape file.
    pub fn save(&self, slot: usize) -> Result<PathBuf, EditError> {
        let shape = self.store.shape(slot)?;
        self.storage.save(slot, shape)
    }

    /// Replace slot `slot` with the content of its shape file.
    ///
    /// A missing file leaves the slot untouched and is reported as
    /// [`LoadOutcome::Missing`].
    pub fn load(&mut self, slot: usize) -> Result<LoadOutcome, EditError> {
        self.store.shape(slot)?;
        let outcome = self.storage.load(slot)?;
        if let LoadOutcome::Loaded(vertices) = &outcome {
            self.store.shape_mut(slot)?.replace_vertices(*vertices);
            if slot == self.current_index() {
                self.selection.clear();
                self.refresh_selection();
                self.sync_preview();
            }
        }
        Ok(outcome)
    }

    pub fn save_current(&self) -> Result<PathBuf, EditError> {
        self.save(self.current_index())
    }

    pub fn load_current(&mut self) -> Result<LoadOutcome, EditError> {
        self.load(self.current_index())
    }

    /// Write every slot. All slots are attempted; the first failure is returned.
    pub fn save_all(&self) -> Result<(), EditError> {
        let mut first_error = None;
        for slot in 0..STORE_CAPACITY {
            if let Err(e) = self.save(slot) {
                warn!(slot, error = %e, "could not save shape");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Load every slot that has a readable file. Returns how many were loaded.
    pub fn load_all(&mut self) -> usize {
        let mut loaded = 0;
        for slot in 0..STORE_CAPACITY {
            match self.load(slot) {
                Ok(LoadOutcome::Loaded(_)) => loaded += 1,
                Ok(LoadOutcome::Missing(_)) => {}
                Err(e) => {
                    warn!(slot, error = %e, "could not load shape");
                }
            }
        }
        loaded
    }

    // ------------------------------------------------------------------
    // Misc
    // ------------------------------------------------------------------

    pub fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }

    /// One-line summary of the current shape, as shown in the status panel.
    pub fn status_line(&self) -> String {
        let shape = self.current_shape();
        let props = shape.properties();
        let centroid = props
            .centroid
            .map(|c| format!(" | centroid ({:.2}, {:.2})", c.x, c.y))
            .unwrap_or_default();
        format!(
            "shape {} | vertices {} | area {:.2} | {}{} | selected {} | clipboard {} | simplify {}",
            self.current_index(),
            props.valid_vertices,
            props.area,
            props.winding(),
            centroid,
            fmt_slot(self.selected()),
            fmt_slot(self.clipboard()),
            self.simplify_mode
        )
    }
}

fn fmt_slot(slot: Option<usize>) -> String {
    slot.map_or_else(|| "-".to_string(), |s| s.to_string())
}
