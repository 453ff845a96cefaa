//! Default capacities and settings (grid units unless noted)

/// Vertex slots per shape.
pub const SHAPE_CAPACITY: usize = 16;

/// Shape slots in the store.
pub const STORE_CAPACITY: usize = 16;

/// Squared hit-test radius at zoom 1.0 (a 0.2 grid-unit circle).
pub const SELECT_DISTANCE_SQ: f64 = 0.04;

/// Half-extent of the visible grid at zoom 1.0.
pub const GRID_SIZE: f64 = 10.0;

/// Edge length of the square viewport, in pixels.
pub const SCREEN_SIZE: f64 = 1600.0;

/// Step used by the rotate-left / rotate-right commands, in degrees.
pub const ROTATE_STEP_DEGREES: f64 = 90.0;

/// Bytes per persisted vertex record: flag, 7 bytes padding, x, y.
pub const VERTEX_RECORD_SIZE: usize = 24;

/// Bytes per persisted shape file.
pub const SHAPE_FILE_SIZE: usize = VERTEX_RECORD_SIZE * SHAPE_CAPACITY;

/// Directory used for shape files when nothing else is configured.
pub const STORAGE_DIR: &str = ".";

/// Environment variable overriding the storage directory.
pub const STORAGE_DIR_ENV: &str = "POLYDESIGNER_DIR";
