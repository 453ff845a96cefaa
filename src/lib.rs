//! polydesigner: an interactive polygon editing engine
//!
//! Sixteen shape slots of sixteen vertex slots each, edited through cursor
//! updates and discrete commands. Deleted vertices are tombstoned in place,
//! additions wrap around a ring buffer, and every shape keeps its signed area
//! and centroid up to date. Shapes persist one file per slot.
//!
//! ```
//! use polydesigner::{Editor, EditorConfig, pt, Zoom};
//!
//! let mut editor = Editor::new(EditorConfig::default().with_autoload(false));
//! for p in [pt(0.0, 0.0), pt(2.0, 0.0), pt(0.0, 2.0)] {
//!     editor.set_cursor(p, Zoom::ONE).unwrap();
//!     editor.add_vertex_at_cursor();
//! }
//! assert_eq!(editor.current_shape().area(), 2.0);
//! ```

use pest_derive::Parser;

pub mod config;
pub mod defaults;
pub mod editor;
pub mod errors;
pub mod geometry;
pub mod input;
pub mod log;
pub mod persist;
pub mod properties;
pub mod script;
pub mod selection;
pub mod shape;
pub mod simplify;
pub mod store;
pub mod types;
pub mod viewport;

pub use config::EditorConfig;
pub use editor::{Editor, PasteMode, Turn};
pub use errors::{EditError, ScriptError};
pub use input::{Button, Command, InputEvent};
pub use persist::{LoadOutcome, SlotStorage};
pub use properties::{ShapeProperties, Winding};
pub use script::{Script, parse_script, run_script};
pub use selection::{Selection, find_selected};
pub use shape::{Shape, Vertex};
pub use simplify::SimplifyMode;
pub use store::ShapeStore;
pub use types::{Angle, NumericError, Offset, Point, Zoom, pt};
pub use viewport::Viewport;

#[derive(Parser)]
#[grammar = "script.pest"]
pub struct ScriptParser;
