//! Device input routing
//!
//! Front ends translate their window events into [`InputEvent`]s (with the
//! cursor already converted to grid units, see [`crate::viewport`]) and hand
//! them to [`Editor::handle`].

use std::fmt;

use crate::editor::{Editor, PasteMode, Turn};
use crate::errors::EditError;
use crate::log::{debug, warn};
use crate::types::{Point, Zoom};

/// Mouse buttons the editor reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    /// Add a vertex, or drag the selected one
    Primary,
    /// Delete the selected vertex
    Secondary,
    /// Rotate the shape by dragging around its centroid
    Tertiary,
}

impl Button {
    pub fn name(self) -> &'static str {
        match self {
            Button::Primary => "primary",
            Button::Secondary => "secondary",
            Button::Tertiary => "tertiary",
        }
    }

    pub fn from_name(name: &str) -> Option<Button> {
        match name {
            "primary" => Some(Button::Primary),
            "secondary" => Some(Button::Secondary),
            "tertiary" => Some(Button::Tertiary),
            _ => None,
        }
    }
}

/// Discrete editor commands, normally bound to keys
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    ToggleDebug,
    NextShape,
    PreviousShape,
    MarkClipboard,
    ClearClipboard,
    PasteVerbatim,
    PasteCentered,
    RotateClockwise,
    RotateCounterClockwise,
    FlipHorizontal,
    FlipVertical,
    MoveToCursor,
    MoveToOrigin,
    /// Advance the simplify mode and rebuild the preview
    CycleSimplify,
    /// Replace the live shape with the preview
    CommitSimplify,
    Save,
    Load,
    /// Delete the selected vertex (bound to the secondary button, not a key)
    DeleteSelected,
}

impl Command {
    pub const ALL: [Command; 18] = [
        Command::ToggleDebug,
        Command::NextShape,
        Command::PreviousShape,
        Command::MarkClipboard,
        Command::ClearClipboard,
        Command::PasteVerbatim,
        Command::PasteCentered,
        Command::RotateClockwise,
        Command::RotateCounterClockwise,
        Command::FlipHorizontal,
        Command::FlipVertical,
        Command::MoveToCursor,
        Command::MoveToOrigin,
        Command::CycleSimplify,
        Command::CommitSimplify,
        Command::Save,
        Command::Load,
        Command::DeleteSelected,
    ];

    /// Command bound to a key, if any.
    pub fn from_key(key: char) -> Option<Command> {
        let command = match key {
            'd' => Command::ToggleDebug,
            'n' => Command::NextShape,
            'p' => Command::PreviousShape,
            'c' => Command::MarkClipboard,
            'x' => Command::ClearClipboard,
            'v' => Command::PasteVerbatim,
            'V' => Command::PasteCentered,
            'r' => Command::RotateClockwise,
            'R' => Command::RotateCounterClockwise,
            'h' => Command::FlipHorizontal,
            'j' => Command::FlipVertical,
            'm' => Command::MoveToCursor,
            'o' => Command::MoveToOrigin,
            'q' => Command::CycleSimplify,
            'Q' => Command::CommitSimplify,
            's' => Command::Save,
            'l' => Command::Load,
            _ => return None,
        };
        Some(command)
    }

    /// Kebab-case name used in session scripts
    pub fn name(self) -> &'static str {
        match self {
            Command::ToggleDebug => "toggle-debug",
            Command::NextShape => "next-shape",
            Command::PreviousShape => "previous-shape",
            Command::MarkClipboard => "mark-clipboard",
            Command::ClearClipboard => "clear-clipboard",
            Command::PasteVerbatim => "paste",
            Command::PasteCentered => "paste-centered",
            Command::RotateClockwise => "rotate-cw",
            Command::RotateCounterClockwise => "rotate-ccw",
            Command::FlipHorizontal => "flip-horizontal",
            Command::FlipVertical => "flip-vertical",
            Command::MoveToCursor => "move-to-cursor",
            Command::MoveToOrigin => "move-to-origin",
            Command::CycleSimplify => "simplify",
            Command::CommitSimplify => "commit-simplify",
            Command::Save => "save",
            Command::Load => "load",
            Command::DeleteSelected => "delete",
        }
    }

    pub fn from_name(name: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One device event, already in grid coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    CursorMoved { point: Point, zoom: Zoom },
    ButtonDown(Button),
    ButtonUp(Button),
    KeyPressed(Command),
}

impl Editor {
    /// Route one input event to the matching editor operation.
    ///
    /// A failed operation leaves the editor as it was and is also logged.
    /// Whatever the outcome, an active simplify preview is rebuilt afterwards
    /// so it follows the live shape.
    pub fn handle(&mut self, event: InputEvent) -> Result<(), EditError> {
        let result = match event {
            InputEvent::CursorMoved { point, zoom } => self.set_cursor(point, zoom),
            InputEvent::ButtonDown(Button::Primary) => {
                if self.selected().is_none() {
                    self.add_vertex_at_cursor();
                } else {
                    self.begin_drag();
                }
                Ok(())
            }
            InputEvent::ButtonUp(Button::Primary) => {
                self.end_drag();
                Ok(())
            }
            InputEvent::ButtonDown(Button::Secondary) => self.delete_selected().map(drop),
            InputEvent::ButtonUp(Button::Secondary) => Ok(()),
            InputEvent::ButtonDown(Button::Tertiary) => self.begin_rotate_drag(),
            InputEvent::ButtonUp(Button::Tertiary) => {
                self.end_rotate_drag();
                Ok(())
            }
            InputEvent::KeyPressed(command) => self.run_command(command),
        };

        if self.simplify_mode().is_active() {
            self.recompute_preview();
        }
        if let Err(e) = &result {
            warn!(?event, error = %e, "input event failed");
        }
        result
    }

    /// Run a single command against the current shape.
    pub fn run_command(&mut self, command: Command) -> Result<(), EditError> {
        debug!(%command, shape = self.current_index(), "command");
        match command {
            Command::ToggleDebug => {
                self.toggle_debug();
            }
            Command::NextShape => self.next_shape(),
            Command::PreviousShape => self.previous_shape(),
            Command::MarkClipboard => self.mark_clipboard(),
            Command::ClearClipboard => self.clear_clipboard(),
            Command::PasteVerbatim => {
                self.paste(PasteMode::Verbatim)?;
            }
            Command::PasteCentered => {
                self.paste(PasteMode::Centered)?;
            }
            Command::RotateClockwise => self.rotate_step(Turn::Clockwise)?,
            Command::RotateCounterClockwise => self.rotate_step(Turn::CounterClockwise)?,
            Command::FlipHorizontal => self.flip_horizontal()?,
            Command::FlipVertical => self.flip_vertical()?,
            Command::MoveToCursor => self.move_to_cursor()?,
            Command::MoveToOrigin => self.move_to_origin()?,
            Command::CycleSimplify => {
                self.advance_simplify_mode();
                self.recompute_preview();
            }
            Command::CommitSimplify => {
                self.commit_preview();
            }
            Command::Save => {
                self.save_current()?;
            }
            Command::Load => {
                self.load_current()?;
            }
            Command::DeleteSelected => {
                self.delete_selected()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::simplify::SimplifyMode;
    use crate::types::pt;

    fn editor() -> Editor {
        Editor::new(EditorConfig::default().with_autoload(false))
    }

    fn move_to(ed: &mut Editor, x: f64, y: f64) {
        ed.handle(InputEvent::CursorMoved {
            point: pt(x, y),
            zoom: Zoom::ONE,
        })
        .unwrap();
    }

    fn click(ed: &mut Editor, button: Button) {
        ed.handle(InputEvent::ButtonDown(button)).unwrap();
        ed.handle(InputEvent::ButtonUp(button)).unwrap();
    }

    #[test]
    fn every_command_name_round_trips() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), Some(command));
        }
        assert_eq!(Command::from_name("explode"), None);
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(Command::from_key('n'), Some(Command::NextShape));
        assert_eq!(Command::from_key('V'), Some(Command::PasteCentered));
        assert_eq!(Command::from_key('R'), Some(Command::RotateCounterClockwise));
        assert_eq!(Command::from_key('Q'), Some(Command::CommitSimplify));
        assert_eq!(Command::from_key('z'), None);
    }

    #[test]
    fn primary_adds_then_drags() {
        let mut ed = editor();
        move_to(&mut ed, 1.0, 1.0);
        click(&mut ed, Button::Primary);
        assert_eq!(ed.current_shape().valid_count(), 1);

        // Cursor update selects the new vertex; the next press drags it.
        move_to(&mut ed, 1.0, 1.0);
        assert_eq!(ed.selected(), Some(0));
        ed.handle(InputEvent::ButtonDown(Button::Primary)).unwrap();
        move_to(&mut ed, 3.0, -2.0);
        ed.handle(InputEvent::ButtonUp(Button::Primary)).unwrap();

        assert_eq!(ed.current_shape().valid_count(), 1);
        assert_eq!(ed.current_shape().vertex(0).unwrap().point, pt(3.0, -2.0));
    }

    #[test]
    fn secondary_deletes_selected_vertex() {
        let mut ed = editor();
        move_to(&mut ed, 1.0, 1.0);
        click(&mut ed, Button::Primary);
        move_to(&mut ed, 1.1, 1.0);
        click(&mut ed, Button::Secondary);
        assert!(ed.current_shape().is_empty());
        assert_eq!(ed.selected(), None);
    }

    #[test]
    fn failed_command_reports_degenerate_shape() {
        let mut ed = editor();
        let err = ed
            .handle(InputEvent::KeyPressed(Command::RotateClockwise))
            .unwrap_err();
        assert!(matches!(err, EditError::DegenerateShape { .. }));
        let err = ed
            .handle(InputEvent::ButtonDown(Button::Tertiary))
            .unwrap_err();
        assert!(matches!(err, EditError::DegenerateShape { .. }));
    }

    #[test]
    fn preview_follows_live_shape() {
        let mut ed = editor();
        for (x, y) in [(0.2, 0.2), (3.4, 0.1), (1.6, 2.7)] {
            move_to(&mut ed, x, y);
            click(&mut ed, Button::Primary);
        }
        ed.handle(InputEvent::KeyPressed(Command::CycleSimplify)).unwrap();
        assert_eq!(ed.simplify_mode(), SimplifyMode::Units);
        assert_eq!(ed.preview().unwrap().vertex(2).unwrap().point, pt(2.0, 3.0));

        move_to(&mut ed, 5.4, 5.4);
        click(&mut ed, Button::Primary);
        assert_eq!(ed.preview().unwrap().vertex(3).unwrap().point, pt(5.0, 5.0));

        ed.handle(InputEvent::KeyPressed(Command::CommitSimplify)).unwrap();
        assert_eq!(ed.simplify_mode(), SimplifyMode::Off);
        assert_eq!(ed.current_shape().vertex(0).unwrap().point, pt(0.0, 0.0));
        assert_eq!(ed.current_shape().insertion_cursor(), 4);
    }

    #[test]
    fn toggle_debug_key() {
        let mut ed = editor();
        ed.handle(InputEvent::KeyPressed(Command::ToggleDebug)).unwrap();
        assert!(ed.debug());
        ed.handle(InputEvent::KeyPressed(Command::ToggleDebug)).unwrap();
        assert!(!ed.debug());
    }
}
