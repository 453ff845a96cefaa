//! End-to-end editing sessions driven the way a front end would drive them:
//! window pixels through the viewport, mouse buttons and key presses.

use glam::DVec2;
use polydesigner::{Button, Command, Editor, EditorConfig, InputEvent, Viewport, Zoom};

struct Session {
    editor: Editor,
    viewport: Viewport,
    zoom: Zoom,
}

impl Session {
    fn new() -> Self {
        Session {
            editor: Editor::new(EditorConfig::default().with_autoload(false)),
            viewport: Viewport::default(),
            zoom: Zoom::ONE,
        }
    }

    fn hover(&mut self, sx: f64, sy: f64) {
        let point = self.viewport.screen_to_grid(DVec2::new(sx, sy), self.zoom);
        self.editor
            .handle(InputEvent::CursorMoved {
                point,
                zoom: self.zoom,
            })
            .unwrap();
    }

    fn click(&mut self, sx: f64, sy: f64, button: Button) {
        self.hover(sx, sy);
        self.editor.handle(InputEvent::ButtonDown(button)).unwrap();
        self.editor.handle(InputEvent::ButtonUp(button)).unwrap();
    }

    fn keys(&mut self, keys: &str) {
        for key in keys.chars() {
            let command = Command::from_key(key).unwrap();
            self.editor.handle(InputEvent::KeyPressed(command)).unwrap();
        }
    }

    /// One line per non-empty shape
    fn describe(&self) -> String {
        self.editor
            .store()
            .iter()
            .filter(|(_, s)| !s.is_empty())
            .map(|(slot, shape)| {
                let props = shape.properties();
                format!(
                    "{}: {} vertices, area {:.2}, {}",
                    slot,
                    props.valid_vertices,
                    props.area,
                    props.winding()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Window pixels for a right triangle with legs of 5 grid units at the origin
const TRIANGLE: [(f64, f64); 3] = [(800.0, 800.0), (1200.0, 800.0), (800.0, 400.0)];

fn draw_triangle(session: &mut Session) {
    for (sx, sy) in TRIANGLE {
        session.click(sx, sy, Button::Primary);
    }
}

#[test]
fn mouse_session_through_viewport() {
    let mut session = Session::new();
    draw_triangle(&mut session);
    insta::assert_snapshot!(
        session.editor.status_line(),
        @"shape 0 | vertices 3 | area 12.50 | ccw | centroid (1.67, 1.67) | selected - | clipboard - | simplify off"
    );

    // Hovering the second vertex selects it; a secondary click deletes it.
    session.hover(1202.0, 801.0);
    assert_eq!(session.editor.selected(), Some(1));
    session.click(1202.0, 801.0, Button::Secondary);
    insta::assert_snapshot!(
        session.editor.status_line(),
        @"shape 0 | vertices 2 | area 0.00 | degenerate | selected - | clipboard - | simplify off"
    );
}

#[test]
fn zoomed_out_clicks_land_further_from_center() {
    let mut session = Session::new();
    session.zoom = Zoom::try_new(2.0).unwrap();
    draw_triangle(&mut session);
    insta::assert_snapshot!(session.describe(), @"0: 3 vertices, area 50.00, ccw");
}

#[test]
fn keyboard_copy_paste_and_flip() {
    let mut session = Session::new();
    draw_triangle(&mut session);
    session.keys("cnv");
    assert_eq!(session.editor.current_index(), 1);
    assert_eq!(session.editor.clipboard(), None);

    session.keys("h");
    insta::assert_snapshot!(session.describe(), @r"
    0: 3 vertices, area 12.50, ccw
    1: 3 vertices, area -12.50, cw
    ");

    // Switching back re-runs the hit test: the cursor still rests on vertex 2.
    session.keys("p");
    insta::assert_snapshot!(
        session.editor.status_line(),
        @"shape 0 | vertices 3 | area 12.50 | ccw | centroid (1.67, 1.67) | selected 2 | clipboard - | simplify off"
    );
}

#[test]
fn simplify_keys_show_in_status_line() {
    let mut session = Session::new();
    draw_triangle(&mut session);
    session.keys("qq");
    assert!(session.editor.preview().is_some());
    insta::assert_snapshot!(
        session.editor.status_line(),
        @"shape 0 | vertices 3 | area 12.50 | ccw | centroid (1.67, 1.67) | selected - | clipboard - | simplify 0.1"
    );
    session.keys("Q");
    assert!(session.editor.preview().is_none());
}

#[test]
fn debug_key_toggles_flag() {
    let mut session = Session::new();
    assert!(!session.editor.debug());
    session.keys("d");
    assert!(session.editor.debug());
}
