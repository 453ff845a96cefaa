//! Session scripts
//!
//! A script is a line-oriented list of input steps and expectations:
//!
//! ```text
//! # a unit triangle
//! cursor 0 0
//! press primary
//! release primary
//! cursor 1 0
//! press primary
//! release primary
//! cursor 0 1
//! press primary
//! release primary
//! expect area 0.5
//! key rotate-cw
//! key move-to-origin fails    # steps may be expected to fail
//! ```
//!
//! Scripts are parsed with pest into [`Script`] and replayed against an
//! [`Editor`]. Every step keeps its source span so failures point at the line
//! that caused them.

use miette::SourceSpan;
use pest::Parser;
use pest::iterators::Pair;

use crate::editor::Editor;
use crate::errors::{ScriptError, SourceContext};
use crate::input::{Button, Command, InputEvent};
use crate::log::debug;
use crate::simplify::SimplifyMode;
use crate::types::{Point, Zoom, pt};
use crate::{Rule, ScriptParser};

/// Absolute tolerance for numeric expectations
pub const EXPECT_TOLERANCE: f64 = 1e-6;

// ============================================================================
// Script model
// ============================================================================

/// One replayable action
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Input(InputEvent),
    Expect(Expectation),
}

/// A check against editor state
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Expectation {
    /// Valid vertices in the current shape
    Vertices(usize),
    /// Signed area of the current shape
    Area(f64),
    /// Centroid of the current shape, `None` for degenerate
    Centroid(Option<Point>),
    Selected(Option<usize>),
    Current(usize),
    Clipboard(Option<usize>),
    /// Point of a vertex slot of the current shape, `None` for a tombstone
    Vertex { index: usize, point: Option<Point> },
    Mode(SimplifyMode),
}

/// A step with its location in the script
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptStep {
    pub step: Step,
    /// The step must return an error
    pub fails: bool,
    pub span: SourceSpan,
}

/// A parsed session script
#[derive(Clone, Debug)]
pub struct Script {
    context: SourceContext,
    steps: Vec<ScriptStep>,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse `source` as a session script. `name` is used in diagnostics.
pub fn parse_script(name: &str, source: &str) -> Result<Script, ScriptError> {
    let context = SourceContext::new(name, source);
    let pairs = ScriptParser::parse(Rule::script, source).map_err(|e| {
        let span = match e.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::from((pos, 0)),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::from((start, end - start))
            }
        };
        ScriptError::Syntax {
            message: e.variant.message().into_owned(),
            src: context.named_source(),
            span,
        }
    })?;

    let mut steps = Vec::new();
    for pair in pairs.flatten().filter(|p| p.as_rule() == Rule::step) {
        steps.push(parse_step(&context, pair)?);
    }
    Ok(Script { context, steps })
}

fn span_of(pair: &Pair<Rule>) -> SourceSpan {
    let span = pair.as_span();
    SourceSpan::from((span.start(), span.end() - span.start()))
}

fn invalid(context: &SourceContext, pair: &Pair<Rule>, message: impl Into<String>) -> ScriptError {
    ScriptError::InvalidValue {
        message: message.into(),
        src: context.named_source(),
        span: span_of(pair),
    }
}

fn parse_step(context: &SourceContext, pair: Pair<Rule>) -> Result<ScriptStep, ScriptError> {
    let span = span_of(&pair);
    let mut inner = pair.into_inner();
    let Some(body) = inner.next() else {
        return Err(ScriptError::Syntax {
            message: "empty step".to_string(),
            src: context.named_source(),
            span,
        });
    };
    let fails = inner.any(|p| p.as_rule() == Rule::fails);

    let step = match body.as_rule() {
        Rule::cursor_step => Step::Input(parse_cursor(context, body)?),
        Rule::press_step => Step::Input(InputEvent::ButtonDown(parse_button(context, body)?)),
        Rule::release_step => Step::Input(InputEvent::ButtonUp(parse_button(context, body)?)),
        Rule::key_step => Step::Input(InputEvent::KeyPressed(parse_command(context, body)?)),
        Rule::expect_step => Step::Expect(parse_expectation(context, body)?),
        other => {
            return Err(ScriptError::Syntax {
                message: format!("unexpected {:?}", other),
                src: context.named_source(),
                span,
            });
        }
    };
    Ok(ScriptStep { step, fails, span })
}

fn parse_number(context: &SourceContext, pair: &Pair<Rule>) -> Result<f64, ScriptError> {
    pair.as_str()
        .parse::<f64>()
        .map_err(|e| invalid(context, pair, e.to_string()))
}

fn parse_index(context: &SourceContext, pair: &Pair<Rule>) -> Result<usize, ScriptError> {
    pair.as_str()
        .parse::<usize>()
        .map_err(|e| invalid(context, pair, e.to_string()))
}

/// Parse the remaining `number number` pair of a rule, or `none`.
fn parse_optional_point<'a>(
    context: &SourceContext,
    mut pairs: impl Iterator<Item = Pair<'a, Rule>>,
    parent: &Pair<'a, Rule>,
) -> Result<Option<Point>, ScriptError> {
    match (pairs.next(), pairs.next()) {
        (Some(first), _) if first.as_rule() == Rule::none => Ok(None),
        (Some(x), Some(y)) => Ok(Some(pt(parse_number(context, &x)?, parse_number(context, &y)?))),
        _ => Err(invalid(context, parent, "expected two coordinates or `none`")),
    }
}

/// Parse the remaining `integer` of a rule, or `none`.
fn parse_optional_index<'a>(
    context: &SourceContext,
    mut pairs: impl Iterator<Item = Pair<'a, Rule>>,
    parent: &Pair<'a, Rule>,
) -> Result<Option<usize>, ScriptError> {
    match pairs.next() {
        Some(p) if p.as_rule() == Rule::none => Ok(None),
        Some(p) => parse_index(context, &p).map(Some),
        None => Err(invalid(context, parent, "expected an index or `none`")),
    }
}

fn parse_cursor(context: &SourceContext, pair: Pair<Rule>) -> Result<InputEvent, ScriptError> {
    let whole = pair.clone();
    let mut numbers = Vec::with_capacity(2);
    let mut zoom = Zoom::ONE;
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::number => numbers.push(parse_number(context, &p)?),
            Rule::zoom => {
                let Some(value) = p.clone().into_inner().next() else {
                    return Err(invalid(context, &p, "missing zoom factor"));
                };
                let factor = parse_number(context, &value)?;
                zoom = Zoom::try_new(factor)
                    .map_err(|e| invalid(context, &value, format!("zoom {}", e)))?;
            }
            _ => {}
        }
    }
    match numbers[..] {
        [x, y] => Ok(InputEvent::CursorMoved { point: pt(x, y), zoom }),
        _ => Err(invalid(context, &whole, "expected two coordinates")),
    }
}

fn parse_word<'a>(context: &SourceContext, pair: Pair<'a, Rule>) -> Result<Pair<'a, Rule>, ScriptError> {
    let whole = pair.clone();
    pair.into_inner()
        .find(|p| p.as_rule() == Rule::word)
        .ok_or_else(|| invalid(context, &whole, "missing name"))
}

fn parse_button(context: &SourceContext, pair: Pair<Rule>) -> Result<Button, ScriptError> {
    let word = parse_word(context, pair)?;
    Button::from_name(word.as_str()).ok_or_else(|| {
        invalid(
            context,
            &word,
            format!("unknown button `{}` (primary, secondary, tertiary)", word.as_str()),
        )
    })
}

fn parse_command(context: &SourceContext, pair: Pair<Rule>) -> Result<Command, ScriptError> {
    let word = parse_word(context, pair)?;
    Command::from_name(word.as_str())
        .ok_or_else(|| invalid(context, &word, format!("unknown command `{}`", word.as_str())))
}

fn parse_expectation(context: &SourceContext, pair: Pair<Rule>) -> Result<Expectation, ScriptError> {
    let whole = pair.clone();
    let Some(subject) = pair.into_inner().next() else {
        return Err(invalid(context, &whole, "missing expectation"));
    };
    let rule = subject.as_rule();
    let mut args = subject.clone().into_inner();
    let mut next_arg = || {
        args.next()
            .ok_or_else(|| invalid(context, &subject, "missing value"))
    };

    let expectation = match rule {
        Rule::expect_vertices => Expectation::Vertices(parse_index(context, &next_arg()?)?),
        Rule::expect_area => Expectation::Area(parse_number(context, &next_arg()?)?),
        Rule::expect_current => Expectation::Current(parse_index(context, &next_arg()?)?),
        Rule::expect_mode => {
            let value = next_arg()?;
            let mode = match value.as_str() {
                "off" => SimplifyMode::Off,
                "1" => SimplifyMode::Units,
                "0.1" => SimplifyMode::Tenths,
                "0.01" => SimplifyMode::Hundredths,
                other => return Err(invalid(context, &value, format!("unknown mode `{}`", other))),
            };
            Expectation::Mode(mode)
        }
        Rule::expect_centroid => {
            Expectation::Centroid(parse_optional_point(context, subject.clone().into_inner(), &subject)?)
        }
        Rule::expect_selected => {
            Expectation::Selected(parse_optional_index(context, subject.clone().into_inner(), &subject)?)
        }
        Rule::expect_clipboard => {
            Expectation::Clipboard(parse_optional_index(context, subject.clone().into_inner(), &subject)?)
        }
        Rule::expect_vertex => {
            let mut inner = subject.clone().into_inner();
            let Some(index) = inner.next() else {
                return Err(invalid(context, &subject, "missing vertex index"));
            };
            Expectation::Vertex {
                index: parse_index(context, &index)?,
                point: parse_optional_point(context, inner, &subject)?,
            }
        }
        other => return Err(invalid(context, &subject, format!("unexpected {:?}", other))),
    };
    Ok(expectation)
}

// ============================================================================
// Replay
// ============================================================================

fn fmt_point(p: Option<Point>) -> String {
    match p {
        Some(p) => format!("{} {}", p.x, p.y),
        None => "none".to_string(),
    }
}

fn fmt_index(i: Option<usize>) -> String {
    i.map_or_else(|| "none".to_string(), |i| i.to_string())
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= EXPECT_TOLERANCE
}

fn points_close(a: Option<Point>, b: Option<Point>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => close(a.x, b.x) && close(a.y, b.y),
        (None, None) => true,
        _ => false,
    }
}

impl Expectation {
    /// Compare against `editor`; on mismatch return (expected, actual) descriptions.
    pub fn check(&self, editor: &Editor) -> Result<(), (String, String)> {
        let shape = editor.current_shape();
        let (ok, expected, actual) = match *self {
            Expectation::Vertices(n) => {
                let actual = shape.valid_count();
                (actual == n, format!("vertices {}", n), format!("vertices {}", actual))
            }
            Expectation::Area(area) => {
                let actual = shape.area();
                (close(actual, area), format!("area {}", area), format!("area {}", actual))
            }
            Expectation::Centroid(c) => {
                let actual = shape.properties().centroid;
                (
                    points_close(actual, c),
                    format!("centroid {}", fmt_point(c)),
                    format!("centroid {}", fmt_point(actual)),
                )
            }
            Expectation::Selected(s) => {
                let actual = editor.selected();
                (
                    actual == s,
                    format!("selected {}", fmt_index(s)),
                    format!("selected {}", fmt_index(actual)),
                )
            }
            Expectation::Current(c) => {
                let actual = editor.current_index();
                (actual == c, format!("current {}", c), format!("current {}", actual))
            }
            Expectation::Clipboard(c) => {
                let actual = editor.clipboard();
                (
                    actual == c,
                    format!("clipboard {}", fmt_index(c)),
                    format!("clipboard {}", fmt_index(actual)),
                )
            }
            Expectation::Vertex { index, point } => {
                let actual = shape
                    .vertex(index)
                    .and_then(|v| v.valid.then_some(v.point));
                (
                    points_close(actual, point),
                    format!("vertex {} {}", index, fmt_point(point)),
                    format!("vertex {} {}", index, fmt_point(actual)),
                )
            }
            Expectation::Mode(mode) => {
                let actual = editor.simplify_mode();
                (actual == mode, format!("mode {}", mode), format!("mode {}", actual))
            }
        };
        if ok { Ok(()) } else { Err((expected, actual)) }
    }
}

impl Script {
    pub fn name(&self) -> &str {
        &self.context.name
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// Replay every step against `editor`, stopping at the first failure.
    pub fn run(&self, editor: &mut Editor) -> Result<(), ScriptError> {
        for step in &self.steps {
            self.run_step(editor, step)?;
        }
        debug!(script = %self.context.name, steps = self.steps.len(), "script finished");
        Ok(())
    }

    fn run_step(&self, editor: &mut Editor, step: &ScriptStep) -> Result<(), ScriptError> {
        match step.step {
            Step::Input(event) => match (editor.handle(event), step.fails) {
                (Ok(()), false) | (Err(_), true) => Ok(()),
                (Ok(()), true) => Err(ScriptError::ExpectationFailed {
                    expected: "step to fail".to_string(),
                    actual: "success".to_string(),
                    src: self.context.named_source(),
                    span: step.span,
                }),
                (Err(source), false) => Err(ScriptError::StepFailed {
                    source,
                    src: self.context.named_source(),
                    span: step.span,
                }),
            },
            Step::Expect(expectation) => {
                expectation
                    .check(editor)
                    .map_err(|(expected, actual)| ScriptError::ExpectationFailed {
                        expected,
                        actual,
                        src: self.context.named_source(),
                        span: step.span,
                    })
            }
        }
    }
}

/// Parse `source` and replay it against `editor`.
pub fn run_script(name: &str, source: &str, editor: &mut Editor) -> Result<(), ScriptError> {
    parse_script(name, source)?.run(editor)
}
