//! Error types with diagnostics using miette
//!
//! Editing errors are local and recoverable: the in-memory state is left as it
//! was and the caller decides whether to retry or pick another shape or slot.
//! Script errors carry source spans for readable reports from the replay tool.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source context for script error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (file name or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Editing Errors
// ============================================================================

/// Errors raised by editor operations and persistence
#[derive(Error, Diagnostic, Debug)]
pub enum EditError {
    #[error("index {index} is outside capacity {capacity}")]
    #[diagnostic(code(polydesigner::invalid_index))]
    InvalidIndex { index: usize, capacity: usize },

    #[error("shape is degenerate ({valid_vertices} valid vertices, area {area})")]
    #[diagnostic(
        code(polydesigner::degenerate_shape),
        help("centroid-based operations need at least 3 vertices enclosing a non-zero area")
    )]
    DegenerateShape { valid_vertices: usize, area: f64 },

    #[error("shape file {} is unavailable", .path.display())]
    #[diagnostic(code(polydesigner::persistence_unavailable))]
    PersistenceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("shape file {} is corrupt: {reason}", .path.display())]
    #[diagnostic(
        code(polydesigner::corrupt_shape_file),
        help("shape files hold exactly 16 records of 24 bytes; delete the file to start the slot fresh")
    )]
    CorruptShapeFile { path: PathBuf, reason: String },
}

// ============================================================================
// Script Errors
// ============================================================================

/// Errors from parsing or running a session script
#[derive(Error, Diagnostic, Debug)]
pub enum ScriptError {
    #[error("syntax error: {message}")]
    #[diagnostic(code(polydesigner::script::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid value: {message}")]
    #[diagnostic(code(polydesigner::script::invalid_value))]
    InvalidValue {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("this value")]
        span: SourceSpan,
    },

    #[error("expectation failed: expected {expected}, found {actual}")]
    #[diagnostic(code(polydesigner::script::expectation_failed))]
    ExpectationFailed {
        expected: String,
        actual: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("expectation declared here")]
        span: SourceSpan,
    },

    #[error("step failed: {source}")]
    #[diagnostic(code(polydesigner::script::step_failed))]
    StepFailed {
        #[source]
        source: EditError,
        #[source_code]
        src: NamedSource<String>,
        #[label("while running this step")]
        span: SourceSpan,
    },
}
