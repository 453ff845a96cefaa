//! Quantize/simplify previews
//!
//! The preview is a separate shape built by rounding every valid vertex of the
//! live shape to a precision step. Cycling the mode and rebuilding the preview
//! are separate steps; the editor calls them in sequence.

use std::fmt;

use crate::geometry::quantize_point;
use crate::shape::Shape;

/// Quantization precision, cycled Off → 1 → 0.1 → 0.01 → Off
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimplifyMode {
    #[default]
    Off,
    /// Whole grid units
    Units,
    /// 0.1 grid units
    Tenths,
    /// 0.01 grid units
    Hundredths,
}

impl SimplifyMode {
    /// The following mode in the cycle.
    pub fn next(self) -> Self {
        match self {
            SimplifyMode::Off => SimplifyMode::Units,
            SimplifyMode::Units => SimplifyMode::Tenths,
            SimplifyMode::Tenths => SimplifyMode::Hundredths,
            SimplifyMode::Hundredths => SimplifyMode::Off,
        }
    }

    /// Multiplier passed to `round(v * factor) / factor`; `None` when off.
    pub fn factor(self) -> Option<f64> {
        match self {
            SimplifyMode::Off => None,
            SimplifyMode::Units => Some(1.0),
            SimplifyMode::Tenths => Some(10.0),
            SimplifyMode::Hundredths => Some(100.0),
        }
    }

    pub fn is_active(self) -> bool {
        self != SimplifyMode::Off
    }
}

impl fmt::Display for SimplifyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimplifyMode::Off => write!(f, "off"),
            SimplifyMode::Units => write!(f, "1"),
            SimplifyMode::Tenths => write!(f, "0.1"),
            SimplifyMode::Hundredths => write!(f, "0.01"),
        }
    }
}

/// Build a quantized copy of `shape`, or `None` when `mode` is off.
///
/// Tombstones are copied as-is so slot indices line up with the live shape.
pub fn preview(shape: &Shape, mode: SimplifyMode) -> Option<Shape> {
    let factor = mode.factor()?;
    let mut quantized = shape.clone();
    quantized.map_points(|p| quantize_point(p, factor));
    Some(quantized)
}
