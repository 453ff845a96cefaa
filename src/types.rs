//! Strongly-typed numeric primitives for polydesigner.
//!
//! Points are plain `glam::DVec2` values in grid units. Angles and zoom factors get
//! newtypes so a raw `f64` never has to carry its meaning in a variable name.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use glam::DVec2;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// A position on the world grid, in grid units.
pub type Point = DVec2;

/// A displacement between two grid positions.
///
/// Same representation as [`Point`]; the alias documents intent at call sites
/// (`point + offset`, `cursor - centroid`).
pub type Offset = DVec2;

/// Shorthand constructor for a grid point.
#[inline]
pub fn pt(x: f64, y: f64) -> Point {
    DVec2::new(x, y)
}

/// Signed angle in radians (counter-clockwise positive)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Angle(pub f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);
    /// A quarter turn counter-clockwise (+90°)
    pub const QUARTER_TURN: Angle = Angle(std::f64::consts::FRAC_PI_2);

    #[inline]
    pub fn from_radians(rad: f64) -> Angle {
        Angle(rad)
    }

    #[inline]
    pub fn from_degrees(deg: f64) -> Angle {
        Angle(deg.to_radians())
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    /// The same rotation expressed in `(-π, π]`.
    ///
    /// Bearing differences jump by a full turn when the cursor crosses the
    /// negative x axis; wrapping keeps incremental drag angles small.
    pub fn wrapped(self) -> Angle {
        use std::f64::consts::{PI, TAU};
        let mut a = self.0 % TAU;
        if a > PI {
            a -= TAU;
        } else if a <= -PI {
            a += TAU;
        }
        Angle(a)
    }

    /// Check if this angle is finite (not NaN or infinite)
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle { Angle(self.0 + rhs.0) }
}
impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle { Angle(self.0 - rhs.0) }
}
impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle { Angle(-self.0) }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Grid zoom factor.
///
/// Multiplies the visible half-extent of the grid: at zoom 2.0 the screen shows
/// twice as many grid units, so one screen pixel covers twice the world distance.
/// Always finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Zoom(f64);

impl Zoom {
    pub const ONE: Zoom = Zoom(1.0);

    /// Create a Zoom with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(factor: f64) -> Result<Zoom, NumericError> {
        if factor.is_nan() {
            Err(NumericError::NaN)
        } else if factor.is_infinite() {
            Err(NumericError::Infinite)
        } else if factor == 0.0 {
            Err(NumericError::Zero)
        } else if factor < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Zoom(factor))
        }
    }

    #[inline]
    pub fn factor(self) -> f64 {
        self.0
    }

    /// Squared factor, used to scale squared world distances.
    #[inline]
    pub fn squared(self) -> f64 {
        self.0 * self.0
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Zoom::ONE
    }
}

impl fmt::Display for Zoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    // ==================== Angle tests ====================

    #[test]
    fn angle_degree_round_trip() {
        let a = Angle::from_degrees(90.0);
        assert!((a.radians() - PI / 2.0).abs() < 1e-12);
        assert!((a.degrees() - 90.0).abs() < 1e-12);
        assert!((a.radians() - Angle::QUARTER_TURN.radians()).abs() < 1e-12);
    }

    #[test]
    fn angle_arithmetic() {
        let a = Angle(1.0);
        let b = Angle(0.25);
        assert_eq!(a + b, Angle(1.25));
        assert_eq!(a - b, Angle(0.75));
        assert_eq!(-a, Angle(-1.0));
    }

    #[test]
    fn angle_wrapped_stays_in_half_open_range() {
        let crossing = Angle(-PI + 0.1) - Angle(PI - 0.1);
        let w = crossing.wrapped();
        assert!((w.radians() - 0.2).abs() < 1e-12, "got {}", w.radians());

        assert!((Angle(PI).wrapped().radians() - PI).abs() < 1e-12);
        assert!((Angle(-PI).wrapped().radians() - PI).abs() < 1e-12);
        assert!((Angle(2.5 * PI).wrapped().radians() - PI / 2.0).abs() < 1e-9);
    }

    // ==================== Zoom tests ====================

    #[test]
    fn zoom_try_new_valid() {
        assert_eq!(Zoom::try_new(1.0), Ok(Zoom::ONE));
        assert!(Zoom::try_new(0.25).is_ok());
    }

    #[test]
    fn zoom_try_new_rejects_zero() {
        assert_eq!(Zoom::try_new(0.0), Err(NumericError::Zero));
    }

    #[test]
    fn zoom_try_new_rejects_negative() {
        assert_eq!(Zoom::try_new(-2.0), Err(NumericError::Negative));
    }

    #[test]
    fn zoom_try_new_rejects_nan() {
        assert_eq!(Zoom::try_new(f64::NAN), Err(NumericError::NaN));
    }

    #[test]
    fn zoom_try_new_rejects_infinity() {
        assert_eq!(Zoom::try_new(f64::INFINITY), Err(NumericError::Infinite));
    }

    #[test]
    fn zoom_squared() {
        let z = Zoom::try_new(3.0).unwrap();
        assert_eq!(z.squared(), 9.0);
        assert_eq!(Zoom::default(), Zoom::ONE);
    }
}
