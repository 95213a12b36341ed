//! Points and the quantization grid.

use crate::error::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D point in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point without snapping it to any grid.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Returns this point translated by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Snaps this point onto the tolerance grid.
    pub fn quantize(self, tolerance: Tolerance) -> Self {
        tolerance.point(self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

/// Quantization grid step used to make endpoint comparison exact.
///
/// Two coordinates that round to the same grid index become bit-identical,
/// so extracted edges can be matched with `==` regardless of the noise
/// introduced by decimal-to-binary conversion upstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Tolerance(f64);

impl Tolerance {
    /// Default grid step: 1/64 mm.
    pub const DEFAULT_STEP: f64 = 1.0 / 64.0;

    /// Creates a tolerance grid, rejecting non-positive or non-finite steps.
    pub fn new(step: f64) -> GeometryResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(GeometryError::InvalidTolerance(step));
        }
        Ok(Self(step))
    }

    /// The grid step in millimeters.
    pub fn step(&self) -> f64 {
        self.0
    }

    /// Snaps a single coordinate onto the grid.
    pub fn snap(&self, value: f64) -> f64 {
        // Adding 0.0 folds -0.0 into 0.0.
        (value / self.0).round() * self.0 + 0.0
    }

    /// Builds a quantized point.
    pub fn point(&self, x: f64, y: f64) -> Point {
        Point::new(self.snap(x), self.snap(y))
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(Self::DEFAULT_STEP)
    }
}

impl TryFrom<f64> for Tolerance {
    type Error = GeometryError;

    fn try_from(step: f64) -> Result<Self, Self::Error> {
        Self::new(step)
    }
}

impl From<Tolerance> for f64 {
    fn from(tolerance: Tolerance) -> Self {
        tolerance.0
    }
}
