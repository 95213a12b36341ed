//! Error types for the core geometry crate.

use thiserror::Error;

/// Errors raised while constructing geometry values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The quantization step is zero, negative or not finite.
    #[error("Invalid tolerance: {0} (must be finite and greater than zero)")]
    InvalidTolerance(f64),

    /// A polygon has fewer than three distinct vertices or zero area.
    #[error("Degenerate polygon: {0}")]
    DegeneratePolygon(String),

    /// An arc edge was requested from a contour that must be straight-edged.
    #[error("Contour contains an arc at edge {index}; segment it first")]
    UnsegmentedArc {
        /// Index of the offending edge.
        index: usize,
    },
}

/// Result type alias for geometry construction.
pub type GeometryResult<T> = Result<T, GeometryError>;
