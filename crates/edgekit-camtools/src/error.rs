//! Error and diagnostic types for the CAM pipeline.
//!
//! Fatal conditions are [`CamToolError`] values and abort the run.
//! Recoverable geometry conditions are collected as [`Diagnostic`] values and
//! returned next to whatever could still be machined.

use edgekit_core::{Edge, GeometryError, Point};
use std::fmt;
use std::io;
use thiserror::Error;

/// Errors that abort a conversion.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// A draw command is missing a field or carries an unknown code.
    #[error("Malformed command #{index}: {reason}")]
    MalformedCommand { index: usize, reason: String },

    /// Two contours cross each other, so neither contains the other.
    #[error("Contours {first} and {second} partially overlap; nesting is undefined")]
    OverlappingContours { first: usize, second: usize },

    /// Invalid parameters were provided.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A geometry value could not be constructed.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// G-code text could not be written.
    #[error("G-code generation failed: {0}")]
    GenerationFailed(#[from] fmt::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A file format error occurred.
    #[error("File format error: {0}")]
    FileFormat(#[from] FileFormatError),
}

/// Errors related to input file decoding.
#[derive(Error, Debug)]
pub enum FileFormatError {
    /// The Gerber file could not be parsed.
    #[error("Gerber parse error: {0}")]
    GerberParseError(String),

    /// The file is empty or contains no usable data.
    #[error("Empty file: {0}")]
    EmptyFile(String),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// A recoverable problem found while reconstructing or compensating contours.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Edges that could not be linked to any other edge.
    DisconnectedGeometry { loop_index: usize, edges: Vec<Edge> },
    /// A reconstructed contour whose last point differs from its first.
    UnclosedLoop {
        loop_index: usize,
        start: Point,
        end: Point,
    },
    /// Radius compensation collapsed the contour; it is not machined.
    OffsetInfeasible {
        loop_index: usize,
        distance: f64,
        reason: String,
    },
}

impl Diagnostic {
    pub fn loop_index(&self) -> usize {
        match self {
            Diagnostic::DisconnectedGeometry { loop_index, .. }
            | Diagnostic::UnclosedLoop { loop_index, .. }
            | Diagnostic::OffsetInfeasible { loop_index, .. } => *loop_index,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DisconnectedGeometry { loop_index, edges } => {
                write!(f, "loop {}: {} disconnected edge(s)", loop_index, edges.len())?;
                for edge in edges {
                    write!(f, "; {}", edge)?;
                }
                Ok(())
            }
            Diagnostic::UnclosedLoop {
                loop_index,
                start,
                end,
            } => write!(
                f,
                "loop {}: not closed, starts at {} but ends at {}",
                loop_index, start, end
            ),
            Diagnostic::OffsetInfeasible {
                loop_index,
                distance,
                reason,
            } => write!(
                f,
                "loop {}: offset by {:.3} mm is infeasible ({})",
                loop_index, distance, reason
            ),
        }
    }
}
