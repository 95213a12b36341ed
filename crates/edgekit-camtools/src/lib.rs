//! # EdgeKit CAM Tools
//!
//! Board-outline routing: turns the drawn outline of a printed circuit board
//! into a radius-compensated G-code toolpath.
//!
//! ## Pipeline
//!
//! - **Decoding**: Gerber outlines or raw JSON command records become [`DrawCommand`]s
//! - **Edge Extractor**: Walks the commands and emits quantized line and arc edges
//! - **Path Linker**: Rebuilds contours from edges in any order and orientation
//! - **Arc Segmenter**: Approximates arcs with line segments
//! - **Nesting Analyzer**: Assigns each closed contour a containment level
//! - **Offset Engine**: Compensates each contour by the tool radius, outward or inward by level parity
//! - **Toolpath Emitter**: Rotates contours to the entry point and writes G-code
//!
//! [`BoardOutlineConverter`] runs all stages and returns the program together
//! with the recoverable [`Diagnostic`]s found along the way.

pub mod arc_segmenter;
pub mod board_outline;
pub mod command;
pub mod error;
pub mod extractor;
pub mod gerber;
pub mod nesting;
pub mod offset;
pub mod path_linker;
pub mod toolpath;

// Re-export commonly used items
pub use arc_segmenter::{ArcSegmenter, SegmentationMode};
pub use board_outline::{read_commands, BoardOutlineConverter, ConversionReport};
pub use command::{
    decode_commands, parse_json_commands, DrawCommand, InterpolationCode, PenState, RawDrawCommand,
};
pub use error::{CamToolError, CamToolResult, Diagnostic, FileFormatError};
pub use extractor::EdgeExtractor;
pub use gerber::GerberDecoder;
pub use nesting::{Containment, NestedContour, NestingAnalyzer, OffsetDirection};
pub use offset::{compensate, CavalierBuffer, CompensatedContour, OffsetFailure, PolygonBuffer};
pub use path_linker::{LinkResult, PathLinker};
pub use toolpath::{
    format_coord, nearest_edge, rotate_to_entry, ProgramSummary, ToolpathBlock, ToolpathEmitter,
};
