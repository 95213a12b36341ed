//! # EdgeKit
//!
//! A PCB board-outline router. EdgeKit reads the edge-cuts layer of a board
//! (Gerber, or raw draw-command records as JSON), rebuilds its contours, and
//! writes G-code that routes every contour with the cutter offset by its
//! radius: outward around the board edge, inward inside cut-outs.
//!
//! ## Architecture
//!
//! EdgeKit is organized as a workspace with multiple crates:
//!
//! 1. **edgekit-core** - Geometry data model: points, edges, contours, polygons
//! 2. **edgekit-settings** - Machine, tool and geometry configuration
//! 3. **edgekit-camtools** - Decoding, contour reconstruction, compensation and G-code output
//! 4. **edgekit** - Command line binary that integrates all crates

pub mod cli;

pub use edgekit_camtools::{
    BoardOutlineConverter, CamToolError, ConversionReport, Diagnostic, DrawCommand, GerberDecoder,
};
pub use edgekit_core::{Contour, Edge, Point, Polygon, Tolerance};
pub use edgekit_settings::{Config, GeometrySettings, MachineSettings, ToolSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so the program can be written to stdout.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
