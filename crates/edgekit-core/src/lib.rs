//! # EdgeKit Core
//!
//! Geometry data model shared by the EdgeKit crates.
//!
//! - **Points** are quantized onto a tolerance grid when they come out of the
//!   edge extractor, so endpoint equality is exact.
//! - **Edges** are either straight lines or circular arcs.
//! - **Contours** are ordered, connected edge sequences (one board contour each).
//! - **Polygons** are straight-edged rings used for containment and offsetting.

pub mod error;
pub mod geometry;

pub use error::{GeometryError, GeometryResult};
pub use geometry::{
    contour::Contour,
    edge::{normalized_sweep, Edge},
    point::{Point, Tolerance},
    polygon::{PointLocation, Polygon},
};
