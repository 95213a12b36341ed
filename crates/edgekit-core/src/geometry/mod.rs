//! Geometry primitives.

pub mod contour;
pub mod edge;
pub mod point;
pub mod polygon;
