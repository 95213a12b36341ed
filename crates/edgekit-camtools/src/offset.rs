//! Offset Engine
//!
//! Radius compensation for closed contours. The buffering itself is
//! delegated to a [`PolygonBuffer`]; [`CavalierBuffer`] is the default
//! implementation built on `cavalier_contours` parallel offsets.

use crate::arc_segmenter::{ArcSegmenter, SegmentationMode};
use crate::error::Diagnostic;
use crate::nesting::{NestedContour, OffsetDirection};
use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};
use edgekit_core::{Contour, Edge, Point, Polygon};
use std::panic;
use thiserror::Error;
use tracing::{debug, warn};

const BULGE_EPS: f64 = 1e-9;

/// Why an offset produced no usable geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OffsetFailure {
    #[error("offset collapsed to empty geometry")]
    Empty,

    #[error("offset primitive panicked")]
    Panicked,

    #[error("offset result is invalid: {0}")]
    Invalid(String),
}

/// A robust polygon buffering primitive.
///
/// Positive `distance` grows the ring, negative shrinks it. The result may
/// hold several rings when shrinking splits a contour.
pub trait PolygonBuffer {
    fn offset(&self, polygon: &Polygon, distance: f64) -> Result<Vec<Contour>, OffsetFailure>;
}

/// Parallel offset via `cavalier_contours`.
///
/// Rounded joins come back as bulged vertices and are returned as arc edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct CavalierBuffer;

impl CavalierBuffer {
    /// Clockwise polyline, so a positive cavalier offset (to the left) grows it.
    fn to_polyline(polygon: &Polygon) -> Polyline<f64> {
        let ring = polygon.clone().into_clockwise();
        let mut pline: Polyline<f64> = Polyline::new();
        for p in ring.points() {
            pline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
        }
        pline.set_is_closed(true);
        pline
    }

    fn to_contour(pline: &Polyline<f64>) -> Contour {
        let vertices = &pline.vertex_data;
        let count = vertices.len();
        let edges = (0..count)
            .map(|i| {
                let v1 = vertices[i];
                let v2 = vertices[(i + 1) % count];
                bulge_to_edge(v1, v2)
            })
            .collect();
        Contour::new(edges)
    }
}

impl PolygonBuffer for CavalierBuffer {
    fn offset(&self, polygon: &Polygon, distance: f64) -> Result<Vec<Contour>, OffsetFailure> {
        let pline = Self::to_polyline(polygon);
        let offsets = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            pline.parallel_offset(distance)
        }))
        .map_err(|_| OffsetFailure::Panicked)?;

        let contours: Vec<Contour> = offsets
            .iter()
            .filter(|p| p.is_closed() && p.vertex_count() >= 2)
            .map(Self::to_contour)
            .collect();

        if contours.is_empty() {
            return Err(OffsetFailure::Empty);
        }

        let original = polygon.area();
        for contour in &contours {
            let area = contour_area(contour).map_err(OffsetFailure::Invalid)?;
            let grew = area > original;
            if (distance > 0.0 && !grew) || (distance < 0.0 && grew) {
                return Err(OffsetFailure::Invalid(format!(
                    "area went from {:.4} to {:.4} for distance {:.4}",
                    original, area, distance
                )));
            }
        }

        Ok(contours)
    }
}

/// Converts one polyline segment into an edge.
fn bulge_to_edge(v1: PlineVertex<f64>, v2: PlineVertex<f64>) -> Edge {
    let start = Point::new(v1.x, v1.y);
    let end = Point::new(v2.x, v2.y);
    let chord_len = start.distance_to(&end);

    if v1.bulge.abs() < BULGE_EPS || chord_len < BULGE_EPS {
        return Edge::line(start, end);
    }

    let theta = 4.0 * v1.bulge.atan();
    let radius = chord_len / (2.0 * (theta / 2.0).sin());
    let dist_to_center = radius.abs() * (theta.abs() / 2.0).cos();

    let mx = (v1.x + v2.x) / 2.0;
    let my = (v1.y + v2.y) / 2.0;

    // Left normal of the chord
    let nx = -(v2.y - v1.y) / chord_len;
    let ny = (v2.x - v1.x) / chord_len;

    let sign = if v1.bulge > 0.0 { 1.0 } else { -1.0 };
    let center = Point::new(
        mx + nx * dist_to_center * sign,
        my + ny * dist_to_center * sign,
    );

    Edge::arc(start, end, center, v1.bulge < 0.0)
}

/// Enclosed area of a closed contour, arcs included.
pub fn contour_area(contour: &Contour) -> Result<f64, String> {
    ArcSegmenter::new(SegmentationMode::MaxDeviation(1e-4))
        .polygon(contour)
        .map(|p| p.area())
        .map_err(|e| e.to_string())
}

/// A contour after radius compensation.
#[derive(Debug, Clone)]
pub struct CompensatedContour {
    /// Index of the source contour
    pub index: usize,
    pub level: usize,
    pub direction: OffsetDirection,
    /// Signed distance that was applied
    pub distance: f64,
    pub contour: Contour,
}

/// Offsets every nested contour by the tool radius in its parity direction.
///
/// Infeasible contours are skipped and reported; the rest keep the input
/// (deepest-first) order.
pub fn compensate<B: PolygonBuffer + ?Sized>(
    buffer: &B,
    nested: &[NestedContour],
    tool_radius: f64,
) -> (Vec<CompensatedContour>, Vec<Diagnostic>) {
    let mut compensated = Vec::new();
    let mut diagnostics = Vec::new();

    for item in nested {
        let distance = item.offset_distance(tool_radius);
        match buffer.offset(&item.polygon, distance) {
            Ok(contours) => {
                debug!(
                    "Contour {} (level {}) offset by {:.3} into {} ring(s)",
                    item.index,
                    item.level,
                    distance,
                    contours.len()
                );
                compensated.extend(contours.into_iter().map(|contour| CompensatedContour {
                    index: item.index,
                    level: item.level,
                    direction: item.direction(),
                    distance,
                    contour,
                }));
            }
            Err(failure) => {
                warn!(
                    "Skipping contour {}: offset by {:.3} failed: {}",
                    item.index, distance, failure
                );
                diagnostics.push(Diagnostic::OffsetInfeasible {
                    loop_index: item.index,
                    distance,
                    reason: failure.to_string(),
                });
            }
        }
    }

    (compensated, diagnostics)
}
