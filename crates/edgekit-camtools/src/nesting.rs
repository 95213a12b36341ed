//! Nesting Analyzer
//!
//! Assigns every closed contour a nesting level: the number of other
//! contours that strictly contain it. Even levels are outer boundaries
//! (material outside, compensate outward); odd levels are cut-outs
//! (material inside, compensate inward).
//!
//! Levels come from a direct pairwise containment count rather than a sort,
//! because containment is only a partial order. Contours that cross each
//! other have no meaningful level and are rejected.

use crate::error::{CamToolError, CamToolResult};
use edgekit_core::{Point, PointLocation, Polygon};
use tracing::debug;

/// Direction of radius compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetDirection {
    Outward,
    Inward,
}

impl OffsetDirection {
    pub fn from_level(level: usize) -> Self {
        if level % 2 == 0 {
            OffsetDirection::Outward
        } else {
            OffsetDirection::Inward
        }
    }

    /// Signed offset distance: positive expands, negative shrinks.
    pub fn signed(&self, radius: f64) -> f64 {
        match self {
            OffsetDirection::Outward => radius,
            OffsetDirection::Inward => -radius,
        }
    }
}

impl std::fmt::Display for OffsetDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OffsetDirection::Outward => write!(f, "outward"),
            OffsetDirection::Inward => write!(f, "inward"),
        }
    }
}

/// Relation of one polygon to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// The second polygon lies inside the first
    Contains,
    /// The second polygon is not inside the first
    Excludes,
    /// The boundaries cross or coincide
    Overlaps,
}

/// A closed contour with its nesting level.
#[derive(Debug, Clone)]
pub struct NestedContour {
    /// Index of the contour in the analyzer's input
    pub index: usize,
    pub level: usize,
    pub polygon: Polygon,
}

impl NestedContour {
    pub fn direction(&self) -> OffsetDirection {
        OffsetDirection::from_level(self.level)
    }

    pub fn offset_distance(&self, tool_radius: f64) -> f64 {
        self.direction().signed(tool_radius)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NestingAnalyzer {
    boundary_eps: f64,
}

impl Default for NestingAnalyzer {
    fn default() -> Self {
        Self { boundary_eps: 1e-6 }
    }
}

impl NestingAnalyzer {
    /// `boundary_eps` is the distance under which a vertex counts as on an edge.
    pub fn new(boundary_eps: f64) -> Self {
        Self { boundary_eps }
    }

    /// Classifies `inner` against `outer`.
    pub fn containment(&self, outer: &Polygon, inner: &Polygon) -> Containment {
        if !bounds_overlap(outer.bounds(), inner.bounds()) {
            return Containment::Excludes;
        }
        if boundaries_cross(outer, inner) {
            return Containment::Overlaps;
        }

        let (mut inside, mut outside) = (0usize, 0usize);
        for p in inner.points() {
            match outer.locate(*p, self.boundary_eps) {
                PointLocation::Inside => inside += 1,
                PointLocation::Outside => outside += 1,
                PointLocation::Boundary => {}
            }
        }

        match (inside, outside) {
            (0, 0) => Containment::Overlaps,
            (_, 0) => Containment::Contains,
            (0, _) => Containment::Excludes,
            _ => Containment::Overlaps,
        }
    }

    /// Computes levels and returns the contours deepest first.
    ///
    /// Ties keep input order. `polygons` pairs each ring with the index used
    /// in error reports.
    pub fn analyze(&self, polygons: Vec<(usize, Polygon)>) -> CamToolResult<Vec<NestedContour>> {
        let mut levels = vec![0usize; polygons.len()];

        for a in 0..polygons.len() {
            for b in (a + 1)..polygons.len() {
                let (ia, pa) = (&polygons[a].0, &polygons[a].1);
                let (ib, pb) = (&polygons[b].0, &polygons[b].1);
                let overlap = CamToolError::OverlappingContours {
                    first: *ia,
                    second: *ib,
                };

                match (self.containment(pa, pb), self.containment(pb, pa)) {
                    (Containment::Overlaps, _) | (_, Containment::Overlaps) => return Err(overlap),
                    (Containment::Contains, Containment::Contains) => return Err(overlap),
                    (Containment::Contains, Containment::Excludes) => levels[b] += 1,
                    (Containment::Excludes, Containment::Contains) => levels[a] += 1,
                    (Containment::Excludes, Containment::Excludes) => {}
                }
            }
        }

        let mut nested: Vec<NestedContour> = polygons
            .into_iter()
            .zip(levels)
            .map(|((index, polygon), level)| {
                debug!("Contour {} has nesting level {}", index, level);
                NestedContour {
                    index,
                    level,
                    polygon,
                }
            })
            .collect();

        nested.sort_by(|a, b| b.level.cmp(&a.level));
        Ok(nested)
    }
}

fn bounds_overlap(a: (f64, f64, f64, f64), b: (f64, f64, f64, f64)) -> bool {
    a.0 <= b.2 && b.0 <= a.2 && a.1 <= b.3 && b.1 <= a.3
}

fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// True when some pair of edges intersects at a point interior to both.
fn boundaries_cross(a: &Polygon, b: &Polygon) -> bool {
    a.segments().any(|(p1, p2)| {
        b.segments().any(|(q1, q2)| {
            let d1 = orient(p1, p2, q1);
            let d2 = orient(p1, p2, q2);
            let d3 = orient(q1, q2, p1);
            let d4 = orient(q1, q2, p2);
            d1 * d2 < 0.0 && d3 * d4 < 0.0
        })
    })
}
