//! Arc Segmenter
//!
//! Approximates circular arcs with straight segments so that contours can be
//! turned into polygons for containment tests and offsetting.

use edgekit_core::{Contour, Edge, GeometryResult, Point, Polygon};
use edgekit_settings::GeometrySettings;
use std::f64::consts::FRAC_PI_2;

/// How many segments an arc is split into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentationMode {
    /// Fixed number of segments per arc, whatever its size
    FixedCount(usize),
    /// Enough segments that no chord strays further than this from the arc (mm)
    MaxDeviation(f64),
}

impl Default for SegmentationMode {
    fn default() -> Self {
        SegmentationMode::FixedCount(20)
    }
}

/// Converts arcs to line segments
#[derive(Debug, Clone, Copy, Default)]
pub struct ArcSegmenter {
    mode: SegmentationMode,
}

impl ArcSegmenter {
    pub fn new(mode: SegmentationMode) -> Self {
        Self { mode }
    }

    /// Deviation-bounded when `arc_max_deviation` is set, fixed count otherwise.
    pub fn from_settings(settings: &GeometrySettings) -> Self {
        let mode = match settings.arc_max_deviation {
            Some(deviation) => SegmentationMode::MaxDeviation(deviation),
            None => SegmentationMode::FixedCount(settings.arc_segment_count),
        };
        Self::new(mode)
    }

    pub fn mode(&self) -> SegmentationMode {
        self.mode
    }

    /// Segment count for an arc of the given radius and signed sweep.
    pub fn segment_count(&self, radius: f64, sweep: f64) -> usize {
        match self.mode {
            SegmentationMode::FixedCount(count) => count.max(1),
            SegmentationMode::MaxDeviation(deviation) => {
                // Never span more than a quarter turn with one chord.
                let minimum = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
                if radius <= 0.0 {
                    return minimum;
                }
                let step = 2.0 * (1.0 - deviation / radius).clamp(-1.0, 1.0).acos();
                if step <= 0.0 {
                    return minimum;
                }
                ((sweep.abs() / step).ceil() as usize).max(minimum)
            }
        }
    }

    /// Lazily splits one edge. Lines pass through unchanged.
    pub fn segment_edge(&self, edge: &Edge) -> Segments {
        match *edge {
            Edge::Line { .. } => Segments::single(*edge),
            Edge::Arc {
                start,
                end,
                center,
                ..
            } => {
                let radius = center.distance_to(&start);
                let (start_angle, sweep) = edge.arc_angles().unwrap_or((0.0, 0.0));
                Segments {
                    line: None,
                    arc: Some(ArcWalk {
                        center,
                        radius,
                        start_angle,
                        sweep,
                        end,
                        count: self.segment_count(radius, sweep),
                        next: 1,
                        previous: start,
                    }),
                }
            }
        }
    }

    /// Returns a straight-edged copy of the contour.
    pub fn segment_contour(&self, contour: &Contour) -> Contour {
        Contour::new(
            contour
                .edges()
                .iter()
                .flat_map(|edge| self.segment_edge(edge))
                .collect(),
        )
    }

    /// Segments a contour and builds its polygon ring.
    pub fn polygon(&self, contour: &Contour) -> GeometryResult<Polygon> {
        Polygon::from_contour(&self.segment_contour(contour))
    }
}

/// Iterator over the straight segments of one edge.
#[derive(Debug, Clone)]
pub struct Segments {
    line: Option<Edge>,
    arc: Option<ArcWalk>,
}

#[derive(Debug, Clone)]
struct ArcWalk {
    center: Point,
    radius: f64,
    start_angle: f64,
    sweep: f64,
    end: Point,
    count: usize,
    next: usize,
    previous: Point,
}

impl Segments {
    fn single(edge: Edge) -> Self {
        Self {
            line: Some(edge),
            arc: None,
        }
    }
}

impl Iterator for Segments {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        if let Some(line) = self.line.take() {
            return Some(line);
        }

        let walk = self.arc.as_mut()?;
        if walk.next > walk.count {
            return None;
        }

        // The final vertex is the arc's own endpoint so segmented contours stay connected.
        let point = if walk.next == walk.count {
            walk.end
        } else {
            let angle =
                walk.start_angle + walk.sweep * (walk.next as f64 / walk.count as f64);
            Point::new(
                walk.center.x + walk.radius * angle.cos(),
                walk.center.y + walk.radius * angle.sin(),
            )
        };
        let segment = Edge::line(walk.previous, point);
        walk.previous = point;
        walk.next += 1;
        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match (&self.line, &self.arc) {
            (Some(_), _) => 1,
            (None, Some(walk)) => (walk.count + 1).saturating_sub(walk.next),
            (None, None) => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Segments {}
