//! Directed straight and circular edges.

use super::point::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;

/// A directed edge of a board contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Edge {
    Line {
        start: Point,
        end: Point,
    },
    Arc {
        start: Point,
        end: Point,
        center: Point,
        clockwise: bool,
    },
}

impl Edge {
    pub fn line(start: Point, end: Point) -> Self {
        Edge::Line { start, end }
    }

    pub fn arc(start: Point, end: Point, center: Point, clockwise: bool) -> Self {
        Edge::Arc {
            start,
            end,
            center,
            clockwise,
        }
    }

    pub fn start(&self) -> Point {
        match *self {
            Edge::Line { start, .. } | Edge::Arc { start, .. } => start,
        }
    }

    pub fn end(&self) -> Point {
        match *self {
            Edge::Line { end, .. } | Edge::Arc { end, .. } => end,
        }
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, Edge::Arc { .. })
    }

    /// The same geometry traversed in the opposite direction.
    ///
    /// Arcs keep their center and flip their winding.
    pub fn reversed(&self) -> Self {
        match *self {
            Edge::Line { start, end } => Edge::Line {
                start: end,
                end: start,
            },
            Edge::Arc {
                start,
                end,
                center,
                clockwise,
            } => Edge::Arc {
                start: end,
                end: start,
                center,
                clockwise: !clockwise,
            },
        }
    }

    /// Arc radius, measured from the center to the start point.
    pub fn radius(&self) -> Option<f64> {
        match self {
            Edge::Line { .. } => None,
            Edge::Arc { start, center, .. } => Some(center.distance_to(start)),
        }
    }

    /// Center relative to the start point (the `I`/`J` words of a G2/G3 move).
    pub fn center_offset(&self) -> Option<(f64, f64)> {
        match self {
            Edge::Line { .. } => None,
            Edge::Arc { start, center, .. } => Some((center.x - start.x, center.y - start.y)),
        }
    }

    /// Start angle and signed sweep of an arc, in radians.
    ///
    /// Clockwise arcs sweep negative, counter-clockwise arcs positive. An arc
    /// whose end coincides with its start is a full circle.
    pub fn arc_angles(&self) -> Option<(f64, f64)> {
        match *self {
            Edge::Line { .. } => None,
            Edge::Arc {
                start,
                end,
                center,
                clockwise,
            } => {
                let start_angle = (start.y - center.y).atan2(start.x - center.x);
                let end_angle = (end.y - center.y).atan2(end.x - center.x);
                Some((
                    start_angle,
                    normalized_sweep(start_angle, end_angle, clockwise),
                ))
            }
        }
    }

    /// Path length of the edge.
    pub fn length(&self) -> f64 {
        match self {
            Edge::Line { start, end } => start.distance_to(end),
            Edge::Arc { .. } => {
                let radius = self.radius().unwrap_or(0.0);
                let sweep = self.arc_angles().map(|(_, s)| s).unwrap_or(0.0);
                radius * sweep.abs()
            }
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Line { start, end } => write!(f, "Line({} -> {})", start, end),
            Edge::Arc {
                start,
                end,
                center,
                clockwise,
            } => write!(
                f,
                "Arc({} -> {}, center {}, {})",
                start,
                end,
                center,
                if *clockwise { "CW" } else { "CCW" }
            ),
        }
    }
}

/// Corrects the raw `atan2` end angle so the sweep has the arc's direction.
///
/// Returns `end - start` after adding or subtracting a full turn when the
/// naive end angle lies on the wrong side of the start angle.
pub fn normalized_sweep(start_angle: f64, end_angle: f64, clockwise: bool) -> f64 {
    let mut end_angle = end_angle;
    if clockwise {
        if end_angle >= start_angle {
            end_angle -= TAU;
        }
    } else if end_angle <= start_angle {
        end_angle += TAU;
    }
    let sweep = end_angle - start_angle;
    debug_assert!(sweep.abs() <= 2.0 * PI + 1e-9);
    sweep
}
