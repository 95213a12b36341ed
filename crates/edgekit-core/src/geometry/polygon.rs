//! Straight-edged closed rings used for containment and offsetting.

use super::contour::Contour;
use super::edge::Edge;
use super::point::Point;
use crate::error::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};

const DUPLICATE_EPS: f64 = 1e-9;

/// Where a point lies relative to a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLocation {
    Inside,
    Outside,
    Boundary,
}

/// A closed ring of vertices. The closing vertex is implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Builds a ring, dropping repeated vertices and an explicit closing vertex.
    pub fn new(points: Vec<Point>) -> GeometryResult<Self> {
        let mut clean: Vec<Point> = Vec::with_capacity(points.len());
        for p in points {
            if let Some(last) = clean.last() {
                if last.distance_to(&p) < DUPLICATE_EPS {
                    continue;
                }
            }
            clean.push(p);
        }
        if clean.len() > 1 {
            let first = clean[0];
            if let Some(last) = clean.last() {
                if last.distance_to(&first) < DUPLICATE_EPS {
                    clean.pop();
                }
            }
        }

        if clean.len() < 3 {
            return Err(GeometryError::DegeneratePolygon(format!(
                "{} distinct vertices",
                clean.len()
            )));
        }

        let polygon = Self { points: clean };
        if polygon.signed_area().abs() < DUPLICATE_EPS {
            return Err(GeometryError::DegeneratePolygon("zero area".to_string()));
        }
        Ok(polygon)
    }

    /// Builds a ring from the start points of a straight-edged contour.
    pub fn from_contour(contour: &Contour) -> GeometryResult<Self> {
        if let Some(index) = contour.edges().iter().position(Edge::is_arc) {
            return Err(GeometryError::UnsegmentedArc { index });
        }
        Self::new(contour.edges().iter().map(Edge::start).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterates the ring's edges as `(start, end)` pairs, including the closing edge.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Shoelace area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        self.segments()
            .map(|(p1, p2)| p1.x * p2.y - p2.x * p1.y)
            .sum::<f64>()
            / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Returns the ring with clockwise winding.
    pub fn into_clockwise(mut self) -> Self {
        if !self.is_clockwise() {
            self.points.reverse();
        }
        self
    }

    /// `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.points.iter().fold(
            (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        )
    }

    /// Classifies a point. Points within `eps` of an edge are on the boundary.
    pub fn locate(&self, p: Point, eps: f64) -> PointLocation {
        if self
            .segments()
            .any(|(a, b)| distance_to_segment(p, a, b) <= eps)
        {
            return PointLocation::Boundary;
        }

        let mut inside = false;
        for (a, b) in self.segments() {
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }

        if inside {
            PointLocation::Inside
        } else {
            PointLocation::Outside
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
}
