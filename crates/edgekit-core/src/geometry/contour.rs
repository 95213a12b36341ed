//! Contours: connected edge sequences forming one board loop.

use super::edge::Edge;
use super::point::Point;
use serde::{Deserialize, Serialize};

/// An ordered sequence of edges where each edge ends where the next begins.
///
/// A contour is closed when the last edge ends at the first edge's start.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contour {
    edges: Vec<Edge>,
}

impl Contour {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn start_point(&self) -> Option<Point> {
        self.edges.first().map(Edge::start)
    }

    pub fn end_point(&self) -> Option<Point> {
        self.edges.last().map(Edge::end)
    }

    pub fn is_closed(&self) -> bool {
        match (self.start_point(), self.end_point()) {
            (Some(start), Some(end)) => start == end,
            _ => false,
        }
    }

    /// True when every edge ends exactly where its successor starts.
    pub fn is_connected(&self) -> bool {
        self.edges.windows(2).all(|w| w[0].end() == w[1].start())
    }

    pub fn has_arcs(&self) -> bool {
        self.edges.iter().any(Edge::is_arc)
    }

    /// Total path length.
    pub fn length(&self) -> f64 {
        self.edges.iter().map(Edge::length).sum()
    }

    /// Cyclic reindex so that `first` becomes edge 0. Edge direction is kept.
    pub fn rotated(&self, first: usize) -> Self {
        if self.edges.is_empty() {
            return self.clone();
        }
        let mut edges = self.edges.clone();
        edges.rotate_left(first % self.edges.len());
        Self { edges }
    }
}

impl From<Vec<Edge>> for Contour {
    fn from(edges: Vec<Edge>) -> Self {
        Self::new(edges)
    }
}
